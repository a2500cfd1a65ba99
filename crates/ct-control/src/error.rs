use ct_modules::ModuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    /// The controller thread is gone: it panicked or was shut down.
    #[error("controller {controller} disconnected")]
    Disconnected { controller: String },

    #[error("failed to spawn controller thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error(transparent)]
    Module(#[from] ModuleError),
}

pub type ControlResult<T> = Result<T, ControlError>;
