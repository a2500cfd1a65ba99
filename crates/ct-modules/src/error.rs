use ct_core::CoreError;
use ct_sim::SimError;
use ct_space::SpaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModuleError {
    #[error("{module}: belt is already moving")]
    AlreadyTranslating { module: String },

    #[error("{module}: table is already rotating")]
    AlreadyRotating { module: String },

    #[error("{module}: table is not rotating")]
    NotRotating { module: String },

    #[error("layout error: {0}")]
    Layout(#[from] CoreError),

    #[error(transparent)]
    Sim(#[from] SimError),

    #[error(transparent)]
    Space(#[from] SpaceError),
}

pub type ModuleResult<T> = Result<T, ModuleError>;
