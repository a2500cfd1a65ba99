use thiserror::Error;

/// Failure while writing the pose trace.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("trace I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace CSV: {0}")]
    Csv(#[from] csv::Error),
}

pub type OutputResult<T> = Result<T, OutputError>;
