//! Routing error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("route requested from {0} to itself")]
    SameModule(String),

    #[error("unknown module {0:?}")]
    UnknownModule(String),

    #[error("no route from {from} to {to}")]
    NoRoute { from: String, to: String },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
