use ct_core::NodeId;
use ct_space::SpaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CollisionError {
    #[error("{node} is tagged for a {expected} check but has a different shape")]
    ShapeMismatch { node: NodeId, expected: &'static str },

    #[error(transparent)]
    Space(#[from] SpaceError),
}

pub type CollisionResult<T> = Result<T, CollisionError>;
