use ct_collision::CollisionError;
use ct_core::CoreError;
use ct_space::SpaceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("pose tree error: {0}")]
    Space(#[from] SpaceError),

    #[error("collision error: {0}")]
    Collision(#[from] CollisionError),
}

pub type SimResult<T> = Result<T, SimError>;
