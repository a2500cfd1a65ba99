use ct_core::{MovementId, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpaceError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    #[error("movement {movement} is not active on {node}")]
    MovementNotFound { node: NodeId, movement: MovementId },
}

pub type SpaceResult<T> = Result<T, SpaceError>;
