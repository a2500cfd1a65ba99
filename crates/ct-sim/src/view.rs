use ct_collision::{Shape, TagSet};
use ct_core::{NodeId, Pose};

/// Everything a front end needs to draw one node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    pub id: NodeId,
    pub name: String,
    pub parent: Option<NodeId>,
    /// Global pose.
    pub pose: Pose,
    /// `None` for nodes without collision data.
    pub shape: Option<Shape>,
    pub tags: TagSet,
    pub is_colliding: bool,
}
