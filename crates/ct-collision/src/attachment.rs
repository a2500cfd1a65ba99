//! Pick-up and drop-off of movable points.
//!
//! A movable point (a box) rides on whichever moving shape (a belt) it
//! currently overlaps.  Every tick:
//!
//! 1. a point whose parent is not among the shapes it overlaps is detached
//!    and keeps its global pose;
//! 2. a point with no parent that overlaps at least one shape is attached
//!    to the overlapping shape with the lowest `NodeId`.
//!
//! A point already riding an overlapping shape stays where it is even if it
//! also overlaps others.  Shapes in the point's own subtree are never
//! candidates, so a pass cannot fail half way with a cycle.

use ct_core::NodeId;
use ct_space::PoseTree;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::{ColliderStore, CollisionResult, Tag, TagPair, check_collisions};

/// Reparenting performed by one [`update_attachments`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AttachmentReport {
    pub attached: usize,
    pub detached: usize,
}

pub fn update_attachments(
    tree: &mut PoseTree,
    colliders: &ColliderStore,
    nodes: &[NodeId],
) -> CollisionResult<AttachmentReport> {
    let hits = check_collisions(tree, colliders, nodes, TagPair::PointAndMovingShape)?;
    let mut overlapping: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();
    for (point, shape) in hits {
        overlapping.entry(point).or_default().push(shape);
    }

    let mut report = AttachmentReport::default();
    for &node in nodes {
        if !colliders.has_tag(node, Tag::MovablePoint) {
            continue;
        }
        // A shape riding on the point itself can never become its parent.
        let shapes: Vec<NodeId> = overlapping
            .get(&node)
            .map(|hits| hits.iter().copied().filter(|&s| !tree.is_ancestor_or_self(node, s)).collect())
            .unwrap_or_default();

        if let Some(parent) = tree.parent(node) {
            if shapes.contains(&parent) {
                continue;
            }
            tree.detach(node)?;
            report.detached += 1;
            trace!(%node, %parent, "movable point dropped");
        }

        if let Some(&shape) = shapes.iter().min() {
            tree.attach(shape, node)?;
            report.attached += 1;
            trace!(%node, %shape, "movable point picked up");
        }
    }
    Ok(report)
}
