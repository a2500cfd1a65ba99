use ct_core::NodeId;
use ct_space::PoseTree;

use crate::{ColliderStore, CollisionResult, TagPair, check_collisions};

/// Recompute the `is_colliding` flag of every collider among `nodes`.
///
/// All flags are cleared first, then both members of every
/// segment / segment-collidable hit are set.  Returns the number of hits.
pub fn update_collision_flags(
    tree: &PoseTree,
    colliders: &mut ColliderStore,
    nodes: &[NodeId],
) -> CollisionResult<usize> {
    for &node in nodes {
        if let Some(c) = colliders.get_mut(node) {
            c.is_colliding = false;
        }
    }

    let hits = check_collisions(tree, colliders, nodes, TagPair::SegmentAndShape)?;
    for &(a, b) in &hits {
        for n in [a, b] {
            if let Some(c) = colliders.get_mut(n) {
                c.is_colliding = true;
            }
        }
    }
    Ok(hits.len())
}
