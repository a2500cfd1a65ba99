//! Pairwise collision tests and the tag-pair sweep.
//!
//! Both tests run a circular broad phase on global positions first, then an
//! exact clip test in the rectangle's local frame.

use ct_core::{NodeId, Pose, Vec2, normalize_deg};
use ct_space::PoseTree;

use crate::clip::segment_hits_centered_box;
use crate::{ColliderStore, CollisionError, CollisionResult, Shape, TagPair};

/// Does a segment of `length` at global pose `segment` touch a
/// `width × height` rectangle at global pose `rect`?
pub fn segment_vs_rectangle(
    segment: Pose,
    length: f64,
    rect: Pose,
    width: f64,
    height: f64,
) -> bool {
    let offset = segment.position - rect.position;
    let reach = Shape::rectangle(width, height).broad_radius() + Shape::segment(length).broad_radius();
    if offset.length() > reach {
        return false;
    }

    let local = offset.rotated_frame(-rect.rotation);
    let local_rot = normalize_deg(segment.rotation - rect.rotation);
    segment_hits_centered_box(width, height, local, local_rot, length)
}

/// Does the point `point` lie inside (or on the edge of) a
/// `width × height` rectangle at global pose `rect`?
///
/// The offset is rotated by `+rect.rotation`, the opposite of
/// [`segment_vs_rectangle`].  For rotated non-square rectangles the two
/// tests therefore disagree on which side is which; callers rely on the
/// current behaviour.
pub fn point_vs_rectangle(point: Vec2, rect: Pose, width: f64, height: f64) -> bool {
    let offset = point - rect.position;
    if offset.length() > Shape::rectangle(width, height).broad_radius() {
        return false;
    }

    let local = offset.rotated_frame(rect.rotation);
    segment_hits_centered_box(width, height, local, 0.0, 0.0)
}

/// Run the check for `pair` between two nodes already sorted into the
/// pair's first and second role.
pub fn check_pair(
    tree: &PoseTree,
    colliders: &ColliderStore,
    pair: TagPair,
    first: NodeId,
    second: NodeId,
) -> CollisionResult<bool> {
    let rect_dims = colliders
        .get(second)
        .and_then(|c| c.shape.rectangle_dims())
        .ok_or(CollisionError::ShapeMismatch { node: second, expected: "rectangle" })?;
    let (width, height) = rect_dims;
    let rect = tree.global_pose(second);

    match pair {
        TagPair::SegmentAndShape => {
            let length = colliders
                .get(first)
                .and_then(|c| c.shape.segment_length())
                .ok_or(CollisionError::ShapeMismatch { node: first, expected: "segment" })?;
            Ok(segment_vs_rectangle(tree.global_pose(first), length, rect, width, height))
        }
        // The movable side only contributes its position.
        TagPair::PointAndMovingShape => {
            Ok(point_vs_rectangle(tree.global_pose(first).position, rect, width, height))
        }
    }
}

/// Every colliding `(first, second)` pair among `nodes` for `pair`.
///
/// Nodes are split by the pair's tags: a node carrying the first tag is
/// only ever a first, even when it also carries the second.  Pairs come out
/// in the order the firsts and seconds appear in `nodes`.
pub fn check_collisions(
    tree: &PoseTree,
    colliders: &ColliderStore,
    nodes: &[NodeId],
    pair: TagPair,
) -> CollisionResult<Vec<(NodeId, NodeId)>> {
    let (tag_1, tag_2) = pair.tags();
    let mut firsts = Vec::new();
    let mut seconds = Vec::new();
    for &node in nodes {
        let Some(c) = colliders.get(node) else { continue };
        if c.has(tag_1) {
            firsts.push(node);
        } else if c.has(tag_2) {
            seconds.push(node);
        }
    }

    let mut hits = Vec::new();
    for &a in &firsts {
        for &b in &seconds {
            if check_pair(tree, colliders, pair, a, b)? {
                hits.push((a, b));
            }
        }
    }
    Ok(hits)
}
