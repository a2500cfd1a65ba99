//! Unit tests for ct-collision.

use ct_core::{NodeId, Pose, Vec2};
use ct_space::PoseTree;

use crate::{Collider, ColliderStore, Shape, Tag, TagSet};

fn pose(x: f64, y: f64, rot: f64) -> Pose {
    Pose::new(Vec2::new(x, y), rot)
}

/// Origin root plus an empty collider table.
fn scene() -> (PoseTree, ColliderStore, NodeId) {
    let mut tree = PoseTree::new();
    let origin = tree.add_node("origin", Pose::IDENTITY, None).unwrap();
    (tree, ColliderStore::new(), origin)
}

fn add(
    tree: &mut PoseTree,
    colliders: &mut ColliderStore,
    name: &str,
    at: Pose,
    parent: NodeId,
    shape: Shape,
    tags: TagSet,
) -> NodeId {
    let id = tree.add_node(name, at, Some(parent)).unwrap();
    colliders.insert(id, Collider::new(shape, tags));
    id
}

// ── Clipping ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clip {
    use super::*;
    use crate::clip::{ClipBox, INSIDE, LEFT, LOWER, RIGHT, UPPER};

    #[test]
    fn outcodes() {
        let b = ClipBox::centered(2.0, 2.0);
        assert_eq!(b.outcode(Vec2::new(0.0, 0.0)), INSIDE);
        assert_eq!(b.outcode(Vec2::new(1.0, 1.0)), INSIDE);
        assert_eq!(b.outcode(Vec2::new(-2.0, 0.0)), LEFT);
        assert_eq!(b.outcode(Vec2::new(2.0, 2.0)), RIGHT | UPPER);
        assert_eq!(b.outcode(Vec2::new(-2.0, -2.0)), LEFT | LOWER);
    }

    #[test]
    fn crossing_segment_with_both_ends_outside() {
        let b = ClipBox::centered(2.0, 2.0);
        assert!(b.intersects_segment(Vec2::new(-3.0, 0.0), Vec2::new(3.0, 0.0)));
        assert!(b.intersects_segment(Vec2::new(-3.0, -3.0), Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn diagonal_miss_past_corner() {
        let b = ClipBox::centered(2.0, 2.0);
        // Passes the top-right corner on the outside: x + y = 2.5.
        assert!(!b.intersects_segment(Vec2::new(0.0, 2.5), Vec2::new(2.5, 0.0)));
    }

    #[test]
    fn same_side_rejected() {
        let b = ClipBox::centered(2.0, 2.0);
        assert!(!b.intersects_segment(Vec2::new(-3.0, 2.0), Vec2::new(3.0, 2.0)));
    }

    #[test]
    fn degenerate_point() {
        let b = ClipBox::centered(2.0, 2.0);
        assert!(b.intersects_segment(Vec2::new(0.5, 0.5), Vec2::new(0.5, 0.5)));
        assert!(!b.intersects_segment(Vec2::new(1.5, 0.5), Vec2::new(1.5, 0.5)));
    }
}

// ── Pairwise tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod pairwise {
    use super::*;
    use crate::{point_vs_rectangle, segment_vs_rectangle};

    #[test]
    fn segment_rectangle_table() {
        // (segment pos, segment rot, length, rect pos, rect rot, w, h, expected)
        #[rustfmt::skip]
        let cases = [
            ((9.0, 9.0),   0.0,   2.0,  (1.0, 1.0),  0.0,   3.0, 2.0, false),
            ((-1.0, -1.0), 0.0,   2.0,  (2.0, 2.0),  0.0,   1.0, 2.0, false),
            ((0.0, 0.0),   0.0,   1.0,  (0.0, 0.0),  0.0,   2.0, 2.0, true),
            ((1.1, 0.0),   0.0,   1.0,  (0.0, 0.0),  0.0,   2.0, 3.0, false),
            ((1.1, 0.0),   0.0,   1.0,  (0.0, 0.0),  90.0,  2.0, 3.0, true),
            ((1.1, 0.0),   180.0, 1.0,  (0.0, 0.0),  270.0, 2.0, 3.0, true),
            ((1.1, 0.0),   180.0, 1.0,  (0.0, 0.0),  180.0, 2.0, 3.0, false),
            ((1.0, -2.6),  180.0, 1.0,  (2.0, -2.0), 90.0,  1.0, 2.0, true),
            ((1.0, -2.6),  135.0, 10.0, (2.0, -2.0), 90.0,  1.0, 2.0, false),
            ((1.0, -2.6),  315.0, 10.0, (2.0, -2.0), 90.0,  1.0, 2.0, false),
            ((1.0, -2.6),  180.0, 1.0,  (2.0, -2.0), 0.0,   2.0, 1.0, true),
            ((0.0, 0.5),   0.0,   1.0,  (1.0, 1.0),  0.0,   2.0, 1.0, true),
            ((1.0, 1.1),   90.0,  2.0,  (0.0, 0.0),  0.0,   2.0, 2.0, false),
            ((1.0, 1.1),   45.0,  2.0,  (0.0, 0.0),  0.0,   2.0, 2.0, true),
            ((1.0, 1.1),   135.0, 2.0,  (0.0, 0.0),  0.0,   2.0, 2.0, false),
            ((0.0, 0.0),   34.0,  2.0,  (0.0, 0.0),  314.0, 2.0, 2.0, true),
        ];
        for (i, (sp, sr, len, rp, rr, w, h, expected)) in cases.into_iter().enumerate() {
            let got = segment_vs_rectangle(pose(sp.0, sp.1, sr), len, pose(rp.0, rp.1, rr), w, h);
            assert_eq!(got, expected, "case {i}");
        }
    }

    #[test]
    fn point_rectangle_table() {
        // (point, rect pos, rect rot, w, h, expected)
        #[rustfmt::skip]
        let cases = [
            ((0.0, 0.0), (0.0, 0.0), 0.0,  1.0, 1.0, true),
            ((9.0, 9.0), (0.0, 0.0), 0.0,  1.0, 1.0, false),
            ((0.0, 0.0), (0.0, 0.0), 91.0, 1.0, 1.0, true),
            ((9.0, 9.0), (0.0, 0.0), 91.0, 1.0, 1.0, false),
            ((1.0, 1.0), (0.0, 0.0), 0.0,  2.0, 2.0, true),
            ((1.1, 1.0), (0.0, 0.0), 0.0,  2.0, 2.0, false),
            ((0.0, 1.1), (0.0, 0.0), 0.0,  2.0, 2.0, false),
            ((0.0, 1.1), (0.0, 0.0), 45.0, 2.0, 2.0, true),
            ((1.0, 2.1), (1.0, 1.0), 45.0, 2.0, 2.0, true),
        ];
        for (i, (p, rp, rr, w, h, expected)) in cases.into_iter().enumerate() {
            let got = point_vs_rectangle(Vec2::new(p.0, p.1), pose(rp.0, rp.1, rr), w, h);
            assert_eq!(got, expected, "case {i}");
        }
    }

    /// Rotate a configuration clockwise about the world origin.
    fn turn(p: Pose, angle: f64) -> Pose {
        Pose::new(p.position.rotated_frame(angle), p.rotation + angle)
    }

    #[test]
    fn segment_test_invariant_under_common_rotation() {
        // Clear-cut cases only, away from any edge.
        let cases = [
            (pose(0.0, 0.0, 0.0), 1.0, pose(0.0, 0.0, 0.0), 2.0, 2.0, true),
            (pose(0.5, 0.3, 30.0), 0.4, pose(0.0, 0.0, 0.0), 4.0, 1.0, true),
            (pose(2.5, 0.0, 0.0), 1.0, pose(0.0, 0.0, 0.0), 4.0, 1.0, false),
            (pose(0.0, 1.5, 90.0), 1.0, pose(0.0, 0.0, 0.0), 4.0, 1.0, false),
            (pose(3.0, 3.0, 10.0), 1.0, pose(2.0, 2.0, 20.0), 2.0, 2.0, true),
        ];
        for angle in [0.0, 17.0, 45.0, 90.0, 133.0, 270.0, 359.0] {
            for (i, &(seg, len, rect, w, h, expected)) in cases.iter().enumerate() {
                let got = segment_vs_rectangle(turn(seg, angle), len, turn(rect, angle), w, h);
                assert_eq!(got, expected, "case {i} at {angle}°");
            }
        }
    }

    #[test]
    fn point_test_is_not_rotation_invariant() {
        let point = Vec2::new(1.5, 0.0);
        let rect = pose(0.0, 0.0, 0.0);
        assert!(point_vs_rectangle(point, rect, 4.0, 1.0));

        // Turning both by 45° moves the point to the far side in the
        // rectangle's frame: the offset is rotated with +rotation.
        let turned = turn(Pose::new(point, 0.0), 45.0);
        assert!(!point_vs_rectangle(turned.position, turn(rect, 45.0), 4.0, 1.0));

        // A zero-length segment at the same place is still inside.
        assert!(segment_vs_rectangle(turned, 0.0, turn(rect, 45.0), 4.0, 1.0));
    }

    #[test]
    fn broad_phase_is_loose_not_lossy() {
        // Just inside the corner of a rotated rectangle: the broad phase must
        // let it through.
        let rect = pose(0.0, 0.0, 45.0);
        let corner = Vec2::new(0.0, 2.0f64.sqrt() - 1e-9);
        assert!(segment_vs_rectangle(Pose::new(corner, 0.0), 0.0, rect, 2.0, 2.0));
    }
}

// ── Tags and the sweep ────────────────────────────────────────────────────────

#[cfg(test)]
mod sweep {
    use super::*;
    use crate::{CollisionError, TagPair, check_collisions};

    #[test]
    fn tag_set_ops() {
        let set = Tag::MovablePoint | Tag::SegmentCollidable;
        assert!(set.has(Tag::MovablePoint));
        assert!(set.has(Tag::SegmentCollidable));
        assert!(!set.has(Tag::Segment));
        assert_eq!(set.tags().collect::<Vec<_>>(), vec![Tag::SegmentCollidable, Tag::MovablePoint]);
        assert_eq!(set.to_string(), "{SegmentCollidable, MovablePoint}");
        let mut s = set;
        s.remove(TagSet::MOVABLE_POINT);
        assert_eq!(s, TagSet::from(Tag::SegmentCollidable));
        assert!(TagSet::EMPTY.is_empty());
    }

    #[test]
    fn pairs_between_tag_groups_only() {
        let (mut tree, mut colliders, origin) = scene();
        let bar = add(&mut tree, &mut colliders, "bar", Pose::IDENTITY, origin,
            Shape::segment(4.0), Tag::Segment.into());
        let hit = add(&mut tree, &mut colliders, "hit", pose(0.5, 0.0, 0.0), origin,
            Shape::rectangle(2.0, 2.0), Tag::SegmentCollidable.into());
        let _far = add(&mut tree, &mut colliders, "far", pose(50.0, 0.0, 0.0), origin,
            Shape::rectangle(2.0, 2.0), Tag::SegmentCollidable.into());
        // Overlaps the bar but is not tagged for this pair.
        let _untagged = add(&mut tree, &mut colliders, "untagged", Pose::IDENTITY, origin,
            Shape::rectangle(2.0, 2.0), TagSet::EMPTY);

        let nodes = tree.descendants_breadth_first(origin);
        let hits = check_collisions(&tree, &colliders, &nodes, TagPair::SegmentAndShape).unwrap();
        assert_eq!(hits, vec![(bar, hit)]);
    }

    #[test]
    fn node_with_both_tags_counts_as_first_only() {
        let (mut tree, mut colliders, origin) = scene();
        let a = add(&mut tree, &mut colliders, "a", Pose::IDENTITY, origin,
            Shape::rectangle(2.0, 2.0), Tag::MovablePoint | Tag::MovingShape);
        let b = add(&mut tree, &mut colliders, "b", Pose::IDENTITY, origin,
            Shape::rectangle(2.0, 2.0), Tag::MovablePoint | Tag::MovingShape);
        let shape = add(&mut tree, &mut colliders, "shape", Pose::IDENTITY, origin,
            Shape::rectangle(2.0, 2.0), Tag::MovingShape.into());

        let nodes = tree.descendants_breadth_first(origin);
        let hits = check_collisions(&tree, &colliders, &nodes, TagPair::PointAndMovingShape).unwrap();
        // `a` and `b` never appear as a moving shape, not even for each other.
        assert_eq!(hits, vec![(a, shape), (b, shape)]);
    }

    #[test]
    fn segment_tag_on_rectangle_is_an_error() {
        let (mut tree, mut colliders, origin) = scene();
        let wrong = add(&mut tree, &mut colliders, "wrong", Pose::IDENTITY, origin,
            Shape::rectangle(1.0, 1.0), Tag::Segment.into());
        add(&mut tree, &mut colliders, "target", Pose::IDENTITY, origin,
            Shape::rectangle(1.0, 1.0), Tag::SegmentCollidable.into());

        let nodes = tree.descendants_breadth_first(origin);
        let err = check_collisions(&tree, &colliders, &nodes, TagPair::SegmentAndShape).unwrap_err();
        assert!(matches!(err, CollisionError::ShapeMismatch { node, .. } if node == wrong));
    }

    #[test]
    fn store_grows_on_demand() {
        let mut store = ColliderStore::new();
        store.insert(NodeId(5), Collider::outline(Shape::point()));
        assert_eq!(store.len(), 1);
        assert!(store.get(NodeId(2)).is_none());
        assert!(store.get(NodeId(99)).is_none());
        assert!(!store.is_colliding(NodeId(99)));
        assert_eq!(store.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![NodeId(5)]);
        assert!(store.remove(NodeId(5)).is_some());
        assert!(store.is_empty());
    }
}

// ── Attachment automaton ──────────────────────────────────────────────────────

#[cfg(test)]
mod attachment {
    use super::*;
    use crate::{AttachmentReport, update_attachments};

    fn belt(tree: &mut PoseTree, colliders: &mut ColliderStore, name: &str, at: Pose, parent: NodeId) -> NodeId {
        add(tree, colliders, name, at, parent, Shape::rectangle(10.0, 5.0), Tag::MovingShape.into())
    }

    fn box_item(tree: &mut PoseTree, colliders: &mut ColliderStore, at: Pose, parent: NodeId) -> NodeId {
        add(tree, colliders, "box", at, parent, Shape::rectangle(5.0, 5.0),
            Tag::MovablePoint | Tag::SegmentCollidable)
    }

    fn snapshot(tree: &PoseTree) -> Vec<NodeId> {
        let mut nodes = Vec::new();
        for root in tree.roots() {
            nodes.push(root);
            nodes.extend(tree.descendants_breadth_first(root));
        }
        nodes
    }

    #[test]
    fn box_leaving_belt_is_dropped_in_place() {
        let (mut tree, mut colliders, origin) = scene();
        let b1 = belt(&mut tree, &mut colliders, "b1", Pose::IDENTITY, origin);
        let item = box_item(&mut tree, &mut colliders, pose(20.0, 0.0, 0.0), b1);
        let before = tree.global_pose(item);

        let nodes = snapshot(&tree);
        let report = update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(report, AttachmentReport { attached: 0, detached: 1 });
        assert_eq!(tree.parent(item), None);
        assert!(tree.global_pose(item).position.approx_eq(before.position, 1e-9));
    }

    #[test]
    fn box_crossing_to_neighbour_belt_is_handed_over() {
        let (mut tree, mut colliders, origin) = scene();
        let b1 = belt(&mut tree, &mut colliders, "b1", Pose::IDENTITY, origin);
        let b2 = belt(&mut tree, &mut colliders, "b2", pose(10.0, 0.0, 0.0), origin);
        // Over the second belt only, but still riding the first.
        let item = box_item(&mut tree, &mut colliders, pose(12.0, 0.0, 0.0), b1);

        let nodes = snapshot(&tree);
        let report = update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(report, AttachmentReport { attached: 1, detached: 1 });
        assert_eq!(tree.parent(item), Some(b2));
        assert!(tree.global_pose(item).position.approx_eq(Vec2::new(12.0, 0.0), 1e-9));
    }

    #[test]
    fn box_on_overlapping_parent_stays() {
        let (mut tree, mut colliders, origin) = scene();
        let _b1 = belt(&mut tree, &mut colliders, "b1", Pose::IDENTITY, origin);
        let b2 = belt(&mut tree, &mut colliders, "b2", pose(4.0, 0.0, 0.0), origin);
        // Overlaps both belts; already riding the higher id.
        let item = box_item(&mut tree, &mut colliders, pose(0.0, 0.0, 0.0), b2);

        let nodes = snapshot(&tree);
        let report = update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(report, AttachmentReport::default());
        assert_eq!(tree.parent(item), Some(b2));
    }

    #[test]
    fn several_candidates_pick_lowest_id() {
        let (mut tree, mut colliders, origin) = scene();
        let b1 = belt(&mut tree, &mut colliders, "b1", Pose::IDENTITY, origin);
        let _b2 = belt(&mut tree, &mut colliders, "b2", pose(4.0, 0.0, 0.0), origin);
        let loose = tree.add_node("loose", pose(2.0, 0.0, 0.0), None).unwrap();
        colliders.insert(loose, Collider::new(Shape::rectangle(5.0, 5.0), Tag::MovablePoint.into()));

        let nodes = snapshot(&tree);

        update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(tree.parent(loose), Some(b1));
    }

    #[test]
    fn parent_that_is_not_a_shape_lets_go() {
        let (mut tree, mut colliders, origin) = scene();
        let item = box_item(&mut tree, &mut colliders, pose(3.0, 3.0, 0.0), origin);
        let nodes = snapshot(&tree);
        let report = update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(report.detached, 1);
        assert_eq!(tree.parent(item), None);
        assert!(tree.global_pose(item).position.approx_eq(Vec2::new(3.0, 3.0), 1e-9));
    }

    #[test]
    fn loose_box_far_away_is_left_alone() {
        let (mut tree, mut colliders, origin) = scene();
        belt(&mut tree, &mut colliders, "b1", Pose::IDENTITY, origin);
        let loose = tree.add_node("loose", pose(100.0, 0.0, 0.0), None).unwrap();
        colliders.insert(loose, Collider::new(Shape::rectangle(5.0, 5.0), Tag::MovablePoint.into()));
        let nodes = snapshot(&tree);
        let report = update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(report, AttachmentReport::default());
        assert_eq!(tree.parent(loose), None);
    }

    #[test]
    fn shape_carried_by_the_box_is_skipped() {
        let (mut tree, mut colliders, origin) = scene();
        let item = box_item(&mut tree, &mut colliders, Pose::IDENTITY, origin);
        // Lower id than `b1`, but it rides on the box.
        let tray = belt(&mut tree, &mut colliders, "tray", Pose::IDENTITY, item);
        let b1 = belt(&mut tree, &mut colliders, "b1", Pose::IDENTITY, origin);

        let nodes = snapshot(&tree);
        let report = update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(report, AttachmentReport { attached: 1, detached: 1 });
        assert_eq!(tree.parent(item), Some(b1));
        assert_eq!(tree.parent(tray), Some(item));
    }

    #[test]
    fn only_own_shape_overlapping_leaves_box_loose() {
        let (mut tree, mut colliders, origin) = scene();
        let item = box_item(&mut tree, &mut colliders, pose(3.0, 3.0, 0.0), origin);
        belt(&mut tree, &mut colliders, "tray", Pose::IDENTITY, item);

        let nodes = snapshot(&tree);
        let report = update_attachments(&mut tree, &colliders, &nodes).unwrap();
        assert_eq!(report, AttachmentReport { attached: 0, detached: 1 });
        assert_eq!(tree.parent(item), None);
        assert!(tree.global_pose(item).position.approx_eq(Vec2::new(3.0, 3.0), 1e-9));
    }
}

// ── Sensor flags ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod sensor {
    use super::*;
    use crate::update_collision_flags;

    #[test]
    fn flags_follow_overlap() {
        let (mut tree, mut colliders, origin) = scene();
        let barrier = add(&mut tree, &mut colliders, "barrier", Pose::IDENTITY, origin,
            Shape::segment(10.0), Tag::Segment.into());
        let item = add(&mut tree, &mut colliders, "box", pose(1.0, 0.0, 0.0), origin,
            Shape::rectangle(5.0, 5.0), Tag::MovablePoint | Tag::SegmentCollidable);
        let outline = add(&mut tree, &mut colliders, "outline", Pose::IDENTITY, origin,
            Shape::rectangle(5.0, 5.0), TagSet::EMPTY);
        let nodes = tree.descendants_breadth_first(origin);

        let hits = update_collision_flags(&tree, &mut colliders, &nodes).unwrap();
        assert_eq!(hits, 1);
        assert!(colliders.is_colliding(barrier));
        assert!(colliders.is_colliding(item));
        assert!(!colliders.is_colliding(outline));

        tree.set_local_position(item, Vec2::new(30.0, 0.0));
        let hits = update_collision_flags(&tree, &mut colliders, &nodes).unwrap();
        assert_eq!(hits, 0);
        assert!(!colliders.is_colliding(barrier));
        assert!(!colliders.is_colliding(item));
    }

    #[test]
    fn flags_outside_snapshot_untouched() {
        let (mut tree, mut colliders, origin) = scene();
        let stray = add(&mut tree, &mut colliders, "stray", Pose::IDENTITY, origin,
            Shape::segment(1.0), Tag::Segment.into());
        if let Some(c) = colliders.get_mut(stray) {
            c.is_colliding = true;
        }
        update_collision_flags(&tree, &mut colliders, &[]).unwrap();
        assert!(colliders.is_colliding(stray));
    }
}
