//! Unit tests for ct-sim.

use ct_collision::{Shape, Tag, TagSet};
use ct_core::{NodeId, Pose, SimConfig, Tick, Vec2};
use ct_space::Movement;

use crate::World;

const EPS: f64 = 1e-9;

fn pose(x: f64, y: f64) -> Pose {
    Pose::new(Vec2::new(x, y), 0.0)
}

fn world() -> World {
    World::new(SimConfig { tick_duration_ms: 100, ..SimConfig::default() }).unwrap()
}

fn belt(w: &mut World, name: &str, at: Pose, speed: f64) -> NodeId {
    let origin = w.origin();
    let id = w
        .add_collidable(name, at, origin, Shape::rectangle(10.0, 5.0), Tag::MovingShape.into())
        .unwrap();
    if speed != 0.0 {
        w.tree.start_movement(id, Movement::conveyance(Vec2::new(speed, 0.0))).unwrap();
    }
    id
}

fn box_on(w: &mut World, parent: NodeId, at: Pose) -> NodeId {
    w.add_collidable("box", at, parent, Shape::rectangle(5.0, 5.0), Tag::MovablePoint | Tag::SegmentCollidable)
        .unwrap()
}

fn x_of(w: &World, n: NodeId) -> f64 {
    w.global_pose(n).position.x
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn zero_tick_duration_rejected() {
        let cfg = SimConfig { tick_duration_ms: 0, ..SimConfig::default() };
        assert!(World::new(cfg).is_err());
    }

    #[test]
    fn origin_is_the_only_root() {
        let w = world();
        assert_eq!(w.tree.roots(), vec![w.origin()]);
        assert!(w.snapshot().is_empty());
    }

    #[test]
    fn views_expose_shape_and_flags() {
        let mut w = world();
        let origin = w.origin();
        let plain = w.add_node("plain", pose(1.0, 2.0), origin).unwrap();
        let b = belt(&mut w, "belt", pose(5.0, 0.0), 0.0);

        let views = w.views();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].id, plain);
        assert_eq!(views[0].name, "plain");
        assert_eq!(views[0].shape, None);
        assert!(views[0].tags.is_empty());
        assert_eq!(views[1].id, b);
        assert_eq!(views[1].parent, Some(origin));
        assert_eq!(views[1].shape, Some(Shape::rectangle(10.0, 5.0)));
        assert!(views[1].tags.has(Tag::MovingShape));
        assert!(views[1].pose.position.approx_eq(Vec2::new(5.0, 0.0), EPS));
    }
}

// ── Tick semantics ────────────────────────────────────────────────────────────

#[cfg(test)]
mod ticking {
    use super::*;

    #[test]
    fn nested_chain_full_turn() {
        let mut w = World::new(SimConfig { tick_duration_ms: 1000, ..SimConfig::default() }).unwrap();
        let origin = w.origin();
        let e1 = w.add_node("e1", pose(1.0, 1.0), origin).unwrap();
        let e2 = w.add_node("e2", pose(1.0, 0.0), e1).unwrap();
        let e3 = w.add_node("e3", pose(1.0, 0.0), e2).unwrap();
        w.tree.start_movement(e1, Movement::rotation(90.0)).unwrap();

        for _ in 0..4 {
            w.tick().unwrap();
        }
        let g = w.global_pose(e3);
        assert!(g.position.approx_eq(Vec2::new(3.0, 1.0), 1e-9), "got {}", g.position);
        assert!(g.rotation < 1e-9 || 360.0 - g.rotation < 1e-9);
        assert_eq!(w.clock.current_tick, Tick(4));
        assert_eq!(w.clock.elapsed_ms(), 4000);
    }

    #[test]
    fn conveyance_moves_children_only() {
        let mut w = world();
        let origin = w.origin();
        let carrier = w.add_node("carrier", pose(2.0, 2.0), origin).unwrap();
        let child = w.add_node("child", Pose::IDENTITY, carrier).unwrap();
        w.tree.start_movement(carrier, Movement::conveyance(Vec2::new(3.0, 0.0))).unwrap();

        for k in 1..=5 {
            w.tick().unwrap();
            assert!((x_of(&w, child) - (2.0 + 0.3 * k as f64)).abs() < 1e-9);
            assert!(w.global_pose(carrier).position.approx_eq(Vec2::new(2.0, 2.0), EPS));
        }
    }

    #[test]
    fn box_is_carried_then_dropped_at_belt_end() {
        let mut w = world();
        let origin = w.origin();
        let b1 = belt(&mut w, "b1", Pose::IDENTITY, 10.0);
        let item = box_on(&mut w, b1, Pose::IDENTITY);
        let barrier = w
            .add_collidable("barrier", pose(3.0, 0.0), origin, Shape::segment(5.0), Tag::Segment.into())
            .unwrap();

        let mut flags = Vec::new();
        for _ in 0..5 {
            let r = w.tick().unwrap();
            assert_eq!((r.attached, r.detached), (0, 0));
            flags.push(w.is_colliding(barrier));
        }
        assert!((x_of(&w, item) - 5.0).abs() < EPS);
        assert_eq!(w.tree.parent(item), Some(b1));
        // Box spans x ± 2.5; the barrier sits at 3.
        assert_eq!(flags, vec![true, true, true, true, true]);

        let r = w.tick().unwrap();
        assert_eq!(r.detached, 1);
        assert_eq!(w.tree.parent(item), None);
        assert!((x_of(&w, item) - 6.0).abs() < EPS);
        assert!(!w.is_colliding(barrier));
        assert!(!w.is_colliding(item));

        // Dropped boxes stay where they fell.
        w.tick().unwrap();
        assert!((x_of(&w, item) - 6.0).abs() < EPS);
        assert!(w.snapshot().contains(&item));
    }

    #[test]
    fn box_is_handed_to_the_next_belt() {
        let mut w = world();
        let b1 = belt(&mut w, "b1", Pose::IDENTITY, 10.0);
        let b2 = belt(&mut w, "b2", pose(10.0, 0.0), 10.0);
        let item = box_on(&mut w, b1, Pose::IDENTITY);

        for _ in 0..5 {
            w.tick().unwrap();
        }
        assert_eq!(w.tree.parent(item), Some(b1));

        let r = w.tick().unwrap();
        assert_eq!((r.attached, r.detached), (1, 1));
        assert_eq!(w.tree.parent(item), Some(b2));
        assert!((x_of(&w, item) - 6.0).abs() < EPS);

        w.tick().unwrap();
        assert!((x_of(&w, item) - 7.0).abs() < EPS);
    }

    #[test]
    fn loose_box_is_picked_up() {
        let mut w = world();
        let b1 = belt(&mut w, "b1", Pose::IDENTITY, 10.0);
        let loose = w.tree.add_node("loose", Pose::IDENTITY, None).unwrap();
        w.colliders.insert(
            loose,
            ct_collision::Collider::new(Shape::rectangle(5.0, 5.0), TagSet::from(Tag::MovablePoint)),
        );

        let r = w.tick().unwrap();
        assert_eq!(r.attached, 1);
        assert_eq!(w.tree.parent(loose), Some(b1));
        // Attached after this tick's movements, so carried from the next.
        assert!((x_of(&w, loose) - 0.0).abs() < EPS);
        w.tick().unwrap();
        assert!((x_of(&w, loose) - 1.0).abs() < EPS);
    }

    #[test]
    fn step_does_not_touch_clock() {
        let mut w = world();
        let r = w.step(0.5).unwrap();
        assert_eq!(r.tick, Tick::ZERO);
        assert_eq!(w.clock.current_tick, Tick::ZERO);
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use super::*;
    use crate::{TickReport, WorldObserver};

    #[derive(Default)]
    struct Counting {
        starts: Vec<Tick>,
        ends: Vec<Tick>,
        snapshots: Vec<(Tick, usize)>,
        finished: Option<Tick>,
    }

    impl WorldObserver for Counting {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
            assert_eq!(tick, report.tick);
            self.ends.push(tick);
        }
        fn on_snapshot(&mut self, tick: Tick, world: &World) {
            self.snapshots.push((tick, world.views().len()));
        }
        fn on_run_end(&mut self, final_tick: Tick) {
            self.finished = Some(final_tick);
        }
    }

    #[test]
    fn run_calls_hooks_in_order() {
        let cfg = SimConfig { tick_duration_ms: 10, total_ticks: 5, snapshot_interval_ticks: 2 };
        let mut w = World::new(cfg).unwrap();
        belt(&mut w, "b1", Pose::IDENTITY, 0.0);
        let mut obs = Counting::default();
        w.run(&mut obs).unwrap();

        let ticks: Vec<Tick> = (0..5).map(Tick).collect();
        assert_eq!(obs.starts, ticks);
        assert_eq!(obs.ends, ticks);
        assert_eq!(obs.snapshots, vec![(Tick(0), 1), (Tick(2), 1), (Tick(4), 1)]);
        assert_eq!(obs.finished, Some(Tick(5)));
    }

    #[test]
    fn run_ticks_ignores_end_and_skips_run_end() {
        let cfg = SimConfig { tick_duration_ms: 10, total_ticks: 1, snapshot_interval_ticks: 0 };
        let mut w = World::new(cfg).unwrap();
        let mut obs = Counting::default();
        w.run_ticks(3, &mut obs).unwrap();
        assert_eq!(obs.ends.len(), 3);
        assert!(obs.snapshots.is_empty());
        assert_eq!(obs.finished, None);
        assert_eq!(w.clock.current_tick, Tick(3));
    }
}
