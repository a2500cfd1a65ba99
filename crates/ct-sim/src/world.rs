//! The `World` struct and its tick.

use ct_collision::{Collider, ColliderStore, Shape, TagSet, update_attachments, update_collision_flags};
use ct_core::{NodeId, Pose, SimClock, SimConfig, Tick};
use ct_space::PoseTree;
use tracing::debug;

use crate::{NodeView, SimResult, WorldObserver};

/// What one tick changed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tick: Tick,
    /// Movable points attached to a moving shape this tick.
    pub attached: usize,
    /// Movable points detached from their parent this tick.
    pub detached: usize,
    /// Segment / segment-collidable hits after reparenting.
    pub colliding_pairs: usize,
}

// ── World ─────────────────────────────────────────────────────────────────────

/// All simulation state: the pose tree, its collision side table, and the
/// clock.
///
/// Module assemblies add nodes under [`origin`](Self::origin) and keep the
/// returned `NodeId`s; the world never removes a node.  A tick is a single
/// uninterrupted pass, so nothing else may touch the tree while
/// [`step`](Self::step) runs.
pub struct World {
    pub config: SimConfig,

    pub clock: SimClock,

    pub tree: PoseTree,

    pub colliders: ColliderStore,

    origin: NodeId,
}

impl World {
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        let mut tree = PoseTree::new();
        let origin = tree.add_node("origin", Pose::IDENTITY, None)?;
        Ok(Self {
            clock: config.make_clock(),
            config,
            tree,
            colliders: ColliderStore::new(),
            origin,
        })
    }

    /// The root every module hangs off.
    #[inline]
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    // ── Building ──────────────────────────────────────────────────────────

    /// Add a plain node with `local` already relative to `parent`.
    pub fn add_node(&mut self, name: impl Into<String>, local: Pose, parent: NodeId) -> SimResult<NodeId> {
        Ok(self.tree.add_node(name, local, Some(parent))?)
    }

    /// Add a node with collision data.
    pub fn add_collidable(
        &mut self,
        name:   impl Into<String>,
        local:  Pose,
        parent: NodeId,
        shape:  Shape,
        tags:   TagSet,
    ) -> SimResult<NodeId> {
        let id = self.tree.add_node(name, local, Some(parent))?;
        self.colliders.insert(id, Collider::new(shape, tags));
        Ok(id)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn global_pose(&self, node: NodeId) -> Pose {
        self.tree.global_pose(node)
    }

    /// Sensor flag of `node` as of the last tick.
    #[inline]
    pub fn is_colliding(&self, node: NodeId) -> bool {
        self.colliders.is_colliding(node)
    }

    /// Every simulated node except the origin: the origin's descendants
    /// breadth first, then each other root followed by its descendants,
    /// roots in ascending id order.
    pub fn snapshot(&self) -> Vec<NodeId> {
        let mut nodes = self.tree.descendants_breadth_first(self.origin);
        for root in self.tree.roots() {
            if root == self.origin {
                continue;
            }
            nodes.push(root);
            nodes.extend(self.tree.descendants_breadth_first(root));
        }
        nodes
    }

    pub fn view(&self, node: NodeId) -> NodeView {
        let collider = self.colliders.get(node);
        NodeView {
            id:           node,
            name:         self.tree.name(node).to_owned(),
            parent:       self.tree.parent(node),
            pose:         self.tree.global_pose(node),
            shape:        collider.map(|c| c.shape),
            tags:         collider.map(|c| c.tags).unwrap_or_default(),
            is_colliding: collider.is_some_and(|c| c.is_colliding),
        }
    }

    /// Views of every node in the snapshot, in snapshot order.
    pub fn views(&self) -> Vec<NodeView> {
        self.snapshot().into_iter().map(|n| self.view(n)).collect()
    }

    // ── Ticking ───────────────────────────────────────────────────────────

    /// Advance the kernel by `dt` seconds without touching the clock.
    pub fn step(&mut self, dt: f64) -> SimResult<TickReport> {
        self.tree.step(self.origin, dt);
        for root in self.tree.roots() {
            if root != self.origin {
                self.tree.step(root, dt);
            }
        }

        let nodes = self.snapshot();
        let moved = update_attachments(&mut self.tree, &self.colliders, &nodes)?;

        // Reparenting keeps the node set, so the same snapshot still covers
        // every collider.
        let colliding_pairs = update_collision_flags(&self.tree, &mut self.colliders, &nodes)?;

        let report = TickReport {
            tick: self.clock.current_tick,
            attached: moved.attached,
            detached: moved.detached,
            colliding_pairs,
        };
        debug!(
            tick = report.tick.0,
            attached = report.attached,
            detached = report.detached,
            colliding = report.colliding_pairs,
            "tick complete"
        );
        Ok(report)
    }

    /// Advance by one configured tick and move the clock forward.
    pub fn tick(&mut self) -> SimResult<TickReport> {
        let report = self.step(self.clock.tick_secs())?;
        self.clock.advance();
        Ok(report)
    }

    /// Run from the current tick to `config.end_tick()`.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.observed_tick(observer)?;
        }
        observer.on_run_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.observed_tick(observer)?;
        }
        Ok(())
    }

    fn observed_tick<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let report = self.tick()?;
        observer.on_tick_end(now, &report);
        if self.config.snapshot_interval_ticks > 0
            && now.0.is_multiple_of(self.config.snapshot_interval_ticks)
        {
            observer.on_snapshot(now, self);
        }
        Ok(())
    }
}
