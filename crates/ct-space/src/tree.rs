//! `PoseTree` — arena storage for every pose node in the simulation.
//!
//! # Layout
//!
//! Structure-of-Arrays: every `Vec` field has exactly `len()` elements and
//! the `NodeId` value is the index into all of them.
//!
//! ```ignore
//! let local = tree.local_pose(node);   // O(1)
//! let global = tree.global_pose(node); // O(depth) on a miss, O(1) on a hit
//! ```
//!
//! Parent/child links are index fields, not ownership.  Nodes are never
//! removed: external holders (module assemblies, the agent layer) keep their
//! `NodeId`s across any number of `attach`/`detach` calls, and a detached
//! node is simply a new root.
//!
//! # Panics
//!
//! Read accessors index the arena directly and panic on an id that was not
//! issued by this tree, matching slice indexing.  Structural operations
//! (`add_node`, `attach`, `detach`, movement start/end) validate their ids
//! and return [`SpaceError::NodeNotFound`] instead.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use ct_core::{MovementId, NodeId, Pose, Vec2, normalize_deg};
use tracing::trace;

use crate::{Movement, SpaceError, SpaceResult};

pub struct PoseTree {
    names: Vec<String>,

    /// Pose relative to the parent (or to the world for roots).  Rotation is
    /// always stored normalised into `[0, 360)`.
    local: Vec<Pose>,

    /// `NodeId::INVALID` for roots.
    parent: Vec<NodeId>,

    /// Membership set of direct children, in attach order.
    children: Vec<Vec<NodeId>>,

    /// Movements currently running on each node.
    movements: Vec<Vec<(MovementId, Movement)>>,

    /// Memoized global pose.  Invalidated downward.
    global_cache: Vec<Cell<Option<Pose>>>,

    /// Memoized breadth-first descendant list.  Invalidated upward.
    descendants_cache: Vec<RefCell<Option<Vec<NodeId>>>>,

    next_movement: u32,
}

impl PoseTree {
    pub fn new() -> Self {
        Self {
            names:             Vec::new(),
            local:             Vec::new(),
            parent:            Vec::new(),
            children:          Vec::new(),
            movements:         Vec::new(),
            global_cache:      Vec::new(),
            descendants_cache: Vec::new(),
            next_movement:     0,
        }
    }

    // ── Arena ─────────────────────────────────────────────────────────────

    /// Add a node whose `local` pose is already expressed relative to
    /// `parent` (no attach conversion takes place).
    pub fn add_node(
        &mut self,
        name:   impl Into<String>,
        local:  Pose,
        parent: Option<NodeId>,
    ) -> SpaceResult<NodeId> {
        if let Some(p) = parent {
            self.check(p)?;
        }
        let id = NodeId::from_index(self.names.len());
        self.names.push(name.into());
        self.local.push(Pose::new(local.position, local.rotation));
        self.parent.push(parent.unwrap_or(NodeId::INVALID));
        self.children.push(Vec::new());
        self.movements.push(Vec::new());
        self.global_cache.push(Cell::new(None));
        self.descendants_cache.push(RefCell::new(None));

        if let Some(p) = parent {
            self.children[p.index()].push(id);
            self.invalidate_descendants_upward(p);
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.names.len()
    }

    fn check(&self, node: NodeId) -> SpaceResult<()> {
        if self.contains(node) { Ok(()) } else { Err(SpaceError::NodeNotFound(node)) }
    }

    /// All node ids in arena order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.names.len() as u32).map(NodeId)
    }

    pub fn name(&self, node: NodeId) -> &str {
        &self.names[node.index()]
    }

    /// First node (lowest id) with the given name.
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.iter().position(|n| n == name).map(NodeId::from_index)
    }

    // ── Hierarchy ─────────────────────────────────────────────────────────

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let p = self.parent[node.index()];
        p.is_valid().then_some(p)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.children[node.index()]
    }

    /// Every parent-less node, ascending id.
    pub fn roots(&self) -> Vec<NodeId> {
        self.ids().filter(|&n| !self.parent[n.index()].is_valid()).collect()
    }

    /// `true` if `ancestor` lies on the parent chain of `node` (or is `node`).
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = node;
        loop {
            if cur == ancestor {
                return true;
            }
            let p = self.parent[cur.index()];
            if !p.is_valid() {
                return false;
            }
            cur = p;
        }
    }

    /// Re-parent `child` under `parent` without moving it in the world.
    ///
    /// If `child` already has a parent it is detached first.  Its local pose
    /// is then recomputed so that its global pose is unchanged.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) -> SpaceResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(SpaceError::WouldCycle { parent, child });
        }
        if self.parent(child).is_some() {
            self.detach(child)?;
        }

        let child_global = self.global_pose(child);
        let parent_global = self.global_pose(parent);

        self.parent[child.index()] = parent;
        self.children[parent.index()].push(child);
        self.set_local_pose(child, parent_global.relative(child_global));
        self.invalidate_descendants_upward(parent);

        trace!(%parent, %child, "attached");
        Ok(())
    }

    /// Make `child` a root, keeping its global pose.
    ///
    /// A no-op for nodes that are already roots.  Never destroys anything.
    pub fn detach(&mut self, child: NodeId) -> SpaceResult<()> {
        self.check(child)?;
        let Some(parent) = self.parent(child) else {
            return Ok(());
        };

        let global = self.global_pose(child);
        self.children[parent.index()].retain(|&c| c != child);
        self.parent[child.index()] = NodeId::INVALID;
        self.set_local_pose(child, global);
        self.invalidate_descendants_upward(parent);

        trace!(%parent, %child, "detached");
        Ok(())
    }

    /// All descendants of `node` in breadth-first order (excluding `node`).
    ///
    /// Memoized; the returned `Vec` is a copy, so callers cannot corrupt the
    /// cache.
    pub fn descendants_breadth_first(&self, node: NodeId) -> Vec<NodeId> {
        let slot = &self.descendants_cache[node.index()];
        if let Some(cached) = slot.borrow().as_ref() {
            return cached.clone();
        }

        let mut result = Vec::new();
        let mut queue: VecDeque<NodeId> = self.children[node.index()].iter().copied().collect();
        while let Some(n) = queue.pop_front() {
            queue.extend(self.children[n.index()].iter().copied());
            result.push(n);
        }
        *slot.borrow_mut() = Some(result.clone());
        result
    }

    fn invalidate_descendants_upward(&self, from: NodeId) {
        let mut cur = from;
        loop {
            *self.descendants_cache[cur.index()].borrow_mut() = None;
            let p = self.parent[cur.index()];
            if !p.is_valid() {
                break;
            }
            cur = p;
        }
    }

    // ── Poses ─────────────────────────────────────────────────────────────

    pub fn local_pose(&self, node: NodeId) -> Pose {
        self.local[node.index()]
    }

    /// Pose relative to the root of `node`'s tree.
    ///
    /// Walks up to the nearest cached ancestor (or the root), then composes
    /// downward, caching every node on the way.
    pub fn global_pose(&self, node: NodeId) -> Pose {
        if let Some(p) = self.global_cache[node.index()].get() {
            return p;
        }

        let mut chain = vec![node];
        let mut base = Pose::IDENTITY;
        let mut cur = node;
        loop {
            let p = self.parent[cur.index()];
            if !p.is_valid() {
                break;
            }
            if let Some(cached) = self.global_cache[p.index()].get() {
                base = cached;
                break;
            }
            chain.push(p);
            cur = p;
        }

        for &n in chain.iter().rev() {
            base = base.compose(self.local[n.index()]);
            self.global_cache[n.index()].set(Some(base));
        }
        base
    }

    pub fn set_local_position(&mut self, node: NodeId, position: Vec2) {
        self.invalidate_global_downward(node);
        self.local[node.index()].position = position;
    }

    pub fn set_local_rotation(&mut self, node: NodeId, rotation: f64) {
        self.invalidate_global_downward(node);
        self.local[node.index()].rotation = normalize_deg(rotation);
    }

    pub fn set_local_pose(&mut self, node: NodeId, pose: Pose) {
        self.invalidate_global_downward(node);
        self.local[node.index()] = Pose::new(pose.position, pose.rotation);
    }

    #[inline]
    pub fn translate_local(&mut self, node: NodeId, delta: Vec2) {
        let p = self.local[node.index()].position + delta;
        self.set_local_position(node, p);
    }

    #[inline]
    pub fn rotate_local(&mut self, node: NodeId, delta_deg: f64) {
        let r = self.local[node.index()].rotation + delta_deg;
        self.set_local_rotation(node, r);
    }

    /// Clear the global-pose cache on `node` and its whole subtree.  Never
    /// touches ancestors.
    fn invalidate_global_downward(&self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            self.global_cache[n.index()].set(None);
            stack.extend(self.children[n.index()].iter().copied());
        }
    }

    // ── Movements ─────────────────────────────────────────────────────────

    pub fn start_movement(&mut self, node: NodeId, movement: Movement) -> SpaceResult<MovementId> {
        self.check(node)?;
        let id = MovementId(self.next_movement);
        self.next_movement += 1;
        self.movements[node.index()].push((id, movement));
        Ok(id)
    }

    /// Stop a running movement and hand it back (e.g. to inspect the
    /// remaining budget of a bounded rotation).
    pub fn end_movement(&mut self, node: NodeId, movement: MovementId) -> SpaceResult<Movement> {
        self.check(node)?;
        let list = &mut self.movements[node.index()];
        let pos = list
            .iter()
            .position(|(id, _)| *id == movement)
            .ok_or(SpaceError::MovementNotFound { node, movement })?;
        Ok(list.remove(pos).1)
    }

    pub fn movement(&self, node: NodeId, movement: MovementId) -> Option<&Movement> {
        self.movements[node.index()]
            .iter()
            .find(|(id, _)| *id == movement)
            .map(|(_, m)| m)
    }

    pub fn movements(&self, node: NodeId) -> impl Iterator<Item = (MovementId, &Movement)> + '_ {
        self.movements[node.index()].iter().map(|(id, m)| (*id, m))
    }

    /// Advance every movement in the subtree rooted at `root` by `dt`
    /// seconds.
    ///
    /// Preorder: a node applies all of its own movements before any of its
    /// children are visited.  Order among siblings is attach order, but no
    /// movement reads a sibling's pose so the result does not depend on it.
    pub fn step(&mut self, root: NodeId, dt: f64) {
        let mut order = Vec::new();
        let mut stack = vec![root];
        while let Some(n) = stack.pop() {
            order.push(n);
            stack.extend(self.children[n.index()].iter().rev().copied());
        }

        for node in order {
            if self.movements[node.index()].is_empty() {
                continue;
            }
            let mut running = std::mem::take(&mut self.movements[node.index()]);
            for (_, movement) in running.iter_mut() {
                movement.advance(self, node, dt);
            }
            self.movements[node.index()] = running;
        }
    }
}

impl Default for PoseTree {
    fn default() -> Self {
        Self::new()
    }
}
