//! Per-node collision data.

use ct_core::NodeId;

use crate::{Shape, Tag, TagSet};

/// Shape, tags, and sensor flag of one collidable node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Collider {
    pub shape: Shape,
    pub tags: TagSet,
    /// Recomputed every tick by [`update_collision_flags`](crate::update_collision_flags).
    pub is_colliding: bool,
}

impl Collider {
    pub fn new(shape: Shape, tags: TagSet) -> Self {
        Self { shape, tags, is_colliding: false }
    }

    /// A collider that only carries geometry (outlines, sprites).
    pub fn outline(shape: Shape) -> Self {
        Self::new(shape, TagSet::EMPTY)
    }

    #[inline]
    pub fn has(&self, tag: Tag) -> bool {
        self.tags.has(tag)
    }
}

/// Side table from `NodeId` to `Collider`, indexed like the pose tree.
///
/// Slots for nodes without collision data are `None`; the table grows on
/// demand so it never needs to know how many nodes the tree holds.
#[derive(Clone, Debug, Default)]
pub struct ColliderStore {
    slots: Vec<Option<Collider>>,
}

impl ColliderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) the collider of `node`.
    pub fn insert(&mut self, node: NodeId, collider: Collider) {
        let i = node.index();
        if i >= self.slots.len() {
            self.slots.resize(i + 1, None);
        }
        self.slots[i] = Some(collider);
    }

    pub fn remove(&mut self, node: NodeId) -> Option<Collider> {
        self.slots.get_mut(node.index()).and_then(Option::take)
    }

    #[inline]
    pub fn get(&self, node: NodeId) -> Option<&Collider> {
        self.slots.get(node.index()).and_then(Option::as_ref)
    }

    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Collider> {
        self.slots.get_mut(node.index()).and_then(Option::as_mut)
    }

    /// Sensor flag of `node`; `false` for nodes without a collider.
    pub fn is_colliding(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|c| c.is_colliding)
    }

    pub fn has_tag(&self, node: NodeId, tag: Tag) -> bool {
        self.get(node).is_some_and(|c| c.has(tag))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All `(node, collider)` entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Collider)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|c| (NodeId::from_index(i), c)))
    }
}
