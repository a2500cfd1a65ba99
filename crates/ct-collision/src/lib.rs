//! `ct-collision` — which nodes touch which, and what that changes.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`shape`]      | `Shape` — point / segment / rectangle                     |
//! | [`tag`]        | `Tag`, `TagSet`, `TagPair`                                |
//! | [`collider`]   | `Collider`, `ColliderStore` (side table keyed by `NodeId`) |
//! | [`clip`]       | Cohen–Sutherland outcode test against an axis-aligned box  |
//! | [`check`]      | pairwise tests and `check_collisions`                     |
//! | [`attachment`] | `update_attachments` — pick-up / drop-off reparenting      |
//! | [`sensor`]     | `update_collision_flags` — light-barrier style flags       |
//! | [`error`]      | `CollisionError`, `CollisionResult<T>`                    |
//!
//! Collision data lives beside the pose tree rather than inside it: a node
//! without an entry in the `ColliderStore` is invisible to every check.

pub mod attachment;
pub mod check;
pub mod clip;
pub mod collider;
pub mod error;
pub mod sensor;
pub mod shape;
pub mod tag;

#[cfg(test)]
mod tests;

pub use attachment::{AttachmentReport, update_attachments};
pub use check::{check_collisions, point_vs_rectangle, segment_vs_rectangle};
pub use collider::{Collider, ColliderStore};
pub use error::{CollisionError, CollisionResult};
pub use sensor::update_collision_flags;
pub use shape::Shape;
pub use tag::{Tag, TagPair, TagSet};
