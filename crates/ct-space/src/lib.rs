//! `ct-space` — the pose tree and the movement engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`tree`]     | `PoseTree` — arena of pose nodes addressed by `NodeId`       |
//! | [`movement`] | `Movement` — per-tick pose deltas attached to a node         |
//! | [`error`]    | `SpaceError`, `SpaceResult<T>`                               |
//!
//! # Caching model
//!
//! Every node carries two memoized values with opposite invalidation
//! directions:
//!
//! - **global pose** — depends on every ancestor, so changing a node's local
//!   pose clears the cache on that node and its whole subtree (downward);
//! - **breadth-first descendant list** — depends on every descendant, so a
//!   structural change clears the cache on the changed parent and all of its
//!   ancestors (upward).
//!
//! Both caches sit behind `Cell`/`RefCell` so read paths (`global_pose`,
//! `descendants_breadth_first`) take `&self`.  The tree is therefore `!Sync`;
//! one tick is a single-threaded pass.

pub mod error;
pub mod movement;
pub mod tree;


pub use error::{SpaceError, SpaceResult};
pub use movement::Movement;
pub use tree::PoseTree;
