//! `ct-sim` — the `World` and its tick.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`world`]    | `World`, `TickReport`                                     |
//! | [`observer`] | `WorldObserver` trait + `NoopObserver`                    |
//! | [`view`]     | `NodeView` — read-only per-node state for front ends      |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # One tick
//!
//! 1. Apply every running movement, origin tree first, then every other
//!    root (nodes dropped by the attachment automaton live on as roots).
//! 2. Snapshot the node list.
//! 3. Run the attachment automaton on the snapshot.
//! 4. Refresh sensor flags on the snapshot.
//!
//! Attachment sees post-movement poses; sensor flags see the
//! post-reparenting tree.

pub mod error;
pub mod observer;
pub mod view;
pub mod world;

#[cfg(test)]
mod tests;

pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, WorldObserver};
pub use view::NodeView;
pub use world::{TickReport, World};
