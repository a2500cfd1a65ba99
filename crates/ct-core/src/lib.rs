//! `ct-core` — foundational types for the `conveyor_twin` simulator.
//!
//! This crate is a dependency of every other `ct-*` crate.  It has no `ct-*`
//! dependencies and minimal external ones (only `thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `NodeId`, `MovementId`, `ModuleId`                        |
//! | [`geom`]    | `Vec2`, `Pose`, frame rotation, degree normalisation      |
//! | [`time`]    | `Tick`, `SimClock`, `SimConfig`                           |
//! | [`layout`]  | `GridSpec` — turntable grid instance description          |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geom;
pub mod ids;
pub mod layout;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geom::{Pose, Vec2, normalize_deg};
pub use ids::{ModuleId, MovementId, NodeId};
pub use layout::GridSpec;
pub use time::{SimClock, SimConfig, Tick};
