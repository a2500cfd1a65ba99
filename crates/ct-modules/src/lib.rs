//! `ct-modules` — hardware modules assembled from pose nodes.
//!
//! Nothing here adds kernel mechanics.  Every module is a handful of nodes
//! with shapes and tags plus bookkeeping for the movements it has started;
//! the world's tick does the actual carrying, dropping and sensing.
//!
//! # Crate layout
//!
//! | Module            | Contents                                              |
//! |-------------------|-------------------------------------------------------|
//! | [`box_item`]      | `BoxItem` — a package                                 |
//! | [`light_barrier`] | `LightBarrier` — occupancy sensor                     |
//! | [`conveyor`]      | `Conveyor`, `ConveyorSpec`, `BarrierLayout`           |
//! | [`turntable`]     | `TurnTable`, `TurnTableSpec`                          |
//! | [`direction`]     | `BeltDirection`, `TurnDirection`                      |
//! | [`grid`]          | `build_grid` — a `GridSpec` instance of turntables    |
//! | [`error`]         | `ModuleError`, `ModuleResult<T>`                      |

pub mod box_item;
pub mod conveyor;
pub mod direction;
pub mod error;
pub mod grid;
pub mod light_barrier;
pub mod turntable;


pub use box_item::{BOX_LENGTH, BoxItem};
pub use conveyor::{BarrierLayout, Conveyor, ConveyorSpec};
pub use direction::{BeltDirection, TurnDirection};
pub use error::{ModuleError, ModuleResult};
pub use grid::{build_grid, find_module};
pub use light_barrier::LightBarrier;
pub use turntable::{MAX_ROTATION_DEG, TurnTable, TurnTableSpec};
