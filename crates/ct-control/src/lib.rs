//! `ct-control` — the boundary between simulated turntables and the code
//! that controls them.
//!
//! Control code sees a turntable the way firmware sees real hardware: five
//! integers.  Three are sensors written by the simulation, two are actuator
//! intents written by the controller.  Each tick a [`ModuleLink`] writes the
//! sensors, hands control over for the elapsed milliseconds, waits for the
//! acknowledgment, and applies whatever the controller asked for.
//!
//! # Crate layout
//!
//! | Module         | Contents                                               |
//! |----------------|--------------------------------------------------------|
//! | [`values`]     | `ControlSlot`, `ControlValues`                         |
//! | [`controller`] | `ControlLogic`, `Controller`, `InlineController`       |
//! | [`threaded`]   | `ThreadedController` — logic on its own thread         |
//! | [`link`]       | `ModuleLink` — sensor write / advance / reconcile      |
//! | [`skill`]      | `SkillLogic` — receive-from / forward-to state machine |
//! | [`error`]      | `ControlError`, `ControlResult<T>`                     |

pub mod controller;
pub mod error;
pub mod link;
pub mod skill;
pub mod threaded;
pub mod values;


pub use controller::{ControlLogic, Controller, InlineController};
pub use error::{ControlError, ControlResult};
pub use link::ModuleLink;
pub use skill::{Skill, SkillHandle, SkillLogic};
pub use threaded::ThreadedController;
pub use values::{ControlSlot, ControlValues, SLOT_COUNT};
