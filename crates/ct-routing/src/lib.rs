//! `ct-routing` — where should a box go next?
//!
//! Given the module a box is on and the module it must reach, a [`Router`]
//! answers with the direction to hand the box over in and the neighbour that
//! receives it.  The kernel never calls into this crate; it only shares
//! module names with it.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`graph`]  | `ModuleGraph` (CSR adjacency), `ModuleGraphBuilder`, `Direction` |
//! | [`router`] | `Router` trait, `Hop`, `ShortestPathRouter`               |
//! | [`error`]  | `RoutingError`, `RoutingResult<T>`                        |

pub mod error;
pub mod graph;
pub mod router;


pub use error::{RoutingError, RoutingResult};
pub use graph::{Direction, ModuleGraph, ModuleGraphBuilder};
pub use router::{Hop, Router, ShortestPathRouter};
