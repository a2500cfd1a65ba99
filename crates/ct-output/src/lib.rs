//! `ct-output` — pose traces for replay and plotting.
//!
//! The CSV backend creates two files in the output directory:
//!
//! | File        | One row per                                   |
//! |-------------|-----------------------------------------------|
//! | `poses.csv` | node per snapshot tick (global pose, sensor)  |
//! | `ticks.csv` | tick (attach / detach / colliding counts)     |
//!
//! [`PoseTraceObserver`] implements `ct_sim::WorldObserver` and feeds any
//! [`PoseWriter`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use ct_output::{CsvPoseWriter, PoseTraceObserver};
//!
//! let writer = CsvPoseWriter::new(Path::new("./trace")).unwrap();
//! let mut obs = PoseTraceObserver::new(writer);
//! world.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvPoseWriter;
pub use error::{OutputError, OutputResult};
pub use observer::PoseTraceObserver;
pub use row::{PoseRow, TickRow};
pub use writer::PoseWriter;
