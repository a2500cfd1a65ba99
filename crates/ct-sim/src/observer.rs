//! World observer trait for progress reporting and data collection.

use ct_core::Tick;

use crate::{TickReport, World};

/// Callbacks invoked by [`World::run`] and [`World::run_ticks`] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait WorldObserver {
    /// Called at the very start of each tick, before any movement.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the sensor flags of `tick` are final.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to the whole world.
    fn on_snapshot(&mut self, _tick: Tick, _world: &World) {}

    /// Called once when `run` returns.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
