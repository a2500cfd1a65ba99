//! Fixed-step simulation time.
//!
//! The world advances in ticks of `tick_duration_ms` milliseconds.  Movement
//! rates are per second, so each step is integrated with
//! `dt = tick_duration_ms / 1000`.  Control logic counts in milliseconds
//! (`millis()`), which is why the tick length is stored as an integer.

use std::fmt;
use std::ops::{Add, Sub};

use crate::{CoreError, CoreResult};

/// Number of completed simulation steps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl Add<u64> for Tick {
    type Output = Tick;
    fn add(self, steps: u64) -> Tick {
        Tick(self.0 + steps)
    }
}

/// Steps between two ticks; saturates at zero.
impl Sub for Tick {
    type Output = u64;
    fn sub(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}", self.0)
    }
}

/// The world's clock: where we are and how long a step is.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub tick_duration_ms: u32,
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_duration_ms: u32) -> Self {
        Self { tick_duration_ms, current_tick: Tick::ZERO }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = self.current_tick.next();
    }

    /// Simulated milliseconds since tick 0.
    pub fn elapsed_ms(&self) -> u64 {
        self.current_tick.0 * u64::from(self.tick_duration_ms)
    }

    /// Step length in seconds, the `dt` movements integrate with.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        f64::from(self.tick_duration_ms) / 1000.0
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.elapsed_ms();
        write!(f, "{}.{:03} s ({})", ms / 1000, ms % 1000, self.current_tick)
    }
}

/// Run parameters for a `World`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Step length.  Non-zero.  Default 50 ms.
    pub tick_duration_ms: u32,
    /// How many ticks `World::run` performs.
    pub total_ticks: u64,
    /// Observers get a snapshot every N ticks; 0 turns snapshots off.
    pub snapshot_interval_ticks: u64,
}

impl SimConfig {
    /// First tick `run` does not perform.
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(CoreError::Config("tick_duration_ms must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { tick_duration_ms: 50, total_ticks: 0, snapshot_interval_ticks: 1 }
    }
}
