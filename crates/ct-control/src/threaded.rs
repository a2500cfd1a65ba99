//! Control logic on a dedicated thread.
//!
//! The simulation passes control over a clock channel and blocks on an
//! acknowledgment channel, so exactly one side runs at a time.  The value
//! array lives behind a mutex shared by both.  Dropping the clock sender
//! ends the thread's receive loop; [`Drop`] does that and joins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};
use tracing::{info, warn};

use crate::{ControlError, ControlLogic, ControlResult, ControlValues, Controller};

pub struct ThreadedController {
    name: String,
    clock_tx: Option<Sender<u64>>,
    ack_rx: Receiver<()>,
    shared: Arc<Mutex<ControlValues>>,
    handle: Option<JoinHandle<()>>,
}

impl ThreadedController {
    /// Spawn a thread named `name` running `logic`.
    pub fn spawn<L>(name: impl Into<String>, mut logic: L) -> ControlResult<Self>
    where
        L: ControlLogic + 'static,
    {
        let name = name.into();
        let (clock_tx, clock_rx) = bounded::<u64>(1);
        let (ack_tx, ack_rx) = bounded::<()>(1);
        let shared = Arc::new(Mutex::new(ControlValues::default()));

        let thread_values = Arc::clone(&shared);
        let handle = thread::Builder::new().name(format!("ctl-{name}")).spawn(move || {
            logic.setup();
            let mut millis = 0u64;
            while let Ok(passed) = clock_rx.recv() {
                millis += passed;
                logic.on_loop(millis, &mut lock(&thread_values));
                if ack_tx.send(()).is_err() {
                    break;
                }
            }
        })?;
        info!(controller = %name, "controller thread started");

        Ok(Self { name, clock_tx: Some(clock_tx), ack_rx, shared, handle: Some(handle) })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn disconnected(&self) -> ControlError {
        ControlError::Disconnected { controller: self.name.clone() }
    }
}

impl Controller for ThreadedController {
    fn advance(&mut self, passed_ms: u64, io: &mut ControlValues) -> ControlResult<()> {
        *lock(&self.shared) = *io;

        let clock = self.clock_tx.as_ref().ok_or_else(|| self.disconnected())?;
        clock.send(passed_ms).map_err(|_| self.disconnected())?;
        self.ack_rx.recv().map_err(|_| self.disconnected())?;

        *io = *lock(&self.shared);
        Ok(())
    }
}

impl Drop for ThreadedController {
    fn drop(&mut self) {
        self.clock_tx.take();
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(()) => info!(controller = %self.name, "controller thread stopped"),
                Err(_) => warn!(controller = %self.name, "controller thread panicked"),
            }
        }
    }
}

/// A panicking loop leaves the array as it was; keep using it.
fn lock(values: &Mutex<ControlValues>) -> MutexGuard<'_, ControlValues> {
    values.lock().unwrap_or_else(PoisonError::into_inner)
}
