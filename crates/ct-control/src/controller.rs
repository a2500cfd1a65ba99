//! Control logic and the controllers that drive it.
//!
//! A [`ControlLogic`] is the firmware: `setup` once, then `on_loop` every
//! time the clock advances.  A [`Controller`] owns a logic and decides where
//! it runs.  [`InlineController`] calls it on the simulation thread;
//! [`ThreadedController`](crate::ThreadedController) runs it on a thread of
//! its own and blocks until the loop has acknowledged.

use crate::{ControlResult, ControlValues};

pub trait ControlLogic: Send {
    fn setup(&mut self) {}

    /// One pass of the control loop.  `millis` is the total time the
    /// controller has seen so far.
    fn on_loop(&mut self, millis: u64, io: &mut ControlValues);
}

impl<F> ControlLogic for F
where
    F: FnMut(u64, &mut ControlValues) + Send,
{
    fn on_loop(&mut self, millis: u64, io: &mut ControlValues) {
        self(millis, io)
    }
}

/// "Time advanced by `passed_ms`": run the logic and return once it is done.
pub trait Controller {
    fn advance(&mut self, passed_ms: u64, io: &mut ControlValues) -> ControlResult<()>;
}

impl<C: Controller + ?Sized> Controller for Box<C> {
    fn advance(&mut self, passed_ms: u64, io: &mut ControlValues) -> ControlResult<()> {
        (**self).advance(passed_ms, io)
    }
}

/// Runs the logic synchronously on the caller's thread.
pub struct InlineController<L> {
    logic: L,
    millis: u64,
}

impl<L: ControlLogic> InlineController<L> {
    pub fn new(mut logic: L) -> Self {
        logic.setup();
        Self { logic, millis: 0 }
    }

    pub fn millis(&self) -> u64 {
        self.millis
    }

    pub fn logic(&self) -> &L {
        &self.logic
    }
}

impl<L: ControlLogic> Controller for InlineController<L> {
    fn advance(&mut self, passed_ms: u64, io: &mut ControlValues) -> ControlResult<()> {
        self.millis += passed_ms;
        self.logic.on_loop(self.millis, io);
        Ok(())
    }
}
