use crate::{OutputResult, PoseRow, TickRow};

/// A pose-trace sink.
///
/// Errors are returned here but swallowed by the observer, which keeps the
/// first one for [`PoseTraceObserver::take_error`](crate::PoseTraceObserver::take_error).
pub trait PoseWriter {
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()>;

    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()>;

    /// Flush everything.  Calling it again is a no-op.
    fn finish(&mut self) -> OutputResult<()>;
}
