//! `PoseTraceObserver<W>` — bridges `WorldObserver` to a `PoseWriter`.

use ct_core::Tick;
use ct_sim::{TickReport, World, WorldObserver};

use crate::writer::PoseWriter;
use crate::{OutputError, OutputResult, PoseRow, TickRow};

/// Writes a tick row every tick and a pose row per node every snapshot.
///
/// Observer callbacks cannot fail, so the first writer error is kept and
/// later ones are dropped.  Check [`take_error`](Self::take_error) once the
/// run is over.
pub struct PoseTraceObserver<W: PoseWriter> {
    writer:      W,
    first_error: Option<OutputError>,
}

impl<W: PoseWriter> PoseTraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, first_error: None }
    }

    pub fn take_error(&mut self) -> Option<OutputError> {
        self.first_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn keep(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            self.first_error.get_or_insert(e);
        }
    }
}

impl<W: PoseWriter> WorldObserver for PoseTraceObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        let row = TickRow {
            tick:            tick.0,
            attached:        report.attached as u64,
            detached:        report.detached as u64,
            colliding_pairs: report.colliding_pairs as u64,
        };
        let result = self.writer.write_tick(&row);
        self.keep(result);
    }

    fn on_snapshot(&mut self, tick: Tick, world: &World) {
        let rows: Vec<PoseRow> = world
            .views()
            .into_iter()
            .map(|v| PoseRow {
                tick:      tick.0,
                node:      v.id.0,
                name:      v.name,
                x:         v.pose.position.x,
                y:         v.pose.position.y,
                rotation:  v.pose.rotation,
                colliding: v.is_colliding,
            })
            .collect();
        let result = self.writer.write_poses(&rows);
        self.keep(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.keep(result);
    }
}
