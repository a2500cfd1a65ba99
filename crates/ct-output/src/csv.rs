//! CSV backend: `poses.csv` and `ticks.csv`.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::PoseWriter;
use crate::{OutputResult, PoseRow, TickRow};

pub struct CsvPoseWriter {
    poses:    Writer<File>,
    ticks:    Writer<File>,
    finished: bool,
}

impl CsvPoseWriter {
    /// Create both files in `dir` (which must exist) and write the headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut poses = Writer::from_path(dir.join("poses.csv"))?;
        poses.write_record(["tick", "node", "name", "x", "y", "rotation", "colliding"])?;

        let mut ticks = Writer::from_path(dir.join("ticks.csv"))?;
        ticks.write_record(["tick", "attached", "detached", "colliding_pairs"])?;

        Ok(Self { poses, ticks, finished: false })
    }
}

impl PoseWriter for CsvPoseWriter {
    fn write_poses(&mut self, rows: &[PoseRow]) -> OutputResult<()> {
        for row in rows {
            self.poses.write_record(&[
                row.tick.to_string(),
                row.node.to_string(),
                row.name.clone(),
                row.x.to_string(),
                row.y.to_string(),
                row.rotation.to_string(),
                (row.colliding as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick(&mut self, row: &TickRow) -> OutputResult<()> {
        self.ticks.write_record(&[
            row.tick.to_string(),
            row.attached.to_string(),
            row.detached.to_string(),
            row.colliding_pairs.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.poses.flush()?;
        self.ticks.flush()?;
        Ok(())
    }
}
