//! Grid layout description for a warehouse instance.
//!
//! A layout is a `columns × rows` grid of turntable modules, 1-based, with
//! `(1, 1)` at the bottom left.  Individual cells can be excluded to model
//! gaps in the floor plan.  The same `GridSpec` is consumed by the module
//! builder (which places turntables) and by the routing graph (which links
//! neighbouring cells), so both always agree on which modules exist.

use crate::{CoreError, CoreResult, Vec2};

/// A turntable grid instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSpec {
    pub columns: u32,
    pub rows: u32,
    /// Cells `(x, y)` with no module.
    pub excluded: Vec<(u32, u32)>,
    /// Edge length of one square module; also the grid pitch.
    pub module_width: f64,
    /// Belt speed in units per second.
    pub belt_speed: f64,
    /// Turning speed in degrees per second.
    pub rotation_speed: f64,
}

impl Default for GridSpec {
    /// The reference 6 × 3 instance with three gaps.
    fn default() -> Self {
        Self {
            columns:        6,
            rows:           3,
            excluded:       vec![(2, 1), (2, 2), (4, 3)],
            module_width:   10.0,
            belt_speed:     20.0,
            rotation_speed: 90.0,
        }
    }
}

impl GridSpec {
    /// Canonical module name for cell `(x, y)`.
    pub fn cell_name(x: u32, y: u32) -> String {
        format!("t_{x}_{y}")
    }

    /// Inverse of [`cell_name`](Self::cell_name).
    pub fn parse_cell_name(name: &str) -> Option<(u32, u32)> {
        let mut parts = name.strip_prefix("t_")?.split('_');
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((x, y))
    }

    #[inline]
    pub fn is_excluded(&self, x: u32, y: u32) -> bool {
        self.excluded.contains(&(x, y))
    }

    /// `true` if `(x, y)` is inside the grid and hosts a module.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        (1..=self.columns).contains(&x) && (1..=self.rows).contains(&y) && !self.is_excluded(x, y)
    }

    /// All module cells, column-major (x outer, y inner).
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (1..=self.columns)
            .flat_map(move |x| (1..=self.rows).map(move |y| (x, y)))
            .filter(move |&(x, y)| !self.is_excluded(x, y))
    }

    /// Number of modules in the layout.
    pub fn module_count(&self) -> usize {
        self.cells().count()
    }

    /// World position of the centre of cell `(x, y)`.
    #[inline]
    pub fn cell_position(&self, x: u32, y: u32) -> Vec2 {
        Vec2::new(self.module_width * x as f64, self.module_width * y as f64)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.columns == 0 || self.rows == 0 {
            return Err(CoreError::Config("grid must have at least one row and column".into()));
        }
        if self.module_width <= 0.0 {
            return Err(CoreError::Config("module_width must be positive".into()));
        }
        if !self.belt_speed.is_finite() || self.belt_speed <= 0.0 {
            return Err(CoreError::Config("belt_speed must be positive".into()));
        }
        if !self.rotation_speed.is_finite() || self.rotation_speed <= 0.0 {
            return Err(CoreError::Config("rotation_speed must be positive".into()));
        }
        for &(x, y) in &self.excluded {
            if !(1..=self.columns).contains(&x) || !(1..=self.rows).contains(&y) {
                return Err(CoreError::CellOutOfRange {
                    x,
                    y,
                    columns: self.columns,
                    rows:    self.rows,
                });
            }
        }
        Ok(())
    }
}
