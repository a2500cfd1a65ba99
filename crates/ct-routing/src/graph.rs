//! Module adjacency graph and builder.
//!
//! # Data layout
//!
//! Outgoing links use **Compressed Sparse Row (CSR)** format.  Links of
//! module `m` occupy
//!
//! ```text
//! link_to[ out_start[m] .. out_start[m+1] ]
//! ```
//!
//! sorted by destination id, so a search visits neighbours in a fixed
//! order.

use std::fmt;

use ct_core::{GridSpec, ModuleId};
use rustc_hash::FxHashMap;

// ── Direction ─────────────────────────────────────────────────────────────────

/// Side of a module a box leaves through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Left,
    Top,
    Right,
    Bottom,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Top, Direction::Right, Direction::Bottom];

    /// Grid step `(dx, dy)`, y up.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Top => (0, 1),
            Direction::Right => (1, 0),
            Direction::Bottom => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

// ── ModuleGraph ───────────────────────────────────────────────────────────────

/// Directed module graph.  Build with [`ModuleGraphBuilder`] or
/// [`ModuleGraph::from_grid`].
pub struct ModuleGraph {
    names: Vec<String>,
    by_name: FxHashMap<String, ModuleId>,

    /// CSR row pointer, length `module_count + 1`.
    pub out_start: Vec<u32>,
    pub link_to: Vec<ModuleId>,
    /// Direction the box leaves `from` in to reach `link_to`.
    pub link_dir: Vec<Direction>,
}

impl ModuleGraph {
    /// One module per grid cell (named `t_<x>_<y>`, ids in column-major
    /// order) linked to its existing 4-neighbours.
    pub fn from_grid(grid: &GridSpec) -> Self {
        let mut b = ModuleGraphBuilder::new();
        for (x, y) in grid.cells() {
            b.add_module(GridSpec::cell_name(x, y));
        }
        for (x, y) in grid.cells() {
            let from = GridSpec::cell_name(x, y);
            for dir in Direction::ALL {
                let (dx, dy) = dir.offset();
                let (nx, ny) = (x as i64 + dx, y as i64 + dy);
                if nx < 1 || ny < 1 || !grid.contains(nx as u32, ny as u32) {
                    continue;
                }
                // Both ends were added above.
                let _ = b.add_directed_link(&from, &GridSpec::cell_name(nx as u32, ny as u32), dir);
            }
        }
        b.build()
    }

    pub fn module_count(&self) -> usize {
        self.names.len()
    }

    pub fn link_count(&self) -> usize {
        self.link_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn id(&self, name: &str) -> Option<ModuleId> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, module: ModuleId) -> &str {
        &self.names[module.index()]
    }

    /// `(neighbour, direction)` for every outgoing link of `module`.
    #[inline]
    pub fn neighbours(&self, module: ModuleId) -> impl Iterator<Item = (ModuleId, Direction)> + '_ {
        let start = self.out_start[module.index()] as usize;
        let end = self.out_start[module.index() + 1] as usize;
        (start..end).map(|i| (self.link_to[i], self.link_dir[i]))
    }

    /// Direction of the direct link `from → to`, if there is one.
    pub fn direction(&self, from: ModuleId, to: ModuleId) -> Option<Direction> {
        self.neighbours(from).find(|&(n, _)| n == to).map(|(_, d)| d)
    }
}

// ── ModuleGraphBuilder ────────────────────────────────────────────────────────

/// Construct a [`ModuleGraph`] incrementally, then call
/// [`build`](Self::build).
#[derive(Default)]
pub struct ModuleGraphBuilder {
    names: Vec<String>,
    by_name: FxHashMap<String, ModuleId>,
    raw_links: Vec<(ModuleId, ModuleId, Direction)>,
}

impl ModuleGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module, or return the id of the one already called `name`.
    pub fn add_module(&mut self, name: impl Into<String>) -> ModuleId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = ModuleId::from_index(self.names.len());
        self.by_name.insert(name.clone(), id);
        self.names.push(name);
        id
    }

    /// Add a one-way link.  Returns `false` if either module is unknown.
    pub fn add_directed_link(&mut self, from: &str, to: &str, dir: Direction) -> bool {
        match (self.by_name.get(from), self.by_name.get(to)) {
            (Some(&f), Some(&t)) => {
                self.raw_links.push((f, t, dir));
                true
            }
            _ => false,
        }
    }

    /// Link two modules both ways: `a → b` leaves `a` through `dir`, the way
    /// back leaves `b` through the opposite side.  Adds missing modules.
    pub fn link(&mut self, a: &str, b: &str, dir: Direction) {
        let ia = self.add_module(a);
        let ib = self.add_module(b);
        self.raw_links.push((ia, ib, dir));
        self.raw_links.push((ib, ia, dir.opposite()));
    }

    pub fn build(self) -> ModuleGraph {
        let count = self.names.len();
        let mut raw = self.raw_links;
        raw.sort_unstable_by_key(|&(f, t, _)| (f, t));
        raw.dedup_by_key(|&mut (f, t, _)| (f, t));

        let mut out_start = vec![0u32; count + 1];
        for &(f, _, _) in &raw {
            out_start[f.index() + 1] += 1;
        }
        for i in 1..=count {
            out_start[i] += out_start[i - 1];
        }

        ModuleGraph {
            names: self.names,
            by_name: self.by_name,
            out_start,
            link_to: raw.iter().map(|&(_, t, _)| t).collect(),
            link_dir: raw.iter().map(|&(_, _, d)| d).collect(),
        }
    }
}
