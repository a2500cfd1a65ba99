//! Plain data rows written by output backends.

/// One node at one snapshot tick.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseRow {
    pub tick:      u64,
    pub node:      u32,
    pub name:      String,
    pub x:         f64,
    pub y:         f64,
    /// Global rotation in degrees, `[0, 360)`.
    pub rotation:  f64,
    pub colliding: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickRow {
    pub tick:            u64,
    pub attached:        u64,
    pub detached:        u64,
    pub colliding_pairs: u64,
}
