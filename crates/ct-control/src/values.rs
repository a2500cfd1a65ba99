//! The fixed five-slot value array shared with control code.

use std::ops::{Index, IndexMut};

pub const SLOT_COUNT: usize = 5;

/// Slot positions.  Sensors are `0`/`1`, actuators `-1`/`0`/`1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(usize)]
pub enum ControlSlot {
    LightBarrier = 0,
    /// Table at its 0° stop.
    ZeroLimit = 1,
    /// Table at its 90° stop.
    NinetyLimit = 2,
    /// Requested turn direction; clockwise is positive.
    Rotation = 3,
    /// Requested belt direction; forward is positive.
    Translation = 4,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ControlValues(pub [i32; SLOT_COUNT]);

impl ControlValues {
    /// Sensor reading as a flag; any positive value is set.
    #[inline]
    pub fn flag(&self, slot: ControlSlot) -> bool {
        self[slot] > 0
    }

    #[inline]
    pub fn set_flag(&mut self, slot: ControlSlot, on: bool) {
        self[slot] = i32::from(on);
    }
}

impl Index<ControlSlot> for ControlValues {
    type Output = i32;

    #[inline]
    fn index(&self, slot: ControlSlot) -> &i32 {
        &self.0[slot as usize]
    }
}

impl IndexMut<ControlSlot> for ControlValues {
    #[inline]
    fn index_mut(&mut self, slot: ControlSlot) -> &mut i32 {
        &mut self.0[slot as usize]
    }
}
