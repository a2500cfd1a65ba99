//! Actuator directions and their `-1 / 0 / 1` encoding.

use std::fmt;

/// Belt travel along the conveyor's local x axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BeltDirection {
    Backward,
    #[default]
    Stopped,
    Forward,
}

impl BeltDirection {
    pub fn signum(self) -> i32 {
        match self {
            BeltDirection::Backward => -1,
            BeltDirection::Stopped => 0,
            BeltDirection::Forward => 1,
        }
    }

    /// Any negative value is backward, any positive one forward.
    pub fn from_signum(value: i32) -> Self {
        match value.signum() {
            -1 => BeltDirection::Backward,
            1 => BeltDirection::Forward,
            _ => BeltDirection::Stopped,
        }
    }
}

/// Table rotation; clockwise turns towards the 90° limit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TurnDirection {
    CounterClockwise,
    #[default]
    Stopped,
    Clockwise,
}

impl TurnDirection {
    pub fn signum(self) -> i32 {
        match self {
            TurnDirection::CounterClockwise => -1,
            TurnDirection::Stopped => 0,
            TurnDirection::Clockwise => 1,
        }
    }

    pub fn from_signum(value: i32) -> Self {
        match value.signum() {
            -1 => TurnDirection::CounterClockwise,
            1 => TurnDirection::Clockwise,
            _ => TurnDirection::Stopped,
        }
    }
}

impl fmt::Display for BeltDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
