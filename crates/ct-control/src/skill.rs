//! Receive-from / forward-to control logic for a turntable.
//!
//! A skill names the side of the module a box comes in through or leaves
//! by.  Each loop pass does at most one of, in order:
//!
//! 1. pick up the next queued skill when idle,
//! 2. turn the table until the stop that faces that side reports,
//! 3. start the belt, then stop it once the skill is done.
//!
//! Left and right are served at 0°, top and bottom at 90°.  At 0° the belt's
//! forward end faces right; at 90° it faces bottom.
//!
//! A receive is done when the light barrier reports the box.  A forward is
//! done once the barrier has stayed clear for `clear_after_ms`.

use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use ct_modules::{BeltDirection, TurnDirection};
use ct_routing::Direction;
use tracing::debug;

use crate::{ControlError, ControlLogic, ControlResult, ControlSlot, ControlValues};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Skill {
    ReceiveFrom(Direction),
    ForwardTo(Direction),
}

impl Skill {
    pub fn side(self) -> Direction {
        match self {
            Skill::ReceiveFrom(d) | Skill::ForwardTo(d) => d,
        }
    }

    fn needs_turned(self) -> bool {
        matches!(self.side(), Direction::Top | Direction::Bottom)
    }

    fn belt_direction(self) -> BeltDirection {
        let towards_forward_end = matches!(self.side(), Direction::Right | Direction::Bottom);
        match (self, towards_forward_end) {
            (Skill::ForwardTo(_), true) | (Skill::ReceiveFrom(_), false) => BeltDirection::Forward,
            _ => BeltDirection::Backward,
        }
    }
}

/// Sending half of a [`SkillLogic`]: queue skills, collect completions.
#[derive(Clone)]
pub struct SkillHandle {
    name: String,
    commands: Sender<Skill>,
    done: Receiver<Skill>,
}

impl SkillHandle {
    pub fn command(&self, skill: Skill) -> ControlResult<()> {
        self.commands
            .send(skill)
            .map_err(|_| ControlError::Disconnected { controller: self.name.clone() })
    }

    /// Next finished skill, if any.
    pub fn try_done(&self) -> Option<Skill> {
        self.done.try_recv().ok()
    }
}

pub struct SkillLogic {
    name: String,
    commands: Receiver<Skill>,
    done: Sender<Skill>,
    current: Option<Skill>,
    turned: bool,
    clear_after_ms: u64,
    clear_since: Option<u64>,
}

impl SkillLogic {
    /// Logic for a table that starts at 0°.
    pub fn new(name: impl Into<String>, clear_after_ms: u64) -> (Self, SkillHandle) {
        let name = name.into();
        let (cmd_tx, cmd_rx) = unbounded();
        let (done_tx, done_rx) = unbounded();
        let logic = Self {
            name: name.clone(),
            commands: cmd_rx,
            done: done_tx,
            current: None,
            turned: false,
            clear_after_ms,
            clear_since: None,
        };
        (logic, SkillHandle { name, commands: cmd_tx, done: done_rx })
    }

    pub fn current(&self) -> Option<Skill> {
        self.current
    }

    fn turn(&mut self, skill: Skill, io: &mut ControlValues) {
        let want_turned = skill.needs_turned();
        if io[ControlSlot::Rotation] == 0 {
            let dir = if want_turned { TurnDirection::Clockwise } else { TurnDirection::CounterClockwise };
            io[ControlSlot::Rotation] = dir.signum();
            return;
        }
        let arrived = if want_turned {
            io.flag(ControlSlot::NinetyLimit)
        } else {
            io.flag(ControlSlot::ZeroLimit)
        };
        if arrived {
            io[ControlSlot::Rotation] = 0;
            self.turned = want_turned;
        }
    }

    fn translate(&mut self, millis: u64, skill: Skill, io: &mut ControlValues) {
        if io[ControlSlot::Translation] == 0 {
            io[ControlSlot::Translation] = skill.belt_direction().signum();
            self.clear_since = None;
            return;
        }
        let barrier = io.flag(ControlSlot::LightBarrier);
        let finished = match skill {
            Skill::ReceiveFrom(_) => barrier,
            Skill::ForwardTo(_) if barrier => {
                self.clear_since = None;
                false
            }
            Skill::ForwardTo(_) => {
                let since = *self.clear_since.get_or_insert(millis);
                millis - since >= self.clear_after_ms
            }
        };
        if finished {
            io[ControlSlot::Translation] = 0;
            self.current = None;
            debug!(module = %self.name, ?skill, millis, "skill done");
            // Nobody listening is fine.
            let _ = self.done.send(skill);
        }
    }
}

impl ControlLogic for SkillLogic {
    fn on_loop(&mut self, millis: u64, io: &mut ControlValues) {
        let Some(skill) = self.current else {
            match self.commands.try_recv() {
                Ok(skill) => {
                    debug!(module = %self.name, ?skill, millis, "skill started");
                    self.current = Some(skill);
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => {}
            }
            return;
        };

        if self.turned != skill.needs_turned() {
            self.turn(skill, io);
            return;
        }
        self.translate(millis, skill, io);
    }
}
