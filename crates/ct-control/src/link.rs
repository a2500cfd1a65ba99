use ct_modules::{BeltDirection, TurnDirection, TurnTable};
use ct_sim::World;
use tracing::trace;

use crate::{ControlResult, ControlSlot, ControlValues, Controller};

/// Connects one turntable to its controller.
pub struct ModuleLink<C = Box<dyn Controller + Send>> {
    controller: C,
    values: ControlValues,
}

impl<C: Controller> ModuleLink<C> {
    pub fn new(controller: C) -> Self {
        Self { controller, values: ControlValues::default() }
    }

    /// Values as of the end of the last [`sync`](Self::sync).
    pub fn values(&self) -> &ControlValues {
        &self.values
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// Write the sensors, give the controller `passed_ms`, then make the
    /// table do what the controller asked for.  A changed intent stops the
    /// running actuator before starting the new direction.
    pub fn sync(&mut self, world: &mut World, table: &mut TurnTable, passed_ms: u64) -> ControlResult<()> {
        let v = &mut self.values;
        v.set_flag(ControlSlot::LightBarrier, table.is_light_barrier_active(world));
        v.set_flag(ControlSlot::ZeroLimit, table.is_not_turned(world));
        v.set_flag(ControlSlot::NinetyLimit, table.is_fully_turned(world));

        self.controller.advance(passed_ms, &mut self.values)?;

        let rotation = TurnDirection::from_signum(self.values[ControlSlot::Rotation]);
        if table.current_rotation_direction() != rotation {
            trace!(module = %table.name, %rotation, "rotation intent changed");
            if table.current_rotation_direction() != TurnDirection::Stopped {
                table.stop_turning(world)?;
            }
            match rotation {
                TurnDirection::Clockwise => table.turn_clockwise(world)?,
                TurnDirection::CounterClockwise => table.turn_counter_clockwise(world)?,
                TurnDirection::Stopped => {}
            }
        }

        let translation = BeltDirection::from_signum(self.values[ControlSlot::Translation]);
        if table.current_translation_direction() != translation {
            trace!(module = %table.name, %translation, "translation intent changed");
            table.stop_move(world)?;
            match translation {
                BeltDirection::Forward => table.start_move_forward(world)?,
                BeltDirection::Backward => table.start_move_backward(world)?,
                BeltDirection::Stopped => {}
            }
        }
        Ok(())
    }
}
