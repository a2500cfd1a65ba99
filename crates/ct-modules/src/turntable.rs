//! A conveyor mounted on a table that turns between 0° and 90°.
//!
//! ```text
//! <name>_root                 plain node at the module position
//! └── <name>_socket           outline rectangle  w × w
//!     └── <name>_table        turning node
//!         └── <name>_conveyor one-barrier conveyor, w × w
//! ```

use ct_collision::{Shape, TagSet};
use ct_core::{MovementId, NodeId, Pose, Vec2};
use ct_sim::World;
use ct_space::Movement;
use tracing::debug;

use crate::{
    BarrierLayout, BeltDirection, BoxItem, Conveyor, ConveyorSpec, ModuleError, ModuleResult,
    TurnDirection,
};

/// Clockwise end stop of the table.
pub const MAX_ROTATION_DEG: f64 = 90.0;

/// Tolerance of the end-position sensors.
const LIMIT_EPS: f64 = 1e-6;

#[derive(Clone, Debug, PartialEq)]
pub struct TurnTableSpec {
    /// Edge length of the square module.
    pub width: f64,
    pub belt_speed: f64,
    /// Degrees per second.
    pub rotation_speed: f64,
}

impl Default for TurnTableSpec {
    fn default() -> Self {
        Self { width: 10.0, belt_speed: 10.0, rotation_speed: 45.0 }
    }
}

pub struct TurnTable {
    pub name: String,
    pub spec: TurnTableSpec,
    pub root: NodeId,
    pub socket: NodeId,
    pub table: NodeId,
    pub conveyor: Conveyor,
    rotation: Option<(MovementId, TurnDirection)>,
}

impl TurnTable {
    pub fn new(
        world:    &mut World,
        parent:   NodeId,
        name:     impl Into<String>,
        position: Vec2,
        rotation: f64,
        spec:     TurnTableSpec,
    ) -> ModuleResult<Self> {
        let name = name.into();
        let root = world.add_node(format!("{name}_root"), Pose::new(position, rotation), parent)?;
        let socket = world.add_collidable(
            format!("{name}_socket"),
            Pose::IDENTITY,
            root,
            Shape::rectangle(spec.width, spec.width),
            TagSet::EMPTY,
        )?;
        let table = world.add_node(format!("{name}_table"), Pose::IDENTITY, socket)?;
        let conveyor = Conveyor::new(
            world,
            table,
            format!("{name}_conveyor"),
            Pose::IDENTITY,
            ConveyorSpec {
                width:    spec.width,
                height:   spec.width,
                speed:    spec.belt_speed,
                barriers: BarrierLayout::Single,
            },
        )?;
        Ok(Self { name, spec, root, socket, table, conveyor, rotation: None })
    }

    // ── Belt ──────────────────────────────────────────────────────────────

    pub fn start_move_forward(&mut self, world: &mut World) -> ModuleResult<()> {
        self.conveyor.start_move_forward(world)
    }

    pub fn start_move_backward(&mut self, world: &mut World) -> ModuleResult<()> {
        self.conveyor.start_move_backward(world)
    }

    pub fn stop_move(&mut self, world: &mut World) -> ModuleResult<()> {
        self.conveyor.stop_move(world)
    }

    pub fn current_translation_direction(&self) -> BeltDirection {
        self.conveyor.current_direction()
    }

    // ── Table ─────────────────────────────────────────────────────────────

    /// Table angle relative to the socket, `[0, 360)`.
    pub fn table_rotation(&self, world: &World) -> f64 {
        world.tree.local_pose(self.table).rotation
    }

    /// Turn towards the 90° stop; the turn ends by itself on arrival.
    pub fn turn_clockwise(&mut self, world: &mut World) -> ModuleResult<()> {
        let budget = MAX_ROTATION_DEG - self.table_rotation(world);
        self.start_turn(world, TurnDirection::Clockwise, budget)
    }

    /// Turn back towards 0°.
    pub fn turn_counter_clockwise(&mut self, world: &mut World) -> ModuleResult<()> {
        let budget = self.table_rotation(world);
        self.start_turn(world, TurnDirection::CounterClockwise, budget)
    }

    fn start_turn(&mut self, world: &mut World, direction: TurnDirection, budget: f64) -> ModuleResult<()> {
        if self.rotation.is_some() {
            return Err(ModuleError::AlreadyRotating { module: self.name.clone() });
        }
        let rate = self.spec.rotation_speed * direction.signum() as f64;
        let id = world.tree.start_movement(self.table, Movement::bounded_rotation(rate, budget))?;
        self.rotation = Some((id, direction));
        debug!(module = %self.name, %direction, budget, "table turning");
        Ok(())
    }

    /// End the current turn, whether or not it reached its stop.
    pub fn stop_turning(&mut self, world: &mut World) -> ModuleResult<()> {
        let Some((id, _)) = self.rotation.take() else {
            return Err(ModuleError::NotRotating { module: self.name.clone() });
        };
        world.tree.end_movement(self.table, id)?;
        debug!(module = %self.name, "table stopped");
        Ok(())
    }

    /// Direction of the running turn.  A turn that has reached its stop
    /// still counts until [`stop_turning`](Self::stop_turning) is called.
    pub fn current_rotation_direction(&self) -> TurnDirection {
        self.rotation.map_or(TurnDirection::Stopped, |(_, d)| d)
    }

    // ── Sensors ───────────────────────────────────────────────────────────

    pub fn is_fully_turned(&self, world: &World) -> bool {
        (self.table_rotation(world) - MAX_ROTATION_DEG).abs() < LIMIT_EPS
    }

    pub fn is_not_turned(&self, world: &World) -> bool {
        let r = self.table_rotation(world);
        r < LIMIT_EPS || 360.0 - r < LIMIT_EPS
    }

    pub fn is_light_barrier_active(&self, world: &World) -> bool {
        self.conveyor.is_light_barrier_active(world, 0)
    }

    pub fn spawn_box(&mut self, world: &mut World) -> ModuleResult<BoxItem> {
        self.conveyor.spawn_box(world, 0.0)
    }
}
