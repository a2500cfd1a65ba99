//! A belt conveyor.
//!
//! Node layout (all centred on the module):
//!
//! ```text
//! <name>_root          outline rectangle  w × h      no tags
//! ├── <name>_belt_sprite  rectangle       w × h/2    no tags
//! │   └── light barriers  segments of length h
//! └── <name>_belt         rectangle       w × h/2    MovingShape
//!     └── boxes riding the belt
//! ```
//!
//! The belt runs a conveyance movement, so it carries its children while
//! its own pose stays put.  The barriers hang off the sprite rather than the
//! belt so they are never conveyed.

use ct_collision::{Shape, Tag, TagSet};
use ct_core::{MovementId, NodeId, Pose, Vec2};
use ct_sim::World;
use ct_space::Movement;
use tracing::debug;

use crate::{BeltDirection, BoxItem, LightBarrier, ModuleError, ModuleResult};

/// Light-barrier arrangement across the belt.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BarrierLayout {
    None,
    /// One barrier across the middle.
    #[default]
    Single,
    /// Two barriers near either end, at `±0.4 · width`.
    Double,
}

/// Offset of the outer barriers of a [`BarrierLayout::Double`] belt, as a
/// fraction of the belt width.
const DOUBLE_BARRIER_OFFSET: f64 = 0.4;

#[derive(Clone, Debug, PartialEq)]
pub struct ConveyorSpec {
    pub width: f64,
    pub height: f64,
    /// Belt speed in units per second.
    pub speed: f64,
    pub barriers: BarrierLayout,
}

impl Default for ConveyorSpec {
    fn default() -> Self {
        Self { width: 20.0, height: 10.0, speed: 10.0, barriers: BarrierLayout::Double }
    }
}

pub struct Conveyor {
    pub name: String,
    pub spec: ConveyorSpec,
    pub root: NodeId,
    pub belt_sprite: NodeId,
    pub belt: NodeId,
    pub barriers: Vec<LightBarrier>,
    belt_movement: Option<MovementId>,
    direction: BeltDirection,
    spawned: u32,
}

impl Conveyor {
    pub fn new(
        world:  &mut World,
        parent: NodeId,
        name:   impl Into<String>,
        pose:   Pose,
        spec:   ConveyorSpec,
    ) -> ModuleResult<Self> {
        let name = name.into();
        let (w, h) = (spec.width, spec.height);

        let root = world.add_collidable(
            format!("{name}_root"),
            pose,
            parent,
            Shape::rectangle(w, h),
            TagSet::EMPTY,
        )?;
        let belt_sprite = world.add_collidable(
            format!("{name}_belt_sprite"),
            Pose::IDENTITY,
            root,
            Shape::rectangle(w, h / 2.0),
            TagSet::EMPTY,
        )?;
        let belt = world.add_collidable(
            format!("{name}_belt"),
            Pose::IDENTITY,
            root,
            Shape::rectangle(w, h / 2.0),
            Tag::MovingShape.into(),
        )?;

        let offsets: &[f64] = match spec.barriers {
            BarrierLayout::None => &[],
            BarrierLayout::Single => &[0.0],
            BarrierLayout::Double => &[-DOUBLE_BARRIER_OFFSET, DOUBLE_BARRIER_OFFSET],
        };
        let mut barriers = Vec::with_capacity(offsets.len());
        for (i, &f) in offsets.iter().enumerate() {
            let barrier_name = if offsets.len() == 1 {
                format!("{name}_light_barrier")
            } else {
                format!("{name}_light_barrier_{}", i + 1)
            };
            barriers.push(LightBarrier::new(world, barrier_name, belt_sprite, Vec2::new(w * f, 0.0), h)?);
        }

        Ok(Self {
            name,
            spec,
            root,
            belt_sprite,
            belt,
            barriers,
            belt_movement: None,
            direction: BeltDirection::Stopped,
            spawned: 0,
        })
    }

    // ── Actuators ─────────────────────────────────────────────────────────

    pub fn start_move_forward(&mut self, world: &mut World) -> ModuleResult<()> {
        self.start_move(world, BeltDirection::Forward)
    }

    pub fn start_move_backward(&mut self, world: &mut World) -> ModuleResult<()> {
        self.start_move(world, BeltDirection::Backward)
    }

    fn start_move(&mut self, world: &mut World, direction: BeltDirection) -> ModuleResult<()> {
        if self.belt_movement.is_some() {
            return Err(ModuleError::AlreadyTranslating { module: self.name.clone() });
        }
        let velocity = Vec2::new(self.spec.speed * direction.signum() as f64, 0.0);
        let id = world.tree.start_movement(self.belt, Movement::conveyance(velocity))?;
        self.belt_movement = Some(id);
        self.direction = direction;
        debug!(module = %self.name, %direction, "belt started");
        Ok(())
    }

    /// Stop the belt.  Stopping a stopped belt is a no-op.
    pub fn stop_move(&mut self, world: &mut World) -> ModuleResult<()> {
        if let Some(id) = self.belt_movement.take() {
            world.tree.end_movement(self.belt, id)?;
            self.direction = BeltDirection::Stopped;
            debug!(module = %self.name, "belt stopped");
        }
        Ok(())
    }

    #[inline]
    pub fn current_direction(&self) -> BeltDirection {
        self.direction
    }

    // ── Sensors ───────────────────────────────────────────────────────────

    /// Reading of barrier `index`; `false` if there is no such barrier.
    pub fn is_light_barrier_active(&self, world: &World, index: usize) -> bool {
        self.barriers.get(index).is_some_and(|b| b.is_active(world))
    }

    // ── Boxes ─────────────────────────────────────────────────────────────

    /// Put a new box on the belt at `offset · width` from the centre.
    pub fn spawn_box(&mut self, world: &mut World, offset: f64) -> ModuleResult<BoxItem> {
        self.spawned += 1;
        let name = format!("{}_box_{}", self.name, self.spawned);
        BoxItem::spawn(world, name, self.belt, Vec2::new(self.spec.width * offset, 0.0))
    }
}
