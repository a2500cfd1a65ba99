use ct_collision::{Shape, Tag};
use ct_core::{NodeId, Pose, Vec2};
use ct_sim::World;

use crate::ModuleResult;

/// A beam across a belt.  Active while a box crosses it.
#[derive(Clone, Debug)]
pub struct LightBarrier {
    pub name: String,
    pub node: NodeId,
}

impl LightBarrier {
    /// The beam lies along the parent's local y axis, centred on `position`.
    pub fn new(
        world:    &mut World,
        name:     impl Into<String>,
        parent:   NodeId,
        position: Vec2,
        length:   f64,
    ) -> ModuleResult<Self> {
        let name = name.into();
        let node = world.add_collidable(
            name.clone(),
            Pose::new(position, 0.0),
            parent,
            Shape::segment(length),
            Tag::Segment.into(),
        )?;
        Ok(Self { name, node })
    }

    /// Sensor reading as of the last tick.
    pub fn is_active(&self, world: &World) -> bool {
        world.is_colliding(self.node)
    }
}
