use ct_collision::{Shape, Tag};
use ct_core::{NodeId, Pose, Vec2};
use ct_sim::World;

use crate::ModuleResult;

/// Edge length of a box.
pub const BOX_LENGTH: f64 = 5.0;

/// A package: rides moving shapes and trips light barriers.
#[derive(Clone, Debug)]
pub struct BoxItem {
    pub name: String,
    pub node: NodeId,
}

impl BoxItem {
    /// Place a new box at `position` relative to `parent`.
    pub fn spawn(
        world:    &mut World,
        name:     impl Into<String>,
        parent:   NodeId,
        position: Vec2,
    ) -> ModuleResult<Self> {
        let name = name.into();
        let node = world.add_collidable(
            format!("{name}_element"),
            Pose::new(position, 0.0),
            parent,
            Shape::rectangle(BOX_LENGTH, BOX_LENGTH),
            Tag::MovablePoint | Tag::SegmentCollidable,
        )?;
        Ok(Self { name, node })
    }
}
