//! Per-tick pose deltas.
//!
//! A node may hold any number of concurrent movements.  Each one is applied
//! independently every tick through the pose setters, so concurrent
//! movements on one node simply add up.

use ct_core::{NodeId, Vec2};

use crate::PoseTree;

/// One running movement instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Movement {
    /// Constant angular rate, forever.
    Rotation { deg_per_sec: f64 },

    /// Angular rate with a budget of degrees still to turn.  Once the budget
    /// reaches zero the movement is permanently inert.
    BoundedRotation {
        deg_per_sec: f64,
        remaining:   f64,
        done:        bool,
    },

    /// Constant velocity in the node's own local frame (relative to its
    /// parent).
    Translation { velocity: Vec2 },

    /// Velocity with a budget of distance still to travel.
    BoundedTranslation {
        velocity:  Vec2,
        remaining: f64,
        done:      bool,
    },

    /// Same velocity, applied to every **direct** child instead of the node
    /// itself.  Models a belt surface carrying packages while the belt frame
    /// stays put.
    Conveyance { velocity: Vec2 },
}

impl Movement {
    pub fn rotation(deg_per_sec: f64) -> Self {
        Movement::Rotation { deg_per_sec }
    }

    /// A rotation at `deg_per_sec` that stops after turning `limit_deg`
    /// degrees in total.  Negative limits are treated as zero.
    pub fn bounded_rotation(deg_per_sec: f64, limit_deg: f64) -> Self {
        Movement::BoundedRotation {
            deg_per_sec,
            remaining: limit_deg.max(0.0),
            done:      false,
        }
    }

    pub fn translation(velocity: Vec2) -> Self {
        Movement::Translation { velocity }
    }

    /// A translation at `velocity` that stops after `limit` units of travel.
    pub fn bounded_translation(velocity: Vec2, limit: f64) -> Self {
        Movement::BoundedTranslation {
            velocity,
            remaining: limit.max(0.0),
            done:      false,
        }
    }

    pub fn conveyance(velocity: Vec2) -> Self {
        Movement::Conveyance { velocity }
    }

    /// `true` for an exhausted bounded movement.  Unbounded movements are
    /// never done.
    pub fn is_done(&self) -> bool {
        matches!(
            self,
            Movement::BoundedRotation { done: true, .. } | Movement::BoundedTranslation { done: true, .. }
        )
    }

    /// Apply `dt` seconds of this movement to `node`.
    pub(crate) fn advance(&mut self, tree: &mut PoseTree, node: NodeId, dt: f64) {
        match self {
            Movement::Rotation { deg_per_sec } => {
                tree.rotate_local(node, *deg_per_sec * dt);
            }
            Movement::BoundedRotation { deg_per_sec, remaining, done } => {
                if *done {
                    return;
                }
                let applied = (*deg_per_sec * dt).abs().min(*remaining);
                *remaining -= applied;
                tree.rotate_local(node, applied.copysign(*deg_per_sec));
                if *remaining <= 0.0 {
                    *done = true;
                }
            }
            Movement::Translation { velocity } => {
                tree.translate_local(node, *velocity * dt);
            }
            Movement::BoundedTranslation { velocity, remaining, done } => {
                if *done {
                    return;
                }
                let speed = velocity.length();
                let applied = (speed * dt.abs()).min(*remaining);
                *remaining -= applied;
                if speed > 0.0 {
                    tree.translate_local(node, *velocity * (applied / speed));
                }
                if *remaining <= 0.0 {
                    *done = true;
                }
            }
            Movement::Conveyance { velocity } => {
                let delta = *velocity * dt;
                let children = tree.children(node).to_vec();
                for child in children {
                    tree.translate_local(child, delta);
                }
            }
        }
    }
}
