//! Collision geometry, always centred on the owning node.

/// Shape of a collidable node, in the node's local frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    /// A segment along the node's local y axis.  A zero length models a
    /// point.
    Segment { length: f64 },

    /// Axis-aligned in the node's frame, `width` along x.
    Rectangle { width: f64, height: f64 },
}

impl Shape {
    pub fn point() -> Self {
        Shape::Segment { length: 0.0 }
    }

    pub fn segment(length: f64) -> Self {
        Shape::Segment { length }
    }

    pub fn rectangle(width: f64, height: f64) -> Self {
        Shape::Rectangle { width, height }
    }

    /// Radius used by the broad phase.
    ///
    /// For rectangles this is the full diagonal, twice what a tight circle
    /// would need.  Loose is fine: the narrow phase settles false positives.
    pub fn broad_radius(&self) -> f64 {
        match *self {
            Shape::Segment { length } => length / 2.0,
            Shape::Rectangle { width, height } => width.hypot(height),
        }
    }

    /// `(width, height)` for rectangles.
    pub fn rectangle_dims(&self) -> Option<(f64, f64)> {
        match *self {
            Shape::Rectangle { width, height } => Some((width, height)),
            Shape::Segment { .. } => None,
        }
    }

    pub fn segment_length(&self) -> Option<f64> {
        match *self {
            Shape::Segment { length } => Some(length),
            Shape::Rectangle { .. } => None,
        }
    }
}
