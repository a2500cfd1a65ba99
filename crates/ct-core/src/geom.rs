//! Planar geometry: vectors, poses, and the rotation convention.
//!
//! Rotations are in **degrees, clockwise**, with the y axis pointing up.
//! `f64` is used throughout: poses are composed along parent chains every
//! tick and quarter-turn identities (four 90° steps returning to the start)
//! must hold to well below any sensor tolerance.

use std::ops::{Add, AddAssign, Mul, Sub};

/// Normalise an angle in degrees into `[0, 360)`.
///
/// Handles negative inputs and arbitrary multiples of 360.  Never returns
/// `360.0`: a value that rounds up to 360 after the shift collapses to 0.
#[inline]
pub fn normalize_deg(value: f64) -> f64 {
    ((value % 360.0) + 360.0) % 360.0
}

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2-D real vector.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Express this vector in a coordinate system rotated clockwise by
    /// `angle_deg`.
    ///
    /// Used in both directions: composing a child offset into its parent's
    /// frame (`angle = parent rotation`) and pulling a global offset back
    /// into a local frame (`angle = -parent rotation`).
    pub fn rotated_frame(self, angle_deg: f64) -> Vec2 {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        Vec2 {
            x: self.x * cos + self.y * sin,
            y: -self.x * sin + self.y * cos,
        }
    }

    /// `true` if both components are within `eps` of `other`'s.
    #[inline]
    pub fn approx_eq(self, other: Vec2, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f64, f64)> for Vec2 {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Vec2::new(x, y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// Position plus clockwise rotation in degrees.
///
/// Whether a `Pose` is local (relative to a parent) or global (relative to
/// the tree root) depends on where it came from; the type does not encode it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub position: Vec2,
    /// Degrees clockwise, normalised into `[0, 360)`.
    pub rotation: f64,
}

impl Pose {
    pub const IDENTITY: Pose = Pose { position: Vec2::ZERO, rotation: 0.0 };

    #[inline]
    pub fn new(position: Vec2, rotation: f64) -> Self {
        Self { position, rotation: normalize_deg(rotation) }
    }

    /// Compose a `local` pose expressed in `self`'s frame into the frame
    /// `self` is expressed in.
    pub fn compose(self, local: Pose) -> Pose {
        Pose {
            position: self.position + local.position.rotated_frame(self.rotation),
            rotation: normalize_deg(self.rotation + local.rotation),
        }
    }

    /// Inverse of [`compose`](Self::compose): the pose of `global` as seen
    /// from `self`'s frame.
    pub fn relative(self, global: Pose) -> Pose {
        Pose {
            position: (global.position - self.position).rotated_frame(-self.rotation),
            rotation: normalize_deg(global.rotation - self.rotation),
        }
    }
}
