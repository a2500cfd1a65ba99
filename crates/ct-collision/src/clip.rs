//! Cohen–Sutherland line clipping, reduced to a yes/no answer.
//!
//! Only the *verdict* is needed (does any part of the segment lie inside the
//! box?), so the clipped endpoints are discarded once an accept or reject is
//! reached.

use ct_core::Vec2;

pub const INSIDE: u8 = 0;
pub const LEFT: u8 = 1;
pub const RIGHT: u8 = 2;
pub const LOWER: u8 = 4;
pub const UPPER: u8 = 8;

/// Closed axis-aligned box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClipBox {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
}

impl ClipBox {
    /// Box of the given size centred on the origin.
    pub fn centered(width: f64, height: f64) -> Self {
        Self {
            xmin: -width / 2.0,
            xmax: width / 2.0,
            ymin: -height / 2.0,
            ymax: height / 2.0,
        }
    }

    /// Outcode of `p`.  Points on the boundary are inside.
    pub fn outcode(&self, p: Vec2) -> u8 {
        let mut code = INSIDE;
        if p.x < self.xmin {
            code |= LEFT;
        } else if p.x > self.xmax {
            code |= RIGHT;
        }
        if p.y < self.ymin {
            code |= LOWER;
        } else if p.y > self.ymax {
            code |= UPPER;
        }
        code
    }

    /// `true` if the closed segment `a`–`b` touches the box.
    ///
    /// # Panics
    ///
    /// On an outcode with no edge bit, which the loop guard makes
    /// impossible.
    pub fn intersects_segment(&self, mut a: Vec2, b: Vec2) -> bool {
        let mut ka = self.outcode(a);
        let kb = self.outcode(b);

        while (ka | kb) != INSIDE {
            if ka & kb != 0 {
                return false;
            }
            // Any endpoint inside already means an overlap.
            if ka == INSIDE || kb == INSIDE {
                return true;
            }

            // Both endpoints are outside; move `a` onto the box edge its
            // outcode points at.
            let code = ka;
            let clipped = if code & UPPER != 0 {
                Vec2::new(a.x + (b.x - a.x) * (self.ymax - a.y) / (b.y - a.y), self.ymax)
            } else if code & LOWER != 0 {
                Vec2::new(a.x + (b.x - a.x) * (self.ymin - a.y) / (b.y - a.y), self.ymin)
            } else if code & RIGHT != 0 {
                Vec2::new(self.xmax, a.y + (b.y - a.y) * (self.xmax - a.x) / (b.x - a.x))
            } else if code & LEFT != 0 {
                Vec2::new(self.xmin, a.y + (b.y - a.y) * (self.xmin - a.x) / (b.x - a.x))
            } else {
                unreachable!("undefined clipping state: outcode {code:#06b}");
            };

            a = clipped;
            ka = self.outcode(a);
        }
        true
    }
}

/// Test a segment given by centre, rotation and length against a box of
/// `width × height` centred on the origin.
///
/// Rotation is clockwise from the +y axis, so the endpoints are
/// `centre ± (sin r, cos r) · length / 2`.
pub fn segment_hits_centered_box(
    width: f64,
    height: f64,
    center: Vec2,
    rotation_deg: f64,
    length: f64,
) -> bool {
    let (sin, cos) = rotation_deg.to_radians().sin_cos();
    let half = Vec2::new(sin * length / 2.0, cos * length / 2.0);
    ClipBox::centered(width, height).intersects_segment(center + half, center - half)
}
