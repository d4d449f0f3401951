//! Heading-independent geometry of one directed agent pair.

use std::f64::consts::PI;

use flock_core::Vec2;
use flock_core::geom::{bearing, normalize_angle};

/// Everything about the pair `(from → to)` that does not depend on either
/// agent's heading, so it can be shared with the reverse pair `(to → from)`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PairGeometry {
    /// `to.position - from.position`, raw (not wrapped across the torus).
    pub offset:           Vec2,
    pub squared_distance: f64,
    /// Absolute bearing of `offset`.  Only meaningful when `in_range`.
    pub bearing:          f64,
    /// Proximity weight: `1 / distance`, or `1` closer than one unit.
    pub weight:           f64,
    /// Passed both the axis-aligned prefilter and the distance test.
    pub in_range:         bool,
}

impl PairGeometry {
    /// Geometry of `from → to` for a viewer that sees `view_distance` far.
    ///
    /// Trigonometry is only paid for pairs that are in range.
    pub fn compute(from: Vec2, to: Vec2, view_distance: f64) -> Self {
        let offset = to - from;
        let out_of_range = Self {
            offset,
            squared_distance: f64::INFINITY,
            bearing: 0.0,
            weight: 0.0,
            in_range: false,
        };

        if offset.x.abs() > view_distance || offset.y.abs() > view_distance {
            return out_of_range;
        }
        let squared_distance = offset.length_squared();
        if squared_distance > view_distance * view_distance {
            return Self { squared_distance, ..out_of_range };
        }

        Self {
            offset,
            squared_distance,
            bearing: bearing(offset),
            weight: if squared_distance < 1.0 { 1.0 } else { squared_distance.sqrt().recip() },
            in_range: true,
        }
    }

    /// The same pair seen from the other end.
    #[inline]
    pub fn reversed(self) -> Self {
        Self {
            offset: -self.offset,
            bearing: if self.in_range { normalize_angle(self.bearing + PI) } else { self.bearing },
            ..self
        }
    }

    /// Bearing of the other agent relative to a viewer facing `heading`.
    ///
    /// Coincident agents have no meaningful bearing; they count as dead ahead.
    #[inline]
    pub fn relative_bearing(&self, heading: f64) -> f64 {
        if self.offset.is_zero() {
            0.0
        } else {
            normalize_angle(self.bearing - heading)
        }
    }
}
