//! The view-cone test.

use crate::PairGeometry;

/// What a viewer knows about one neighbor it can see.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Perception {
    /// Neighbor's bearing relative to the viewer's heading, in `(-π, π]`.
    pub relative_bearing: f64,
    /// Proximity weight from [`PairGeometry::weight`].
    pub weight:           f64,
    /// Raw position offset from the viewer to the neighbor.
    pub offset:           flock_core::Vec2,
}

/// Can a viewer facing `heading` see the neighbor described by `geometry`?
///
/// The neighbor must be in range and its relative bearing must lie within
/// `half_view_angle` either side of the heading (inclusive).
#[inline]
pub fn can_see(geometry: &PairGeometry, heading: f64, half_view_angle: f64) -> Option<Perception> {
    if !geometry.in_range {
        return None;
    }
    let relative_bearing = geometry.relative_bearing(heading);
    if relative_bearing.abs() > half_view_angle {
        return None;
    }
    Some(Perception { relative_bearing, weight: geometry.weight, offset: geometry.offset })
}
