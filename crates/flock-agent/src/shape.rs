//! Display outlines.
//!
//! Outlines are drawn in agent-local coordinates with the nose on +x.  Placing
//! one in the world rotates it by the heading and then translates it by the
//! position; nothing here feeds back into the physics.

use flock_core::geom::{rotate_point, translate};
use flock_core::Vec2;

const CHEVRON: [Vec2; 4] = [
    Vec2::new(8.0, 0.0),
    Vec2::new(-8.0, 6.0),
    Vec2::new(-4.0, 0.0),
    Vec2::new(-8.0, -6.0),
];

const TRIANGLE: [Vec2; 3] = [
    Vec2::new(6.0, 0.0),
    Vec2::new(-4.0, 3.0),
    Vec2::new(-4.0, -3.0),
];

/// The polygon a renderer draws for an agent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentShape {
    /// Notched arrowhead, 4 vertices.
    #[default]
    Chevron,
    /// Plain isosceles triangle, 3 vertices.
    Triangle,
}

impl AgentShape {
    /// Local-space outline, nose on +x.
    pub fn outline(self) -> &'static [Vec2] {
        match self {
            AgentShape::Chevron  => &CHEVRON,
            AgentShape::Triangle => &TRIANGLE,
        }
    }

    /// World-space polygon for an agent at `position` facing `heading`.
    pub fn polygon(self, position: Vec2, heading: f64) -> Vec<Vec2> {
        let rotated: Vec<Vec2> = self
            .outline()
            .iter()
            .map(|&p| rotate_point(p, heading))
            .collect();
        translate(&rotated, position)
    }
}
