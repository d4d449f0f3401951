//! Planar geometry and angle utilities.
//!
//! Angles are radians, measured counter-clockwise from the +x axis, and kept
//! in `(-π, π]`.  The same rotation convention drives both the physics heading
//! update and the display polygon, but the two never share an update path:
//! [`rotate_point`] and [`translate`] exist for rendering consumers only.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2D point or offset in world units.
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
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
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

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
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

// ── Kinematics ────────────────────────────────────────────────────────────────

/// Speed magnitude and heading of one agent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Kinematics {
    /// Distance travelled per tick, in `[0, max_speed]`.
    pub speed: f64,
    /// Direction of travel, in `(-π, π]`.
    pub heading: f64,
}

impl Kinematics {
    #[inline]
    pub const fn new(speed: f64, heading: f64) -> Self {
        Self { speed, heading }
    }

    #[inline]
    pub fn is_stationary(self) -> bool {
        self.speed == 0.0
    }

    /// Per-tick displacement.
    #[inline]
    pub fn velocity(self) -> Vec2 {
        to_vector(self.speed, self.heading)
    }
}

// ── Angles ────────────────────────────────────────────────────────────────────

/// Map any finite angle into `(-π, π]` with a single Euclidean remainder.
///
/// Non-finite input is returned unchanged.
pub fn normalize_angle(theta: f64) -> f64 {
    if (theta > -PI && theta <= PI) || !theta.is_finite() {
        return theta;
    }
    // rem_euclid lands in [0, 2π]; the upper end is reachable through rounding.
    let wrapped = (theta + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Absolute bearing of `delta`, with an exact vertical bearing when `delta.x`
/// is zero.  The zero vector yields `π/2`; callers that care about coincident
/// points check for them first.
#[inline]
pub fn bearing(delta: Vec2) -> f64 {
    if delta.x == 0.0 {
        if delta.y >= 0.0 { FRAC_PI_2 } else { -FRAC_PI_2 }
    } else {
        delta.y.atan2(delta.x)
    }
}

/// Polar-to-Cartesian: the `(dx, dy)` covered in one tick.
#[inline]
pub fn to_vector(speed: f64, heading: f64) -> Vec2 {
    let (sin, cos) = heading.sin_cos();
    Vec2::new(speed * cos, speed * sin)
}

/// Rotate `p` counter-clockwise about the origin by `theta`.
#[inline]
pub fn rotate_point(p: Vec2, theta: f64) -> Vec2 {
    let (sin, cos) = theta.sin_cos();
    Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Shift every point by `offset`.
pub fn translate(points: &[Vec2], offset: Vec2) -> Vec<Vec2> {
    points.iter().map(|&p| p + offset).collect()
}

/// `|a - b| ≤ f64::EPSILON`.
///
/// Used to detect exactly head-on configurations, not as a general-purpose
/// approximate comparison.
#[inline]
pub fn float_equals(a: f64, b: f64) -> bool {
    (a - b).abs() <= f64::EPSILON
}

/// `lo ≤ value ≤ hi`, swapping the bounds first if they are inverted.
#[inline]
pub fn in_range(value: f64, (lo, hi): (f64, f64)) -> bool {
    let (lo, hi) = if hi < lo { (hi, lo) } else { (lo, hi) };
    lo <= value && value <= hi
}
