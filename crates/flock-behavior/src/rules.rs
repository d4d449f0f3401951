//! The three flocking rules, each evaluated against one visible neighbor.
//!
//! Rules return raw, per-neighbor contributions.  Aggregating them into one
//! heading change is [`Steering`][crate::Steering]'s job.

use std::f64::consts::{FRAC_PI_2, PI};

use flock_core::Kinematics;
use flock_core::geom::{float_equals, in_range, normalize_angle};

use crate::Perception;

/// One separation vote: turn by `turn` (±`d_theta`) with influence `weight`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AvoidVote {
    pub turn:   f64,
    pub weight: f64,
}

/// Steer away from a neighbor on a collision course.
///
/// A neighbor dead ahead that is stationary, or receding straight away more
/// slowly than `me`, always triggers a turn to the left.  Otherwise a moving
/// neighbor whose relative heading falls inside `[0, π + bearing]` is on a
/// collision course, and `me` veers away from the side it is on.  Returns
/// `None` when no collision is predicted.
pub fn separation(
    me:      Kinematics,
    other:   Kinematics,
    seen:    &Perception,
    d_theta: f64,
) -> Option<AvoidVote> {
    let bearing = seen.relative_bearing;
    let other_heading = normalize_angle(other.heading - me.heading);
    let vote = |turn: f64| Some(AvoidVote { turn, weight: seen.weight });

    if float_equals(bearing, 0.0) {
        if other.is_stationary() {
            return vote(d_theta);
        }
        if float_equals(other_heading, 0.0) {
            return if other.speed < me.speed { vote(d_theta) } else { None };
        }
    }

    if other.is_stationary() {
        return None;
    }
    if !in_range(other_heading, (0.0, normalize_angle(PI + bearing))) {
        return None;
    }
    if bearing <= 0.0 { vote(d_theta) } else { vote(-d_theta) }
}

/// Turn toward a similarly directed neighbor's heading.
///
/// Neighbors heading more than a quarter turn away, or exactly the same way,
/// contribute nothing.  The contribution is the heading difference scaled by
/// proximity.
pub fn alignment(me: Kinematics, other: Kinematics, seen: &Perception) -> Option<f64> {
    let diff = normalize_angle(other.heading - me.heading);
    if diff.abs() > FRAC_PI_2 || float_equals(diff, 0.0) {
        return None;
    }
    Some(diff * seen.weight)
}

/// Cohesion's per-neighbor contribution: the raw offset toward it.
///
/// Offsets are summed into a group center; only its bearing matters, so no
/// averaging is needed.
#[inline]
pub fn cohesion(seen: &Perception) -> flock_core::Vec2 {
    seen.offset
}
