//! Per-agent accumulator for one tick's rule contributions.
//!
//! # Aggregation
//!
//! With `n` visible neighbors, the heading change is the sum of:
//!
//! * **separation**: the proximity-weighted mean of the avoidance votes,
//!   `Σ(turn·w) / Σw` over the neighbors that triggered a vote;
//! * **alignment**: `Σ(Δheading·w) / n`;
//! * **cohesion**: the relative bearing of the summed offsets, divided by `n`;
//!
//! clamped to `±d_theta`.  Nothing changes when no neighbor is visible.

use flock_core::Vec2;
use flock_core::geom::{bearing, normalize_angle};

use crate::rules::AvoidVote;

/// The outcome of one agent's read phase.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HeadingUpdate {
    /// Turn to apply before moving, within `±d_theta`.
    pub d_heading: f64,
    /// Neighbors seen this tick.
    pub visible:   u32,
}

impl HeadingUpdate {
    /// No turn, nothing seen.
    pub const IDLE: HeadingUpdate = HeadingUpdate { d_heading: 0.0, visible: 0 };
}

#[derive(Clone, Debug, Default)]
pub struct Steering {
    visible:          u32,
    avoid_sum:        f64,
    avoid_weight:     f64,
    alignment_sum:    f64,
    center:           Vec2,
    cohesion_enabled: bool,
}

impl Steering {
    pub fn new(cohesion_enabled: bool) -> Self {
        Self { cohesion_enabled, ..Self::default() }
    }

    #[inline]
    pub fn saw_neighbor(&mut self) {
        self.visible += 1;
    }

    #[inline]
    pub fn avoid(&mut self, vote: AvoidVote) {
        self.avoid_sum += vote.turn * vote.weight;
        self.avoid_weight += vote.weight;
    }

    #[inline]
    pub fn align(&mut self, contribution: f64) {
        self.alignment_sum += contribution;
    }

    #[inline]
    pub fn cohere(&mut self, offset: Vec2) {
        self.center += offset;
    }

    #[inline]
    pub fn visible(&self) -> u32 {
        self.visible
    }

    /// Combine everything accumulated into one clamped heading change.
    pub fn finish(&self, heading: f64, d_theta: f64) -> HeadingUpdate {
        if self.visible == 0 {
            return HeadingUpdate::IDLE;
        }
        let n = f64::from(self.visible);

        let mut d_heading = self.alignment_sum / n;
        if self.avoid_weight > 0.0 {
            d_heading += self.avoid_sum / self.avoid_weight;
        }
        // A center exactly on top of the agent has no direction to pull toward.
        if self.cohesion_enabled && !self.center.is_zero() {
            d_heading += normalize_angle(bearing(self.center) - heading) / n;
        }

        HeadingUpdate { d_heading: d_heading.clamp(-d_theta, d_theta), visible: self.visible }
    }
}
