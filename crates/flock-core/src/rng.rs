//! Deterministic simulation-level RNG.
//!
//! The flocking rules themselves are fully deterministic; randomness is only
//! used to seed initial populations.  `SimRng` wraps a `SmallRng` so the same
//! seed always yields the same population, independent of platform.

use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::geom::normalize_angle;
use crate::{Bounds, Kinematics, Vec2};

/// Simulation-level RNG for population seeding.
///
/// Used only in single-threaded setup code.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// A point uniformly distributed over `bounds`.
    pub fn position_in(&mut self, bounds: Bounds) -> Vec2 {
        Vec2::new(
            self.0.gen_range(0.0..bounds.width),
            self.0.gen_range(0.0..bounds.height),
        )
    }

    /// Speed uniform in `[0, max_speed]`, heading uniform in `(-π, π]`.
    pub fn kinematics(&mut self, max_speed: f64) -> Kinematics {
        let speed = if max_speed > 0.0 { self.0.gen_range(0.0..=max_speed) } else { 0.0 };
        let heading = normalize_angle(self.0.gen_range(-PI..=PI));
        Kinematics::new(speed, heading)
    }
}
