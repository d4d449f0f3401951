//! Simulation configuration.
//!
//! `FlockConfig` is consumed, never produced, by the simulation core.  The
//! defaults reproduce the classic parameter set: agents see 75 units ahead in
//! a 135° cone, travel at most 8 units per tick, and turn at most π/4 per
//! tick.  Applications typically load it from JSON (with the `serde` feature)
//! and call [`FlockConfig::validate`] before building a flock.

use std::f64::consts::{FRAC_PI_4, PI, TAU};

use crate::{FlockError, FlockResult, Vec2};

// ── Bounds ────────────────────────────────────────────────────────────────────

/// The toroidal world rectangle `[0, width) × [0, height)`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width:  f64,
    pub height: f64,
}

impl Bounds {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Wrap `p` onto the torus so both coordinates land in `[0, extent)`.
    pub fn wrap(self, p: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(p.x, self.width), wrap_axis(p.y, self.height))
    }

    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        (0.0..self.width).contains(&p.x) && (0.0..self.height).contains(&p.y)
    }

    fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::new(1_000.0, 750.0)
    }
}

#[inline]
fn wrap_axis(v: f64, extent: f64) -> f64 {
    if (0.0..extent).contains(&v) {
        return v;
    }
    let w = v.rem_euclid(extent);
    // rem_euclid(-tiny) rounds to `extent` itself.
    if w >= extent { 0.0 } else { w }
}

// ── GridMaintenance ───────────────────────────────────────────────────────────

/// How the spatial grid is kept in sync with agent positions between ticks.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GridMaintenance {
    /// Clear and re-bucket every agent at the start of every tick.
    #[default]
    Rebuild,
    /// Move only the agents whose cell changed (remove, then re-insert).
    Incremental,
}

// ── FlockConfig ───────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlockConfig {
    /// Maximum Euclidean distance at which one agent perceives another.
    pub view_distance: f64,

    /// Total angular width of the visibility cone, centered on the heading.
    pub view_angle: f64,

    /// Upper clamp for every agent's speed.
    pub max_speed: f64,

    /// Largest heading change an agent may make in one tick.
    pub d_theta_per_update: f64,

    /// Grid cell edge length.  `None` uses `view_distance`, the smallest value
    /// that keeps every visible pair inside one 3×3 neighbor group.
    pub cell_size: Option<f64>,

    /// Toroidal grid addressing.  When off, cell queries outside the grid are
    /// errors.
    pub wraparound: bool,

    pub grid_maintenance: GridMaintenance,

    /// Default world rectangle used by `run_ticks`.
    pub bounds: Bounds,

    /// Master RNG seed.  The same seed always produces the same population.
    pub seed: u64,

    /// Deliver an observer snapshot every N ticks.  0 disables snapshots.
    pub output_interval_ticks: u64,
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            view_distance:         75.0,
            view_angle:            0.75 * PI,
            max_speed:             8.0,
            d_theta_per_update:    FRAC_PI_4,
            cell_size:             None,
            wraparound:            true,
            grid_maintenance:      GridMaintenance::Rebuild,
            bounds:                Bounds::default(),
            seed:                  0,
            output_interval_ticks: 1,
        }
    }
}

impl FlockConfig {
    /// Effective grid cell size.
    #[inline]
    pub fn cell_size(&self) -> f64 {
        self.cell_size.unwrap_or(self.view_distance)
    }

    #[inline]
    pub fn squared_view_distance(&self) -> f64 {
        self.view_distance * self.view_distance
    }

    /// Largest relative bearing (either side of the heading) still visible.
    #[inline]
    pub fn half_view_angle(&self) -> f64 {
        self.view_angle * 0.5
    }

    /// Check every field for values the simulation cannot honor.
    pub fn validate(&self) -> FlockResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !positive(self.view_distance) {
            return Err(FlockError::Config(format!(
                "view_distance must be positive and finite, got {}",
                self.view_distance
            )));
        }
        if !(self.view_angle > 0.0 && self.view_angle <= TAU) {
            return Err(FlockError::Config(format!(
                "view_angle must lie in (0, 2π], got {}",
                self.view_angle
            )));
        }
        if !(self.max_speed.is_finite() && self.max_speed >= 0.0) {
            return Err(FlockError::Config(format!(
                "max_speed must be finite and non-negative, got {}",
                self.max_speed
            )));
        }
        if !positive(self.d_theta_per_update) {
            return Err(FlockError::Config(format!(
                "d_theta_per_update must be positive and finite, got {}",
                self.d_theta_per_update
            )));
        }
        let cell = self.cell_size();
        if !positive(cell) || cell < self.view_distance {
            return Err(FlockError::Config(format!(
                "cell_size {cell} must be finite and at least view_distance {}",
                self.view_distance
            )));
        }
        if !self.bounds.is_valid() {
            return Err(FlockError::Config(format!(
                "bounds must be positive and finite, got {} x {}",
                self.bounds.width, self.bounds.height
            )));
        }
        Ok(())
    }
}
