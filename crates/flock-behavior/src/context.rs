//! Read-only simulation state shared by every agent's read phase.

use flock_agent::AgentStore;
use flock_core::{FlockConfig, RuleSet, Tick};

/// A read-only snapshot of one tick, built by flock-sim and shared across all
/// agents (and threads) during the read phase.
///
/// # Lifetimes
///
/// All borrows live for the duration of one tick's read phase.  flock-sim
/// never allows mutable access to the store while a context is live.
#[derive(Copy, Clone)]
pub struct SteeringContext<'a> {
    /// Current simulation tick; also the pair-cache generation.
    pub tick: Tick,

    /// Read-only view of every agent's SoA state arrays.
    pub agents: &'a AgentStore,

    /// Rules enabled for this tick.
    pub rules: RuleSet,

    pub view_distance:   f64,
    pub half_view_angle: f64,
    pub d_theta:         f64,
}

impl<'a> SteeringContext<'a> {
    #[inline]
    pub fn new(tick: Tick, agents: &'a AgentStore, rules: RuleSet, config: &FlockConfig) -> Self {
        Self {
            tick,
            agents,
            rules,
            view_distance:   config.view_distance,
            half_view_angle: config.half_view_angle(),
            d_theta:         config.d_theta_per_update,
        }
    }
}
