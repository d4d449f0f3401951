//! Fluent builder for constructing a [`Flock`].

use flock_agent::{AgentShape, AgentStore, AgentStoreBuilder};
use flock_core::{FlockConfig, Kinematics, SimRng, Vec2};

use crate::{Flock, SimResult};

/// Fluent builder for [`Flock`].
///
/// # Inputs
///
/// | Method                       | Default                          |
/// |------------------------------|----------------------------------|
/// | `FlockBuilder::new(config)`  | required                         |
/// | `.shape(s)`                  | `AgentShape::Chevron`            |
/// | `.agent(pos, kinematics)`    | no agents                        |
/// | `.spawn_random(n, rng)`      | no agents                        |
/// | `.agents(store)`             | replaces everything added so far |
///
/// Agents receive ids in the order they are added.
///
/// # Example
///
/// ```rust,ignore
/// let mut rng = SimRng::new(config.seed);
/// let mut flock = FlockBuilder::new(config)
///     .agent(Vec2::new(500.0, 375.0), Kinematics::new(4.0, 0.0))
///     .spawn_random(75, &mut rng)
///     .build()?;
/// flock.run_ticks(600, RuleSet::ALL, bounds, &mut NoopObserver)?;
/// ```
pub struct FlockBuilder {
    config: FlockConfig,
    agents: AgentStoreBuilder,
}

impl FlockBuilder {
    pub fn new(config: FlockConfig) -> Self {
        Self {
            agents: AgentStoreBuilder::new(config.max_speed),
            config,
        }
    }

    /// Outline for agents added from now on.
    pub fn shape(mut self, shape: AgentShape) -> Self {
        self.agents = self.agents.shape(shape);
        self
    }

    /// Add one agent with explicit initial state.
    pub fn agent(mut self, position: Vec2, kinematics: Kinematics) -> Self {
        self.agents = self.agents.agent(position, kinematics);
        self
    }

    /// Add `count` agents placed uniformly within `config.bounds` with random
    /// heading and speed.  The same `rng` state always yields the same agents.
    pub fn spawn_random(mut self, count: usize, rng: &mut SimRng) -> Self {
        self.agents = self.agents.spawn_random(count, self.config.bounds, rng);
        self
    }

    /// Use a prebuilt store instead of the agents added so far.
    pub fn agents(mut self, store: AgentStore) -> Self {
        self.agents = AgentStoreBuilder::from_store(store);
        self
    }

    /// Validate the configuration, size the grid, and return a ready-to-run
    /// [`Flock`].  Agent positions are wrapped into `config.bounds`.
    pub fn build(self) -> SimResult<Flock> {
        Flock::from_parts(self.config, self.agents.build())
    }
}
