//! Fluent builder for constructing an initial `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use flock_agent::{AgentShape, AgentStoreBuilder};
//! use flock_core::{Bounds, Kinematics, SimRng, Vec2};
//!
//! let mut rng = SimRng::new(42);
//! let store = AgentStoreBuilder::new(8.0)
//!     .agent(Vec2::new(100.0, 500.0), Kinematics::new(3.0, -0.785))
//!     .shape(AgentShape::Triangle)
//!     .spawn_random(50, Bounds::new(800.0, 600.0), &mut rng)
//!     .build();
//!
//! assert_eq!(store.len(), 51);
//! ```

use flock_core::{Bounds, Kinematics, SimRng, Vec2};

use crate::{AgentShape, AgentStore};

/// Fluent builder for [`AgentStore`].
///
/// Agents receive ids in the order they are added.  `shape` applies to every
/// agent added after the call.
pub struct AgentStoreBuilder {
    store: AgentStore,
    shape: AgentShape,
}

impl AgentStoreBuilder {
    /// Create a builder whose agents are clamped to `[0, max_speed]`.
    pub fn new(max_speed: f64) -> Self {
        Self {
            store: AgentStore::new(max_speed),
            shape: AgentShape::default(),
        }
    }

    /// Continue adding to an existing store.
    pub fn from_store(store: AgentStore) -> Self {
        Self { store, shape: AgentShape::default() }
    }

    /// Outline used for agents added from now on.
    pub fn shape(mut self, shape: AgentShape) -> Self {
        self.shape = shape;
        self
    }

    /// Add one agent with explicit initial state.
    pub fn agent(mut self, position: Vec2, kinematics: Kinematics) -> Self {
        self.store.push(position, kinematics, self.shape);
        self
    }

    /// Add `count` agents placed uniformly within `bounds`, each with a
    /// uniform heading and a speed uniform in `[0, max_speed]`.
    pub fn spawn_random(mut self, count: usize, bounds: Bounds, rng: &mut SimRng) -> Self {
        let max_speed = self.store.max_speed();
        for _ in 0..count {
            let position = rng.position_in(bounds);
            let kinematics = rng.kinematics(max_speed);
            self.store.push(position, kinematics, self.shape);
        }
        self
    }

    pub fn build(self) -> AgentStore {
        self.store
    }
}
