//! `flock-sim` — the flock simulation context and its tick loop.
//!
//! # Two-phase tick
//!
//! ```text
//! step(rules, bounds):
//!   ⓪ Bounds   — a changed world size rebuilds the grid and wraps positions.
//!   ① Grid     — re-bucket every agent (Rebuild mode, or after creations).
//!   ② Groups   — precompute the 3×3 neighbor group of every occupied cell.
//!   ③ Read     — steer() each live agent against its cell's group
//!                (parallel with the `parallel` feature).
//!   ④ Commit   — in ascending AgentId order: record sightings, turn, move,
//!                wrap; Incremental mode moves agents whose cell changed.
//! ```
//!
//! No agent's read phase ever observes another agent's committed state from
//! the same tick.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the read phase on Rayon's thread pool.            |
//! | `fx-hash`  | FxHash for the sequential pair cache.                  |
//! | `serde`    | Serde derives on config and state types.               |
//!
//! # Quick-start
//!
//! ```rust
//! use flock_core::{Bounds, FlockConfig, RuleSet, SimRng};
//! use flock_sim::{FlockBuilder, NoopObserver};
//!
//! let config = FlockConfig::default();
//! let mut rng = SimRng::new(config.seed);
//! let mut flock = FlockBuilder::new(config).spawn_random(50, &mut rng).build().unwrap();
//! flock.run_ticks(10, RuleSet::ALL, Bounds::default(), &mut NoopObserver).unwrap();
//! assert_eq!(flock.len(), 50);
//! ```

pub mod builder;
pub mod error;
pub mod flock;
pub mod observer;

#[cfg(test)]
mod tests;

pub use builder::FlockBuilder;
pub use error::{SimError, SimResult};
pub use flock::{Flock, TickStats};
pub use observer::{FlockObserver, NoopObserver};
