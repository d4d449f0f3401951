//! `flock-core` — foundational types for the flock simulation.
//!
//! This crate is a dependency of every other `flock-*` crate.  It has no
//! `flock-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                                  |
//! | [`tick`]        | `Tick` — per-tick generation counter                       |
//! | [`geom`]        | `Vec2`, `Kinematics`, angle normalization, rotation helpers |
//! | [`config`]      | `FlockConfig`, `Bounds`, `GridMaintenance`                 |
//! | [`rules`]       | `RuleSet` — separation / alignment / cohesion toggles      |
//! | [`rng`]         | `SimRng` (seeded population generation)                    |
//! | [`error`]       | `FlockError`, `FlockResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geom;
pub mod ids;
pub mod rng;
pub mod rules;
pub mod tick;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Bounds, FlockConfig, GridMaintenance};
pub use error::{FlockError, FlockResult};
pub use geom::{Kinematics, Vec2};
pub use ids::AgentId;
pub use rng::SimRng;
pub use rules::RuleSet;
pub use tick::Tick;
