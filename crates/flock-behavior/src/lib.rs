//! `flock-behavior` — what one agent perceives and how it turns.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`pair`]       | `PairGeometry` — heading-independent offset / bearing / weight of a directed pair |
//! | [`cache`]      | `PairSource` trait, `Recompute`, `PairCache` (generation-stamped memo) |
//! | [`visibility`] | `can_see` — view-cone test producing a `Perception`             |
//! | [`rules`]      | `separation`, `alignment`, `cohesion` contributions             |
//! | [`steering`]   | `Steering` accumulator and `HeadingUpdate`                      |
//! | [`context`]    | `SteeringContext<'a>` — read-only tick snapshot                 |
//! | [`steer`]      | `steer` — one agent's full neighbor scan                        |
//!
//! # Design notes
//!
//! Everything in this crate runs in the **read phase** of a tick: it only
//! borrows the `AgentStore` immutably and returns a `HeadingUpdate` per agent.
//! flock-sim commits those updates afterwards, so evaluation order never
//! changes the result.
//!
//! The only mutable state is the optional [`PairCache`], which the sequential
//! read phase threads through every agent so that the second agent of a pair
//! reuses the first agent's trigonometry.

pub mod cache;
pub mod context;
pub mod pair;
pub mod rules;
pub mod steer;
pub mod steering;
pub mod visibility;


pub use cache::{PairCache, PairSource, Recompute};
pub use context::SteeringContext;
pub use pair::PairGeometry;
pub use steer::steer;
pub use steering::{HeadingUpdate, Steering};
pub use visibility::{Perception, can_see};
