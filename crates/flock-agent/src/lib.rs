//! `flock-agent` — Structure-of-Arrays agent storage for the flock simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`store`]     | `AgentStore` (SoA arrays, tombstones, kinematic commit), `DisplayState` |
//! | [`shape`]     | `AgentShape` — display outlines and polygon placement        |
//! | [`builder`]   | `AgentStoreBuilder` (fluent construction, random population) |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.  |

pub mod builder;
pub mod shape;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use shape::AgentShape;
pub use store::{AgentStore, DisplayState};
