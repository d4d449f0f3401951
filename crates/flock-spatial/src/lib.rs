//! `flock-spatial` — uniform grid bucketing and neighbor-group queries.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `SpatialGrid`, `CellCoord`                                  |
//! | [`groups`]  | `NeighborGroups` — every occupied cell's 3×3 group, built once per tick |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                          |
//!
//! # Guarantee
//!
//! With `cell_size ≥ view_distance`, two agents that can see each other are
//! always in the same cell or in adjacent ones, so the 3×3 neighbor group of
//! an agent's cell is a superset of everything it can see.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod groups;


pub use error::{SpatialError, SpatialResult};
pub use grid::{CellCoord, SpatialGrid};
pub use groups::NeighborGroups;
