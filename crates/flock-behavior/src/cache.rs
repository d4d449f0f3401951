//! Sources of pair geometry: plain recomputation or a per-tick memo.
//!
//! Every unordered pair of neighbors is evaluated twice per tick, once from
//! each side.  [`PairCache`] stores the first evaluation under
//! `(owner, other)`; when `other` later evaluates `owner`, it finds that entry,
//! reverses it, and consumes it.
//!
//! Entries carry the [`Tick`] they were computed in.  A stamp that does not
//! match the current tick is stale: the entry is ignored and recomputed, never
//! returned.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use flock_agent::AgentStore;
use flock_core::{AgentId, Tick};

use crate::PairGeometry;

/// Supplies the geometry of the directed pair `me → other`.
///
/// Implementations must return exactly what
/// [`PairGeometry::compute`] would for the current positions, up to
/// floating-point rounding.
pub trait PairSource {
    fn geometry(
        &mut self,
        me:            AgentId,
        other:         AgentId,
        agents:        &AgentStore,
        view_distance: f64,
    ) -> PairGeometry;
}

// ── Recompute ─────────────────────────────────────────────────────────────────

/// Stateless source: computes every directed pair from scratch.
///
/// Used by the parallel read phase, where a shared memo would need locking.
#[derive(Copy, Clone, Debug, Default)]
pub struct Recompute;

impl PairSource for Recompute {
    #[inline]
    fn geometry(
        &mut self,
        me:            AgentId,
        other:         AgentId,
        agents:        &AgentStore,
        view_distance: f64,
    ) -> PairGeometry {
        PairGeometry::compute(
            agents.positions[me.index()],
            agents.positions[other.index()],
            view_distance,
        )
    }
}

// ── PairCache ─────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug)]
struct Entry {
    stamp:    Tick,
    geometry: PairGeometry,
}

/// Generation-stamped memo of pair geometry for the current tick.
#[derive(Debug, Default)]
pub struct PairCache {
    generation: Tick,
    entries:    HashMap<(AgentId, AgentId), Entry>,
    hits:       u64,
    misses:     u64,
}

impl PairCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation.  Everything computed before is stale and is
    /// dropped so the map does not grow across ticks.
    pub fn begin_tick(&mut self, generation: Tick) {
        self.generation = generation;
        self.entries.retain(|_, e| e.stamp == generation);
    }

    #[inline]
    pub fn generation(&self) -> Tick {
        self.generation
    }

    /// Entries waiting for their reverse lookup.
    #[inline]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Lookups answered from a reverse entry since construction.
    #[inline]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Lookups that had to compute.
    #[inline]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl PairSource for PairCache {
    fn geometry(
        &mut self,
        me:            AgentId,
        other:         AgentId,
        agents:        &AgentStore,
        view_distance: f64,
    ) -> PairGeometry {
        if let Some(entry) = self.entries.remove(&(other, me)) {
            if entry.stamp == self.generation {
                self.hits += 1;
                return entry.geometry.reversed();
            }
        }

        self.misses += 1;
        let geometry = Recompute.geometry(me, other, agents, view_distance);
        self.entries.insert((me, other), Entry { stamp: self.generation, geometry });
        geometry
    }
}
