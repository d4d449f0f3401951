//! Core agent storage: `AgentStore`.
//!
//! # Layout
//!
//! Every `Vec` field has exactly [`AgentStore::slot_count`] elements; the
//! `AgentId` value is the index into all of them.  Removing an agent leaves a
//! tombstone so ids are never reused and indices stay stable:
//!
//! ```ignore
//! let pos = store.positions[agent.index()];  // O(1), cache-friendly
//! ```
//!
//! # Read phase vs. commit phase
//!
//! During a tick the neighbor evaluation only reads `positions` and
//! `kinematics`.  All writes happen afterwards through
//! [`AgentStore::record_sighting`] and [`AgentStore::advance`], one agent at a
//! time, so no evaluation ever observes a partially updated snapshot.

use flock_core::geom::normalize_angle;
use flock_core::{AgentId, Bounds, FlockError, FlockResult, Kinematics, Vec2};

use crate::AgentShape;

// ── DisplayState ──────────────────────────────────────────────────────────────

/// What a renderer needs beyond position and polygon.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayState {
    /// The agent saw at least one neighbor during the last tick.
    pub active:  bool,
    /// How many neighbors it saw.
    pub visible: u32,
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
pub struct AgentStore {
    /// World position.  Kept inside the bounds by [`advance`](Self::advance).
    pub positions: Vec<Vec2>,

    /// Speed and heading.  Speed is clamped to `[0, max_speed]` and heading
    /// normalized to `(-π, π]` on every write.
    pub kinematics: Vec<Kinematics>,

    /// Display outline per agent.
    pub shapes: Vec<AgentShape>,

    /// Neighbors seen during the last tick; drives the "active" highlight.
    pub visible: Vec<u32>,

    alive:     Vec<bool>,
    live:      usize,
    max_speed: f64,
}

impl AgentStore {
    /// An empty store whose speeds are clamped to `[0, max_speed]`.
    pub fn new(max_speed: f64) -> Self {
        Self {
            positions:  Vec::new(),
            kinematics: Vec::new(),
            shapes:     Vec::new(),
            visible:    Vec::new(),
            alive:      Vec::new(),
            live:       0,
            max_speed:  max_speed.max(0.0),
        }
    }

    /// Number of live agents.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of ids ever handed out, live or removed.  Equals the length of
    /// every SoA `Vec`.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.alive.len()
    }

    #[inline]
    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }

    /// Iterator over all live `AgentId`s in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(i, _)| AgentId(i as u32))
    }

    #[inline]
    pub fn contains(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    fn slot(&self, agent: AgentId) -> FlockResult<usize> {
        if self.contains(agent) {
            Ok(agent.index())
        } else {
            Err(FlockError::AgentNotFound(agent))
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Append an agent and return its id.  Ids are assigned monotonically.
    ///
    /// The initial speed is clamped and the heading normalized; the position
    /// is stored as given.
    pub fn push(&mut self, position: Vec2, kinematics: Kinematics, shape: AgentShape) -> AgentId {
        let id = AgentId(self.alive.len() as u32);
        self.positions.push(position);
        self.kinematics.push(Kinematics::new(
            self.clamp_speed(kinematics.speed),
            normalize_angle(kinematics.heading),
        ));
        self.shapes.push(shape);
        self.visible.push(0);
        self.alive.push(true);
        self.live += 1;
        id
    }

    /// Tombstone `agent`.  Its id is never handed out again.
    pub fn remove(&mut self, agent: AgentId) -> FlockResult<()> {
        let i = self.slot(agent)?;
        self.alive[i] = false;
        self.visible[i] = 0;
        self.live -= 1;
        Ok(())
    }

    // ── Read access ───────────────────────────────────────────────────────

    pub fn position(&self, agent: AgentId) -> FlockResult<Vec2> {
        self.slot(agent).map(|i| self.positions[i])
    }

    pub fn kinematics_of(&self, agent: AgentId) -> FlockResult<Kinematics> {
        self.slot(agent).map(|i| self.kinematics[i])
    }

    /// World-space polygon to draw for `agent`.
    pub fn display_polygon(&self, agent: AgentId) -> FlockResult<Vec<Vec2>> {
        let i = self.slot(agent)?;
        Ok(self.shapes[i].polygon(self.positions[i], self.kinematics[i].heading))
    }

    pub fn display_state(&self, agent: AgentId) -> FlockResult<DisplayState> {
        let i = self.slot(agent)?;
        Ok(DisplayState { active: self.visible[i] > 0, visible: self.visible[i] })
    }

    // ── Writes ────────────────────────────────────────────────────────────

    /// Nudge one agent's kinematics from outside the tick (e.g. a
    /// user-steered agent).  The result is clamped and normalized at once.
    pub fn nudge(&mut self, agent: AgentId, d_speed: f64, d_heading: f64) -> FlockResult<()> {
        let i = self.slot(agent)?;
        let k = self.kinematics[i];
        self.kinematics[i] = Kinematics::new(
            self.clamp_speed(k.speed + d_speed),
            normalize_angle(k.heading + d_heading),
        );
        Ok(())
    }

    /// Store the number of neighbors `agent` saw this tick.
    ///
    /// Commit-phase only; `agent` must be live.
    #[inline]
    pub fn record_sighting(&mut self, agent: AgentId, visible: u32) {
        self.visible[agent.index()] = visible;
    }

    /// Commit one tick of motion for `agent`: turn by `d_heading`, move
    /// `speed` along the new heading, then re-normalize the heading, re-clamp
    /// the speed and wrap the position onto the torus.
    ///
    /// Commit-phase only; `agent` must be live.
    pub fn advance(&mut self, agent: AgentId, d_heading: f64, bounds: Bounds) {
        let i = agent.index();
        let mut k = self.kinematics[i];
        k.heading += d_heading;

        self.positions[i] = bounds.wrap(self.positions[i] + k.velocity());

        k.heading = normalize_angle(k.heading);
        k.speed = self.clamp_speed(k.speed);
        self.kinematics[i] = k;
    }

    /// Wrap every position onto `bounds` (used when the world is resized).
    pub fn wrap_positions(&mut self, bounds: Bounds) {
        for p in &mut self.positions {
            *p = bounds.wrap(*p);
        }
    }

    #[inline]
    fn clamp_speed(&self, speed: f64) -> f64 {
        if speed.is_nan() { 0.0 } else { speed.clamp(0.0, self.max_speed) }
    }
}
