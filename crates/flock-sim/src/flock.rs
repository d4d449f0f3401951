//! The `Flock` simulation context and its tick loop.

use flock_agent::{AgentShape, AgentStore, DisplayState};
use flock_behavior::{HeadingUpdate, PairCache, SteeringContext, steer};
use flock_core::{
    AgentId, Bounds, FlockConfig, GridMaintenance, Kinematics, RuleSet, Tick, Vec2,
};
use flock_spatial::{CellCoord, NeighborGroups, SpatialGrid};
use tracing::{debug, trace};

use crate::{FlockObserver, SimError, SimResult};

// ── TickStats ─────────────────────────────────────────────────────────────────

/// Aggregate figures for one completed tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickStats {
    pub tick:          Tick,
    /// Live agents.
    pub agents:        usize,
    /// Agents that saw at least one neighbor.
    pub active_agents: usize,
    /// Directed sightings: a mutual pair counts twice.
    pub visible_pairs: u64,
    /// Mean speed over live agents, 0 for an empty flock.
    pub mean_speed:    f64,
}

// ── Flock ─────────────────────────────────────────────────────────────────────

/// The simulation context: every agent, the spatial grid that indexes them,
/// and the tick counter.
///
/// Independent flocks share nothing, so several can run side by side.
/// Create via [`FlockBuilder`][crate::FlockBuilder].
pub struct Flock {
    /// Parameters fixed for the lifetime of the flock.
    pub config: FlockConfig,

    /// The next tick to process.  Also the pair-cache generation.
    pub clock: Tick,

    /// Agent state (SoA arrays).  Only `create_agent` and `remove_agent`
    /// change the population, keeping `cells` and the grid in step.
    agents:     AgentStore,
    grid:       SpatialGrid,
    /// Cell each agent is filed under, indexed by `AgentId`.  `None` for
    /// removed agents and agents not yet bucketed.
    cells:      Vec<Option<CellCoord>>,
    pairs:      PairCache,
    bounds:     Bounds,
    grid_dirty: bool,
}

impl Flock {
    pub(crate) fn from_parts(config: FlockConfig, mut agents: AgentStore) -> SimResult<Self> {
        config.validate()?;
        let bounds = config.bounds;
        let grid = SpatialGrid::covering(bounds, config.cell_size(), config.wraparound)?;
        agents.wrap_positions(bounds);

        debug!(
            agents = agents.len(),
            rows = grid.rows(),
            cols = grid.cols(),
            cell_size = grid.cell_size(),
            wraparound = grid.wraparound(),
            "flock built"
        );

        Ok(Self {
            cells: vec![None; agents.slot_count()],
            clock: Tick::ZERO,
            config,
            agents,
            grid,
            pairs: PairCache::new(),
            bounds,
            grid_dirty: true,
        })
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Add an agent and return its id.  The position is wrapped into the
    /// current bounds; the speed is clamped and the heading normalized.
    ///
    /// The agent takes part from the next tick on.
    pub fn create_agent(&mut self, position: Vec2, speed: f64, heading: f64) -> AgentId {
        self.create_agent_with_shape(position, speed, heading, AgentShape::default())
    }

    pub fn create_agent_with_shape(
        &mut self,
        position: Vec2,
        speed:    f64,
        heading:  f64,
        shape:    AgentShape,
    ) -> AgentId {
        let id = self.agents.push(
            self.bounds.wrap(position),
            Kinematics::new(speed, heading),
            shape,
        );
        self.cells.push(None);
        self.grid_dirty = true;
        id
    }

    /// Remove an agent from the flock and the grid.  Its id is never reused.
    pub fn remove_agent(&mut self, agent: AgentId) -> SimResult<()> {
        self.agents.remove(agent)?;
        if let Some(cell) = self.cells[agent.index()].take() {
            self.grid.remove(agent, cell)?;
        }
        Ok(())
    }

    /// Nudge one agent's speed and heading before the next tick, e.g. for a
    /// user-steered agent.  Speed is clamped, heading normalized.
    pub fn apply_external_speed_delta(
        &mut self,
        agent:     AgentId,
        d_speed:   f64,
        d_heading: f64,
    ) -> SimResult<()> {
        Ok(self.agents.nudge(agent, d_speed, d_heading)?)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Read-only view of every agent's state.
    #[inline]
    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    /// The world rectangle of the most recent tick.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn position(&self, agent: AgentId) -> SimResult<Vec2> {
        Ok(self.agents.position(agent)?)
    }

    /// `(speed, heading)` of `agent`.
    pub fn heading_and_speed(&self, agent: AgentId) -> SimResult<(f64, f64)> {
        let k = self.agents.kinematics_of(agent)?;
        Ok((k.speed, k.heading))
    }

    pub fn display_polygon(&self, agent: AgentId) -> SimResult<Vec<Vec2>> {
        Ok(self.agents.display_polygon(agent)?)
    }

    pub fn display_state(&self, agent: AgentId) -> SimResult<DisplayState> {
        Ok(self.agents.display_state(agent)?)
    }

    // ── Running ───────────────────────────────────────────────────────────

    /// Advance the whole flock by one tick within `bounds`.
    pub fn step(&mut self, rules: RuleSet, bounds: Bounds) -> SimResult<TickStats> {
        let now = self.clock;

        self.fit_bounds(bounds)?;
        self.sync_grid()?;
        self.pairs.begin_tick(now);

        let groups = self.grid.neighbor_groups();
        let updates = self.read_phase(now, rules, &groups);
        let stats = self.commit_phase(now, updates)?;

        trace!(
            tick = now.0,
            occupied_cells = groups.occupied(),
            active = stats.active_agents,
            visible_pairs = stats.visible_pairs,
            cache_hits = self.pairs.hits(),
            "tick complete"
        );
        self.clock = now.next();
        Ok(stats)
    }

    /// Run exactly `n` ticks, calling `observer` at every tick boundary and
    /// `on_sim_end` after the last one.
    pub fn run_ticks<O: FlockObserver>(
        &mut self,
        n:        u64,
        rules:    RuleSet,
        bounds:   Bounds,
        observer: &mut O,
    ) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock;
            observer.on_tick_start(now);
            let stats = self.step(rules, bounds)?;
            observer.on_tick_end(now, &stats);
            if now.is_multiple_of(self.config.output_interval_ticks) {
                observer.on_snapshot(now, &self.agents);
            }
        }
        observer.on_sim_end(self.clock);
        Ok(())
    }

    /// Bring the grid up to date with current positions.
    ///
    /// `Rebuild` mode re-buckets every agent; `Incremental` mode only does so
    /// after agents were created or the bounds changed.
    pub fn sync_grid(&mut self) -> SimResult<()> {
        if self.grid_dirty || self.config.grid_maintenance == GridMaintenance::Rebuild {
            self.rebuild_grid()?;
        }
        Ok(())
    }

    // ── Tick internals ────────────────────────────────────────────────────

    fn fit_bounds(&mut self, bounds: Bounds) -> SimResult<()> {
        if bounds == self.bounds {
            return Ok(());
        }
        if !(bounds.width.is_finite() && bounds.height.is_finite())
            || bounds.width <= 0.0
            || bounds.height <= 0.0
        {
            return Err(SimError::Config(format!(
                "bounds must be positive and finite, got {} x {}",
                bounds.width, bounds.height
            )));
        }

        self.grid = SpatialGrid::covering(bounds, self.config.cell_size(), self.config.wraparound)?;
        self.agents.wrap_positions(bounds);
        self.cells.fill(None);
        self.bounds = bounds;
        self.grid_dirty = true;

        debug!(
            width = bounds.width,
            height = bounds.height,
            rows = self.grid.rows(),
            cols = self.grid.cols(),
            "world resized"
        );
        Ok(())
    }

    fn rebuild_grid(&mut self) -> SimResult<()> {
        self.cells.fill(None);
        let agents = &self.agents;
        let placed = self
            .grid
            .rebuild(agents.agent_ids().map(|a| (a, agents.positions[a.index()])))?;
        for (agent, cell) in placed {
            self.cells[agent.index()] = Some(cell);
        }
        self.grid_dirty = false;
        Ok(())
    }

    /// Evaluate every live agent against the current snapshot.
    ///
    /// Results are in ascending `AgentId` order.  The sequential path threads
    /// the pair cache through every agent; the parallel path recomputes each
    /// directed pair instead.
    fn read_phase(
        &mut self,
        now:    Tick,
        rules:  RuleSet,
        groups: &NeighborGroups,
    ) -> Vec<(AgentId, HeadingUpdate)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents = &self.agents;
        let cells  = self.cells.as_slice();
        let ctx    = SteeringContext::new(now, agents, rules, &self.config);

        #[cfg(not(feature = "parallel"))]
        {
            let pairs = &mut self.pairs;
            agents
                .agent_ids()
                .map(|agent| (agent, steer(agent, candidates(cells, groups, agent), &ctx, &mut *pairs)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use flock_behavior::Recompute;
            use rayon::prelude::*;

            let ids: Vec<AgentId> = agents.agent_ids().collect();
            ids.par_iter()
                .map(|&agent| (agent, steer(agent, candidates(cells, groups, agent), &ctx, &mut Recompute)))
                .collect()
        }
    }

    /// Apply every agent's update in ascending `AgentId` order.
    fn commit_phase(
        &mut self,
        now:     Tick,
        updates: Vec<(AgentId, HeadingUpdate)>,
    ) -> SimResult<TickStats> {
        let incremental = self.config.grid_maintenance == GridMaintenance::Incremental;
        let mut stats = TickStats { tick: now, agents: updates.len(), ..TickStats::default() };
        let mut speed_sum = 0.0;

        for (agent, update) in updates {
            self.agents.record_sighting(agent, update.visible);
            self.agents.advance(agent, update.d_heading, self.bounds);

            if incremental {
                self.refile(agent)?;
            }

            if update.visible > 0 {
                stats.active_agents += 1;
                stats.visible_pairs += u64::from(update.visible);
            }
            speed_sum += self.agents.kinematics[agent.index()].speed;
        }

        if stats.agents > 0 {
            stats.mean_speed = speed_sum / stats.agents as f64;
        }
        Ok(stats)
    }

    /// Move `agent` to the cell matching its new position, if it changed.
    fn refile(&mut self, agent: AgentId) -> SimResult<()> {
        let i = agent.index();
        let to = self.grid.cell_of(self.agents.positions[i])?;
        match self.cells[i] {
            Some(from) => self.grid.relocate(agent, from, to)?,
            None => self.grid.insert(agent, to)?,
        }
        self.cells[i] = Some(to);
        Ok(())
    }
}

/// The neighbor group an agent is scanned against.  Agents not yet filed in
/// the grid have none.
#[inline]
fn candidates<'g>(
    cells:  &[Option<CellCoord>],
    groups: &'g NeighborGroups,
    agent:  AgentId,
) -> &'g [AgentId] {
    match cells[agent.index()] {
        Some(cell) => groups.get(cell),
        None => &[],
    }
}
