//! Plain data row types written by output backends.

use flock_sim::TickStats;

/// One agent's state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub tick:     u64,
    pub agent_id: u32,
    pub x:        f64,
    pub y:        f64,
    pub speed:    f64,
    pub heading:  f64,
    /// Saw at least one neighbor during the tick.
    pub active:   bool,
}

/// Summary statistics for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:          u64,
    pub agents:        u64,
    pub active_agents: u64,
    pub visible_pairs: u64,
    pub mean_speed:    f64,
}

impl From<&TickStats> for TickSummaryRow {
    fn from(stats: &TickStats) -> Self {
        Self {
            tick:          stats.tick.0,
            agents:        stats.agents as u64,
            active_agents: stats.active_agents as u64,
            visible_pairs: stats.visible_pairs,
            mean_speed:    stats.mean_speed,
        }
    }
}
