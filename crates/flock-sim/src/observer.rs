//! Simulation observer trait for progress reporting and data collection.

use flock_agent::AgentStore;
use flock_core::Tick;

use crate::TickStats;

/// Callbacks invoked by [`Flock::run_ticks`][crate::Flock::run_ticks] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl FlockObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.is_multiple_of(self.interval) {
///             println!("{tick}: {} of {} agents active", stats.active_agents, stats.agents);
///         }
///     }
/// }
/// ```
pub trait FlockObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once the tick's commit phase has finished.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the post-commit agent state.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final tick of a run completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`FlockObserver`] that does nothing.
pub struct NoopObserver;

impl FlockObserver for NoopObserver {}
