//! murmuration — a small flock steered by one externally driven lead agent.
//!
//! Seeds 75 random agents plus a lead agent at the center of the world, then
//! nudges the lead every tick so it flies a slow circle the flock tends to
//! follow.  Halfway through, the world shrinks to mimic a window resize.
//!
//! ```text
//! cargo run -p murmuration -- [config.json]
//! RUST_LOG=info,flock_sim=debug cargo run -p murmuration
//! ```
//!
//! Output lands in `output/murmuration/`.

use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};

use flock_agent::AgentStore;
use flock_core::{Bounds, FlockConfig, Kinematics, RuleSet, SimRng, Tick, Vec2};
use flock_output::{CsvWriter, FlockOutputObserver, OutputWriter};
use flock_sim::{FlockBuilder, FlockObserver, TickStats};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:     usize = 75;
const TICKS:           u64   = 600;
const LEAD_TURN:       f64   = 0.0628; // rad per tick, one lap every ~100 ticks
const LEAD_ACCEL:      f64   = 0.075;
const OUTPUT_DIR:      &str  = "output/murmuration";

// ── Observer wrapper ──────────────────────────────────────────────────────────

/// Counts rows and defers `on_sim_end` so one writer spans many
/// single-tick runs.
struct CountingObserver<W: OutputWriter> {
    inner:          FlockOutputObserver<W>,
    snapshot_rows:  usize,
    summary_rows:   usize,
    peak_active:    usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: FlockOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, peak_active: 0 }
    }

    fn finish(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

impl<W: OutputWriter> FlockObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.summary_rows += 1;
        self.peak_active = self.peak_active.max(stats.active_agents);
        self.inner.on_tick_end(tick, stats);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(tick, agents);
    }
}

fn load_config() -> Result<FlockConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(FlockConfig { seed: 42, output_interval_ticks: 10, ..FlockConfig::default() });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config: FlockConfig =
        serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    info!(%path, "loaded config");
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let config = load_config()?;
    let bounds = config.bounds;
    let center = Vec2::new(bounds.width / 2.0, bounds.height / 2.0);
    let mut rng = SimRng::new(config.seed);

    // The lead is agent 0.
    let mut flock = FlockBuilder::new(config.clone())
        .agent(center, Kinematics::new(config.max_speed / 2.0, 0.0))
        .spawn_random(AGENT_COUNT, &mut rng)
        .build()?;
    let lead = flock.agents().agent_ids().next().context("flock has no lead agent")?;

    info!(
        agents = flock.len(),
        ticks = TICKS,
        width = bounds.width,
        height = bounds.height,
        seed = config.seed,
        "starting murmuration"
    );

    std::fs::create_dir_all(OUTPUT_DIR)?;
    let writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    let mut obs = CountingObserver::new(FlockOutputObserver::new(writer));

    let shrunk = Bounds::new(bounds.width * 0.8, bounds.height * 0.8);
    let t0 = Instant::now();
    for tick in 0..TICKS {
        // Hold speed steady once the lead reaches its cruising pace.
        let (speed, _) = flock.heading_and_speed(lead)?;
        let accel = if speed < config.max_speed * 0.75 { LEAD_ACCEL } else { 0.0 };
        flock.apply_external_speed_delta(lead, accel, LEAD_TURN)?;

        let world = if tick < TICKS / 2 { bounds } else { shrunk };
        flock.run_ticks(1, RuleSet::ALL, world, &mut obs)?;
    }
    obs.finish(flock.clock);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output error");
    }

    let lead_pos = flock.position(lead)?;
    let (lead_speed, lead_heading) = flock.heading_and_speed(lead)?;
    info!(
        secs = elapsed.as_secs_f64(),
        snapshot_rows = obs.snapshot_rows,
        summary_rows = obs.summary_rows,
        peak_active = obs.peak_active,
        "simulation complete"
    );
    info!(
        x = lead_pos.x,
        y = lead_pos.y,
        speed = lead_speed,
        heading = lead_heading,
        "lead final state"
    );

    Ok(())
}
