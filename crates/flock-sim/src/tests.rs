//! Integration tests for flock-sim.

use flock_core::{Bounds, FlockConfig, Kinematics, Vec2};

use crate::{Flock, FlockBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const BOUNDS: Bounds = Bounds::new(1_000.0, 750.0);

/// Scenario origin, well away from the world edges.
const O: Vec2 = Vec2::new(500.0, 375.0);

/// A flock with default parameters holding `(dx, dy, speed, heading)` agents
/// placed relative to [`O`].
fn flock_of(agents: &[(f64, f64, f64, f64)]) -> Flock {
    flock_with(FlockConfig::default(), agents)
}

fn flock_with(config: FlockConfig, agents: &[(f64, f64, f64, f64)]) -> Flock {
    agents
        .iter()
        .fold(FlockBuilder::new(config), |b, &(dx, dy, speed, heading)| {
            b.agent(O + Vec2::new(dx, dy), Kinematics::new(speed, heading))
        })
        .build()
        .unwrap()
}

fn random_flock(config: FlockConfig, n: usize) -> Flock {
    let mut rng = flock_core::SimRng::new(config.seed);
    FlockBuilder::new(config).spawn_random(n, &mut rng).build().unwrap()
}

fn heading(flock: &Flock, agent: u32) -> f64 {
    flock.heading_and_speed(flock_core::AgentId(agent)).unwrap().1
}

// ── FlockBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use flock_core::{AgentId, FlockConfig, FlockError, Kinematics, SimRng, Vec2};

    use super::{BOUNDS, random_flock};
    use crate::{FlockBuilder, SimError};

    #[test]
    fn builds_empty_flock() {
        let flock = FlockBuilder::new(FlockConfig::default()).build().unwrap();
        assert!(flock.is_empty());
        assert_eq!(flock.grid().rows(), 10);
        assert_eq!(flock.grid().cols(), 14);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FlockConfig { cell_size: Some(10.0), ..FlockConfig::default() };
        let err = FlockBuilder::new(config).build().err().unwrap();
        assert!(matches!(err, SimError::Flock(FlockError::Config(_))));
    }

    #[test]
    fn initial_positions_are_wrapped() {
        let flock = FlockBuilder::new(FlockConfig::default())
            .agent(Vec2::new(-10.0, 800.0), Kinematics::new(1.0, 0.0))
            .build()
            .unwrap();
        let p = flock.position(AgentId(0)).unwrap();
        assert!(BOUNDS.contains(p));
        assert!((p.x - 990.0).abs() < 1e-9 && (p.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn random_population_is_seeded() {
        let a = random_flock(FlockConfig { seed: 11, ..FlockConfig::default() }, 40);
        let b = random_flock(FlockConfig { seed: 11, ..FlockConfig::default() }, 40);
        let c = random_flock(FlockConfig { seed: 12, ..FlockConfig::default() }, 40);
        assert_eq!(a.agents().positions, b.agents().positions);
        assert_ne!(a.agents().positions, c.agents().positions);
    }

    #[test]
    fn prebuilt_store_is_used() {
        let store = flock_agent::AgentStoreBuilder::new(8.0)
            .spawn_random(7, BOUNDS, &mut SimRng::new(1))
            .build();
        let flock = FlockBuilder::new(FlockConfig::default())
            .agent(Vec2::ZERO, Kinematics::default())
            .agents(store)
            .build()
            .unwrap();
        assert_eq!(flock.len(), 7);
    }
}

// ── Behavioral scenarios ──────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

    use flock_core::geom::{bearing, normalize_angle};
    use flock_core::{AgentId, RuleSet, Vec2};

    use super::{BOUNDS, O, flock_of, heading};

    #[test]
    fn head_on_stationary_block_dodges() {
        let mut flock = flock_of(&[(0.0, 0.0, 5.0, 0.0), (10.0, 0.0, 0.0, 0.0)]);
        let stats = flock.step(RuleSet::separation_only(), BOUNDS).unwrap();

        assert!((heading(&flock, 0) - FRAC_PI_4).abs() < 1e-12);
        let p = flock.position(AgentId(0)).unwrap();
        assert!((p.x - (O.x + 5.0 * FRAC_PI_4.cos())).abs() < 1e-9);
        assert!((p.y - (O.y + 5.0 * FRAC_PI_4.sin())).abs() < 1e-9);

        // The blocker never moves and, being stationary, never looks.
        assert_eq!(flock.position(AgentId(1)).unwrap(), O + Vec2::new(10.0, 0.0));
        assert!(flock.display_state(AgentId(0)).unwrap().active);
        assert!(!flock.display_state(AgentId(1)).unwrap().active);

        assert_eq!(stats.agents, 2);
        assert_eq!(stats.active_agents, 1);
        assert_eq!(stats.visible_pairs, 1);
        assert!((stats.mean_speed - 2.5).abs() < 1e-12);
    }

    #[test]
    fn neighbor_behind_is_invisible() {
        for rules in [RuleSet::separation_only(), RuleSet::ALL] {
            let mut flock = flock_of(&[(0.0, 0.0, 5.0, 0.0), (-50.0, 0.0, 0.0, 0.0)]);
            flock.step(rules, BOUNDS).unwrap();
            assert_eq!(heading(&flock, 0), 0.0);
            assert!(!flock.display_state(AgentId(0)).unwrap().active);
        }
    }

    #[test]
    fn alignment_converges_monotonically() {
        let mut flock = flock_of(&[(0.0, 0.0, 0.1, 0.0), (2.0, 0.0, 0.1, FRAC_PI_4)]);
        let diff = |f: &super::Flock| normalize_angle(heading(f, 1) - heading(f, 0)).abs();

        let mut prev = diff(&flock);
        for tick in 0..60 {
            flock.step(RuleSet::alignment_only(), BOUNDS).unwrap();
            let d = diff(&flock);
            if tick < 20 {
                assert!(d < prev, "tick {tick}: {d} !< {prev}");
            } else {
                assert!(d <= prev + 1e-12, "tick {tick}: {d} > {prev}");
            }
            prev = d;
        }
        assert!(prev < 1e-9, "final difference {prev}");
    }

    #[test]
    fn cohesion_turns_toward_the_others() {
        let layout = [
            (0.0, 0.0, 1.0, 0.3),
            (10.0, 0.0, 1.0, PI - 0.3),
            (5.0, 8.0, 1.0, -FRAC_PI_2 + 0.3),
        ];
        let mut flock = flock_of(&layout);
        let start: Vec<Vec2> = (0..3).map(|i| flock.position(AgentId(i)).unwrap()).collect();
        let before: Vec<f64> = (0..3).map(|i| heading(&flock, i)).collect();

        flock.step(RuleSet::cohesion_only(), BOUNDS).unwrap();

        for i in 0..3 {
            let others: Vec<Vec2> = (0..3).filter(|&j| j != i).map(|j| start[j]).collect();
            let centroid = (others[0] + others[1]) * 0.5;
            let target = bearing(centroid - start[i]);
            let error_before = normalize_angle(target - before[i]).abs();
            let error_after = normalize_angle(target - heading(&flock, i as u32)).abs();
            assert!(error_after < error_before, "agent {i}: {error_after} !< {error_before}");
        }
    }

    #[test]
    fn disabled_rules_only_move_agents() {
        let mut flock = flock_of(&[(0.0, 0.0, 5.0, 0.0), (10.0, 0.0, 0.0, 0.0)]);
        flock.step(RuleSet::NONE, BOUNDS).unwrap();
        assert_eq!(heading(&flock, 0), 0.0);
        assert_eq!(flock.position(AgentId(0)).unwrap(), O + Vec2::new(5.0, 0.0));
        assert!(!flock.display_state(AgentId(0)).unwrap().active);
    }
}

// ── Invariants over random populations ────────────────────────────────────────

#[cfg(test)]
mod invariants {
    use std::f64::consts::PI;

    use flock_core::{AgentId, FlockConfig, RuleSet};

    use super::{BOUNDS, random_flock};

    #[test]
    fn speeds_headings_and_positions_stay_in_range() {
        let mut flock = random_flock(FlockConfig { seed: 4, ..FlockConfig::default() }, 150);
        for tick in 0..30 {
            if tick % 5 == 0 {
                flock.apply_external_speed_delta(AgentId(0), 50.0, 7.0).unwrap();
                flock.apply_external_speed_delta(AgentId(1), -50.0, -7.0).unwrap();
            }
            flock.step(RuleSet::ALL, BOUNDS).unwrap();
            for agent in flock.agents().agent_ids() {
                let (speed, heading) = flock.heading_and_speed(agent).unwrap();
                assert!((0.0..=8.0).contains(&speed));
                assert!(heading > -PI && heading <= PI);
                assert!(BOUNDS.contains(flock.position(agent).unwrap()));
            }
        }
    }

    #[test]
    fn turns_never_exceed_the_per_tick_limit() {
        let mut flock = random_flock(FlockConfig { seed: 8, ..FlockConfig::default() }, 120);
        let limit = flock.config.d_theta_per_update + 1e-9;
        for _ in 0..20 {
            let before = flock.agents().kinematics.clone();
            flock.step(RuleSet::ALL, BOUNDS).unwrap();
            for (b, a) in before.iter().zip(&flock.agents().kinematics) {
                let turn = flock_core::geom::normalize_angle(a.heading - b.heading);
                assert!(turn.abs() <= limit, "turned {turn}");
            }
        }
    }

    #[test]
    fn same_seed_same_trajectory() {
        let config = FlockConfig { seed: 21, ..FlockConfig::default() };
        let mut a = random_flock(config.clone(), 100);
        let mut b = random_flock(config, 100);
        for _ in 0..40 {
            a.step(RuleSet::ALL, BOUNDS).unwrap();
            b.step(RuleSet::ALL, BOUNDS).unwrap();
        }
        assert_eq!(a.agents().positions, b.agents().positions);
        assert_eq!(a.agents().kinematics, b.agents().kinematics);
        assert_eq!(a.agents().visible, b.agents().visible);
    }
}

// ── Grid lifecycle ────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use flock_core::{AgentId, Bounds, FlockConfig, GridMaintenance, Kinematics, RuleSet, Vec2};
    use flock_spatial::{CellCoord, SpatialGrid};

    use super::{BOUNDS, random_flock};
    use crate::{Flock, FlockBuilder, SimError};

    /// Per-cell contents, sorted, for order-insensitive comparison.
    fn sorted_cells(grid: &SpatialGrid) -> Vec<Vec<AgentId>> {
        let mut out = Vec::new();
        for row in 0..grid.rows() {
            for col in 0..grid.cols() {
                let mut ids = grid.cell(CellCoord::new(row, col)).unwrap().to_vec();
                ids.sort();
                out.push(ids);
            }
        }
        out
    }

    fn fresh_grid(flock: &Flock) -> SpatialGrid {
        let config = &flock.config;
        let mut grid = SpatialGrid::covering(flock.bounds(), config.cell_size(), config.wraparound).unwrap();
        let agents = flock.agents();
        grid.rebuild(agents.agent_ids().map(|a| (a, agents.positions[a.index()]))).unwrap();
        grid
    }

    #[test]
    fn incremental_maintenance_matches_full_rebuild() {
        let config = FlockConfig {
            seed: 2,
            grid_maintenance: GridMaintenance::Incremental,
            ..FlockConfig::default()
        };
        let mut flock = random_flock(config, 200);
        for _ in 0..40 {
            flock.step(RuleSet::ALL, BOUNDS).unwrap();
            flock.sync_grid().unwrap();
            assert_eq!(sorted_cells(flock.grid()), sorted_cells(&fresh_grid(&flock)));
        }
    }

    #[test]
    fn visible_pairs_share_a_neighbor_group() {
        for wraparound in [true, false] {
            let config = FlockConfig { seed: 6, wraparound, ..FlockConfig::default() };
            let view = config.view_distance;
            let mut flock = random_flock(config, 250);
            for _ in 0..10 {
                flock.step(RuleSet::ALL, BOUNDS).unwrap();
            }
            flock.sync_grid().unwrap();

            let grid = flock.grid();
            let positions = &flock.agents().positions;
            for a in flock.agents().agent_ids() {
                let group = grid.neighbor_group(grid.cell_of(positions[a.index()]).unwrap()).unwrap();
                for b in flock.agents().agent_ids() {
                    let d = positions[b.index()] - positions[a.index()];
                    if d.length_squared() <= view * view {
                        assert!(group.contains(&b), "{b} within view of {a} but not in its group");
                    }
                }
            }
        }
    }

    #[test]
    fn resizing_wraps_agents_and_regrids() {
        let mut flock = random_flock(FlockConfig { seed: 3, ..FlockConfig::default() }, 80);
        let small = Bounds::new(300.0, 200.0);
        flock.step(RuleSet::ALL, small).unwrap();
        assert_eq!(flock.bounds(), small);
        assert_eq!((flock.grid().rows(), flock.grid().cols()), (3, 4));
        for agent in flock.agents().agent_ids() {
            assert!(small.contains(flock.position(agent).unwrap()));
        }
        flock.sync_grid().unwrap();
        assert_eq!(flock.grid().len(), 80);
    }

    #[test]
    fn agents_at_the_far_edge_tick_without_wraparound() {
        let below = |v: f64| f64::from_bits(v.to_bits() - 1);
        let world = Bounds::new(7.0, 7.0);
        for mode in [GridMaintenance::Rebuild, GridMaintenance::Incremental] {
            let config = FlockConfig {
                view_distance:    0.7,
                wraparound:       false,
                bounds:           world,
                grid_maintenance: mode,
                ..FlockConfig::default()
            };
            let mut flock = FlockBuilder::new(config)
                .agent(Vec2::new(below(7.0), 1.0), Kinematics::new(0.0, 0.0))
                .agent(Vec2::new(1.0, below(7.0)), Kinematics::new(0.0, 0.0))
                .build()
                .unwrap();
            flock.create_agent(Vec2::new(below(7.0), below(7.0)), 0.1, 0.0);
            for _ in 0..3 {
                flock.step(RuleSet::ALL, world).unwrap();
            }
            flock.sync_grid().unwrap();
            assert_eq!(flock.grid().len(), 3);
            let last = CellCoord::new(flock.grid().rows() - 1, flock.grid().cols() - 1);
            assert_eq!(flock.grid().cell_of(flock.position(AgentId(0)).unwrap()).unwrap().col, last.col);
            assert_eq!(flock.grid().cell_of(flock.position(AgentId(1)).unwrap()).unwrap().row, last.row);
        }
    }

    #[test]
    fn degenerate_bounds_are_rejected() {
        let mut flock = random_flock(FlockConfig::default(), 5);
        let err = flock.step(RuleSet::ALL, Bounds::new(0.0, 100.0)).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
        assert_eq!(flock.bounds(), BOUNDS);
    }
}

// ── Agent lifecycle & external interface ──────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use flock_core::{AgentId, FlockConfig, FlockError, GridMaintenance, RuleSet, Vec2};

    use super::{BOUNDS, O, flock_of, flock_with};
    use crate::SimError;

    #[test]
    fn created_agents_join_next_tick() {
        let mut flock = flock_of(&[(0.0, 0.0, 5.0, 0.0)]);
        flock.step(RuleSet::separation_only(), BOUNDS).unwrap();
        assert!(!flock.display_state(AgentId(0)).unwrap().active);

        let here = flock.position(AgentId(0)).unwrap();
        let blocker = flock.create_agent(here + Vec2::new(10.0, 0.0), 0.0, 0.0);
        assert_eq!(blocker, AgentId(1));
        flock.step(RuleSet::separation_only(), BOUNDS).unwrap();
        assert!(flock.display_state(AgentId(0)).unwrap().active);
    }

    #[test]
    fn create_wraps_clamps_and_normalizes() {
        let mut flock = flock_of(&[]);
        let id = flock.create_agent(Vec2::new(1_250.0, -50.0), 99.0, 7.0);
        let p = flock.position(id).unwrap();
        assert!((p.x - 250.0).abs() < 1e-9 && (p.y - 700.0).abs() < 1e-9);
        let (speed, heading) = flock.heading_and_speed(id).unwrap();
        assert_eq!(speed, 8.0);
        assert!((heading - (7.0 - std::f64::consts::TAU)).abs() < 1e-12);
    }

    #[test]
    fn removed_agents_vanish() {
        for mode in [GridMaintenance::Rebuild, GridMaintenance::Incremental] {
            let config = FlockConfig { grid_maintenance: mode, ..FlockConfig::default() };
            let mut flock = flock_with(config, &[(0.0, 0.0, 5.0, 0.0), (10.0, 0.0, 0.0, 0.0)]);
            flock.step(RuleSet::separation_only(), BOUNDS).unwrap();
            assert_eq!(flock.grid().len(), 2);

            flock.remove_agent(AgentId(1)).unwrap();
            assert_eq!(flock.len(), 1);
            assert_eq!(flock.grid().len(), 1);
            let missing = || SimError::Flock(FlockError::AgentNotFound(AgentId(1)));
            assert_eq!(flock.position(AgentId(1)), Err(missing()));
            assert_eq!(flock.remove_agent(AgentId(1)), Err(missing()));

            flock.step(RuleSet::separation_only(), BOUNDS).unwrap();
            assert!(!flock.display_state(AgentId(0)).unwrap().active);
            assert_eq!(flock.create_agent(O, 1.0, 0.0), AgentId(2));
        }
    }

    #[test]
    fn store_view_tracks_population_changes() {
        let mut flock = flock_of(&[(0.0, 0.0, 5.0, 0.0)]);
        let added = flock.create_agent(O + Vec2::new(20.0, 0.0), 1.0, 0.0);
        assert_eq!(flock.agents().len(), 2);
        flock.step(RuleSet::ALL, BOUNDS).unwrap();
        assert_eq!(flock.grid().len(), 2);

        flock.remove_agent(AgentId(0)).unwrap();
        assert_eq!(flock.agents().agent_ids().collect::<Vec<_>>(), vec![added]);
        flock.step(RuleSet::ALL, BOUNDS).unwrap();
        assert_eq!(flock.grid().len(), 1);
    }

    #[test]
    fn external_delta_is_clamped() {
        let mut flock = flock_of(&[(0.0, 0.0, 5.0, 0.0)]);
        flock.apply_external_speed_delta(AgentId(0), 10.0, 0.5).unwrap();
        assert_eq!(flock.heading_and_speed(AgentId(0)).unwrap(), (8.0, 0.5));
        flock.apply_external_speed_delta(AgentId(0), -20.0, 0.0).unwrap();
        assert_eq!(flock.heading_and_speed(AgentId(0)).unwrap().0, 0.0);
        assert!(flock.apply_external_speed_delta(AgentId(3), 1.0, 0.0).is_err());
    }

    #[test]
    fn display_polygon_follows_the_agent() {
        let flock = flock_of(&[(0.0, 0.0, 5.0, 0.0)]);
        let poly = flock.display_polygon(AgentId(0)).unwrap();
        assert_eq!(poly.len(), 4);
        assert_eq!(poly[0], O + Vec2::new(8.0, 0.0));
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer {
    use flock_agent::AgentStore;
    use flock_core::{FlockConfig, RuleSet, Tick};

    use super::{BOUNDS, random_flock};
    use crate::{FlockObserver, NoopObserver, TickStats};

    #[derive(Default)]
    struct Recorder {
        starts:    Vec<Tick>,
        ends:      Vec<TickStats>,
        snapshots: Vec<(Tick, usize)>,
        finished:  Option<Tick>,
    }

    impl FlockObserver for Recorder {
        fn on_tick_start(&mut self, tick: Tick) {
            self.starts.push(tick);
        }
        fn on_tick_end(&mut self, _tick: Tick, stats: &TickStats) {
            self.ends.push(*stats);
        }
        fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
            self.snapshots.push((tick, agents.len()));
        }
        fn on_sim_end(&mut self, final_tick: Tick) {
            self.finished = Some(final_tick);
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let config = FlockConfig { output_interval_ticks: 2, ..FlockConfig::default() };
        let mut flock = random_flock(config, 12);
        let mut rec = Recorder::default();
        flock.run_ticks(5, RuleSet::ALL, BOUNDS, &mut rec).unwrap();

        assert_eq!(rec.starts, (0..5).map(Tick).collect::<Vec<_>>());
        assert_eq!(rec.ends.iter().map(|s| s.tick).collect::<Vec<_>>(), rec.starts);
        assert!(rec.ends.iter().all(|s| s.agents == 12));
        assert_eq!(rec.snapshots, vec![(Tick(0), 12), (Tick(2), 12), (Tick(4), 12)]);
        assert_eq!(rec.finished, Some(Tick(5)));
        assert_eq!(flock.clock, Tick(5));
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let config = FlockConfig { output_interval_ticks: 0, ..FlockConfig::default() };
        let mut flock = random_flock(config, 3);
        let mut rec = Recorder::default();
        flock.run_ticks(4, RuleSet::ALL, BOUNDS, &mut rec).unwrap();
        assert!(rec.snapshots.is_empty());
        flock.run_ticks(1, RuleSet::ALL, BOUNDS, &mut NoopObserver).unwrap();
        assert_eq!(flock.clock, Tick(5));
    }
}
