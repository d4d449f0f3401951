//! One agent's full neighbor scan.

use flock_core::AgentId;

use crate::rules::{alignment, cohesion, separation};
use crate::{HeadingUpdate, PairSource, Steering, SteeringContext, can_see};

/// Evaluate `agent` against every id in `candidates` (its cell's neighbor
/// group) and return the heading change to commit.
///
/// Stationary agents and ticks with every rule disabled skip the scan
/// entirely and report no visible neighbors.  `agent` itself may appear in
/// `candidates`; it is skipped.
pub fn steer<P: PairSource>(
    agent:      AgentId,
    candidates: &[AgentId],
    ctx:        &SteeringContext<'_>,
    pairs:      &mut P,
) -> HeadingUpdate {
    let me = ctx.agents.kinematics[agent.index()];
    if me.is_stationary() || !ctx.rules.any() {
        return HeadingUpdate::IDLE;
    }

    let mut steering = Steering::new(ctx.rules.cohesion);
    for &other in candidates {
        if other == agent {
            continue;
        }
        let geometry = pairs.geometry(agent, other, ctx.agents, ctx.view_distance);
        let Some(seen) = can_see(&geometry, me.heading, ctx.half_view_angle) else {
            continue;
        };
        steering.saw_neighbor();

        let them = ctx.agents.kinematics[other.index()];
        if ctx.rules.separation {
            if let Some(vote) = separation(me, them, &seen, ctx.d_theta) {
                steering.avoid(vote);
            }
        }
        if ctx.rules.alignment {
            if let Some(turn) = alignment(me, them, &seen) {
                steering.align(turn);
            }
        }
        if ctx.rules.cohesion {
            steering.cohere(cohesion(&seen));
        }
    }

    steering.finish(me.heading, ctx.d_theta)
}
