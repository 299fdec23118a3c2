use lightcycle_core::{AgentIndex, Heading, Match};

use super::{safe_headings, Pilot};
use crate::rng::SeededRng;

const TURN_ONE_IN: u32 = 8;

/// Random walker: keeps going straight, turns now and then, and always turns
/// when the cell ahead is blocked.
#[derive(Clone, Debug)]
pub struct WandererPilot {
    rng: SeededRng,
}

impl Default for WandererPilot {
    fn default() -> Self {
        Self {
            rng: SeededRng::new(0),
        }
    }
}

impl Pilot for WandererPilot {
    fn id(&self) -> &'static str {
        "wanderer"
    }

    fn description(&self) -> &'static str {
        "Seeded random walker that dodges the cell directly ahead."
    }

    fn reset(&mut self, seed: u32) {
        self.rng = SeededRng::new(seed);
    }

    fn next_heading(&mut self, world: &Match, agent_index: AgentIndex) -> Option<Heading> {
        let agent = world.agents().get(agent_index)?;
        let current = agent.heading();
        let safe = safe_headings(world, agent_index);

        let ahead_clear = safe.contains(&current);
        if ahead_clear && !self.rng.chance(TURN_ONE_IN) {
            return None;
        }

        let turns: Vec<Heading> = safe.into_iter().filter(|h| *h != current).collect();
        self.rng.pick(&turns)
    }
}
