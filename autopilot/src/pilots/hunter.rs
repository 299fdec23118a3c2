use lightcycle_core::planner::{choose_heading, targets_for, PlannerParams};
use lightcycle_core::{AgentIndex, AiRole, Difficulty, Heading, Match};

use super::Pilot;

/// Plays a human slot with the built-in planner at hard primary settings.
#[derive(Clone, Copy, Debug)]
pub struct HunterPilot {
    params: PlannerParams,
}

impl Default for HunterPilot {
    fn default() -> Self {
        Self {
            params: PlannerParams::for_role(Difficulty::Hard, AiRole::Primary, true),
        }
    }
}

impl Pilot for HunterPilot {
    fn id(&self) -> &'static str {
        "hunter"
    }

    fn description(&self) -> &'static str {
        "Run-length planner with trap bonus, mirroring a hard primary AI."
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_heading(&mut self, world: &Match, agent_index: AgentIndex) -> Option<Heading> {
        let agent = world.agents().get(agent_index)?;
        let targets = targets_for(world.agents(), agent);
        let heading = choose_heading(agent, world.occupancy(), &targets, self.params);
        (heading != agent.heading()).then_some(heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_heading_in_open_field() {
        let world = Match::default();
        let mut pilot = HunterPilot::default();
        assert_eq!(pilot.next_heading(&world, 0), None);
        assert_eq!(pilot.next_heading(&world, 5), None);
    }
}
