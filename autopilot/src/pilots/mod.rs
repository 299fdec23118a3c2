use lightcycle_core::{AgentIndex, Heading, Match};

mod hunter;
mod wanderer;

pub use hunter::HunterPilot;
pub use wanderer::WandererPilot;

/// Drives one human slot of a match. Returning `None` keeps the current heading.
pub trait Pilot: Send {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn reset(&mut self, seed: u32);
    fn next_heading(&mut self, world: &Match, agent_index: AgentIndex) -> Option<Heading>;
}

/// Never steers; rides straight into whatever is ahead.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdlePilot;

impl Pilot for IdlePilot {
    fn id(&self) -> &'static str {
        "idle"
    }

    fn description(&self) -> &'static str {
        "Never steers. Baseline for AI difficulty."
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_heading(&mut self, _world: &Match, _agent_index: AgentIndex) -> Option<Heading> {
        None
    }
}

const PILOT_IDS: [&str; 3] = ["idle", "wanderer", "hunter"];

pub fn pilot_ids() -> Vec<&'static str> {
    PILOT_IDS.to_vec()
}

pub fn create_pilot(id: &str) -> Option<Box<dyn Pilot>> {
    match id {
        "idle" => Some(Box::new(IdlePilot)),
        "wanderer" => Some(Box::new(WandererPilot::default())),
        "hunter" => Some(Box::new(HunterPilot::default())),
        _ => None,
    }
}

pub fn describe_pilots() -> Vec<(&'static str, &'static str)> {
    PILOT_IDS
        .iter()
        .filter_map(|id| create_pilot(id))
        .map(|pilot| (pilot.id(), pilot.description()))
        .collect()
}

/// Headings `agent_index` may take next tick without hitting a wall or trail.
pub(crate) fn safe_headings(world: &Match, agent_index: AgentIndex) -> Vec<Heading> {
    let Some(agent) = world.agents().get(agent_index) else {
        return Vec::new();
    };
    Heading::ALL
        .into_iter()
        .filter(|heading| !heading.is_reverse_of(agent.moved_heading()))
        .filter(|heading| !world.occupancy().is_blocked(agent.position().step(*heading)))
        .collect()
}
