//! Heuristic move selection for AI-controlled cycles.
//!
//! Each safe candidate heading is scored by how far the cycle could run
//! straight ahead (capped by the difficulty's look-ahead ceiling) plus an
//! optional proximity bonus that pulls it toward the nearest other cycle.
//! The first best score in [`Heading::ALL`] order wins, so a decision only
//! depends on the board.

use crate::agent::{Agent, AiRole};
use crate::collision::Occupancy;
use crate::config::Difficulty;
use crate::constants::{PRIMARY_TRAP_WEIGHT, SECONDARY_TRAP_WEIGHT, TRAP_RADIUS};
use crate::grid::{Cell, Heading};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannerParams {
    pub max_steps: u32,
    /// `None` disables the trap bonus.
    pub trap_weight: Option<f64>,
}

impl PlannerParams {
    /// Parameters for `role` at `difficulty`; `targeting` is the match-wide AI targeting toggle.
    pub fn for_role(difficulty: Difficulty, role: AiRole, targeting: bool) -> Self {
        let trap_weight = (targeting && difficulty.trap_enabled(role)).then_some(match role {
            AiRole::Primary => PRIMARY_TRAP_WEIGHT,
            AiRole::Secondary => SECONDARY_TRAP_WEIGHT,
        });
        Self {
            max_steps: difficulty.max_steps(role),
            trap_weight,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandidateScore {
    pub heading: Heading,
    pub cell: Cell,
    pub run_length: u32,
    pub bonus: f64,
    pub score: f64,
}

/// Positions of every agent other than `agent`.
pub fn targets_for(agents: &[Agent], agent: &Agent) -> Vec<Cell> {
    agents
        .iter()
        .filter(|other| other.index() != agent.index())
        .map(Agent::position)
        .collect()
}

/// Scores every safe candidate for `agent`, in candidate order.
pub fn score_candidates(
    agent: &Agent,
    occupancy: &Occupancy,
    targets: &[Cell],
    params: PlannerParams,
) -> Vec<CandidateScore> {
    let head = agent.position();
    let current = agent.heading();

    Heading::ALL
        .into_iter()
        .filter(|heading| !heading.is_reverse_of(current))
        .filter_map(|heading| {
            let cell = head.step(heading);
            if occupancy.is_blocked(cell) {
                return None;
            }
            let run_length = run_length(occupancy, cell, heading, params.max_steps);
            let bonus = params
                .trap_weight
                .map_or(0.0, |weight| trap_bonus(cell, targets, weight));
            Some(CandidateScore {
                heading,
                cell,
                run_length,
                bonus,
                score: f64::from(run_length) + bonus,
            })
        })
        .collect()
}

/// Picks the next heading for `agent`. Keeps the current heading when every
/// candidate is blocked.
pub fn choose_heading(
    agent: &Agent,
    occupancy: &Occupancy,
    targets: &[Cell],
    params: PlannerParams,
) -> Heading {
    let scores = score_candidates(agent, occupancy, targets, params);

    let mut best: Option<&CandidateScore> = None;
    for candidate in &scores {
        if best.map_or(true, |current| candidate.score > current.score) {
            best = Some(candidate);
        }
    }

    let chosen = best.map_or(agent.heading(), |candidate| candidate.heading);
    tracing::trace!(
        agent = agent.index(),
        ?chosen,
        candidates = ?scores
            .iter()
            .map(|candidate| (candidate.heading.as_str(), candidate.score))
            .collect::<Vec<_>>(),
        "planner decision"
    );
    chosen
}

/// Consecutive free cells from `start` (inclusive) along `heading`, at most `max_steps`.
fn run_length(occupancy: &Occupancy, start: Cell, heading: Heading, max_steps: u32) -> u32 {
    let mut cell = start;
    let mut steps = 0;
    while steps < max_steps && !occupancy.is_blocked(cell) {
        steps += 1;
        cell = cell.step(heading);
    }
    steps
}

fn trap_bonus(cell: Cell, targets: &[Cell], weight: f64) -> f64 {
    let nearest = targets
        .iter()
        .map(|target| cell.distance(*target))
        .fold(f64::INFINITY, f64::min);
    if nearest.is_finite() {
        (TRAP_RADIUS - nearest).max(0.0) * weight
    } else {
        0.0
    }
}
