use super::*;
use crate::agent::AiRole;
use crate::constants::SPAWNS;
use crate::error::RuleCode;
use crate::planner::{self, PlannerParams};

/// Agent that god mode protects.
const GOD_MODE_AGENT: AgentIndex = 0;

#[derive(Clone, Debug)]
pub(super) struct Arena {
    config: MatchConfig,
    agents: Vec<Agent>,
    occupancy: Occupancy,
    status: MatchStatus,
    winners: Vec<AgentIndex>,
    tick: u32,
    god_mode: bool,
    /// Whether god mode covered agent 0's most recent move.
    god_move: bool,
    ai_targets_player: bool,
}

impl Arena {
    pub(super) fn new(config: MatchConfig) -> Self {
        let mut arena = Self {
            config,
            agents: Vec::new(),
            occupancy: Occupancy::new(),
            status: MatchStatus::Running,
            winners: Vec::new(),
            tick: 0,
            god_mode: false,
            god_move: false,
            ai_targets_player: true,
        };
        arena.reset();
        arena
    }

    pub(super) fn reset(&mut self) {
        self.agents = spawn_agents(&self.config);
        self.occupancy = Occupancy::from_agents(&self.agents);
        self.status = MatchStatus::Running;
        self.winners.clear();
        self.tick = 0;
        self.god_mode = false;
        self.god_move = false;
        self.ai_targets_player = true;
        tracing::debug!(
            mode = %self.config.mode(),
            difficulty = ?self.config.difficulty(),
            agents = self.agents.len(),
            "match reset"
        );
    }

    pub(super) fn tick(&mut self) -> TickOutcome {
        if self.status == MatchStatus::Over {
            return TickOutcome::Idle;
        }

        // Every AI decides against the same pre-tick board.
        for (index, heading) in self.plan_ai_headings() {
            self.agents[index].steer(heading);
        }

        for agent in self.agents.iter_mut().filter(|agent| agent.is_alive()) {
            let head = agent.advance();
            self.occupancy.insert(head);
        }
        self.tick += 1;
        self.god_move = self.god_mode;

        let blocked: Vec<AgentIndex> = self
            .agents
            .iter()
            .filter(|agent| self.is_blocked_after_move(agent))
            .map(Agent::index)
            .collect();
        if blocked.is_empty() {
            return TickOutcome::Advanced;
        }

        for index in &blocked {
            self.agents[*index].eliminate();
        }
        self.winners = self
            .agents
            .iter()
            .filter(|agent| agent.is_alive())
            .map(Agent::index)
            .collect();
        self.status = MatchStatus::Over;
        tracing::info!(
            tick = self.tick,
            blocked = ?blocked,
            winners = ?self.winners,
            "match over"
        );

        TickOutcome::Finished {
            winners: self.winners.clone(),
        }
    }

    fn plan_ai_headings(&self) -> Vec<(AgentIndex, Heading)> {
        let Some(difficulty) = self.config.difficulty() else {
            return Vec::new();
        };

        self.agents
            .iter()
            .filter(|agent| agent.is_alive())
            .filter_map(|agent| {
                let role = agent.controller().ai_role()?;
                let params = PlannerParams::for_role(difficulty, role, self.ai_targets_player);
                let targets = planner::targets_for(&self.agents, agent);
                let heading = planner::choose_heading(agent, &self.occupancy, &targets, params);
                Some((agent.index(), heading))
            })
            .collect()
    }

    fn is_blocked_after_move(&self, agent: &Agent) -> bool {
        if self.god_mode && agent.index() == GOD_MODE_AGENT {
            return false;
        }
        self.occupancy.is_blocked_for(agent, &self.agents)
    }

    pub(super) fn submit_intent(&mut self, intent: DirectionalIntent) -> bool {
        if self.status == MatchStatus::Over {
            tracing::debug!(?intent, "intent after game over ignored");
            return false;
        }
        let Some(agent) = self.agents.get_mut(intent.agent_index) else {
            tracing::debug!(?intent, "intent for unknown agent ignored");
            return false;
        };
        if !agent.controller().is_human() || !agent.is_alive() {
            tracing::debug!(?intent, "intent for non-human agent ignored");
            return false;
        }
        let accepted = agent.steer(intent.heading);
        if !accepted {
            tracing::debug!(?intent, "reversing intent ignored");
        }
        accepted
    }

    pub(super) fn toggle_god_mode(&mut self) -> bool {
        self.god_mode = !self.god_mode;
        tracing::debug!(god_mode = self.god_mode, "god mode toggled");
        self.god_mode
    }

    pub(super) fn toggle_ai_targeting(&mut self) -> bool {
        self.ai_targets_player = !self.ai_targets_player;
        tracing::debug!(
            ai_targets_player = self.ai_targets_player,
            "ai targeting toggled"
        );
        self.ai_targets_player
    }

    pub(super) fn world_snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            mode: self.config.mode(),
            difficulty: self.config.difficulty(),
            status: self.status,
            agents: self.agents.iter().map(Self::agent_snapshot).collect(),
            winners: self.winners.clone(),
            god_mode: self.god_mode,
            ai_targets_player: self.ai_targets_player,
        }
    }

    fn agent_snapshot(agent: &Agent) -> AgentSnapshot {
        AgentSnapshot {
            index: agent.index(),
            name: agent.name().to_string(),
            color: agent.color(),
            controller: agent.controller(),
            position: agent.position(),
            heading: agent.heading(),
            trail: agent.trail().to_vec(),
            alive: agent.is_alive(),
        }
    }

    pub(super) fn validate_invariants(&self) -> Result<(), RuleCode> {
        if self.agents.len() != self.config.mode().agent_count() {
            return Err(RuleCode::AgentCount);
        }

        let expected_trail = self.tick as usize + 1;
        for agent in &self.agents {
            let trail = agent.trail();
            if trail.len() != expected_trail {
                return Err(RuleCode::TickTrailLength);
            }

            if trail.last() != Some(&agent.position()) {
                return Err(RuleCode::TrailHead);
            }

            if !trail.iter().all(|cell| cell.is_aligned()) {
                return Err(RuleCode::TrailAlignment);
            }

            let moves: Option<Vec<Heading>> = trail
                .windows(2)
                .map(|pair| Heading::from_delta(pair[1].x - pair[0].x, pair[1].y - pair[0].y))
                .collect();
            let Some(moves) = moves else {
                return Err(RuleCode::TrailContinuity);
            };

            let reversed_move = moves.windows(2).any(|pair| pair[1].is_reverse_of(pair[0]));
            if reversed_move || agent.heading().is_reverse_of(agent.moved_heading()) {
                return Err(RuleCode::HeadingReversal);
            }

            // Judged by the move that placed the agent, not the current toggle.
            let protected = self.god_move && agent.index() == GOD_MODE_AGENT;
            if self.status == MatchStatus::Running && !protected && !agent.position().in_bounds()
            {
                return Err(RuleCode::AgentBounds);
            }
        }

        let status_consistent = match self.status {
            MatchStatus::Running => {
                self.winners.is_empty() && self.agents.iter().all(Agent::is_alive)
            }
            MatchStatus::Over => !self.agents.iter().all(Agent::is_alive),
        };
        if !status_consistent {
            return Err(RuleCode::StatusAlive);
        }

        if self.status == MatchStatus::Over {
            let survivors: Vec<AgentIndex> = self
                .agents
                .iter()
                .filter(|agent| agent.is_alive())
                .map(Agent::index)
                .collect();
            if survivors != self.winners {
                return Err(RuleCode::WinnerSet);
            }
        }

        Ok(())
    }

    pub(super) fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub(super) fn status(&self) -> MatchStatus {
        self.status
    }

    pub(super) fn tick_count(&self) -> u32 {
        self.tick
    }

    pub(super) fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub(super) fn occupancy(&self) -> &Occupancy {
        &self.occupancy
    }

    pub(super) fn winners(&self) -> &[AgentIndex] {
        &self.winners
    }

    pub(super) fn god_mode(&self) -> bool {
        self.god_mode
    }

    pub(super) fn ai_targets_player(&self) -> bool {
        self.ai_targets_player
    }
}

fn spawn_agents(config: &MatchConfig) -> Vec<Agent> {
    let mode = config.mode();
    let humans = mode.human_slots();

    SPAWNS
        .iter()
        .take(mode.agent_count())
        .enumerate()
        .map(|(index, &(spawn, heading, color))| {
            let controller = match index {
                _ if index < humans => Controller::Human,
                1 => Controller::Ai(AiRole::Primary),
                _ => Controller::Ai(AiRole::Secondary),
            };
            Agent::new(
                index,
                config.agent_name(index),
                color,
                controller,
                spawn,
                heading,
            )
        })
        .collect()
}
