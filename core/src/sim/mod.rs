use serde::Serialize;

use crate::agent::{Agent, AgentIndex, Controller, Rgb};
use crate::collision::Occupancy;
use crate::config::{Difficulty, GameMode, MatchConfig};
use crate::error::{ConfigError, InvariantViolation};
use crate::grid::{Cell, Heading};

mod arena;

use arena::Arena;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Running,
    Over,
}

/// What a single [`Match::tick`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The match was already over; nothing moved.
    Idle,
    Advanced,
    Finished { winners: Vec<AgentIndex> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionalIntent {
    pub agent_index: AgentIndex,
    pub heading: Heading,
}

impl DirectionalIntent {
    pub fn new(agent_index: AgentIndex, heading: Heading) -> Self {
        Self {
            agent_index,
            heading,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DebugCommand {
    GodMode,
    AiNoTarget,
}

impl DebugCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "god" => Some(Self::GodMode),
            "ainotarget" => Some(Self::AiNoTarget),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentSnapshot {
    pub index: AgentIndex,
    pub name: String,
    pub color: Rgb,
    pub controller: Controller,
    pub position: Cell,
    pub heading: Heading,
    pub trail: Vec<Cell>,
    pub alive: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WorldSnapshot {
    pub tick: u32,
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub status: MatchStatus,
    pub agents: Vec<AgentSnapshot>,
    pub winners: Vec<AgentIndex>,
    pub god_mode: bool,
    pub ai_targets_player: bool,
}

impl WorldSnapshot {
    pub fn is_over(&self) -> bool {
        self.status == MatchStatus::Over
    }

    pub fn winner_names(&self) -> Vec<&str> {
        self.winners
            .iter()
            .filter_map(|index| self.agents.get(*index))
            .map(|agent| agent.name.as_str())
            .collect()
    }

    /// Game-over banner text, e.g. `"Player 1 and AI 2 wins!"`. `None` while running.
    pub fn outcome_text(&self) -> Option<String> {
        if !self.is_over() {
            return None;
        }
        let names = self.winner_names();
        let winners = if names.is_empty() {
            "No one".to_string()
        } else {
            names.join(" and ")
        };
        Some(format!("{winners} wins!"))
    }
}

/// A light-cycle match: the only entry point into the simulation.
#[derive(Clone, Debug)]
pub struct Match {
    arena: Arena,
}

impl Match {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            arena: Arena::new(config),
        }
    }

    /// Parses and applies a new configuration, then resets. On error the
    /// current match is left as it was.
    pub fn configure<S: AsRef<str>>(
        &mut self,
        mode: &str,
        difficulty: Option<&str>,
        names: &[S],
    ) -> Result<(), ConfigError> {
        let config = MatchConfig::parse(mode, difficulty, names)?;
        self.arena = Arena::new(config);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.arena.reset();
    }

    #[inline]
    pub fn tick(&mut self) -> TickOutcome {
        self.arena.tick()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        self.arena.world_snapshot()
    }

    /// Returns the new state of the toggle.
    pub fn toggle_god_mode(&mut self) -> bool {
        self.arena.toggle_god_mode()
    }

    /// Returns the new state of the toggle.
    pub fn toggle_ai_targeting(&mut self) -> bool {
        self.arena.toggle_ai_targeting()
    }

    pub fn submit_intent(&mut self, intent: DirectionalIntent) -> bool {
        self.arena.submit_intent(intent)
    }

    /// Applies a console command. Unknown commands are ignored and return `None`.
    pub fn apply_command(&mut self, input: &str) -> Option<DebugCommand> {
        let Some(command) = DebugCommand::parse(input) else {
            tracing::debug!(input, "ignoring unknown command");
            return None;
        };
        match command {
            DebugCommand::GodMode => {
                self.arena.toggle_god_mode();
            }
            DebugCommand::AiNoTarget => {
                self.arena.toggle_ai_targeting();
            }
        }
        Some(command)
    }

    pub fn validate(&self) -> Result<(), InvariantViolation> {
        self.arena
            .validate_invariants()
            .map_err(|rule| InvariantViolation {
                tick: self.arena.tick_count(),
                rule,
            })
    }

    pub fn config(&self) -> &MatchConfig {
        self.arena.config()
    }

    #[inline]
    pub fn status(&self) -> MatchStatus {
        self.arena.status()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.status() == MatchStatus::Over
    }

    #[inline]
    pub fn tick_count(&self) -> u32 {
        self.arena.tick_count()
    }

    pub fn agents(&self) -> &[Agent] {
        self.arena.agents()
    }

    pub fn occupancy(&self) -> &Occupancy {
        self.arena.occupancy()
    }

    pub fn winners(&self) -> &[AgentIndex] {
        self.arena.winners()
    }

    pub fn god_mode(&self) -> bool {
        self.arena.god_mode()
    }

    pub fn ai_targets_player(&self) -> bool {
        self.arena.ai_targets_player()
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
