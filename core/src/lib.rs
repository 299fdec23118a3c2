//! Deterministic light-cycle arena simulation.

pub mod agent;
pub mod clock;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod planner;
pub mod sim;

pub use agent::{Agent, AgentIndex, AiRole, Controller, Rgb};
pub use clock::TickClock;
pub use collision::Occupancy;
pub use config::{Difficulty, GameMode, MatchConfig};
pub use error::{ConfigError, InvariantViolation, RuleCode};
pub use grid::{Cell, Heading};
pub use planner::{choose_heading, score_candidates, CandidateScore, PlannerParams};
pub use sim::{
    AgentSnapshot, DebugCommand, DirectionalIntent, Match, MatchStatus, TickOutcome,
    WorldSnapshot,
};
