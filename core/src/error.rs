use core::fmt;

use thiserror::Error;

use crate::config::GameMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleCode {
    AgentCount,
    TickTrailLength,
    TrailHead,
    TrailContinuity,
    TrailAlignment,
    HeadingReversal,
    AgentBounds,
    StatusAlive,
    WinnerSet,
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AgentCount => write!(f, "AGENT_COUNT"),
            Self::TickTrailLength => write!(f, "TICK_TRAIL_LENGTH"),
            Self::TrailHead => write!(f, "TRAIL_HEAD"),
            Self::TrailContinuity => write!(f, "TRAIL_CONTINUITY"),
            Self::TrailAlignment => write!(f, "TRAIL_ALIGNMENT"),
            Self::HeadingReversal => write!(f, "HEADING_REVERSAL"),
            Self::AgentBounds => write!(f, "AGENT_BOUNDS"),
            Self::StatusAlive => write!(f, "STATUS_ALIVE"),
            Self::WinnerSet => write!(f, "WINNER_SET"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown game mode '{0}' (expected two_player, single_ai or dual_ai)")]
    UnknownMode(String),
    #[error("unknown difficulty '{0}' (expected easy, medium, hard or extreme)")]
    UnknownDifficulty(String),
    #[error("mode {0} needs a difficulty")]
    MissingDifficulty(GameMode),
    #[error("mode {mode} takes at most {max} player name(s), got {given}")]
    TooManyNames {
        mode: GameMode,
        given: usize,
        max: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("rule violation at tick {tick}: {rule}")]
pub struct InvariantViolation {
    pub tick: u32,
    pub rule: RuleCode,
}
