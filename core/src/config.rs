use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::agent::AiRole;
use crate::constants::{
    DEFAULT_PLAYER_NAMES, LOOKAHEAD_STEPS, MAX_NAME_LEN, PRIMARY_AI_NAME, SECONDARY_AI_NAME,
};
use crate::error::ConfigError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    TwoPlayer,
    SingleAi,
    DualAi,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::TwoPlayer, GameMode::SingleAi, GameMode::DualAi];

    pub fn agent_count(self) -> usize {
        match self {
            Self::TwoPlayer | Self::SingleAi => 2,
            Self::DualAi => 3,
        }
    }

    pub fn uses_ai(self) -> bool {
        !matches!(self, Self::TwoPlayer)
    }

    /// Number of leading agent slots steered by intents.
    pub fn human_slots(self) -> usize {
        match self {
            Self::TwoPlayer => 2,
            Self::SingleAi | Self::DualAi => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoPlayer => "two_player",
            Self::SingleAi => "single_ai",
            Self::DualAi => "dual_ai",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "two_player" => Ok(Self::TwoPlayer),
            "single_ai" | "ai" => Ok(Self::SingleAi),
            "dual_ai" => Ok(Self::DualAi),
            _ => Err(ConfigError::UnknownMode(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    /// Look-ahead ceiling for the given role.
    pub fn max_steps(self, role: AiRole) -> u32 {
        let (primary, secondary) = LOOKAHEAD_STEPS[self as usize];
        match role {
            AiRole::Primary => primary,
            AiRole::Secondary => secondary,
        }
    }

    /// Whether trap scoring is available to `role`, before the targeting toggle applies.
    pub fn trap_enabled(self, role: AiRole) -> bool {
        match (self, role) {
            (_, AiRole::Secondary) => true,
            (Self::Easy | Self::Medium, AiRole::Primary) => false,
            (Self::Hard | Self::Extreme, AiRole::Primary) => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            "extreme" => Ok(Self::Extreme),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Validated match setup. Build it with [`MatchConfig::new`] or [`MatchConfig::parse`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    mode: GameMode,
    difficulty: Option<Difficulty>,
    names: Vec<String>,
}

impl MatchConfig {
    /// `names` covers the human slots in order; missing or blank names fall
    /// back to the defaults and long ones are cut to [`MAX_NAME_LEN`] characters.
    pub fn new<S: AsRef<str>>(
        mode: GameMode,
        difficulty: Option<Difficulty>,
        names: &[S],
    ) -> Result<Self, ConfigError> {
        let slots = mode.human_slots();
        if names.len() > slots {
            return Err(ConfigError::TooManyNames {
                mode,
                given: names.len(),
                max: slots,
            });
        }
        let difficulty = if mode.uses_ai() {
            Some(difficulty.ok_or(ConfigError::MissingDifficulty(mode))?)
        } else {
            if difficulty.is_some() {
                tracing::debug!(%mode, "difficulty ignored for a match without AI");
            }
            None
        };

        let names = (0..slots)
            .map(|slot| {
                let given = names.get(slot).map(|name| name.as_ref().trim()).unwrap_or("");
                if given.is_empty() {
                    DEFAULT_PLAYER_NAMES[slot].to_string()
                } else {
                    given.chars().take(MAX_NAME_LEN).collect()
                }
            })
            .collect();

        Ok(Self {
            mode,
            difficulty,
            names,
        })
    }

    /// String-level entry point used by presentation layers.
    pub fn parse<S: AsRef<str>>(
        mode: &str,
        difficulty: Option<&str>,
        names: &[S],
    ) -> Result<Self, ConfigError> {
        let mode: GameMode = mode.parse()?;
        let difficulty = difficulty.map(str::parse::<Difficulty>).transpose()?;
        Self::new(mode, difficulty, names)
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Display name for the agent in `slot`, AI slots included.
    pub fn agent_name(&self, slot: usize) -> &str {
        if let Some(name) = self.names.get(slot) {
            return name;
        }
        match slot {
            1 => PRIMARY_AI_NAME,
            _ => SECONDARY_AI_NAME,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::TwoPlayer,
            difficulty: None,
            names: DEFAULT_PLAYER_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}
