use crate::pilots::{create_pilot, pilot_ids, Pilot};
use anyhow::{anyhow, Context, Result};
use lightcycle_core::{
    Difficulty, DirectionalIntent, GameMode, Match, MatchConfig, MatchStatus, WorldSnapshot,
};
use serde::Serialize;

/// Mixed into the seed of the second pilot so both human slots don't mirror each other.
const OPPONENT_SEED_SALT: u32 = 0x9E37_79B9;

#[derive(Clone, Debug)]
pub struct RunSpec {
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub pilot: String,
    /// Pilot for the second human slot in two-player matches; defaults to `pilot`.
    pub opponent: Option<String>,
    pub names: Vec<String>,
    pub seed: u32,
    pub max_ticks: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PilotOutcome {
    Win,
    Loss,
    Draw,
    Unfinished,
}

impl PilotOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Draw => "draw",
            Self::Unfinished => "unfinished",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub pilot: String,
    pub opponent: Option<String>,
    pub seed: u32,
    pub max_ticks: u32,
    pub ticks: u32,
    pub status: MatchStatus,
    pub winners: Vec<usize>,
    pub winner_names: Vec<String>,
    /// Result from the point of view of agent 0.
    pub outcome: PilotOutcome,
    pub trail_lengths: Vec<usize>,
    pub turns_issued: u32,
}

#[derive(Clone, Debug)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    pub snapshot: WorldSnapshot,
}

pub fn run_match(spec: &RunSpec) -> Result<RunArtifact> {
    run_match_observed(spec, |_| Ok(()))
}

/// Like [`run_match`], calling `observe` after every tick.
pub fn run_match_observed(
    spec: &RunSpec,
    mut observe: impl FnMut(&Match) -> Result<()>,
) -> Result<RunArtifact> {
    if spec.max_ticks == 0 {
        return Err(anyhow!("max_ticks must be > 0"));
    }

    let config = MatchConfig::new(spec.mode, spec.difficulty, spec.names.as_slice())
        .context("invalid match configuration")?;
    let mut pilots = build_pilots(spec)?;
    for (slot, pilot) in pilots.iter_mut().enumerate() {
        let salt = if slot == 0 { 0 } else { OPPONENT_SEED_SALT };
        pilot.reset(spec.seed ^ salt);
    }

    let mut game = Match::new(config);
    game.validate().context("initial invariant failure")?;

    let mut turns_issued = 0u32;
    while !game.is_over() && game.tick_count() < spec.max_ticks {
        for (slot, pilot) in pilots.iter_mut().enumerate() {
            let Some(heading) = pilot.next_heading(&game, slot) else {
                continue;
            };
            if game.submit_intent(DirectionalIntent::new(slot, heading)) {
                turns_issued += 1;
            }
        }
        game.tick();
        game.validate().with_context(|| {
            format!(
                "pilot={} mode={} seed={:#010x}",
                spec.pilot, spec.mode, spec.seed
            )
        })?;
        observe(&game)?;
    }

    let snapshot = game.snapshot();
    let outcome = match snapshot.status {
        MatchStatus::Running => PilotOutcome::Unfinished,
        MatchStatus::Over if snapshot.winners.contains(&0) => PilotOutcome::Win,
        MatchStatus::Over if snapshot.winners.is_empty() => PilotOutcome::Draw,
        MatchStatus::Over => PilotOutcome::Loss,
    };
    tracing::debug!(
        pilot = %spec.pilot,
        mode = %spec.mode,
        seed = spec.seed,
        ticks = snapshot.tick,
        outcome = outcome.as_str(),
        "run finished"
    );

    Ok(RunArtifact {
        metrics: RunMetrics {
            mode: spec.mode,
            difficulty: snapshot.difficulty,
            pilot: spec.pilot.clone(),
            opponent: (spec.mode == GameMode::TwoPlayer)
                .then(|| spec.opponent.clone().unwrap_or_else(|| spec.pilot.clone())),
            seed: spec.seed,
            max_ticks: spec.max_ticks,
            ticks: snapshot.tick,
            status: snapshot.status,
            winners: snapshot.winners.clone(),
            winner_names: snapshot
                .winner_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            outcome,
            trail_lengths: snapshot.agents.iter().map(|a| a.trail.len()).collect(),
            turns_issued,
        },
        snapshot,
    })
}

fn build_pilots(spec: &RunSpec) -> Result<Vec<Box<dyn Pilot>>> {
    let mut ids = vec![spec.pilot.as_str()];
    match (spec.mode.human_slots(), spec.opponent.as_deref()) {
        (2, opponent) => ids.push(opponent.unwrap_or(spec.pilot.as_str())),
        (_, Some(opponent)) => {
            tracing::warn!(opponent, mode = %spec.mode, "opponent pilot ignored in AI mode");
        }
        (_, None) => {}
    }

    ids.into_iter()
        .map(|id| {
            create_pilot(id).ok_or_else(|| {
                let available = pilot_ids().join(", ");
                anyhow!("unknown pilot '{id}'. available: {available}")
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(mode: GameMode, difficulty: Option<Difficulty>, pilot: &str) -> RunSpec {
        RunSpec {
            mode,
            difficulty,
            pilot: pilot.to_string(),
            opponent: None,
            names: Vec::new(),
            seed: 0xDEAD_BEEF,
            max_ticks: 5_000,
        }
    }

    #[test]
    fn idle_mirror_match_is_a_draw_at_tick_thirty_one() -> Result<()> {
        let artifact = run_match(&spec(GameMode::TwoPlayer, None, "idle"))?;
        assert_eq!(artifact.metrics.ticks, 31);
        assert_eq!(artifact.metrics.outcome, PilotOutcome::Draw);
        assert_eq!(artifact.metrics.trail_lengths, vec![32, 32]);
        assert_eq!(artifact.metrics.turns_issued, 0);
        assert_eq!(artifact.metrics.opponent.as_deref(), Some("idle"));
        Ok(())
    }

    #[test]
    fn max_ticks_stops_early() -> Result<()> {
        let mut spec = spec(GameMode::TwoPlayer, None, "idle");
        spec.max_ticks = 10;
        let artifact = run_match(&spec)?;
        assert_eq!(artifact.metrics.ticks, 10);
        assert_eq!(artifact.metrics.outcome, PilotOutcome::Unfinished);
        Ok(())
    }

    #[test]
    fn rejects_unknown_pilot_and_zero_ticks() {
        let err = run_match(&spec(GameMode::TwoPlayer, None, "ghost")).unwrap_err();
        assert!(err.to_string().contains("unknown pilot 'ghost'"));

        let mut zero = spec(GameMode::TwoPlayer, None, "idle");
        zero.max_ticks = 0;
        assert!(run_match(&zero).is_err());
    }

    #[test]
    fn ai_mode_without_difficulty_is_an_error() {
        let err = run_match(&spec(GameMode::SingleAi, None, "idle")).unwrap_err();
        assert!(format!("{err:#}").contains("needs a difficulty"));
    }

    #[test]
    fn observer_sees_every_tick() -> Result<()> {
        let mut seen = Vec::new();
        let artifact = run_match_observed(&spec(GameMode::TwoPlayer, None, "idle"), |game| {
            seen.push(game.tick_count());
            Ok(())
        })?;
        assert_eq!(seen.len() as u32, artifact.metrics.ticks);
        assert_eq!(seen.first(), Some(&1));
        Ok(())
    }
}
