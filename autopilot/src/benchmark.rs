use crate::pilots::pilot_ids;
use crate::runner::{run_match, PilotOutcome, RunMetrics, RunSpec};
use crate::util::seed_to_hex;
use anyhow::{anyhow, Context, Result};
use lightcycle_core::{Difficulty, GameMode};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub modes: Vec<GameMode>,
    pub difficulties: Vec<Difficulty>,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub max_ticks: u32,
    pub out_dir: PathBuf,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunRecord {
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub pilot: String,
    pub seed: u32,
    pub seed_hex: String,
    pub ticks: u32,
    pub outcome: PilotOutcome,
    pub winners: String,
    pub pilot_trail: usize,
    pub turns_issued: u32,
}

/// Results for one (mode, difficulty, pilot) cell of the matrix.
#[derive(Clone, Debug, Serialize)]
pub struct PilotAggregate {
    pub mode: GameMode,
    pub difficulty: Option<Difficulty>,
    pub pilot: String,
    pub runs: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
    pub unfinished: usize,
    pub win_rate: f64,
    pub avg_ticks: f64,
    pub max_ticks: u32,
    pub avg_turns: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct BenchmarkReport {
    pub generated_unix_s: u64,
    pub max_ticks: u32,
    pub jobs: Option<usize>,
    pub modes: Vec<GameMode>,
    pub difficulties: Vec<Difficulty>,
    pub pilots: Vec<String>,
    pub seeds: Vec<u32>,
    pub run_count: usize,
    pub rankings: Vec<PilotAggregate>,
    pub runs: Vec<RunRecord>,
}

pub fn resolve_pilots(input: Option<&str>) -> Result<Vec<String>> {
    match input {
        None => Ok(pilot_ids().iter().map(|id| (*id).to_string()).collect()),
        Some(raw) => {
            let pilots: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if pilots.is_empty() {
                return Err(anyhow!("--pilots resolved to empty list"));
            }
            Ok(pilots)
        }
    }
}

/// Expands the config into one run spec per matrix cell and seed. Two-player
/// matches have no difficulty, so they appear once per pilot and seed.
pub fn build_run_specs(config: &BenchmarkConfig) -> Vec<RunSpec> {
    let mut specs = Vec::new();
    for mode in &config.modes {
        let difficulties: Vec<Option<Difficulty>> = if mode.uses_ai() {
            config.difficulties.iter().copied().map(Some).collect()
        } else {
            vec![None]
        };
        for difficulty in difficulties {
            for pilot in &config.pilots {
                for seed in &config.seeds {
                    specs.push(RunSpec {
                        mode: *mode,
                        difficulty,
                        pilot: pilot.clone(),
                        opponent: None,
                        names: Vec::new(),
                        seed: *seed,
                        max_ticks: config.max_ticks,
                    });
                }
            }
        }
    }
    specs
}

pub fn run_benchmark(config: BenchmarkConfig) -> Result<BenchmarkReport> {
    if config.seeds.is_empty() {
        return Err(anyhow!("benchmark requires at least one seed"));
    }
    if config.pilots.is_empty() {
        return Err(anyhow!("benchmark requires at least one pilot"));
    }
    if config.modes.is_empty() {
        return Err(anyhow!("benchmark requires at least one mode"));
    }
    if config.modes.iter().any(|mode| mode.uses_ai()) && config.difficulties.is_empty() {
        return Err(anyhow!("AI modes require at least one difficulty"));
    }
    if config.jobs == Some(0) {
        return Err(anyhow!("benchmark --jobs must be >= 1 when provided"));
    }
    fs::create_dir_all(&config.out_dir)
        .with_context(|| format!("failed creating {}", config.out_dir.display()))?;

    let specs = build_run_specs(&config);
    tracing::info!(runs = specs.len(), jobs = ?config.jobs, "benchmark started");

    let run_one = |spec: &RunSpec| -> Result<RunMetrics> {
        let artifact = run_match(spec).with_context(|| {
            format!(
                "benchmark run failed for pilot={} mode={} seed={:#x}",
                spec.pilot, spec.mode, spec.seed
            )
        })?;
        Ok(artifact.metrics)
    };

    let run_results: Vec<Result<RunMetrics>> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs)
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| specs.par_iter().map(run_one).collect())
    } else {
        specs.par_iter().map(run_one).collect()
    };

    let mut runs = Vec::with_capacity(run_results.len());
    for result in run_results {
        runs.push(result?);
    }
    tracing::info!(runs = runs.len(), "benchmark runs complete");

    let rankings = aggregate(&runs);
    let run_records: Vec<RunRecord> = runs
        .iter()
        .map(|run| RunRecord {
            mode: run.mode,
            difficulty: run.difficulty,
            pilot: run.pilot.clone(),
            seed: run.seed,
            seed_hex: seed_to_hex(run.seed),
            ticks: run.ticks,
            outcome: run.outcome,
            winners: run.winner_names.join("|"),
            pilot_trail: run.trail_lengths.first().copied().unwrap_or_default(),
            turns_issued: run.turns_issued,
        })
        .collect();

    write_runs_csv(&config.out_dir.join("runs.csv"), &run_records)?;
    write_rankings_csv(&config.out_dir.join("rankings.csv"), &rankings)?;

    let report = BenchmarkReport {
        generated_unix_s: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
        max_ticks: config.max_ticks,
        jobs: config.jobs,
        modes: config.modes,
        difficulties: config.difficulties,
        pilots: config.pilots,
        seeds: config.seeds,
        run_count: run_records.len(),
        rankings,
        runs: run_records,
    };

    let report_path = config.out_dir.join("summary.json");
    fs::write(
        &report_path,
        serde_json::to_vec_pretty(&report).context("failed to serialize summary json")?,
    )
    .with_context(|| format!("failed writing {}", report_path.display()))?;
    tracing::info!(path = %report_path.display(), "benchmark report written");

    Ok(report)
}

fn aggregate(runs: &[RunMetrics]) -> Vec<PilotAggregate> {
    let mut grouped: BTreeMap<(&str, &str, &str), Vec<&RunMetrics>> = BTreeMap::new();
    for run in runs {
        grouped
            .entry((run.mode.as_str(), difficulty_label(run.difficulty), run.pilot.as_str()))
            .or_default()
            .push(run);
    }

    let mut rankings: Vec<PilotAggregate> = grouped
        .into_values()
        .map(|cell| {
            let runs = cell.len();
            let count = |outcome: PilotOutcome| cell.iter().filter(|r| r.outcome == outcome).count();
            let wins = count(PilotOutcome::Win);
            let sum_ticks: u64 = cell.iter().map(|r| u64::from(r.ticks)).sum();
            let sum_turns: u64 = cell.iter().map(|r| u64::from(r.turns_issued)).sum();
            PilotAggregate {
                mode: cell[0].mode,
                difficulty: cell[0].difficulty,
                pilot: cell[0].pilot.clone(),
                runs,
                wins,
                losses: count(PilotOutcome::Loss),
                draws: count(PilotOutcome::Draw),
                unfinished: count(PilotOutcome::Unfinished),
                win_rate: wins as f64 / runs as f64,
                avg_ticks: sum_ticks as f64 / runs as f64,
                max_ticks: cell.iter().map(|r| r.ticks).max().unwrap_or_default(),
                avg_turns: sum_turns as f64 / runs as f64,
            }
        })
        .collect();

    rankings.sort_by(|a, b| {
        b.win_rate
            .total_cmp(&a.win_rate)
            .then_with(|| b.avg_ticks.total_cmp(&a.avg_ticks))
            .then_with(|| a.pilot.cmp(&b.pilot))
    });
    rankings
}

fn difficulty_label(difficulty: Option<Difficulty>) -> &'static str {
    difficulty.map_or("-", Difficulty::as_str)
}

fn write_runs_csv(path: &Path, rows: &[RunRecord]) -> Result<()> {
    let mut csv =
        String::from("mode,difficulty,pilot,seed_hex,seed,ticks,outcome,winners,pilot_trail,turns_issued\n");
    for row in rows {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{}\n",
            row.mode,
            difficulty_label(row.difficulty),
            row.pilot,
            row.seed_hex,
            row.seed,
            row.ticks,
            row.outcome.as_str(),
            row.winners,
            row.pilot_trail,
            row.turns_issued
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}

fn write_rankings_csv(path: &Path, rows: &[PilotAggregate]) -> Result<()> {
    let mut csv = String::from(
        "rank,mode,difficulty,pilot,runs,wins,losses,draws,unfinished,win_rate,avg_ticks,max_ticks,avg_turns\n",
    );
    for (idx, row) in rows.iter().enumerate() {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{},{},{},{:.4},{:.2},{},{:.2}\n",
            idx + 1,
            row.mode,
            difficulty_label(row.difficulty),
            row.pilot,
            row.runs,
            row.wins,
            row.losses,
            row.draws,
            row.unfinished,
            row.win_rate,
            row.avg_ticks,
            row.max_ticks,
            row.avg_turns
        ));
    }
    fs::write(path, csv).with_context(|| format!("failed writing {}", path.display()))
}
