use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use lightcycle_autopilot::benchmark::{resolve_pilots, run_benchmark, BenchmarkConfig};
use lightcycle_autopilot::config::RunPolicy;
use lightcycle_autopilot::pacing::TickPacer;
use lightcycle_autopilot::pilots::{create_pilot, describe_pilots, pilot_ids};
use lightcycle_autopilot::runner::{run_match, run_match_observed, RunArtifact, RunSpec};
use lightcycle_autopilot::util::{
    parse_csv, parse_seed, parse_seed_csv, parse_seed_file, seed_sequence, seed_to_hex,
    timestamp_suffix,
};
use lightcycle_core::{Difficulty, GameMode, TickClock};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

const DEFAULT_SEED_START: u32 = 0x7C0D_0001;

#[derive(Parser, Debug)]
#[command(name = "lightcycle-autopilot")]
#[command(about = "Headless driver for light-cycle matches: scripted pilots, single runs and benchmarks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available pilots
    ListPilots,
    /// Play a single match with pilots in the human slots
    Play {
        #[arg(long, default_value = "single_ai")]
        mode: String,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long, default_value = "hunter")]
        pilot: String,
        /// Pilot for the second human slot (two_player only)
        #[arg(long)]
        opponent: Option<String>,
        /// Display names for the human slots, comma separated
        #[arg(long)]
        names: Option<String>,
        #[arg(long, default_value = "0x7c0d0001")]
        seed: String,
        #[arg(long)]
        max_ticks: Option<u32>,
        /// Print the final world snapshot as JSON
        #[arg(long)]
        json: bool,
        /// Pace ticks at the configured tick rate and print every tick.
        /// Late ticks are caught up back to back, up to the clock's catch-up cap.
        #[arg(long)]
        realtime: bool,
    },
    /// Run a modes x difficulties x pilots x seeds matrix
    Benchmark {
        #[arg(long, default_value = "single_ai,dual_ai")]
        modes: String,
        #[arg(long, default_value = "easy,medium,hard,extreme")]
        difficulties: String,
        #[arg(long)]
        pilots: Option<String>,
        #[arg(long)]
        seeds: Option<String>,
        #[arg(long)]
        seed_file: Option<PathBuf>,
        #[arg(long)]
        seed_start: Option<String>,
        #[arg(long, default_value_t = 12)]
        seed_count: u32,
        #[arg(long)]
        max_ticks: Option<u32>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
        #[arg(long)]
        jobs: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let Cli { command } = Cli::parse();
    let policy = RunPolicy::from_env();

    match command {
        Commands::ListPilots => {
            for (id, description) in describe_pilots() {
                println!("{id:12} {description}");
            }
        }
        Commands::Play {
            mode,
            difficulty,
            pilot,
            opponent,
            names,
            seed,
            max_ticks,
            json,
            realtime,
        } => {
            for id in std::iter::once(&pilot).chain(opponent.as_ref()) {
                if create_pilot(id).is_none() {
                    let available = pilot_ids().join(", ");
                    return Err(anyhow!("unknown pilot '{id}'. available: {available}"));
                }
            }
            let mode: GameMode = mode.parse()?;
            let difficulty = match difficulty {
                Some(raw) => Some(raw.parse::<Difficulty>()?),
                None if mode.uses_ai() => Some(Difficulty::Medium),
                None => None,
            };
            let names = names
                .map(|raw| raw.split(',').map(|name| name.trim().to_string()).collect())
                .unwrap_or_default();

            let spec = RunSpec {
                mode,
                difficulty,
                pilot,
                opponent,
                names,
                seed: parse_seed(&seed)?,
                max_ticks: max_ticks.unwrap_or(policy.max_ticks),
            };

            let artifact = if realtime {
                play_realtime(&spec, policy.tick_rate)?
            } else {
                run_match(&spec)?
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&artifact.snapshot)?);
                return Ok(());
            }

            let metrics = &artifact.metrics;
            println!("mode={}", metrics.mode);
            println!(
                "difficulty={}",
                metrics.difficulty.map_or("none", Difficulty::as_str)
            );
            println!("pilot={}", metrics.pilot);
            if let Some(opponent) = &metrics.opponent {
                println!("opponent={opponent}");
            }
            println!("seed={}", seed_to_hex(metrics.seed));
            println!("ticks={}", metrics.ticks);
            println!("outcome={}", metrics.outcome.as_str());
            println!(
                "result={}",
                artifact
                    .snapshot
                    .outcome_text()
                    .unwrap_or_else(|| "still running".to_string())
            );
            println!("turns={}", metrics.turns_issued);
            println!(
                "trails={}",
                metrics
                    .trail_lengths
                    .iter()
                    .map(usize::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            );
        }
        Commands::Benchmark {
            modes,
            difficulties,
            pilots,
            seeds,
            seed_file,
            seed_start,
            seed_count,
            max_ticks,
            out_dir,
            jobs,
        } => {
            let modes: Vec<GameMode> = parse_csv(&modes, "mode")?;
            let difficulties: Vec<Difficulty> = parse_csv(&difficulties, "difficulty")?;
            let pilots = resolve_pilots(pilots.as_deref())?;
            for id in &pilots {
                if create_pilot(id).is_none() {
                    let available = pilot_ids().join(", ");
                    return Err(anyhow!("unknown pilot '{id}'. available: {available}"));
                }
            }
            let seeds = resolve_seeds(
                seeds.as_deref(),
                seed_file.as_deref(),
                seed_start.as_deref(),
                seed_count,
            )?;
            let out_dir = out_dir
                .unwrap_or_else(|| PathBuf::from(format!("benchmarks/run-{}", timestamp_suffix())));

            let report = run_benchmark(BenchmarkConfig {
                modes,
                difficulties,
                pilots,
                seeds,
                max_ticks: max_ticks.unwrap_or(policy.max_ticks),
                out_dir: out_dir.clone(),
                jobs: jobs.or(policy.bench_jobs),
            })?;

            println!("runs={}", report.run_count);
            println!(
                "jobs={}",
                report
                    .jobs
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".to_string())
            );
            println!("out_dir={}", out_dir.display());
            println!("top pilots:");
            for (idx, row) in report.rankings.iter().take(10).enumerate() {
                println!(
                    "  {}. {} {}/{}  win_rate={:.0}% draws={} avg_ticks={:.1} avg_turns={:.1}",
                    idx + 1,
                    row.pilot,
                    row.mode,
                    row.difficulty.map_or("-", Difficulty::as_str),
                    row.win_rate * 100.0,
                    row.draws,
                    row.avg_ticks,
                    row.avg_turns,
                );
            }
        }
    }

    Ok(())
}

fn play_realtime(spec: &RunSpec, tick_rate: u32) -> Result<RunArtifact> {
    let mut pacer = TickPacer::new(TickClock::new(tick_rate));
    let mut last = Instant::now();
    run_match_observed(spec, |game| {
        loop {
            let now = Instant::now();
            let wait = pacer.poll(now.duration_since(last));
            last = now;
            match wait {
                Some(wait) => thread::sleep(wait),
                None => break,
            }
        }

        let heads = game
            .agents()
            .iter()
            .map(|agent| {
                let head = agent.position();
                format!("{}@{},{}", agent.name(), head.x, head.y)
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!("tick={} {heads}", game.tick_count());
        Ok(())
    })
    .context("realtime play failed")
}

fn resolve_seeds(
    seeds: Option<&str>,
    seed_file: Option<&Path>,
    seed_start: Option<&str>,
    seed_count: u32,
) -> Result<Vec<u32>> {
    if let Some(path) = seed_file {
        return parse_seed_file(path);
    }
    if let Some(csv) = seeds {
        return parse_seed_csv(csv);
    }
    let start = match seed_start {
        Some(start) => parse_seed(start)?,
        None => DEFAULT_SEED_START,
    };
    Ok(seed_sequence(start, seed_count))
}
