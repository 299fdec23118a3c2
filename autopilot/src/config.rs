use std::env;

use lightcycle_core::constants::TICK_RATE_HZ;

pub const MAX_TICKS_ENV: &str = "LIGHTCYCLE_MAX_TICKS";
pub const TICK_RATE_ENV: &str = "LIGHTCYCLE_TICK_RATE";
pub const BENCH_JOBS_ENV: &str = "LIGHTCYCLE_BENCH_JOBS";

/// Ceiling on ticks per match. A match on the 80x60 grid always ends well before this.
pub const DEFAULT_MAX_TICKS: u32 = 5_000;

/// Run limits shared by `play` and `benchmark`. CLI flags override these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunPolicy {
    pub max_ticks: u32,
    pub tick_rate: u32,
    pub bench_jobs: Option<usize>,
}

impl Default for RunPolicy {
    fn default() -> Self {
        Self {
            max_ticks: DEFAULT_MAX_TICKS,
            tick_rate: TICK_RATE_HZ,
            bench_jobs: None,
        }
    }
}

impl RunPolicy {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            max_ticks: read_env_u32(&lookup, MAX_TICKS_ENV, defaults.max_ticks),
            tick_rate: read_env_u32(&lookup, TICK_RATE_ENV, defaults.tick_rate),
            bench_jobs: read_env_optional_usize(&lookup, BENCH_JOBS_ENV),
        }
    }
}

fn read_env_u32(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u32) -> u32 {
    let Some(raw) = lookup(name) else {
        return default;
    };
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => value,
        _ => {
            tracing::warn!(name, value = %raw, default, "ignoring invalid env value");
            default
        }
    }
}

fn read_env_optional_usize(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<usize> {
    let raw = lookup(name)?;
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            tracing::warn!(name, value = %raw, "ignoring invalid env value");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn policy(vars: &[(&str, &str)]) -> RunPolicy {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RunPolicy::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_without_env() {
        assert_eq!(policy(&[]), RunPolicy::default());
        assert_eq!(RunPolicy::default().tick_rate, 10);
    }

    #[test]
    fn reads_valid_values() {
        let policy = policy(&[
            (MAX_TICKS_ENV, "800"),
            (TICK_RATE_ENV, " 20 "),
            (BENCH_JOBS_ENV, "3"),
        ]);
        assert_eq!(policy.max_ticks, 800);
        assert_eq!(policy.tick_rate, 20);
        assert_eq!(policy.bench_jobs, Some(3));
    }

    #[test]
    fn invalid_values_fall_back() {
        let policy = policy(&[
            (MAX_TICKS_ENV, "lots"),
            (TICK_RATE_ENV, "0"),
            (BENCH_JOBS_ENV, "-2"),
        ]);
        assert_eq!(policy, RunPolicy::default());
    }
}
