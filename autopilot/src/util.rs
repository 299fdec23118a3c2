use anyhow::{anyhow, Context, Result};
use std::fmt::Display;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A run seed as typed on the command line: decimal, or hex behind `0x`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed(pub u32);

impl FromStr for Seed {
    type Err = String;

    fn from_str(input: &str) -> std::result::Result<Self, Self::Err> {
        let raw = input.trim();
        let (digits, radix, kind) = match raw.get(..2) {
            Some("0x" | "0X") => (&raw[2..], 16, "hex"),
            _ => (raw, 10, "decimal"),
        };
        if digits.is_empty() {
            return Err(format!("empty seed '{input}'"));
        }
        u32::from_str_radix(digits, radix)
            .map(Seed)
            .map_err(|err| format!("invalid {kind} seed '{raw}': {err}"))
    }
}

pub fn parse_seed(seed: &str) -> Result<u32> {
    seed.parse::<Seed>().map(|seed| seed.0).map_err(|err| anyhow!(err))
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

/// Parses a comma-separated list, skipping blank entries. `what` names the flag in errors.
pub fn parse_csv<T>(input: &str, what: &str) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let mut values = Vec::new();
    for token in input.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }
        let value = token
            .parse::<T>()
            .map_err(|err| anyhow!("invalid {what} '{token}': {err}"))?;
        values.push(value);
    }
    if values.is_empty() {
        return Err(anyhow!("no {what} parsed from '{input}'"));
    }
    Ok(values)
}

pub fn parse_seed_csv(input: &str) -> Result<Vec<u32>> {
    let seeds: Vec<Seed> = parse_csv(input, "seed")?;
    Ok(seeds.into_iter().map(|seed| seed.0).collect())
}

/// Seeds separated by commas or whitespace; `#` starts a comment that runs to the end of the line.
pub fn parse_seed_file(path: &Path) -> Result<Vec<u32>> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed reading seed file {}", path.display()))?;
    let mut seeds = Vec::new();
    for (line_no, line) in data.lines().enumerate() {
        let content = line.split('#').next().unwrap_or_default();
        let tokens = content
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());
        for token in tokens {
            let seed: Seed = token
                .parse()
                .map_err(|err| anyhow!("{}:{}: {err}", path.display(), line_no + 1))?;
            seeds.push(seed.0);
        }
    }
    if seeds.is_empty() {
        return Err(anyhow!("seed file {} had no seeds", path.display()));
    }
    Ok(seeds)
}

/// `count` seeds from an LCG walk starting at `start`.
pub fn seed_sequence(start: u32, count: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(count as usize);
    let mut cur = start;
    for _ in 0..count {
        out.push(cur);
        cur = cur.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }
    out
}

pub fn timestamp_suffix() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("{now}")
}
