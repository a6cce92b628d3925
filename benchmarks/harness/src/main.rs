//! sortscope-bench-harness
//!
//! Sweep step counts over algorithms and input sizes, and append CSV rows into
//! `benchmarks/reports/steps-<unix>.csv`. This is the data side of a
//! steps-vs-length plot; plotting is left to whatever reads the CSV.
//!
//! Usage examples:
//!   cargo run -p sortscope-bench-harness -- --profile benchmarks/configs/profiles/small.toml
//!   cargo run -p sortscope-bench-harness -- --profile benchmarks/configs/profiles/medium.toml --seed 3

mod generator;

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::Deserialize;
use sortscope_algos::{count_steps, Algorithm};
use tracing::{debug, info};

use crate::generator::DataGen;

#[derive(Debug, Deserialize)]
struct Profile {
    /// Input lengths to sweep
    sizes: Vec<usize>,
    /// Algorithms to measure (`selection`, `merge`, `quick`)
    algorithms: Vec<Algorithm>,
    /// Random inputs per (algorithm, size)
    repeats: u32,
    /// RNG seed; each algorithm sees the same inputs
    seed: u64,
    /// Smallest generated value (default: i64::MIN)
    min_value: Option<i64>,
    /// Largest generated value (default: i64::MAX)
    max_value: Option<i64>,
}

fn parse_flag(name: &str, default: &str) -> String {
    let mut it = std::env::args().skip(1);
    while let Some(k) = it.next() {
        if k == format!("--{name}") {
            return it.next().unwrap_or_else(|| default.to_string());
        }
    }
    default.to_string()
}

fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();

    let profile_path = PathBuf::from(parse_flag(
        "profile",
        "benchmarks/configs/profiles/small.toml",
    ));
    let profile_src = fs::read_to_string(&profile_path)
        .with_context(|| format!("read profile {}", profile_path.display()))?;
    let mut profile: Profile = toml::from_str(&profile_src).context("parse profile toml")?;
    let seed_flag = parse_flag("seed", "");
    if !seed_flag.is_empty() {
        profile.seed = seed_flag
            .parse()
            .with_context(|| format!("--seed {seed_flag}"))?;
    }
    info!(
        sizes = profile.sizes.len(),
        algorithms = profile.algorithms.len(),
        repeats = profile.repeats,
        seed = profile.seed,
        "profile loaded"
    );

    fs::create_dir_all("benchmarks/reports").context("create benchmarks/reports")?;

    let ts = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?
        .as_secs();
    let csv_path = PathBuf::from(format!("benchmarks/reports/steps-{ts}.csv"));
    let mut csv = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&csv_path)
        .with_context(|| format!("open {}", csv_path.display()))?;
    writeln!(csv, "algorithm,size,repeat,steps")?;

    let min = profile.min_value.unwrap_or(i64::MIN);
    let max = profile.max_value.unwrap_or(i64::MAX);

    for &algo in &profile.algorithms {
        // Reseed per algorithm so every algorithm sorts identical inputs.
        let mut data_gen = DataGen::new(profile.seed, min, max)?;
        for &size in &profile.sizes {
            let mut total = 0u64;
            for rep in 0..profile.repeats {
                let mut data = data_gen.sample(size);
                let steps = count_steps(algo, &mut data)
                    .with_context(|| format!("{algo} on {size} elements (repeat {rep})"))?;
                writeln!(csv, "{},{size},{rep},{steps}", algo.name())?;
                total += steps;
            }
            debug!(algorithm = algo.name(), size, total, "size done");
        }
        info!(algorithm = algo.name(), "sweep finished");
    }

    println!("Wrote report → {}", csv_path.display());
    Ok(())
}
