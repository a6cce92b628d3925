// crates/sortscope-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sortscope_algos::{count_steps, print_effects, record, Algorithm};
use sortscope_frames::{BarFrames, FrameSequence, SynthConfig};
use std::io::{self, BufWriter, Write};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "sortscope",
    about = "Instrumented sorting CLI",
    long_about = "Instrumented sorting CLI.\n\nRun selection sort, merge sort or quicksort over a list of integers and inspect every comparison, exchange and marker they emit, or the animation frames synthesized from them.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Sort the values and print the result
    Sort(Input),

    /// Print every effect the sort emits, then the result
    Trace {
        #[command(flatten)]
        input: Input,

        /// Emit one JSON object per effect instead of text lines
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the number of steps (cmp + swap + set)
    Count(Input),

    /// Synthesize animation frames and print rendered states as JSON lines
    Frames {
        #[command(flatten)]
        input: Input,

        /// Render only this frame (0-based)
        #[arg(long)]
        index: Option<usize>,

        /// Store a checkpoint every N frames (>0)
        #[arg(long, default_value_t = 64, value_parser = clap::value_parser!(u32).range(1..))]
        checkpoint_every: u32,

        /// Emit value snapshots (one per effect) instead of circle states; works for every algorithm
        #[arg(long, default_value_t = false)]
        bars: bool,
    },
}

#[derive(Args, Debug)]
struct Input {
    /// Sorting algorithm
    #[arg(long, value_enum, default_value_t = AlgoOpt::Quick)]
    algo: AlgoOpt,

    /// Values to sort
    #[arg(allow_negative_numbers = true)]
    values: Vec<i64>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum AlgoOpt {
    /// Selection sort
    Selection,
    /// Top-down merge sort
    Merge,
    /// Hoare-partition quicksort
    Quick,
}

impl From<AlgoOpt> for Algorithm {
    fn from(opt: AlgoOpt) -> Self {
        match opt {
            AlgoOpt::Selection => Self::Selection,
            AlgoOpt::Merge => Self::Merge,
            AlgoOpt::Quick => Self::Quick,
        }
    }
}

#[derive(Serialize)]
struct FrameCount {
    algorithm: &'static str,
    frame_count: usize,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Sort(input) => sort(input),
        Cmd::Trace { input, json } => trace(input, json),
        Cmd::Count(input) => count(input),
        Cmd::Frames {
            input,
            index,
            bars: true,
            ..
        } => bar_frames(input, index),
        Cmd::Frames {
            input,
            index,
            checkpoint_every,
            bars: false,
        } => frames(input, index, checkpoint_every),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // stdout carries results; diagnostics go to stderr.
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn sort(input: Input) -> Result<()> {
    let algo = Algorithm::from(input.algo);
    let mut values = input.values;
    info!(algorithm = algo.name(), len = values.len(), "sorting");

    let summary = sortscope_algos::run(algo, &mut values, None)?;
    info!(effects = summary.effects, steps = summary.steps, "sorted");
    println!("{}", format_values(&values));
    Ok(())
}

fn trace(input: Input, json: bool) -> Result<()> {
    let algo = Algorithm::from(input.algo);
    let mut values = input.values;
    info!(algorithm = algo.name(), len = values.len(), json, "tracing");

    if json {
        let trace = record(algo, &mut values)?;
        let stdout = io::stdout();
        let mut w = BufWriter::new(stdout.lock());
        for effect in &trace {
            let line = serde_json::to_string(effect).context("serialize effect to JSON line")?;
            writeln!(w, "{line}")?;
        }
        w.flush()?;
    } else {
        print_effects(algo, &mut values)?;
    }

    println!("{}", format_values(&values));
    Ok(())
}

fn count(input: Input) -> Result<()> {
    let algo = Algorithm::from(input.algo);
    let mut values = input.values;
    let steps = count_steps(algo, &mut values)?;
    info!(algorithm = algo.name(), len = values.len(), steps, "counted");
    println!("{steps}");
    Ok(())
}

fn frames(input: Input, index: Option<usize>, checkpoint_every: u32) -> Result<()> {
    let algo = Algorithm::from(input.algo);
    let cfg = SynthConfig {
        checkpoint_every: checkpoint_every as usize,
    };
    let seq = FrameSequence::build_with(&input.values, algo, cfg)
        .with_context(|| format!("synthesizing {algo} frames"))?;
    info!(
        algorithm = algo.name(),
        effects = seq.trace().len(),
        frames = seq.frame_count(),
        "frames ready"
    );

    let stdout = io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    let header = FrameCount {
        algorithm: algo.name(),
        frame_count: seq.frame_count(),
    };
    writeln!(w, "{}", serde_json::to_string(&header)?)?;

    match index {
        Some(i) => {
            let state = seq.render(i)?;
            writeln!(w, "{}", serde_json::to_string(&state)?)?;
        }
        None => {
            for state in seq.states() {
                let line = serde_json::to_string(&state?).context("serialize frame state")?;
                writeln!(w, "{line}")?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

fn bar_frames(input: Input, index: Option<usize>) -> Result<()> {
    let algo = Algorithm::from(input.algo);
    let bars = BarFrames::build(&input.values, algo)
        .with_context(|| format!("synthesizing {algo} bar frames"))?;
    info!(
        algorithm = algo.name(),
        effects = bars.trace().len(),
        frames = bars.frame_count(),
        "bar frames ready"
    );

    let stdout = io::stdout();
    let mut w = BufWriter::new(stdout.lock());
    let header = FrameCount {
        algorithm: algo.name(),
        frame_count: bars.frame_count(),
    };
    writeln!(w, "{}", serde_json::to_string(&header)?)?;

    match index {
        Some(i) => {
            let frame = bars.frame(i)?;
            writeln!(w, "{}", serde_json::to_string(&frame)?)?;
        }
        None => {
            for frame in bars.iter() {
                let line = serde_json::to_string(&frame).context("serialize bar frame")?;
                writeln!(w, "{line}")?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

fn format_values(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
