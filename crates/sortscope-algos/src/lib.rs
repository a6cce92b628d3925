// crates/sortscope-algos/src/lib.rs

//! Instrumented sorting algorithms as resumable producers.
//!
//! Each algorithm is an [`EffectSource`]: it is resumed once per effect with a
//! fresh read-only view of the sequence and never touches the sequence
//! itself. The interpreter in `sortscope-core` applies what they emit.
//!
//! - [`SelectionSort`]: `cmp` per candidate, one `swap` per destination
//! - [`MergeSort`]: `subdivide` announcements, a `merge` marker, then `set`s
//! - [`QuickSort`]: Hoare partitioning with `label`/`focus`/`cmp` markers
//!
//! The free functions at the crate root run a producer to completion with
//! the observers the CLI and harness need.
//!
//! ```
//! use sortscope_algos::{count_steps, Algorithm};
//!
//! let mut data = vec![5, 11, 2, 3, 9];
//! let steps = count_steps(Algorithm::Selection, &mut data)?;
//! assert_eq!(data, vec![2, 3, 5, 9, 11]);
//! assert_eq!(steps, 14);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

mod merge;
mod quick;
mod selection;

pub use merge::MergeSort;
pub use quick::QuickSort;
pub use selection::SelectionSort;

use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};
use sortscope_core::{
    EffectSource, Element, Observer, Recorder, RunSummary, Span, StepCounter, Trace, Tracer,
};
use std::fmt;
use std::io::Write;
use std::str::FromStr;
use tracing::debug;

/// Resolve optional producer bounds against the sequence length.
pub(crate) fn resolve_bounds(bounds: Option<Span>, len: usize) -> Result<Span> {
    let span = bounds.unwrap_or(Span::new(0, len));
    ensure!(
        span.start <= span.end,
        "bounds {span} are reversed (start after end)"
    );
    ensure!(
        span.end <= len,
        "bounds {span} exceed sequence of length {len}"
    );
    Ok(span)
}

/// The instrumented algorithms, selectable by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// [`SelectionSort`].
    Selection,
    /// [`MergeSort`].
    Merge,
    /// [`QuickSort`].
    Quick,
}

impl Algorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [Self; 3] = [Self::Selection, Self::Merge, Self::Quick];

    /// Display name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Selection => "selection_sort",
            Self::Merge => "merge_sort",
            Self::Quick => "quicksort",
        }
    }

    /// A fresh producer over the whole sequence.
    #[must_use]
    pub fn source<'a, T: Element + 'a>(self) -> Box<dyn EffectSource<T> + 'a> {
        match self {
            Self::Selection => Box::new(SelectionSort::new()),
            Self::Merge => Box::new(MergeSort::new()),
            Self::Quick => Box::new(QuickSort::new()),
        }
    }

    /// A fresh producer restricted to `[span.start, span.end)`.
    #[must_use]
    pub fn source_in<'a, T: Element + 'a>(self, span: Span) -> Box<dyn EffectSource<T> + 'a> {
        match self {
            Self::Selection => Box::new(SelectionSort::new().with_bounds(span)),
            Self::Merge => Box::new(MergeSort::new().with_bounds(span)),
            Self::Quick => Box::new(QuickSort::new().with_bounds(span)),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selection" | "selection_sort" => Ok(Self::Selection),
            "merge" | "merge_sort" | "mergesort" => Ok(Self::Merge),
            "quick" | "quicksort" | "quick_sort" => Ok(Self::Quick),
            other => bail!("unknown algorithm `{other}` (expected selection, merge or quick)"),
        }
    }
}

/// Sort `data` in place with `algo`, notifying `observer` per effect.
pub fn run<T: Element>(
    algo: Algorithm,
    data: &mut [T],
    observer: Option<&mut dyn Observer<T>>,
) -> Result<RunSummary> {
    debug!(algorithm = algo.name(), len = data.len(), "sorting");
    sortscope_core::run(algo.source::<T>(), data, observer)
}

/// Sort `data` in place and return the number of steps (`cmp` + `swap` + `set`).
pub fn count_steps<T: Element>(algo: Algorithm, data: &mut [T]) -> Result<u64> {
    let mut counter = StepCounter::new();
    run(algo, data, Some(&mut counter))?;
    Ok(counter.steps())
}

/// Sort `data` in place, printing one line per effect to stdout.
pub fn print_effects<T: Element>(algo: Algorithm, data: &mut [T]) -> Result<RunSummary> {
    let stdout = std::io::stdout();
    let mut tracer = Tracer::new(stdout.lock());
    let summary = run(algo, data, Some(&mut tracer))?;
    drop(tracer.into_inner()?);
    Ok(summary)
}

/// Sort `data` in place, writing one line per effect to `out`; returns `out`.
pub fn print_effects_to<T: Element, W: Write>(
    algo: Algorithm,
    data: &mut [T],
    out: W,
) -> Result<W> {
    let mut tracer = Tracer::new(out);
    run(algo, data, Some(&mut tracer))?;
    tracer.into_inner()
}

/// Sort `data` in place and return the full effect trace.
pub fn record<T: Element>(algo: Algorithm, data: &mut [T]) -> Result<Trace<T>> {
    let mut recorder = Recorder::new();
    run(algo, data, Some(&mut recorder))?;
    Ok(recorder.into_trace())
}
