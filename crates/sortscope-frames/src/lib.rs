//! `sortscope-frames`: turn a sort's effect trace into animation frames.
//!
//! - [`expand`]: raw trace → frames (`Init`, one `Step` per effect, swaps
//!   bracketed by `PreSwap`/`PostSwap`)
//! - [`VisualState`]: per-entity decorations plus a slot table, advanced one
//!   frame at a time
//! - [`FrameSequence`]: eager synthesis with checkpoints so any frame can be
//!   rendered directly
//! - [`BarFrames`]: plain value snapshots, one per effect, for bar charts
//!
//! `merge` and `set` effects have no visual rule in the circle renderer, so
//! synthesizing a merge sort fails with [`FrameError::Unsupported`]; bar
//! frames cover every algorithm.
//!
//! ```
//! use sortscope_algos::Algorithm;
//! use sortscope_frames::FrameSequence;
//!
//! let frames = FrameSequence::build(&[3, 1, 2], Algorithm::Quick)?;
//! let last = frames.render(frames.frame_count() - 1)?;
//! let labels: Vec<_> = last
//!     .slots()
//!     .iter()
//!     .map(|&id| last.entity(id).map(|e| e.label.clone()))
//!     .collect::<Option<_>>()
//!     .unwrap_or_default();
//! assert_eq!(labels, ["1", "2", "3"]);
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
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

mod bars;
mod error;
mod frame;
mod synth;
mod visual;

pub use bars::{build_bars, BarFrame, BarFrames};
pub use error::FrameError;
pub use frame::{expand, expanded_len, Frame};
pub use synth::{build, frame_count, render, FrameSequence, SynthConfig};
pub use visual::{Entity, EntityId, VisualState};
