//! Frame expansion.
//!
//! A trace of `T` effects containing `S` swaps expands to `1 + (T - S) + 3S`
//! frames: one leading [`Frame::Init`], one [`Frame::Step`] per non-swap effect,
//! and `PreSwap`, `Step(Swap)`, `PostSwap` per swap.

use serde::{Deserialize, Serialize};
use sortscope_core::{Effect, EffectKind, Trace};

/// One animation frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frame<T> {
    /// Initial layout.
    Init,
    /// Entities at slots `i` and `j` are about to exchange.
    PreSwap {
        /// First slot.
        i: usize,
        /// Second slot.
        j: usize,
    },
    /// A raw effect, including the swap itself.
    Step(Effect<T>),
    /// The exchange of slots `i` and `j` is complete.
    PostSwap {
        /// First slot.
        i: usize,
        /// Second slot.
        j: usize,
    },
}

impl<T> Frame<T> {
    /// The raw effect behind a `Step` frame.
    #[must_use]
    pub const fn effect(&self) -> Option<&Effect<T>> {
        match self {
            Self::Step(e) => Some(e),
            Self::Init | Self::PreSwap { .. } | Self::PostSwap { .. } => None,
        }
    }
}

/// Expand a trace into frames. Pure; every effect kind expands.
#[must_use]
pub fn expand<T: Clone>(trace: &Trace<T>) -> Vec<Frame<T>> {
    let mut frames = Vec::with_capacity(expanded_len(trace));
    frames.push(Frame::Init);
    for effect in trace {
        match *effect {
            Effect::Swap { i, j } => {
                frames.push(Frame::PreSwap { i, j });
                frames.push(Frame::Step(effect.clone()));
                frames.push(Frame::PostSwap { i, j });
            }
            _ => frames.push(Frame::Step(effect.clone())),
        }
    }
    frames
}

/// Number of frames [`expand`] produces for `trace`.
#[must_use]
pub fn expanded_len<T>(trace: &Trace<T>) -> usize {
    let swaps = trace.iter().filter(|e| e.kind() == EffectKind::Swap).count();
    1 + trace.len() + 2 * swaps
}
