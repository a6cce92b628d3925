//! Eager frame synthesis with checkpointed random access.
//!
//! `build` records a full trace on a private copy of the input, expands it,
//! and walks the visual state machine over every frame once. That pass is
//! where unsupported effect kinds surface. Every `checkpoint_every` frames the
//! state is stored, so `render(i)` clones the nearest checkpoint at or before
//! `i` and replays at most `checkpoint_every - 1` frames.

use crate::{expand, Frame, FrameError, VisualState};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sortscope_algos::Algorithm;
use sortscope_core::{Element, Trace};
use tracing::debug;

/// Synthesizer knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Store a rendered state every this many frames (must be > 0).
    pub checkpoint_every: usize,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            checkpoint_every: 64,
        }
    }
}

/// Expanded, directly indexable animation of one sort.
#[derive(Clone, Debug)]
pub struct FrameSequence<T> {
    trace: Trace<T>,
    frames: Vec<Frame<T>>,
    /// `checkpoints[k]` is the state after frame `k * every`.
    checkpoints: Vec<VisualState>,
    every: usize,
}

impl<T: Element> FrameSequence<T> {
    /// Sort a private copy of `data` with `algo` and synthesize its frames.
    pub fn build(data: &[T], algo: Algorithm) -> Result<Self> {
        Self::build_with(data, algo, SynthConfig::default())
    }

    /// [`FrameSequence::build`] with explicit configuration.
    pub fn build_with(data: &[T], algo: Algorithm, cfg: SynthConfig) -> Result<Self> {
        let mut scratch = data.to_vec();
        let trace = sortscope_algos::record(algo, &mut scratch)
            .with_context(|| format!("record {algo} trace over {} elements", data.len()))?;
        let seq = Self::from_trace(data, trace, cfg)?;
        debug!(
            algorithm = algo.name(),
            effects = seq.trace.len(),
            frames = seq.frames.len(),
            "frames synthesized"
        );
        Ok(seq)
    }
}

impl<T: Clone> FrameSequence<T> {
    /// Synthesize frames for an existing trace recorded over `initial`.
    pub fn from_trace(initial: &[T], trace: Trace<T>, cfg: SynthConfig) -> Result<Self, FrameError>
    where
        T: std::fmt::Debug,
    {
        if cfg.checkpoint_every == 0 {
            return Err(FrameError::ZeroCheckpointInterval);
        }
        let every = cfg.checkpoint_every;
        let frames = expand(&trace);

        let mut state = VisualState::from_values(initial);
        let mut checkpoints = Vec::with_capacity(frames.len() / every + 1);
        for (index, frame) in frames.iter().enumerate() {
            state.apply(index, frame)?;
            if index % every == 0 {
                checkpoints.push(state.clone());
            }
        }

        Ok(Self {
            trace,
            frames,
            checkpoints,
            every,
        })
    }

    /// State after frame `index`. Pure; any order, any number of times.
    pub fn render(&self, index: usize) -> Result<VisualState, FrameError> {
        let len = self.frames.len();
        if index >= len {
            return Err(FrameError::IndexOutOfRange { index, len });
        }
        let k = index / self.every;
        let mut state = self
            .checkpoints
            .get(k)
            .cloned()
            .ok_or(FrameError::IndexOutOfRange { index, len })?;
        for at in k * self.every + 1..=index {
            state.apply(at, &self.frames[at])?;
        }
        Ok(state)
    }

    /// Every state in frame order, walking forward once.
    pub fn states(&self) -> impl Iterator<Item = Result<VisualState, FrameError>> + '_ {
        let mut state = self.checkpoints.first().cloned();
        self.frames.iter().enumerate().map(move |(index, frame)| {
            let current = state
                .as_mut()
                .ok_or(FrameError::IndexOutOfRange { index, len: 0 })?;
            if index > 0 {
                current.apply(index, frame)?;
            }
            Ok(current.clone())
        })
    }

    /// Total frames, including the leading `Init`.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The expanded frames.
    #[must_use]
    pub fn frames(&self) -> &[Frame<T>] {
        &self.frames
    }

    /// The raw trace the frames were expanded from.
    #[must_use]
    pub const fn trace(&self) -> &Trace<T> {
        &self.trace
    }
}

/// Free-function form of [`FrameSequence::build`].
pub fn build<T: Element>(data: &[T], algo: Algorithm) -> Result<FrameSequence<T>> {
    FrameSequence::build(data, algo)
}

/// Free-function form of [`FrameSequence::render`].
pub fn render<T: Clone>(frames: &FrameSequence<T>, index: usize) -> Result<VisualState, FrameError> {
    frames.render(index)
}

/// Free-function form of [`FrameSequence::frame_count`].
#[must_use]
pub fn frame_count<T: Clone>(frames: &FrameSequence<T>) -> usize {
    frames.frame_count()
}
