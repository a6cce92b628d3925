//! Value-snapshot frames for bar-chart style animation.
//!
//! Unlike the circle renderer, bars only need the sequence contents after
//! each effect, so every effect kind is supported, merge sort's `set`s
//! included. Frame 0 is the input; frame `k` is the sequence after the
//! `k`-th effect. Markers leave the values unchanged and still get a frame.

use crate::FrameError;
use anyhow::{Context, Result};
use serde::Serialize;
use sortscope_algos::Algorithm;
use sortscope_core::{apply, Effect, Element, Trace};
use std::fmt::Debug;
use tracing::debug;

/// One value snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarFrame<T> {
    /// Frame index; 0 is the unsorted input.
    pub frame_index: usize,
    /// The effect that produced this frame; `None` for frame 0.
    pub effect: Option<Effect<T>>,
    /// Sequence contents after the effect.
    pub values: Vec<T>,
}

/// Every value snapshot of one sort, held eagerly.
#[derive(Debug, Clone)]
pub struct BarFrames<T> {
    trace: Trace<T>,
    snapshots: Vec<Vec<T>>,
}

impl<T: Element> BarFrames<T> {
    /// Sort a private copy of `data` with `algo` and snapshot it after every effect.
    pub fn build(data: &[T], algo: Algorithm) -> Result<Self> {
        let mut scratch = data.to_vec();
        let trace = sortscope_algos::record(algo, &mut scratch)
            .with_context(|| format!("record {algo} trace over {} elements", data.len()))?;
        let bars = Self::from_trace(data, trace)?;
        debug!(
            algorithm = algo.name(),
            effects = bars.trace.len(),
            frames = bars.snapshots.len(),
            "bar frames synthesized"
        );
        Ok(bars)
    }
}

impl<T: Clone + Debug> BarFrames<T> {
    /// Snapshot `initial` before and after each effect of `trace`.
    pub fn from_trace(initial: &[T], trace: Trace<T>) -> Result<Self> {
        let mut values = initial.to_vec();
        let mut snapshots = Vec::with_capacity(trace.len() + 1);
        snapshots.push(values.clone());
        for (n, effect) in trace.iter().enumerate() {
            apply(effect, &mut values).with_context(|| format!("bar frame {}", n + 1))?;
            snapshots.push(values.clone());
        }
        Ok(Self { trace, snapshots })
    }

    /// Frame `index`, with the effect that led to it.
    pub fn frame(&self, index: usize) -> Result<BarFrame<T>, FrameError> {
        let len = self.snapshots.len();
        let values = self
            .snapshots
            .get(index)
            .ok_or(FrameError::IndexOutOfRange { index, len })?;
        let effect = index
            .checked_sub(1)
            .and_then(|at| self.trace.effects().get(at))
            .cloned();
        Ok(BarFrame {
            frame_index: index,
            effect,
            values: values.clone(),
        })
    }

    /// Every frame in order.
    pub fn iter(&self) -> impl Iterator<Item = BarFrame<T>> + '_ {
        self.snapshots
            .iter()
            .enumerate()
            .map(move |(index, values)| BarFrame {
                frame_index: index,
                effect: index
                    .checked_sub(1)
                    .and_then(|at| self.trace.effects().get(at))
                    .cloned(),
                values: values.clone(),
            })
    }

    /// Values after frame `index`, borrowed.
    #[must_use]
    pub fn values(&self, index: usize) -> Option<&[T]> {
        self.snapshots.get(index).map(Vec::as_slice)
    }

    /// Total frames: effects plus the leading input snapshot.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.snapshots.len()
    }

    /// The raw trace the snapshots were taken from.
    #[must_use]
    pub const fn trace(&self) -> &Trace<T> {
        &self.trace
    }
}

/// Free-function form of [`BarFrames::build`].
pub fn build_bars<T: Element>(data: &[T], algo: Algorithm) -> Result<BarFrames<T>> {
    BarFrames::build(data, algo)
}
