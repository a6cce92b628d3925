//! Recorded effect traces.
//!
//! A [`Trace`] is the complete ordered list of effects from one run. It is an
//! in-memory value only; nothing here writes traces to storage.

use crate::{apply, Effect, KindCounts};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Complete ordered effect list of one algorithm run.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trace<T> {
    effects: Vec<Effect<T>>,
}

impl<T> Default for Trace<T> {
    fn default() -> Self {
        Self {
            effects: Vec::new(),
        }
    }
}

impl<T> Trace<T> {
    /// Number of effects.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.effects.len()
    }

    /// Whether the run emitted nothing.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Effects in emission order.
    #[inline]
    #[must_use]
    pub fn effects(&self) -> &[Effect<T>] {
        &self.effects
    }

    /// Iterate effects in emission order.
    pub fn iter(&self) -> std::slice::Iter<'_, Effect<T>> {
        self.effects.iter()
    }

    /// Per-kind tally of the trace.
    #[must_use]
    pub fn stats(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for e in &self.effects {
            counts.bump(e.kind());
        }
        counts
    }

    /// Take the effect list.
    #[must_use]
    pub fn into_effects(self) -> Vec<Effect<T>> {
        self.effects
    }
}

impl<T: Clone + Debug> Trace<T> {
    /// Re-apply every structural effect, in order, to `data`.
    ///
    /// Applied to a fresh copy of the original input, this reproduces the
    /// final sequence of the recorded run exactly.
    ///
    /// # Errors
    /// Returns an error if an effect addresses an index outside `data`.
    pub fn replay(&self, data: &mut [T]) -> Result<()> {
        for (n, e) in self.effects.iter().enumerate() {
            apply(e, data).with_context(|| format!("replay effect #{n}"))?;
        }
        Ok(())
    }
}

impl<T> From<Vec<Effect<T>>> for Trace<T> {
    fn from(effects: Vec<Effect<T>>) -> Self {
        Self { effects }
    }
}

impl<T> IntoIterator for Trace<T> {
    type Item = Effect<T>;
    type IntoIter = std::vec::IntoIter<Effect<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Trace<T> {
    type Item = &'a Effect<T>;
    type IntoIter = std::slice::Iter<'a, Effect<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.effects.iter()
    }
}
