//! Producer side of the suspend/resume contract.
//!
//! An [`EffectSource`] is a resumable state machine that yields one [`Effect`]
//! per call. It never owns or borrows the sequence between calls: each call
//! receives a fresh read-only view that already reflects every effect the
//! interpreter applied so far. Mutation stays with the interpreter.
//!
//! ## Contracts implementors should uphold
//! - Return `Ok(None)` once the run is complete, and keep returning it
//!   (fused, non-restartable).
//! - Only emit indices valid for `view.len()` at the moment of emission.
//! - Report internal invariant violations as `Err` rather than panicking.

use crate::Effect;
use anyhow::Result;
use std::fmt::Debug;

/// Element bound for instrumented sorts: totally ordered, cloneable (for `set`
/// payloads and snapshots) and printable (for captions and traces).
pub trait Element: Ord + Clone + Debug {}

impl<T: Ord + Clone + Debug> Element for T {}

/// Lazy, resumable producer of effects over a live sequence view.
pub trait EffectSource<T> {
    /// Produce the next effect, reading the current sequence contents from `view`.
    ///
    /// # Errors
    /// Returns an error if the producer detects an internal invariant violation
    /// (for example bounds exceeding the view, or an incomplete merge).
    fn next_effect(&mut self, view: &[T]) -> Result<Option<Effect<T>>>;
}

impl<T, S: EffectSource<T> + ?Sized> EffectSource<T> for &mut S {
    #[inline]
    fn next_effect(&mut self, view: &[T]) -> Result<Option<Effect<T>>> {
        (**self).next_effect(view)
    }
}

impl<T, S: EffectSource<T> + ?Sized> EffectSource<T> for Box<S> {
    #[inline]
    fn next_effect(&mut self, view: &[T]) -> Result<Option<Effect<T>>> {
        (**self).next_effect(view)
    }
}

/// Fixed script of effects, replayed in order regardless of the view.
///
/// Useful for driving the interpreter with a recorded trace or a hand-written
/// sequence in tests.
#[derive(Clone, Debug)]
pub struct Scripted<T> {
    effects: std::vec::IntoIter<Effect<T>>,
}

impl<T> Scripted<T> {
    /// Wrap a list of effects.
    #[must_use]
    pub fn new(effects: Vec<Effect<T>>) -> Self {
        Self {
            effects: effects.into_iter(),
        }
    }
}

impl<T> EffectSource<T> for Scripted<T> {
    fn next_effect(&mut self, _view: &[T]) -> Result<Option<Effect<T>>> {
        Ok(self.effects.next())
    }
}
