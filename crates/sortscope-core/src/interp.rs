//! Effect interpreter.
//!
//! - [`Interpreter`]: drives an [`EffectSource`] to exhaustion over a sequence
//! - [`apply`]: the structural-application rule shared with trace replay
//! - [`run`]: convenience entry point with the default [`RunConfig`]
//!
//! For each effect, in strict emission order, the interpreter:
//!   1. validates the effect's indices against the current length,
//!   2. notifies the observer (before any mutation),
//!   3. applies the effect if it is structural.
//!
//! There is no buffering or reordering; each effect is applied exactly once.
//! The producer is resumed only after all three steps finish, so it always
//! reads a view that reflects every earlier effect.

use crate::{Effect, EffectSource, Focus, Observer, Span};
use anyhow::{ensure, Context, Result};
use std::fmt::Debug;
use tracing::{debug, trace};

/// Optional knobs for the interpreter.
#[derive(Debug, Clone, Copy)]
pub struct RunConfig {
    /// If true, also validate indices carried by observational markers
    /// (`cmp`, `focus`, `compare`, `subdivide`, `merge`). Structural indices
    /// are always validated.
    pub check_markers: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            check_markers: true,
        }
    }
}

/// Totals for one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Effects emitted (every kind).
    pub effects: u64,
    /// Effects counted as steps (`cmp`, `swap`, `set`).
    pub steps: u64,
}

/// Fallible effect interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpreter {
    /// Configuration toggles for validation.
    pub cfg: RunConfig,
}

impl Interpreter {
    /// Construct an interpreter with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: RunConfig::default(),
        }
    }

    /// Construct an interpreter with an explicit configuration.
    #[must_use]
    pub const fn with_config(cfg: RunConfig) -> Self {
        Self { cfg }
    }

    /// Drive `source` to completion over `data`, notifying `observer` per effect.
    ///
    /// # Errors
    /// Returns an error if the producer fails, an effect addresses an index
    /// outside `data`, or the observer fails. The sequence is left in whatever
    /// state the effects applied so far produced.
    pub fn run<T, S>(
        &self,
        mut source: S,
        data: &mut [T],
        mut observer: Option<&mut dyn Observer<T>>,
    ) -> Result<RunSummary>
    where
        T: Clone + Debug,
        S: EffectSource<T>,
    {
        debug!(len = data.len(), observed = observer.is_some(), "run started");
        let mut summary = RunSummary::default();

        while let Some(effect) = source
            .next_effect(data)
            .with_context(|| format!("producer failed after {} effects", summary.effects))?
        {
            trace!(seq = summary.effects, %effect, "effect");
            self.check(&effect, data.len())
                .with_context(|| format!("effect #{}", summary.effects))?;

            if let Some(obs) = observer.as_deref_mut() {
                obs.observe(&effect)?;
            }

            apply_checked(&effect, data);

            summary.effects += 1;
            if effect.counts_as_step() {
                summary.steps += 1;
            }
        }

        debug!(effects = summary.effects, steps = summary.steps, "run finished");
        Ok(summary)
    }

    /// Validate every index an effect carries against `len`.
    ///
    /// # Errors
    /// Returns an error naming the effect and the sequence length.
    pub fn check<T: Debug>(&self, effect: &Effect<T>, len: usize) -> Result<()> {
        let in_range = |i: usize| i < len;
        let span_ok = |s: &Span| s.start <= s.end && s.end <= len;

        let ok = match effect {
            Effect::Swap { i, j } => in_range(*i) && in_range(*j),
            Effect::Set { i, .. } => in_range(*i),
            _ if !self.cfg.check_markers => true,
            Effect::Cmp { i, j } => in_range(*i) && in_range(*j),
            Effect::Focus { indices } => match *indices {
                Focus::Clear => true,
                Focus::One(i) => in_range(i),
                Focus::Pair(i, j) => in_range(i) && in_range(j),
            },
            Effect::Compare { pair } => pair.map_or(true, |(i, j)| in_range(i) && in_range(j)),
            Effect::Subdivide { span } => span_ok(span),
            Effect::Merge { left, right } => {
                span_ok(left) && span_ok(right) && left.end == right.start
            }
            Effect::Label { .. } => true,
        };
        ensure!(ok, "`{effect}` out of range for sequence of length {len}");
        Ok(())
    }
}

/// Apply one effect to `data`: `swap` exchanges, `set` overwrites, every other
/// kind leaves the sequence untouched.
///
/// # Errors
/// Returns an error if a structural effect addresses an index outside `data`.
pub fn apply<T: Clone + Debug>(effect: &Effect<T>, data: &mut [T]) -> Result<()> {
    Interpreter::with_config(RunConfig {
        check_markers: false,
    })
    .check(effect, data.len())?;
    apply_checked(effect, data);
    Ok(())
}

/// Apply an effect whose structural indices were already validated.
#[inline]
fn apply_checked<T: Clone>(effect: &Effect<T>, data: &mut [T]) {
    match effect {
        Effect::Swap { i, j } => data.swap(*i, *j),
        Effect::Set { i, value } => data[*i] = value.clone(),
        Effect::Cmp { .. }
        | Effect::Focus { .. }
        | Effect::Compare { .. }
        | Effect::Subdivide { .. }
        | Effect::Label { .. }
        | Effect::Merge { .. } => {}
    }
}

/// Run `source` over `data` with the default configuration.
///
/// # Errors
/// See [`Interpreter::run`].
pub fn run<T, S>(
    source: S,
    data: &mut [T],
    observer: Option<&mut dyn Observer<T>>,
) -> Result<RunSummary>
where
    T: Clone + Debug,
    S: EffectSource<T>,
{
    Interpreter::new().run(source, data, observer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scripted, StepCounter};

    #[test]
    fn applies_in_emission_order() {
        let script = Scripted::new(vec![
            Effect::Swap { i: 0, j: 1 },
            Effect::Set { i: 0, value: 10 },
            Effect::Swap { i: 0, j: 2 },
        ]);
        let mut data = vec![1, 2, 3];
        let summary = run(script, &mut data, None).unwrap();
        assert_eq!(data, vec![3, 1, 10]);
        assert_eq!(summary, RunSummary { effects: 3, steps: 3 });
    }

    #[test]
    fn observer_sees_pre_mutation_state() {
        // The observer cannot read `data` directly; it sees the effect before
        // application, which we check through a counter of structural effects.
        let mut counter = StepCounter::new();
        let script = Scripted::new(vec![
            Effect::label("start"),
            Effect::Cmp { i: 0, j: 1 },
            Effect::Swap { i: 0, j: 1 },
        ]);
        let mut data = vec![2, 1];
        let summary = run(script, &mut data, Some(&mut counter)).unwrap();
        assert_eq!(counter.steps(), 2);
        assert_eq!(summary.effects, 3);
        assert_eq!(data, vec![1, 2]);
    }

    #[test]
    fn out_of_range_swap_fails_fast() {
        let script = Scripted::new(vec![Effect::Swap { i: 0, j: 3 }, Effect::Swap { i: 0, j: 1 }]);
        let mut data = vec![1, 2];
        let err = run(script, &mut data, None).unwrap_err();
        assert!(format!("{err:#}").contains("out of range for sequence of length 2"));
        assert_eq!(data, vec![1, 2], "nothing applied after the failing effect");
    }

    #[test]
    fn marker_checks_can_be_disabled() {
        let effects = vec![Effect::<i32>::Subdivide { span: Span::new(0, 9) }];
        let mut data = vec![1, 2];
        assert!(run(Scripted::new(effects.clone()), &mut data, None).is_err());

        let lax = Interpreter::with_config(RunConfig {
            check_markers: false,
        });
        assert!(lax.run(Scripted::new(effects), &mut data, None).is_ok());
    }

    #[test]
    fn observer_error_propagates() {
        let mut failing = |e: &Effect<i32>| -> Result<()> {
            anyhow::ensure!(!e.is_structural(), "observer broke on {e}");
            Ok(())
        };
        let script = Scripted::new(vec![Effect::Cmp { i: 0, j: 1 }, Effect::Swap { i: 0, j: 1 }]);
        let mut data = vec![2, 1];
        let err = run(script, &mut data, Some(&mut failing)).unwrap_err();
        assert!(err.to_string().contains("observer broke on swap 0 1"));
        assert_eq!(data, vec![2, 1], "observer runs before the mutation");
    }
}
