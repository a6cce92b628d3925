//! Observers: thin consumers notified once per effect by the interpreter.
//!
//! Observers see every effect *before* a structural effect is applied and never
//! mutate the sequence. An observer error aborts the run and propagates to the
//! caller of `run` unchanged.

use crate::{Effect, EffectKind, Trace};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::io::Write;

/// Consumer of an effect stream.
pub trait Observer<T> {
    /// Called once per effect, in emission order.
    ///
    /// # Errors
    /// Any error aborts the run and is returned to the caller of `run`.
    fn observe(&mut self, effect: &Effect<T>) -> Result<()>;
}

impl<T, F> Observer<T> for F
where
    F: FnMut(&Effect<T>) -> Result<()>,
{
    #[inline]
    fn observe(&mut self, effect: &Effect<T>) -> Result<()> {
        self(effect)
    }
}

/// Per-kind effect tally.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KindCounts {
    counts: [u64; EffectKind::COUNT],
}

impl KindCounts {
    /// Record one effect of `kind`.
    #[inline]
    pub fn bump(&mut self, kind: EffectKind) {
        self.counts[kind as usize] += 1;
    }

    /// Number of effects recorded for `kind`.
    #[inline]
    #[must_use]
    pub const fn get(&self, kind: EffectKind) -> u64 {
        self.counts[kind as usize]
    }

    /// Total effects across all kinds.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Effects that count as steps (`cmp` + `swap` + `set`).
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.get(EffectKind::Cmp) + self.get(EffectKind::Swap) + self.get(EffectKind::Set)
    }
}

/// Counts steps (`cmp`, `swap`, `set`) and tallies every kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepCounter {
    kinds: KindCounts,
}

impl StepCounter {
    /// Fresh counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Steps counted so far.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.kinds.steps()
    }

    /// Per-kind tally.
    #[must_use]
    pub const fn kinds(&self) -> &KindCounts {
        &self.kinds
    }
}

impl<T> Observer<T> for StepCounter {
    #[inline]
    fn observe(&mut self, effect: &Effect<T>) -> Result<()> {
        self.kinds.bump(effect.kind());
        Ok(())
    }
}

/// Writes one text line per effect (`swap 0 2`, `set 3 7`, ...).
#[derive(Debug)]
pub struct Tracer<W> {
    out: W,
    lines: u64,
}

impl<W: Write> Tracer<W> {
    /// Trace into `out`.
    pub const fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Lines written so far.
    #[must_use]
    pub const fn lines(&self) -> u64 {
        self.lines
    }

    /// Flush and return the inner writer.
    ///
    /// # Errors
    /// Returns an error if flushing fails.
    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush().context("flush trace writer")?;
        Ok(self.out)
    }
}

impl<T: Debug, W: Write> Observer<T> for Tracer<W> {
    fn observe(&mut self, effect: &Effect<T>) -> Result<()> {
        writeln!(self.out, "{effect}")
            .with_context(|| format!("write trace line {}", self.lines + 1))?;
        self.lines += 1;
        Ok(())
    }
}

/// Captures every effect into a [`Trace`].
#[derive(Clone, Debug)]
pub struct Recorder<T> {
    effects: Vec<Effect<T>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            effects: Vec::new(),
        }
    }
}

impl<T> Recorder<T> {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish recording.
    #[must_use]
    pub fn into_trace(self) -> Trace<T> {
        Trace::from(self.effects)
    }
}

impl<T: Clone> Observer<T> for Recorder<T> {
    #[inline]
    fn observe(&mut self, effect: &Effect<T>) -> Result<()> {
        self.effects.push(effect.clone());
        Ok(())
    }
}

/// Forwards each effect to `first`, then to `second`.
#[derive(Clone, Debug, Default)]
pub struct Tee<A, B> {
    /// Notified first.
    pub first: A,
    /// Notified second.
    pub second: B,
}

impl<A, B> Tee<A, B> {
    /// Pair two observers.
    pub const fn new(first: A, second: B) -> Self {
        Self { first, second }
    }

    /// Split back into the two observers.
    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<T, A: Observer<T>, B: Observer<T>> Observer<T> for Tee<A, B> {
    fn observe(&mut self, effect: &Effect<T>) -> Result<()> {
        self.first.observe(effect)?;
        self.second.observe(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Span;

    fn sample() -> Vec<Effect<i32>> {
        vec![
            Effect::Cmp { i: 0, j: 1 },
            Effect::Subdivide { span: Span::new(0, 2) },
            Effect::Swap { i: 0, j: 1 },
            Effect::Set { i: 1, value: 9 },
            Effect::label("done"),
        ]
    }

    #[test]
    fn counter_counts_only_steps() {
        let mut c = StepCounter::new();
        for e in &sample() {
            c.observe(e).unwrap();
        }
        assert_eq!(c.steps(), 3);
        assert_eq!(c.kinds().total(), 5);
        assert_eq!(c.kinds().get(EffectKind::Label), 1);
    }

    #[test]
    fn tracer_writes_one_line_per_effect() {
        let mut t = Tracer::new(Vec::new());
        for e in &sample() {
            t.observe(e).unwrap();
        }
        assert_eq!(t.lines(), 5);
        let text = String::from_utf8(t.into_inner().unwrap()).unwrap();
        assert_eq!(
            text,
            "cmp 0 1\nsubdivide 0 2\nswap 0 1\nset 1 9\nlabel done\n"
        );
    }

    #[test]
    fn tee_forwards_in_order_and_stops_on_error() {
        let mut seen = Vec::new();
        let mut tee = Tee::new(StepCounter::new(), |e: &Effect<i32>| {
            seen.push(e.kind());
            anyhow::ensure!(e.kind() != EffectKind::Swap, "refusing swap");
            Ok(())
        });
        let mut err = None;
        for e in &sample() {
            if let Err(e) = tee.observe(e) {
                err = Some(e);
                break;
            }
        }
        let (counter, observer) = tee.into_parts();
        drop(observer);
        assert_eq!(counter.steps(), 2);
        assert!(err.unwrap().to_string().contains("refusing swap"));
        assert_eq!(seen, vec![EffectKind::Cmp, EffectKind::Subdivide, EffectKind::Swap]);
    }
}
