//! Top-down merge sort as a resumable producer.
//!
//! - Balanced splits on `[lo, hi)` at `mid = (lo + hi) / 2`.
//! - Explicit frame stack instead of recursion; each frame walks the stages
//!   `announce left → sort left → announce right → sort right → merge`.
//! - Ranges of length ≤ 1 emit nothing.
//!
//! The merge step snapshots both sorted halves from the live view, then emits
//! one `set(i, v)` per slot taking the smaller head (left on ties, so the sort
//! is stable). Both snapshots must be exhausted exactly when the range is full.

use crate::resolve_bounds;
use anyhow::{anyhow, bail, ensure, Result};
use sortscope_core::{Effect, EffectSource, Element, Span};
use std::collections::VecDeque;

#[derive(Clone, Debug)]
enum Stage<T> {
    Enter,
    DescendLeft,
    AnnounceRight,
    DescendRight,
    AnnounceMerge,
    Merging {
        next: usize,
        left: VecDeque<T>,
        right: VecDeque<T>,
    },
}

#[derive(Clone, Debug)]
struct Frame<T> {
    span: Span,
    stage: Stage<T>,
}

impl<T> Frame<T> {
    const fn new(span: Span) -> Self {
        Self {
            span,
            stage: Stage::Enter,
        }
    }
}

/// Merge sort producer over `[left, right)` (whole sequence by default).
#[derive(Clone, Debug)]
pub struct MergeSort<T> {
    bounds: Option<Span>,
    started: bool,
    stack: Vec<Frame<T>>,
}

impl<T> Default for MergeSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MergeSort<T> {
    /// Sort the whole sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: None,
            started: false,
            stack: Vec::new(),
        }
    }

    /// Sort only `[span.start, span.end)`.
    #[must_use]
    pub fn with_bounds(mut self, span: Span) -> Self {
        self.bounds = Some(span);
        self
    }

    /// Live frames on the explicit stack (≤ ⌈log2 n⌉ + 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[inline]
const fn midpoint(span: Span) -> usize {
    span.start + span.len() / 2
}

impl<T: Element> EffectSource<T> for MergeSort<T> {
    fn next_effect(&mut self, view: &[T]) -> Result<Option<Effect<T>>> {
        if !self.started {
            self.started = true;
            let span = resolve_bounds(self.bounds, view.len())?;
            if span.len() >= 2 {
                self.stack.push(Frame::new(span));
            }
        }

        loop {
            let Some(top) = self.stack.last_mut() else {
                return Ok(None);
            };
            let span = top.span;
            let mid = midpoint(span);

            match std::mem::replace(&mut top.stage, Stage::Enter) {
                Stage::Enter => {
                    if span.len() <= 1 {
                        self.stack.pop();
                        continue;
                    }
                    top.stage = Stage::DescendLeft;
                    return Ok(Some(Effect::Subdivide {
                        span: Span::new(span.start, mid),
                    }));
                }
                Stage::DescendLeft => {
                    top.stage = Stage::AnnounceRight;
                    self.stack.push(Frame::new(Span::new(span.start, mid)));
                }
                Stage::AnnounceRight => {
                    top.stage = Stage::DescendRight;
                    return Ok(Some(Effect::Subdivide {
                        span: Span::new(mid, span.end),
                    }));
                }
                Stage::DescendRight => {
                    top.stage = Stage::AnnounceMerge;
                    self.stack.push(Frame::new(Span::new(mid, span.end)));
                }
                Stage::AnnounceMerge => {
                    ensure!(
                        span.end <= view.len(),
                        "merge sort: range {span} exceeds view of length {}",
                        view.len()
                    );
                    top.stage = Stage::Merging {
                        next: span.start,
                        left: view[span.start..mid].iter().cloned().collect(),
                        right: view[mid..span.end].iter().cloned().collect(),
                    };
                    return Ok(Some(Effect::Merge {
                        left: Span::new(span.start, mid),
                        right: Span::new(mid, span.end),
                    }));
                }
                Stage::Merging {
                    next,
                    mut left,
                    mut right,
                } => {
                    if next < span.end {
                        let take_left = match (left.front(), right.front()) {
                            (Some(l), Some(r)) => l <= r,
                            (Some(_), None) => true,
                            (None, Some(_)) => false,
                            (None, None) => {
                                bail!("merge of {span} ran out of elements at index {next}")
                            }
                        };
                        let value = if take_left {
                            left.pop_front()
                        } else {
                            right.pop_front()
                        }
                        .ok_or_else(|| anyhow!("merge of {span}: empty snapshot at {next}"))?;
                        top.stage = Stage::Merging {
                            next: next + 1,
                            left,
                            right,
                        };
                        return Ok(Some(Effect::Set { i: next, value }));
                    }

                    ensure!(
                        left.is_empty() && right.is_empty(),
                        "merge of {span} left {} + {} elements unconsumed",
                        left.len(),
                        right.len()
                    );
                    self.stack.pop();
                }
            }
        }
    }
}
