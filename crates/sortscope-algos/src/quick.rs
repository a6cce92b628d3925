//! Hoare-partition quicksort as a resumable producer.
//!
//! Each frame holds an inclusive range `[lo, hi]` (stored as a half-open
//! [`Span`]). Partitioning picks the pivot at the lower-middle index, then
//! probes a forward pointer `i` while `a[i] < pivot` and a backward pointer `j`
//! while `a[j] > pivot`. Every probe emits `focus(i, j)` followed by
//! `cmp(probe, pivot_index)`.
//!
//! - Pointers met or crossed: split at `mid = j`.
//! - Both pointers stopped on values equal to the pivot: nothing to exchange;
//!   both step inward without emitting a swap.
//! - Otherwise: `swap(i, j)`, the tracked pivot index follows its value, and
//!   both pointers step inward.
//!
//! With a lower-middle pivot the split always satisfies `lo <= mid < hi`, so
//! both children are strictly smaller and the sort terminates on every input,
//! including all-equal ones. The split point is a value carried in the frame
//! stage, never shared state.

use crate::resolve_bounds;
use anyhow::{anyhow, ensure, Result};
use sortscope_core::{Effect, EffectSource, Element, Focus, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Forward,
    Backward,
    Decide,
}

#[derive(Clone, Debug)]
struct Partition<T> {
    pivot: T,
    pivot_idx: usize,
    i: usize,
    j: usize,
    phase: Phase,
}

#[derive(Clone, Debug)]
enum Stage<T> {
    Enter,
    Partition(Partition<T>),
    LabelLeft { mid: usize },
    SubdivideLeft { mid: usize },
    DescendLeft { mid: usize },
    LabelRight { mid: usize },
    SubdivideRight { mid: usize },
    DescendRight { mid: usize },
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

/// Quicksort producer over `[left, right)` (whole sequence by default).
#[derive(Clone, Debug)]
pub struct QuickSort<T> {
    bounds: Option<Span>,
    started: bool,
    pending: Option<Effect<T>>,
    stack: Vec<Frame<T>>,
}

impl<T> Default for QuickSort<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> QuickSort<T> {
    /// Sort the whole sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: None,
            started: false,
            pending: None,
            stack: Vec::new(),
        }
    }

    /// Sort only `[span.start, span.end)`.
    #[must_use]
    pub fn with_bounds(mut self, span: Span) -> Self {
        self.bounds = Some(span);
        self
    }
}

/// Emit `focus(i, j)` now and queue `cmp(at, pivot_idx)` behind it.
fn probe<T>(
    pending: &mut Option<Effect<T>>,
    marks: Focus,
    at: usize,
    pivot_idx: usize,
) -> Option<Effect<T>> {
    *pending = Some(Effect::Cmp { i: at, j: pivot_idx });
    Some(Effect::Focus { indices: marks })
}

impl<T: Element> EffectSource<T> for QuickSort<T> {
    fn next_effect(&mut self, view: &[T]) -> Result<Option<Effect<T>>> {
        if let Some(e) = self.pending.take() {
            return Ok(Some(e));
        }

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
            // Non-empty frames only reach the index math below.
            let lo = span.start;
            let hi = span.end.saturating_sub(1);

            match std::mem::replace(&mut top.stage, Stage::Enter) {
                Stage::Enter => {
                    if span.len() < 2 {
                        self.stack.pop();
                        continue;
                    }
                    ensure!(
                        span.end <= view.len(),
                        "quicksort: range {span} exceeds view of length {}",
                        view.len()
                    );
                    let pivot_idx = lo + (hi - lo) / 2;
                    let pivot = view[pivot_idx].clone();
                    let text = format!("pivot {pivot:?}");
                    top.stage = Stage::Partition(Partition {
                        pivot,
                        pivot_idx,
                        i: lo,
                        j: hi,
                        phase: Phase::Forward,
                    });
                    return Ok(Some(Effect::label(text)));
                }

                Stage::Partition(mut p) => match p.phase {
                    Phase::Forward => {
                        ensure!(
                            p.i <= hi,
                            "quicksort: forward probe {} left range {span}",
                            p.i
                        );
                        let (at, marks) = (p.i, Focus::Pair(p.i, p.j));
                        if view[at] < p.pivot {
                            p.i += 1;
                        } else {
                            p.phase = Phase::Backward;
                        }
                        let out = probe(&mut self.pending, marks, at, p.pivot_idx);
                        top.stage = Stage::Partition(p);
                        return Ok(out);
                    }
                    Phase::Backward => {
                        ensure!(
                            p.j >= lo,
                            "quicksort: backward probe {} left range {span}",
                            p.j
                        );
                        let (at, marks) = (p.j, Focus::Pair(p.i, p.j));
                        if view[at] > p.pivot {
                            p.j = p.j.checked_sub(1).ok_or_else(|| {
                                anyhow!("quicksort: backward probe underflow in {span}")
                            })?;
                        } else {
                            p.phase = Phase::Decide;
                        }
                        let out = probe(&mut self.pending, marks, at, p.pivot_idx);
                        top.stage = Stage::Partition(p);
                        return Ok(out);
                    }
                    Phase::Decide => {
                        let (i, j) = (p.i, p.j);
                        if i >= j {
                            top.stage = Stage::LabelLeft { mid: j };
                            return Ok(Some(Effect::Compare { pair: None }));
                        }

                        let double_pivot = view[i] == p.pivot && view[j] == p.pivot;
                        if !double_pivot {
                            if i == p.pivot_idx {
                                p.pivot_idx = j;
                            } else if j == p.pivot_idx {
                                p.pivot_idx = i;
                            }
                        }
                        p.i = i + 1;
                        p.j = j - 1;
                        p.phase = Phase::Forward;
                        top.stage = Stage::Partition(p);
                        if !double_pivot {
                            return Ok(Some(Effect::Swap { i, j }));
                        }
                    }
                },

                Stage::LabelLeft { mid } => {
                    top.stage = Stage::SubdivideLeft { mid };
                    return Ok(Some(Effect::label(format!("sorting [{lo}, {mid}]"))));
                }
                Stage::SubdivideLeft { mid } => {
                    top.stage = Stage::DescendLeft { mid };
                    return Ok(Some(Effect::Subdivide {
                        span: Span::new(lo, mid + 1),
                    }));
                }
                Stage::DescendLeft { mid } => {
                    top.stage = Stage::LabelRight { mid };
                    self.stack.push(Frame::new(Span::new(lo, mid + 1)));
                }
                Stage::LabelRight { mid } => {
                    top.stage = Stage::SubdivideRight { mid };
                    return Ok(Some(Effect::label(format!(
                        "sorting [{}, {hi}]",
                        mid + 1
                    ))));
                }
                Stage::SubdivideRight { mid } => {
                    top.stage = Stage::DescendRight { mid };
                    return Ok(Some(Effect::Subdivide {
                        span: Span::new(mid + 1, span.end),
                    }));
                }
                Stage::DescendRight { mid } => {
                    self.stack.pop();
                    self.stack.push(Frame::new(Span::new(mid + 1, span.end)));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortscope_core::{run, EffectKind, Recorder};

    fn sort_traced(data: &mut [i64]) -> Vec<Effect<i64>> {
        let mut rec = Recorder::new();
        run(QuickSort::new(), data, Some(&mut rec)).unwrap();
        rec.into_trace().into_effects()
    }

    #[test]
    fn equal_pair_is_left_alone() {
        let mut data = vec![-2, -2];
        let effects = sort_traced(&mut data);
        assert_eq!(data, vec![-2, -2]);
        assert!(effects.iter().all(|e| e.kind() != EffectKind::Swap));
        assert_eq!(effects[0], Effect::label("pivot -2"));
    }

    #[test]
    fn sorts_alternating_duplicates() {
        let mut data = vec![0, 1, 0, 1];
        sort_traced(&mut data);
        assert_eq!(data, vec![0, 0, 1, 1]);
    }

    #[test]
    fn split_misordering_case_sorts() {
        let mut data = vec![3, 0, 3, 0, 3];
        sort_traced(&mut data);
        assert_eq!(data, vec![0, 0, 3, 3, 3]);
    }

    #[test]
    fn every_probe_pairs_focus_with_cmp() {
        let mut data = vec![4, 1, 3, 5, 2];
        let effects = sort_traced(&mut data);
        assert_eq!(data, vec![1, 2, 3, 4, 5]);
        for (n, e) in effects.iter().enumerate() {
            if e.kind() == EffectKind::Cmp {
                assert_eq!(effects[n - 1].kind(), EffectKind::Focus, "cmp #{n} not probed");
            }
        }
    }

    #[test]
    fn trivial_ranges_emit_nothing() {
        assert!(sort_traced(&mut []).is_empty());
        assert!(sort_traced(&mut [42]).is_empty());
    }

    #[test]
    fn children_are_announced_before_descent() {
        let mut data = vec![2, 1, 3];
        let effects = sort_traced(&mut data);
        assert_eq!(data, vec![1, 2, 3]);
        let labels: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::Label { text } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(labels[0], "pivot 1");
        assert!(labels.contains(&"sorting [0, 0]"));
        assert!(labels.contains(&"sorting [1, 2]"));
    }
}
