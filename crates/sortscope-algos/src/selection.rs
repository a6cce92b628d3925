//! Selection sort as a resumable producer.
//!
//! For each destination `d`, scans the candidates to its right, emitting one
//! `cmp(min, i)` per candidate, then one `swap(d, min)` (no-op swaps included).
//! Totals over `n` elements: `n(n-1)/2` comparisons and `n-1` swaps.

use crate::resolve_bounds;
use anyhow::{ensure, Result};
use sortscope_core::{Effect, EffectSource, Element, Focus, Span};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    /// Scanning candidate `i` for destination `dest`; `min` is the best so far.
    Scan {
        dest: usize,
        i: usize,
        min: usize,
        end: usize,
    },
    Done,
}

/// Selection sort producer over `[left, right)` (whole sequence by default).
#[derive(Clone, Debug)]
pub struct SelectionSort {
    bounds: Option<Span>,
    focus: bool,
    pending: Option<Focus>,
    state: State,
}

impl Default for SelectionSort {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionSort {
    /// Sort the whole sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bounds: None,
            focus: false,
            pending: None,
            state: State::Start,
        }
    }

    /// Sort only `[span.start, span.end)`.
    #[must_use]
    pub const fn with_bounds(mut self, span: Span) -> Self {
        self.bounds = Some(span);
        self
    }

    /// Also emit `focus(dest, min)` whenever a new minimum is found.
    #[must_use]
    pub const fn with_focus(mut self, focus: bool) -> Self {
        self.focus = focus;
        self
    }
}

impl<T: Element> EffectSource<T> for SelectionSort {
    fn next_effect(&mut self, view: &[T]) -> Result<Option<Effect<T>>> {
        if let Some(indices) = self.pending.take() {
            return Ok(Some(Effect::Focus { indices }));
        }

        if self.state == State::Start {
            let span = resolve_bounds(self.bounds, view.len())?;
            self.state = if span.len() < 2 {
                State::Done
            } else {
                State::Scan {
                    dest: span.start,
                    i: span.start + 1,
                    min: span.start,
                    end: span.end,
                }
            };
        }

        match self.state {
            State::Start | State::Done => Ok(None),
            State::Scan { dest, i, min, end } => {
                ensure!(
                    end <= view.len(),
                    "selection sort: view shrank to {} below bound {end}",
                    view.len()
                );

                if i < end {
                    let improved = view[i] < view[min];
                    if improved && self.focus {
                        self.pending = Some(Focus::Pair(dest, i));
                    }
                    self.state = State::Scan {
                        dest,
                        i: i + 1,
                        min: if improved { i } else { min },
                        end,
                    };
                    return Ok(Some(Effect::Cmp { i: min, j: i }));
                }

                let next = dest + 1;
                self.state = if next + 1 < end {
                    State::Scan {
                        dest: next,
                        i: next + 1,
                        min: next,
                        end,
                    }
                } else {
                    State::Done
                };
                Ok(Some(Effect::Swap { i: dest, j: min }))
            }
        }
    }
}
