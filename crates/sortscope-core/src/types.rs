//! Canonical effect types shared across the sortscope workspace.
//!
//! These live in `sortscope-core` and are re-exported at the crate root so other
//! crates can import via `sortscope_core::Effect`, `sortscope_core::Span`, etc.
//!
//! An [`Effect`] is one elementary instruction recorded by an instrumented sort.
//! The set of kinds is closed: interpreters, observers and renderers match on it
//! exhaustively, so adding a kind is a compile-time decision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open index range `[start, end)` over a sequence.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    /// Inclusive lower bound.
    pub start: usize,
    /// Exclusive upper bound.
    pub end: usize,
}

impl Span {
    /// Create a span `[start, end)` (no validation).
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of indices covered (0 if inverted).
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no index.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `idx` lies within `[start, end)`.
    #[inline]
    #[must_use]
    pub const fn contains(&self, idx: usize) -> bool {
        idx >= self.start && idx < self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{})", self.start, self.end)
    }
}

/// Zero, one or two highlighted indices.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Focus {
    /// Clear any highlighting.
    #[default]
    Clear,
    /// Highlight a single index.
    One(usize),
    /// Highlight two indices.
    Pair(usize, usize),
}

impl Focus {
    /// Indices carried by this focus, in order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Self::Clear => Vec::new(),
            Self::One(i) => vec![i],
            Self::Pair(i, j) => vec![i, j],
        }
    }
}

/// Fieldless discriminant of [`Effect`], used for counting and diagnostics.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    /// Comparison of two elements.
    Cmp,
    /// Exchange of two elements (structural).
    Swap,
    /// Overwrite of one element (structural).
    Set,
    /// Index highlighting.
    Focus,
    /// Directional comparison markers.
    Compare,
    /// Active working range.
    Subdivide,
    /// Status caption.
    Label,
    /// Merge announcement.
    Merge,
}

impl EffectKind {
    /// Number of kinds.
    pub const COUNT: usize = 8;

    /// Every kind, in declaration order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Cmp,
        Self::Swap,
        Self::Set,
        Self::Focus,
        Self::Compare,
        Self::Subdivide,
        Self::Label,
        Self::Merge,
    ];

    /// Lower-case trace name of the kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cmp => "cmp",
            Self::Swap => "swap",
            Self::Set => "set",
            Self::Focus => "focus",
            Self::Compare => "compare",
            Self::Subdivide => "subdivide",
            Self::Label => "label",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One recorded instruction produced by an instrumented sort.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Effect<T> {
    /// Element `i` compared against element `j`.
    Cmp {
        /// Left operand index.
        i: usize,
        /// Right operand index.
        j: usize,
    },
    /// Exchange elements `i` and `j`.
    Swap {
        /// First index.
        i: usize,
        /// Second index.
        j: usize,
    },
    /// Overwrite element `i` with `value`.
    Set {
        /// Target index.
        i: usize,
        /// New value.
        value: T,
    },
    /// Highlight the given indices, replacing prior focus.
    Focus {
        /// Highlighted indices.
        indices: Focus,
    },
    /// Show (`Some`) or clear (`None`) directional markers.
    Compare {
        /// Marker targets.
        pair: Option<(usize, usize)>,
    },
    /// Mark the active working range.
    Subdivide {
        /// Active range.
        span: Span,
    },
    /// Update the status caption.
    Label {
        /// Caption text.
        text: String,
    },
    /// Announce a merge of two adjacent sorted ranges.
    Merge {
        /// Left run.
        left: Span,
        /// Right run.
        right: Span,
    },
}

impl<T> Effect<T> {
    /// Discriminant of this effect.
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        match self {
            Self::Cmp { .. } => EffectKind::Cmp,
            Self::Swap { .. } => EffectKind::Swap,
            Self::Set { .. } => EffectKind::Set,
            Self::Focus { .. } => EffectKind::Focus,
            Self::Compare { .. } => EffectKind::Compare,
            Self::Subdivide { .. } => EffectKind::Subdivide,
            Self::Label { .. } => EffectKind::Label,
            Self::Merge { .. } => EffectKind::Merge,
        }
    }

    /// Whether applying this effect changes the sequence.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Self::Swap { .. } | Self::Set { .. })
    }

    /// Whether this effect counts toward the step total (`cmp`, `swap`, `set`).
    #[must_use]
    pub const fn counts_as_step(&self) -> bool {
        matches!(self, Self::Cmp { .. } | Self::Swap { .. } | Self::Set { .. })
    }

    /// Shorthand for a label effect.
    #[must_use]
    pub fn label(text: impl Into<String>) -> Self {
        Self::Label { text: text.into() }
    }
}

impl<T: fmt::Debug> fmt::Display for Effect<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;
        match self {
            Self::Cmp { i, j } | Self::Swap { i, j } => write!(f, " {i} {j}"),
            Self::Set { i, value } => write!(f, " {i} {value:?}"),
            Self::Focus { indices } => {
                for idx in indices.indices() {
                    write!(f, " {idx}")?;
                }
                Ok(())
            }
            Self::Compare { pair } => match pair {
                Some((i, j)) => write!(f, " {i} {j}"),
                None => Ok(()),
            },
            Self::Subdivide { span } => write!(f, " {} {}", span.start, span.end),
            Self::Label { text } => write!(f, " {text}"),
            Self::Merge { left, right } => write!(
                f,
                " {} {} {} {}",
                left.start, left.end, right.start, right.end
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_len_and_contains() {
        let s = Span::new(2, 5);
        assert_eq!(s.len(), 3);
        assert!(s.contains(2));
        assert!(!s.contains(5));
        assert!(Span::new(4, 1).is_empty());
    }

    #[test]
    fn display_matches_trace_lines() {
        assert_eq!(Effect::<i64>::Swap { i: 0, j: 2 }.to_string(), "swap 0 2");
        assert_eq!(Effect::Set { i: 3, value: -7i64 }.to_string(), "set 3 -7");
        assert_eq!(
            Effect::<i64>::Focus { indices: Focus::One(4) }.to_string(),
            "focus 4"
        );
        assert_eq!(Effect::<i64>::Compare { pair: None }.to_string(), "compare");
        assert_eq!(
            Effect::<i64>::Merge {
                left: Span::new(0, 2),
                right: Span::new(2, 4)
            }
            .to_string(),
            "merge 0 2 2 4"
        );
        assert_eq!(Effect::<i64>::label("pivot 5").to_string(), "label pivot 5");
    }

    #[test]
    fn structural_and_step_classification() {
        for kind in EffectKind::ALL {
            let e: Effect<i32> = match kind {
                EffectKind::Cmp => Effect::Cmp { i: 0, j: 1 },
                EffectKind::Swap => Effect::Swap { i: 0, j: 1 },
                EffectKind::Set => Effect::Set { i: 0, value: 1 },
                EffectKind::Focus => Effect::Focus { indices: Focus::Clear },
                EffectKind::Compare => Effect::Compare { pair: None },
                EffectKind::Subdivide => Effect::Subdivide { span: Span::new(0, 1) },
                EffectKind::Label => Effect::label(""),
                EffectKind::Merge => Effect::Merge {
                    left: Span::new(0, 1),
                    right: Span::new(1, 2),
                },
            };
            assert_eq!(e.kind(), kind);
            assert_eq!(
                e.is_structural(),
                matches!(kind, EffectKind::Swap | EffectKind::Set)
            );
            assert_eq!(
                e.counts_as_step(),
                matches!(kind, EffectKind::Cmp | EffectKind::Swap | EffectKind::Set)
            );
        }
    }
}
