//! sortscope-core — effect model, producer trait, interpreter and observers.
//!
//! This crate defines the **stable boundary** used across sortscope crates:
//! - the closed effect model (`Effect`, `EffectKind`, `Span`, `Focus`),
//! - the suspend/resume producer contract (`EffectSource`),
//! - the interpreter that applies effects to a caller-owned sequence, and
//! - observers (step counter, textual tracer, recorder) plus recorded traces.
//!
//! ```
//! use sortscope_core::{run, Effect, Scripted, StepCounter};
//!
//! let mut data = vec![2, 1];
//! let mut counter = StepCounter::new();
//! let script = Scripted::new(vec![Effect::Cmp { i: 0, j: 1 }, Effect::Swap { i: 0, j: 1 }]);
//! run(script, &mut data, Some(&mut counter))?;
//! assert_eq!(data, vec![1, 2]);
//! assert_eq!(counter.steps(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Small, explicit allowlist to keep docs readable and APIs ergonomic.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Effect interpreter and the structural-application rule.
pub mod interp;
/// Observers notified once per effect.
pub mod observer;
/// Producer trait and the `Element` bound.
pub mod source;
/// Recorded traces and replay.
pub mod trace;
/// Canonical effect types shared across the workspace.
pub mod types;

// ---- Re-exports for workspace compatibility ----
pub use interp::*;
pub use observer::*;
pub use source::*;
pub use trace::*;
pub use types::*;

/// Commonly-used items for quick imports.
///
/// ```rust
/// use sortscope_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        interp::{run, Interpreter, RunConfig},
        observer::{Observer, Recorder, StepCounter, Tracer},
        source::{EffectSource, Element},
        trace::Trace,
        types::*,
    };
}
