use sortscope_core::EffectKind;
use thiserror::Error;

/// Failures specific to frame synthesis and rendering.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// The frame carries an effect the circle renderer has no visual rule for.
    #[error("frame {index}: no visual handling for `{kind}` effects")]
    Unsupported {
        /// Frame index.
        index: usize,
        /// Offending effect kind.
        kind: EffectKind,
    },

    /// `render` was asked for a frame past the end.
    #[error("frame {index} out of range for a sequence of {len} frames")]
    IndexOutOfRange {
        /// Requested frame.
        index: usize,
        /// Frames available.
        len: usize,
    },

    /// A frame addressed a slot the visual state does not have.
    #[error("frame {index}: slot {slot} out of range for {len} entities")]
    SlotOutOfRange {
        /// Frame index.
        index: usize,
        /// Offending slot.
        slot: usize,
        /// Entities in the state.
        len: usize,
    },

    /// `SynthConfig::checkpoint_every` was zero.
    #[error("checkpoint interval must be at least 1")]
    ZeroCheckpointInterval,
}
