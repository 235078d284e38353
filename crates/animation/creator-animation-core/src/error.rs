//! Error types for the animation core.
//!
//! Playback itself never fails: missing targets, clips or tracks are logged and
//! skipped. These errors only surface from explicit validation and conversion calls.

use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimationError {
    /// A keyframe carries a NaN or infinite frame stamp.
    #[error("non-finite keyframe frame in '{property}' of clip '{clip}' (path '{path}')")]
    NonFiniteFrame {
        clip: String,
        path: String,
        property: String,
    },

    /// Keyframes are not in ascending frame order.
    #[error("keyframes out of order in '{property}' of clip '{clip}' (path '{path}') at index {index}")]
    UnorderedFrames {
        clip: String,
        path: String,
        property: String,
        index: usize,
    },

    /// Clip-level timing is unusable.
    #[error("invalid timing for clip '{clip}': {reason}")]
    InvalidTiming { clip: String, reason: String },

    /// Editor wrap-mode code not known to this reader.
    #[error("unknown wrap mode code {code}")]
    UnknownWrapMode { code: i64 },

    /// Editor wrap-mode name not known to this reader.
    #[error("unknown wrap mode '{name}'")]
    UnknownWrapModeName { name: String },
}
