use std::path::PathBuf;

use creator_animation_core::AnimationError;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ReaderError {
    #[error("failed to decode scene export: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read scene export at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Only raised when `ReaderOptions::strict_clips` is set.
    #[error("invalid animation clip: {0}")]
    InvalidClip(#[from] AnimationError),

    /// The host factory built no root node.
    #[error("scene root of kind {kind} was not created by the host")]
    NoRoot { kind: &'static str },
}
