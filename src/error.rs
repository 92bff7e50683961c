use std::path::PathBuf;

/// Result type for sequencer operations
pub type Result<T> = std::result::Result<T, SequencerError>;

/// Contract violations raised by the engine and its adapters.
///
/// None of these are meant to reach an end user: callers guard indices and
/// configuration before handing them over.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SequencerError {
    #[error("index {index} is out of range for a sequence of {count} items")]
    InvalidIndex { index: usize, count: usize },

    #[error("a sequence needs at least one item")]
    EmptySequence,

    #[error("invalid sequencer configuration: {0}")]
    InvalidConfig(String),
}

/// Failures while discovering or decoding image assets
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("no image files found in directory {0:?}")]
    NoImages(PathBuf),
}
