use std::io;

use thiserror::Error;

/// Failures that abort an extraction run. There is no retry path:
/// every variant is fatal to the process.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not open video source: {path}")]
    SourceUnavailable { path: String },

    #[error("could not load cascade model: {path}")]
    ModelLoad { path: String },

    #[error("could not write crop image: {path}")]
    WriteFailure { path: String },

    #[error("vision backend error: {0}")]
    Vision(#[from] opencv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;
