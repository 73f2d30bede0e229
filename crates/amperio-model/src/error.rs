//! Error types for model loading and inference setup.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or constructing a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Failed to read the model file
    #[error("failed to read model file '{}': {source}", path.display())]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the model JSON
    #[error("failed to parse model JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// `in_shape` is missing or has no concrete trailing dimension
    #[error("model has no usable input shape")]
    MissingInputShape,

    /// The trailing `in_shape` dimension is outside the supported 1..=3
    #[error("unsupported model input size: {0} (expected 1, 2, or 3)")]
    UnsupportedInputSize(i64),

    /// `in_skip` values above 1 are not supported
    #[error("unsupported in_skip value: {0} (expected 0 or 1)")]
    UnsupportedInputSkip(i64),

    /// No LSTM or GRU layer in the layer stack
    #[error("model has no recurrent layer")]
    NoRecurrentLayer,

    /// Layer type the runtime cannot execute
    #[error("unsupported layer type: {0}")]
    UnsupportedLayer(String),

    /// Activation the runtime cannot execute
    #[error("unsupported activation: {0}")]
    UnsupportedActivation(String),

    /// Weight arrays do not match the declared shapes
    #[error("bad weights in {layer} layer: {detail}")]
    BadWeights {
        /// Layer the malformed weights belong to.
        layer: &'static str,
        /// What was wrong with them.
        detail: String,
    },
}

impl ModelError {
    /// Create a read error with path context.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ModelError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a bad-weights error.
    pub fn bad_weights(layer: &'static str, detail: impl Into<String>) -> Self {
        ModelError::BadWeights {
            layer,
            detail: detail.into(),
        }
    }
}
