use std::path::PathBuf;

use pixel_filters::FilterError;
use thiserror::Error;

/// Failures of the named-filter store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid filter name: {0:?}")]
    InvalidName(String),

    #[error("Filter not found: {0}")]
    NotFound(String),

    #[error("Malformed filter document {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Filter '{name}' has an unusable kernel: {source}")]
    InvalidKernel {
        name: String,
        #[source]
        source: FilterError,
    },

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures at the PNG boundary.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Unsupported PNG layout: {0}")]
    Unsupported(String),

    #[error("Image too large: {width}x{height}")]
    TooLarge { width: usize, height: usize },

    #[error("Image error: {0}")]
    Image(#[from] FilterError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures while reading or resolving a pipeline file.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Pipeline parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Step {index} ({step}): {source}")]
    Step {
        index: usize,
        step: String,
        #[source]
        source: FilterError,
    },

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Filter store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
