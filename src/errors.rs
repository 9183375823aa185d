//! Pipeline and storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while running a pipeline stage.
///
/// Every variant is fatal at the point of detection: a stage either
/// completes and writes its output file, or fails and writes nothing.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("market data request failed with HTTP status {status}")]
    UpstreamFetch { status: reqwest::StatusCode },

    #[error("market data provider rejected the request: {message}")]
    UpstreamPayload { message: String },

    #[error("market data request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("no raw snapshots found; run the extract stage first")]
    NoInputSnapshot,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors raised by the snapshot store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Result type alias for pipeline operations
pub type PipelineResult<T> = Result<T, PipelineError>;
