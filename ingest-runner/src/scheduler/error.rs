//! Phase errors
//!
//! Every failure aborts the whole run. The error names the file, model or
//! remote record that failed; the client error is kept as the source.

use ingest_client::ClientError;
use ingest_core::domain::inference::ModelId;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PhaseError {
    /// Uploading an input file failed
    #[error("Failed upload <{}>", .path.display())]
    Upload {
        path: PathBuf,
        #[source]
        source: ClientError,
    },

    /// Creating an inference job failed
    #[error("Failed to submit batch for model id <{model_id}>")]
    Submit {
        model_id: ModelId,
        #[source]
        source: ClientError,
    },

    /// Refreshing a tracked record failed
    #[error("Failed to refresh status of {key}")]
    Refresh {
        key: String,
        #[source]
        source: ClientError,
    },

    /// A refresh answered with a different record than the one requested
    #[error("Refresh of {expected} returned record {got}")]
    KeyMismatch { expected: String, got: String },
}
