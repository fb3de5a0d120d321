//! Inference job domain types

use serde::{Deserialize, Serialize};

use crate::domain::document::SourceId;
use crate::domain::job::RemoteJob;
use crate::domain::status::RemoteStatus;

/// Server-assigned id of a batch inference job
pub type InferenceJobId = i64;

/// Identifier of a server-side model
pub type ModelId = i64;

/// One submitted batch-inference request
///
/// `source_ids` is fixed by the submission; refreshes replace the record but
/// the service reports the same set back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceJob {
    pub inference_job_id: InferenceJobId,
    pub project_id: Option<i64>,
    #[serde(default)]
    pub source_ids: Vec<SourceId>,
    #[serde(default)]
    pub status: RemoteStatus,
}

impl RemoteJob for InferenceJob {
    type Key = InferenceJobId;

    fn key(&self) -> InferenceJobId {
        self.inference_job_id
    }

    fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
