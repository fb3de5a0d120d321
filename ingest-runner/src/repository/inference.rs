//! Inference repository
//!
//! Handles communication with the service for batch inference jobs.

use async_trait::async_trait;
use ingest_client::{IngestClient, Result};
use ingest_core::domain::inference::{InferenceJob, InferenceJobId};
use ingest_core::dto::inference::SubmitInference;
use std::sync::Arc;

/// Repository trait for batch inference jobs
#[async_trait]
pub trait InferenceRepository: Send + Sync {
    /// Submits one batch inference job
    async fn submit(&self, request: &SubmitInference) -> Result<InferenceJob>;

    /// Fetches the latest state of a job
    async fn fetch_job(&self, inference_job_id: InferenceJobId) -> Result<InferenceJob>;
}

/// HTTP implementation of InferenceRepository
pub struct HttpInferenceRepository {
    client: Arc<IngestClient>,
}

impl HttpInferenceRepository {
    pub fn new(client: Arc<IngestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InferenceRepository for HttpInferenceRepository {
    async fn submit(&self, request: &SubmitInference) -> Result<InferenceJob> {
        self.client.submit_batch_inference(request).await
    }

    async fn fetch_job(&self, inference_job_id: InferenceJobId) -> Result<InferenceJob> {
        self.client.get_inference_job(inference_job_id).await
    }
}
