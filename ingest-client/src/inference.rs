//! Inference-related API endpoints

use crate::IngestClient;
use crate::error::Result;
use ingest_core::domain::inference::{InferenceJob, InferenceJobId};
use ingest_core::dto::inference::SubmitInference;

impl IngestClient {
    /// Submit a batch inference job for one model over a set of sources
    ///
    /// # Returns
    /// The created job, as reported by the service
    pub async fn submit_batch_inference(&self, req: &SubmitInference) -> Result<InferenceJob> {
        let url = format!("{}/model/infer/batch", self.base_url);
        let response = self.client.post(&url).json(req).send().await?;

        self.handle_response(response).await
    }

    /// Get the current state of a batch inference job
    ///
    /// # Arguments
    /// * `inference_job_id` - The id returned by the submission
    pub async fn get_inference_job(&self, inference_job_id: InferenceJobId) -> Result<InferenceJob> {
        let url = format!("{}/model/infer/batch/{}", self.base_url, inference_job_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}
