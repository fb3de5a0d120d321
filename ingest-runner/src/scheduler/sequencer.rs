//! Phase sequencer
//!
//! Runs the phases of one ingestion strictly in order:
//! 1. Upload every input row, failing fast on the first error
//! 2. Poll the pending documents until OCR is done for all of them
//! 3. For each model group: submit one inference job per model over the
//!    documents OCR resolved, then poll those jobs until all are terminal
//!
//! Each phase's output is passed to the next as an argument; nothing is
//! shared between phases.

use chrono::{DateTime, Utc};
use ingest_client::ClientError;
use ingest_core::domain::document::{PendingDocument, SourceId, resolved_source_ids};
use ingest_core::domain::inference::{InferenceJob, ModelId};
use ingest_core::domain::row::UploadRow;
use ingest_core::dto::inference::SubmitInference;
use ingest_core::dto::source::UploadDocument;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::PipelineSettings;
use crate::repository::{DocumentRepository, InferenceRepository};
use crate::scheduler::{PhaseError, Poller};

/// Outcome of one inference round
#[derive(Debug, Clone)]
pub struct RoundReport {
    /// 1-based position of the model group
    pub round: usize,
    pub model_ids: Vec<ModelId>,
    /// Final state of the round's jobs, in submission order
    pub jobs: Vec<InferenceJob>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RoundReport {
    /// Returns `true` if the round was skipped for lack of resolved documents
    pub fn is_skipped(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn errored_count(&self) -> usize {
        self.jobs.iter().filter(|job| job.status.is_errored()).count()
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Final state of every uploaded document, in input order
    pub documents: Vec<PendingDocument>,
    pub rounds: Vec<RoundReport>,
}

impl RunSummary {
    pub fn resolved_count(&self) -> usize {
        self.documents.iter().filter(|doc| doc.is_resolved()).count()
    }

    /// Documents that reached a terminal status without a final id
    pub fn unresolved_count(&self) -> usize {
        self.documents.len() - self.resolved_count()
    }
}

/// Drives one run through upload, OCR and inference phases
pub struct PhaseSequencer {
    settings: PipelineSettings,
    documents: Arc<dyn DocumentRepository>,
    inference: Arc<dyn InferenceRepository>,
    poller: Poller,
}

impl PhaseSequencer {
    pub fn new(
        settings: PipelineSettings,
        documents: Arc<dyn DocumentRepository>,
        inference: Arc<dyn InferenceRepository>,
    ) -> Self {
        let poller = Poller::new(settings.poll_interval);
        Self {
            settings,
            documents,
            inference,
            poller,
        }
    }

    /// Runs every phase for `rows`
    pub async fn run(&self, rows: &[UploadRow]) -> Result<RunSummary, PhaseError> {
        if rows.is_empty() {
            warn!("No rows to upload");
            return Ok(RunSummary::default());
        }

        let pending = self.upload_all(rows).await?;

        info!("Waiting on OCR to complete...");
        let documents = self.await_ocr(pending).await?;

        let mut summary = RunSummary {
            documents,
            rounds: Vec::new(),
        };
        info!(
            "OCR completed: {} resolved, {} unresolved",
            summary.resolved_count(),
            summary.unresolved_count()
        );

        if !self.settings.run_inference {
            info!("Inference disabled, stopping after OCR");
            return Ok(summary);
        }

        for (index, model_ids) in self.settings.model_groups.iter().enumerate() {
            let report = self
                .run_round(index + 1, model_ids, &summary.documents)
                .await?;
            summary.rounds.push(report);
        }

        Ok(summary)
    }

    /// Uploads every row in order, stopping at the first failure
    pub async fn upload_all(&self, rows: &[UploadRow]) -> Result<Vec<PendingDocument>, PhaseError> {
        let mut pending = Vec::with_capacity(rows.len());

        for row in rows {
            let upload = UploadDocument::from_row(
                row,
                self.settings.project.as_str(),
                self.settings.group.as_str(),
                self.settings.attach_metadata,
            );

            let document = self
                .documents
                .upload(&upload)
                .await
                .map_err(|source| PhaseError::Upload {
                    path: row.filepath.clone(),
                    source,
                })?;

            info!("Successfully uploaded <{}>", document.display_name());
            pending.push(document);
        }

        Ok(pending)
    }

    /// Polls pending documents until OCR is done for all of them
    pub async fn await_ocr(
        &self,
        pending: Vec<PendingDocument>,
    ) -> Result<Vec<PendingDocument>, PhaseError> {
        let documents = self.documents.as_ref();

        self.poller
            .poll_until_terminal(pending, |id| async move {
                let document = documents.fetch_pending(id).await?;
                if document.is_resolved() {
                    info!("OCR complete for <{}>", document.display_name());
                } else if document.status.is_errored() {
                    warn!("OCR errored for <{}>", document.display_name());
                }
                Ok::<_, ClientError>(document)
            })
            .await
    }

    /// Submits and drains one model group
    ///
    /// Only documents with a final id take part. If there are none the round
    /// is skipped and reported with no jobs.
    pub async fn run_round(
        &self,
        round: usize,
        model_ids: &[ModelId],
        documents: &[PendingDocument],
    ) -> Result<RoundReport, PhaseError> {
        let started_at = Utc::now();
        let source_ids = resolved_source_ids(documents);

        if source_ids.is_empty() {
            warn!("Skipping batch {}: no documents completed OCR", round);
            return Ok(RoundReport {
                round,
                model_ids: model_ids.to_vec(),
                jobs: Vec::new(),
                started_at,
                completed_at: Utc::now(),
            });
        }

        info!(
            "Submitting batch {} ({} model(s) over {} document(s))",
            round,
            model_ids.len(),
            source_ids.len()
        );

        let submitted = self.submit_all(model_ids, &source_ids).await?;
        let jobs = self.await_inference(submitted).await?;

        info!("Batch {} predictions completed", round);

        Ok(RoundReport {
            round,
            model_ids: model_ids.to_vec(),
            jobs,
            started_at,
            completed_at: Utc::now(),
        })
    }

    /// Creates one inference job per model, in model order
    async fn submit_all(
        &self,
        model_ids: &[ModelId],
        source_ids: &[SourceId],
    ) -> Result<Vec<InferenceJob>, PhaseError> {
        let mut jobs = Vec::with_capacity(model_ids.len());

        for &model_id in model_ids {
            let request = SubmitInference {
                group_name: self.settings.group.clone(),
                project_identifier: self.settings.project.clone(),
                output_layer_identifier: self.settings.output_layer.clone(),
                model_identifier: model_id,
                source_ids: source_ids.to_vec(),
            };

            let job = self
                .inference
                .submit(&request)
                .await
                .map_err(|source| PhaseError::Submit { model_id, source })?;

            info!(
                "Submitted inference job {} for model {}",
                job.inference_job_id, model_id
            );
            jobs.push(job);
        }

        Ok(jobs)
    }

    async fn await_inference(
        &self,
        jobs: Vec<InferenceJob>,
    ) -> Result<Vec<InferenceJob>, PhaseError> {
        let inference = self.inference.as_ref();

        self.poller
            .poll_until_terminal(jobs, |id| inference.fetch_job(id))
            .await
    }
}
