//! Document repository
//!
//! Handles communication with the service for uploaded documents:
//! - Uploading a PDF and receiving its pending record
//! - Refreshing a pending record while OCR runs

use async_trait::async_trait;
use ingest_client::{IngestClient, Result};
use ingest_core::domain::document::{PendingDocument, PendingSourceId};
use ingest_core::dto::source::UploadDocument;
use std::sync::Arc;
use tracing::debug;

/// Repository trait for uploaded documents
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Uploads one file
    ///
    /// # Returns
    /// The pending record tracking the file's OCR
    async fn upload(&self, upload: &UploadDocument) -> Result<PendingDocument>;

    /// Fetches the latest state of a pending record
    async fn fetch_pending(&self, pending_source_id: PendingSourceId) -> Result<PendingDocument>;
}

/// HTTP implementation of DocumentRepository
pub struct HttpDocumentRepository {
    client: Arc<IngestClient>,
}

impl HttpDocumentRepository {
    pub fn new(client: Arc<IngestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentRepository for HttpDocumentRepository {
    async fn upload(&self, upload: &UploadDocument) -> Result<PendingDocument> {
        let response = self.client.upload_pdf(upload).await?;

        debug!(
            "Upload of {} accepted into project {:?}, directory {:?}",
            upload.source_identifier, response.project_name, response.directory_name
        );

        Ok(response.pending_source)
    }

    async fn fetch_pending(&self, pending_source_id: PendingSourceId) -> Result<PendingDocument> {
        self.client.get_pending_source(pending_source_id).await
    }
}
