//! Source-related API endpoints

use crate::IngestClient;
use crate::error::{ClientError, Result};
use ingest_core::domain::document::{PendingDocument, PendingSourceId, UploadPdfResponse};
use ingest_core::dto::source::UploadDocument;
use reqwest::multipart::{Form, Part};
use tracing::debug;

impl IngestClient {
    // =============================================================================
    // Upload
    // =============================================================================

    /// Upload a PDF for OCR
    ///
    /// Sends a multipart form with the project, group and source identifiers,
    /// the optional JSON `metadata` part, and the file itself. The file is read
    /// from disk when this is called.
    ///
    /// # Returns
    /// The upload response, whose `pending_source` tracks the OCR job
    pub async fn upload_pdf(&self, req: &UploadDocument) -> Result<UploadPdfResponse> {
        let url = format!("{}/source/upload-pdf", self.base_url);

        let bytes = tokio::fs::read(&req.file_path)
            .await
            .map_err(|source| ClientError::FileRead {
                path: req.file_path.clone(),
                source,
            })?;

        debug!(
            "Uploading {} ({} bytes) as {}",
            req.file_path.display(),
            bytes.len(),
            req.source_identifier
        );

        let mut form = Form::new()
            .text("projectIdentifier", req.project_identifier.clone())
            .text("groupName", req.group_name.clone())
            .text("sourceIdentifier", req.source_identifier.clone());

        if let Some(metadata) = &req.metadata {
            let json = serde_json::to_string(metadata).map_err(|e| {
                ClientError::InvalidRequest(format!("Failed to encode metadata: {}", e))
            })?;
            form = form.part("metadata", Part::text(json).mime_str("application/json")?);
        }

        let file = Part::bytes(bytes)
            .file_name("source.pdf")
            .mime_str("application/pdf")?;
        form = form.part("file", file);

        let response = self.client.post(&url).multipart(form).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Pending Sources
    // =============================================================================

    /// Get the current OCR state of an uploaded file
    ///
    /// # Arguments
    /// * `pending_source_id` - The id returned by the upload
    pub async fn get_pending_source(
        &self,
        pending_source_id: PendingSourceId,
    ) -> Result<PendingDocument> {
        let url = format!("{}/pending-source/{}", self.base_url, pending_source_id);
        let response = self.client.get(&url).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingest_core::domain::row::DocumentMetadata;
    use ingest_core::domain::status::RemoteStatus;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn upload_for(file: &std::path::Path, metadata: Option<DocumentMetadata>) -> UploadDocument {
        UploadDocument {
            project_identifier: "Test Project".to_string(),
            group_name: "luke".to_string(),
            source_identifier: "logbook.pdf".to_string(),
            metadata,
            file_path: file.to_path_buf(),
        }
    }

    fn pdf_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4 test document").unwrap();
        file
    }

    #[tokio::test]
    async fn test_upload_pdf_sends_form_and_parses_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/source/upload-pdf"))
            .and(header("authorization", "Api-Key secret"))
            .and(body_string_contains("name=\"projectIdentifier\""))
            .and(body_string_contains("Test Project"))
            .and(body_string_contains("name=\"sourceIdentifier\""))
            .and(body_string_contains("logbook.pdf"))
            .and(body_string_contains("\"nNumber\":\"N12345\""))
            .and(body_string_contains("filename=\"source.pdf\""))
            .and(body_string_contains("%PDF-1.4 test document"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projectName": "Test Project",
                "projectId": 4,
                "sourceName": "logbook.pdf",
                "pendingSource": {
                    "pendingSourceId": 1,
                    "name": "logbook.pdf",
                    "status": "Pending",
                    "finalSourceId": null
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IngestClient::new(format!("{}/v1", server.uri()), "secret").unwrap();
        let file = pdf_file();
        let metadata = DocumentMetadata {
            order_id: "o".to_string(),
            order_item_id: "i".to_string(),
            make: "Cessna".to_string(),
            model: "172".to_string(),
            serial: "s".to_string(),
            n_number: "N12345".to_string(),
        };

        let resp = client
            .upload_pdf(&upload_for(file.path(), Some(metadata)))
            .await
            .unwrap();

        assert_eq!(resp.pending_source.pending_source_id, 1);
        assert_eq!(resp.pending_source.status, RemoteStatus::Pending);
        assert_eq!(resp.pending_source.final_source_id, None);
    }

    #[tokio::test]
    async fn test_upload_without_metadata_omits_part() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/source/upload-pdf"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pendingSource": {"pendingSourceId": 2, "status": "Pending"}
            })))
            .mount(&server)
            .await;

        let client = IngestClient::new(server.uri(), "secret").unwrap();
        let file = pdf_file();
        client.upload_pdf(&upload_for(file.path(), None)).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body = String::from_utf8_lossy(&requests[0].body);
        assert!(!body.contains("name=\"metadata\""));
        assert!(body.contains("name=\"file\""));
    }

    #[tokio::test]
    async fn test_upload_missing_file() {
        let server = MockServer::start().await;
        let client = IngestClient::new(server.uri(), "secret").unwrap();

        let err = client
            .upload_pdf(&upload_for(std::path::Path::new("/nonexistent/x.pdf"), None))
            .await
            .unwrap_err();

        assert!(matches!(err, ClientError::FileRead { .. }));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upload_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/source/upload-pdf"))
            .respond_with(ResponseTemplate::new(422).set_body_string("project not found"))
            .mount(&server)
            .await;

        let client = IngestClient::new(server.uri(), "secret").unwrap();
        let file = pdf_file();
        let err = client.upload_pdf(&upload_for(file.path(), None)).await.unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "project not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_pending_source() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pending-source/1"))
            .and(header("authorization", "Api-Key secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pendingSourceId": 1,
                "name": "logbook.pdf",
                "status": "Complete",
                "finalSourceId": 42
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = IngestClient::new(server.uri(), "secret").unwrap();
        let doc = client.get_pending_source(1).await.unwrap();

        assert_eq!(doc.final_source_id, Some(42));
        assert_eq!(doc.status, RemoteStatus::Complete);
    }

    #[tokio::test]
    async fn test_get_pending_source_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pending-source/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let client = IngestClient::new(server.uri(), "secret").unwrap();
        let err = client.get_pending_source(5).await.unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
    }
}
