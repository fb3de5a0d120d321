//! Pending document domain types

use serde::{Deserialize, Serialize};

use crate::domain::job::RemoteJob;
use crate::domain::status::RemoteStatus;

/// Server-assigned id of an uploaded file awaiting OCR
pub type PendingSourceId = i64;

/// Server-assigned id of a permanent document
pub type SourceId = i64;

/// An uploaded file awaiting asynchronous OCR on the service
///
/// `final_source_id` appears once OCR resolves the pending record into a
/// permanent document. The runner only ever replaces a whole record with a
/// freshly fetched one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingDocument {
    pub pending_source_id: PendingSourceId,
    pub name: Option<String>,
    pub source_type: Option<String>,
    pub created_at: Option<String>,
    pub expires_at: Option<String>,
    pub confirmed_at: Option<String>,
    #[serde(default)]
    pub status: RemoteStatus,
    pub final_source_id: Option<SourceId>,
}

impl PendingDocument {
    /// Name for progress messages, falling back to the pending id
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("pending source {}", self.pending_source_id),
        }
    }

    /// Returns `true` once OCR produced a permanent document
    pub fn is_resolved(&self) -> bool {
        self.final_source_id.is_some()
    }
}

impl RemoteJob for PendingDocument {
    type Key = PendingSourceId;

    fn key(&self) -> PendingSourceId {
        self.pending_source_id
    }

    /// A document is done once its status is terminal, or as soon as a final
    /// id is present even if the status has not caught up yet.
    fn is_terminal(&self) -> bool {
        self.status.is_terminal() || self.final_source_id.is_some()
    }
}

/// Response of the PDF upload endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadPdfResponse {
    pub project_name: Option<String>,
    pub project_id: Option<i64>,
    pub directory_name: Option<String>,
    pub directory_id: Option<i64>,
    pub source_name: Option<String>,
    pub pending_source: PendingDocument,
}

/// Final source ids of the documents OCR resolved, in input order
pub fn resolved_source_ids(documents: &[PendingDocument]) -> Vec<SourceId> {
    documents
        .iter()
        .filter_map(|doc| doc.final_source_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending(id: PendingSourceId, status: &str, final_id: Option<SourceId>) -> PendingDocument {
        PendingDocument {
            pending_source_id: id,
            name: Some(format!("doc-{}.pdf", id)),
            source_type: None,
            created_at: None,
            expires_at: None,
            confirmed_at: None,
            status: RemoteStatus::from(status),
            final_source_id: final_id,
        }
    }

    #[test]
    fn test_pending_is_not_terminal() {
        let doc = pending(1, "Pending", None);
        assert!(!doc.is_terminal());
        assert_eq!(doc.key(), 1);
    }

    #[test]
    fn test_errored_without_final_id_is_terminal() {
        let doc = pending(2, "Errored", None);
        assert!(doc.is_terminal());
        assert!(!doc.is_resolved());
    }

    #[test]
    fn test_final_id_wins_over_lagging_status() {
        let doc = pending(3, "Pending", Some(42));
        assert!(doc.is_terminal());
        assert!(doc.is_resolved());
    }

    #[test]
    fn test_resolved_source_ids_filters_unresolved() {
        let docs = vec![
            pending(1, "Complete", Some(11)),
            pending(2, "Errored", None),
            pending(3, "Complete", Some(13)),
            pending(4, "Errored", None),
            pending(5, "Complete", Some(15)),
        ];

        assert_eq!(resolved_source_ids(&docs), vec![11, 13, 15]);
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "pendingSourceId": 9,
            "name": "scan.pdf",
            "sourceType": "pdf",
            "createdAt": "2024-03-01T10:00:00Z",
            "status": "Complete",
            "finalSourceId": 900,
            "pageCount": 12
        }"#;

        let doc: PendingDocument = serde_json::from_str(json).unwrap();
        assert_eq!(doc.pending_source_id, 9);
        assert_eq!(doc.status, RemoteStatus::Complete);
        assert_eq!(doc.final_source_id, Some(900));
        assert_eq!(doc.expires_at, None);
    }

    #[test]
    fn test_deserialize_upload_response() {
        let json = r#"{
            "projectName": "Test Project",
            "projectId": 4,
            "sourceName": "scan.pdf",
            "pendingSource": {"pendingSourceId": 1, "status": "Pending", "finalSourceId": null}
        }"#;

        let resp: UploadPdfResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.project_id, Some(4));
        assert_eq!(resp.directory_id, None);
        assert_eq!(resp.pending_source.pending_source_id, 1);
        assert!(!resp.pending_source.is_terminal());
    }

    #[test]
    fn test_display_name_fallback() {
        let mut doc = pending(5, "Pending", None);
        assert_eq!(doc.display_name(), "doc-5.pdf");
        doc.name = None;
        assert_eq!(doc.display_name(), "pending source 5");
    }
}
