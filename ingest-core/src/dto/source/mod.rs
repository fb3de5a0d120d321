//! Source upload DTOs

use std::path::PathBuf;

use crate::domain::row::{DocumentMetadata, UploadRow};

/// Everything needed to build one multipart PDF upload
///
/// The file itself is read by the client when the request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDocument {
    pub project_identifier: String,
    pub group_name: String,
    pub source_identifier: String,
    pub metadata: Option<DocumentMetadata>,
    pub file_path: PathBuf,
}

impl UploadDocument {
    /// Builds the upload for an input row
    ///
    /// Metadata is only attached when `attach_metadata` is set.
    pub fn from_row(
        row: &UploadRow,
        project_identifier: impl Into<String>,
        group_name: impl Into<String>,
        attach_metadata: bool,
    ) -> Self {
        Self {
            project_identifier: project_identifier.into(),
            group_name: group_name.into(),
            source_identifier: row.source_identifier(),
            metadata: attach_metadata.then(|| row.metadata()),
            file_path: row.filepath.clone(),
        }
    }
}
