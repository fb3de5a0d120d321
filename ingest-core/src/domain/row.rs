//! Input row domain types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One record of the input table: a local file plus its descriptive metadata
///
/// Column names follow the input CSV (`filepath`, `orderId`, `orderItemId`,
/// `make`, `model`, `serial`, `nNumber`). Metadata columns may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRow {
    pub filepath: PathBuf,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub order_item_id: String,
    #[serde(default)]
    pub make: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub serial: String,
    /// Aircraft tail number
    #[serde(default)]
    pub n_number: String,
}

impl UploadRow {
    /// Name the service will know the document by (the file's base name)
    pub fn source_identifier(&self) -> String {
        self.filepath
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.filepath.to_string_lossy().into_owned())
    }

    /// Structured tags attached to the upload
    pub fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            order_id: self.order_id.clone(),
            order_item_id: self.order_item_id.clone(),
            make: self.make.clone(),
            model: self.model.clone(),
            serial: self.serial.clone(),
            n_number: self.n_number.clone(),
        }
    }
}

/// Metadata sent alongside an uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub order_id: String,
    pub order_item_id: String,
    pub make: String,
    pub model: String,
    pub serial: String,
    pub n_number: String,
}
