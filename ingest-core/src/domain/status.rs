//! Remote status values

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status reported by the service for a pending document or an inference job
///
/// The service sends statuses as plain strings. The values the runner acts on
/// get their own variant, anything else is kept verbatim in `Other`.
/// Build values with `From<String>`/`From<&str>` so known strings land in
/// their variant; the status checks read the string either way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum RemoteStatus {
    /// Also used while the service has not reported a status yet
    #[default]
    Pending,
    Complete,
    Finished,
    Errored,
    Other(String),
}

impl RemoteStatus {
    /// Returns `true` once the service will not change the record again
    ///
    /// Only the exact values `Complete`, `Finished` and `Errored` are terminal.
    pub fn is_terminal(&self) -> bool {
        matches!(self.as_str(), "Complete" | "Finished" | "Errored")
    }

    /// Returns `true` for the terminal failure status
    pub fn is_errored(&self) -> bool {
        self.as_str() == "Errored"
    }

    pub fn as_str(&self) -> &str {
        match self {
            RemoteStatus::Pending => "Pending",
            RemoteStatus::Complete => "Complete",
            RemoteStatus::Finished => "Finished",
            RemoteStatus::Errored => "Errored",
            RemoteStatus::Other(s) => s,
        }
    }
}

impl From<String> for RemoteStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Pending" => RemoteStatus::Pending,
            "Complete" => RemoteStatus::Complete,
            "Finished" => RemoteStatus::Finished,
            "Errored" => RemoteStatus::Errored,
            _ => RemoteStatus::Other(value),
        }
    }
}

impl From<&str> for RemoteStatus {
    fn from(value: &str) -> Self {
        RemoteStatus::from(value.to_string())
    }
}

impl From<Option<String>> for RemoteStatus {
    fn from(value: Option<String>) -> Self {
        value.map(RemoteStatus::from).unwrap_or_default()
    }
}

impl From<RemoteStatus> for String {
    fn from(status: RemoteStatus) -> Self {
        match status {
            RemoteStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RemoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
