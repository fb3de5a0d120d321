//! Ingest HTTP Client
//!
//! A typed HTTP client for the remote document-processing service: PDF
//! uploads, pending-source (OCR) status, and batch model inference.
//!
//! Every request carries the static `Authorization: Api-Key <key>` header the
//! client was built with.
//!
//! # Example
//!
//! ```no_run
//! use ingest_client::IngestClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = IngestClient::new("https://api.example.com/v1", "secret-key")?;
//!
//!     let pending = client.get_pending_source(17).await?;
//!     println!("pending source 17 is {}", pending.status);
//!     Ok(())
//! }
//! ```

pub mod error;
mod inference;
mod sources;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

/// HTTP client for the document-processing API
///
/// Endpoints are grouped by concern:
/// - Sources: PDF upload and pending-source status
/// - Inference: batch inference submission and job status
#[derive(Debug, Clone)]
pub struct IngestClient {
    /// Base URL of the API, including the version prefix (e.g., "https://host/v1")
    base_url: String,
    /// HTTP client instance, shared by every call
    client: Client,
}

impl IngestClient {
    /// Create a new client authenticating with `api_key`
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the API
    /// * `api_key` - The API key sent as `Authorization: Api-Key <key>`
    pub fn new(base_url: impl Into<String>, api_key: &str) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Api-Key {}", api_key))
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid API key: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self::with_client(base_url, client))
    }

    /// Create a new client with a custom HTTP client
    ///
    /// The caller is responsible for configuring authentication on `client`.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses become `ApiError` carrying the response body.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
