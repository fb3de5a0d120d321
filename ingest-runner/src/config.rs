//! Runner configuration
//!
//! Defines everything a run needs: service connection settings, the input
//! table, and the phase settings handed to the sequencer.

use ingest_core::domain::inference::ModelId;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

/// Default service base URL, including the API version prefix
pub const DEFAULT_API_URL: &str = "https://annolab-api.vectorstech.com/v1";

/// Default output layer inference results are written to
pub const DEFAULT_OUTPUT_LAYER: &str = "Gold Set";

/// Default time between polling passes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// Runner configuration
#[derive(Clone)]
pub struct Config {
    /// Identifier attached to every log line of this run
    pub run_id: Uuid,

    /// Service base URL (e.g., "https://host/v1")
    pub api_url: String,

    /// API key sent as `Authorization: Api-Key <key>`
    pub api_key: String,

    /// Project the documents are uploaded to
    pub project: String,

    /// Group the uploads and inference jobs belong to
    pub group: String,

    /// CSV file listing the documents to upload
    pub input_path: PathBuf,

    /// How long to wait between polling passes
    pub poll_interval: Duration,

    /// Inference rounds, in order; each inner list is one model group
    pub model_groups: Vec<Vec<ModelId>>,

    /// Output layer inference results are written to
    pub output_layer: String,

    /// Whether row metadata is attached to uploads
    pub attach_metadata: bool,

    /// Whether inference rounds run after OCR
    pub run_inference: bool,
}

/// Settings that shape the phases of one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub project: String,
    pub group: String,
    pub output_layer: String,
    pub attach_metadata: bool,
    pub run_inference: bool,
    pub model_groups: Vec<Vec<ModelId>>,
    pub poll_interval: Duration,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(api_key: String, project: String, group: String, input_path: PathBuf) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            project,
            group,
            input_path,
            poll_interval: DEFAULT_POLL_INTERVAL,
            model_groups: vec![vec![1], vec![2]],
            output_layer: DEFAULT_OUTPUT_LAYER.to_string(),
            attach_metadata: true,
            run_inference: true,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - INGEST_API_KEY (required)
    /// - INGEST_PROJECT (required)
    /// - INGEST_GROUP (required)
    /// - INGEST_INPUT (required, path to the CSV input table)
    /// - INGEST_API_URL (optional, default: DEFAULT_API_URL)
    /// - INGEST_POLL_INTERVAL (optional, seconds, default: 15)
    /// - INGEST_MODEL_GROUPS (optional, e.g. "1,3;2", default: "1;2")
    /// - INGEST_OUTPUT_LAYER (optional, default: "Gold Set")
    /// - INGEST_ATTACH_METADATA (optional, default: true)
    /// - INGEST_RUN_INFERENCE (optional, default: true)
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = required_var("INGEST_API_KEY")?;
        let project = required_var("INGEST_PROJECT")?;
        let group = required_var("INGEST_GROUP")?;
        let input_path = PathBuf::from(required_var("INGEST_INPUT")?);

        let mut config = Self::new(api_key, project, group, input_path);

        if let Ok(url) = std::env::var("INGEST_API_URL") {
            config = config.with_api_url(url);
        }

        if let Ok(secs) = std::env::var("INGEST_POLL_INTERVAL") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("INGEST_POLL_INTERVAL must be a number of seconds"))?;
            config = config.with_poll_interval(Duration::from_secs(secs));
        }

        if let Ok(groups) = std::env::var("INGEST_MODEL_GROUPS") {
            config = config.with_model_groups(parse_model_groups(&groups)?);
        }

        if let Ok(layer) = std::env::var("INGEST_OUTPUT_LAYER") {
            config = config.with_output_layer(layer);
        }

        if let Ok(value) = std::env::var("INGEST_ATTACH_METADATA") {
            config = config.with_attach_metadata(parse_flag("INGEST_ATTACH_METADATA", &value)?);
        }

        if let Ok(value) = std::env::var("INGEST_RUN_INFERENCE") {
            config = config.with_run_inference(parse_flag("INGEST_RUN_INFERENCE", &value)?);
        }

        Ok(config)
    }

    /// Sets the service base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Sets the time between polling passes
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Replaces the inference rounds
    pub fn with_model_groups(mut self, model_groups: Vec<Vec<ModelId>>) -> Self {
        self.model_groups = model_groups;
        self
    }

    /// Sets the output layer inference results are written to
    pub fn with_output_layer(mut self, output_layer: impl Into<String>) -> Self {
        self.output_layer = output_layer.into();
        self
    }

    /// Enables or disables attaching row metadata to uploads
    pub fn with_attach_metadata(mut self, attach_metadata: bool) -> Self {
        self.attach_metadata = attach_metadata;
        self
    }

    /// Enables or disables the inference rounds
    pub fn with_run_inference(mut self, run_inference: bool) -> Self {
        self.run_inference = run_inference;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_key.is_empty() {
            anyhow::bail!("api_key cannot be empty");
        }

        if self.project.is_empty() {
            anyhow::bail!("project cannot be empty");
        }

        if self.group.is_empty() {
            anyhow::bail!("group cannot be empty");
        }

        if self.input_path.as_os_str().is_empty() {
            anyhow::bail!("input_path cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.model_groups.iter().any(Vec::is_empty) {
            anyhow::bail!("model groups cannot be empty");
        }

        Ok(())
    }

    /// Settings the sequencer needs for this run
    pub fn pipeline_settings(&self) -> PipelineSettings {
        PipelineSettings {
            project: self.project.clone(),
            group: self.group.clone(),
            output_layer: self.output_layer.clone(),
            attach_metadata: self.attach_metadata,
            run_inference: self.run_inference,
            model_groups: self.model_groups.clone(),
            poll_interval: self.poll_interval,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("run_id", &self.run_id)
            .field("api_url", &self.api_url)
            .field("api_key", &"<redacted>")
            .field("project", &self.project)
            .field("group", &self.group)
            .field("input_path", &self.input_path)
            .field("poll_interval", &self.poll_interval)
            .field("model_groups", &self.model_groups)
            .field("output_layer", &self.output_layer)
            .field("attach_metadata", &self.attach_metadata)
            .field("run_inference", &self.run_inference)
            .finish()
    }
}

fn required_var(name: &str) -> anyhow::Result<String> {
    std::env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable not set", name))
}

/// Parses model groups written as "1,3;2": groups split by `;`, ids by `,`
///
/// Blank segments are ignored so a trailing separator is harmless.
pub fn parse_model_groups(value: &str) -> anyhow::Result<Vec<Vec<ModelId>>> {
    value
        .split(';')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(|group| {
            group
                .split(',')
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(|id| {
                    id.parse::<ModelId>()
                        .map_err(|_| anyhow::anyhow!("invalid model id '{}'", id))
                })
                .collect()
        })
        .collect()
}

fn parse_flag(name: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("{} must be true or false, got '{}'", name, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config::new(
            "key".to_string(),
            "Test Project".to_string(),
            "luke".to_string(),
            PathBuf::from("rows.csv"),
        )
    }

    #[test]
    fn test_default_config() {
        let config = config();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(15));
        assert_eq!(config.model_groups, vec![vec![1], vec![2]]);
        assert_eq!(config.output_layer, "Gold Set");
        assert!(config.attach_metadata);
        assert!(config.run_inference);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = config();

        config.api_key = String::new();
        assert!(config.validate().is_err());
        config.api_key = "key".to_string();

        config.api_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
        config.api_url = "http://localhost:8080/v1".to_string();
        assert!(config.validate().is_ok());

        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        config.poll_interval = Duration::from_secs(1);
        config.model_groups = vec![vec![1], vec![]];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_model_groups() {
        assert_eq!(parse_model_groups("1;2").unwrap(), vec![vec![1], vec![2]]);
        assert_eq!(
            parse_model_groups(" 1, 3 ; 2 ;").unwrap(),
            vec![vec![1, 3], vec![2]]
        );
        assert!(parse_model_groups("").unwrap().is_empty());
        assert!(parse_model_groups("1;x").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("X", "TRUE").unwrap());
        assert!(!parse_flag("X", "0").unwrap());
        assert!(parse_flag("X", "maybe").is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let mut config = config();
        config.api_key = "super-secret".to_string();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_builder_setters() {
        let config = config()
            .with_api_url("http://localhost:9000/v1")
            .with_poll_interval(Duration::from_secs(2))
            .with_model_groups(vec![vec![4, 5]])
            .with_output_layer("Review")
            .with_attach_metadata(false)
            .with_run_inference(false);

        assert_eq!(config.api_url, "http://localhost:9000/v1");
        assert!(config.validate().is_ok());

        let settings = config.pipeline_settings();
        assert_eq!(settings.poll_interval, Duration::from_secs(2));
        assert_eq!(settings.model_groups, vec![vec![4, 5]]);
        assert_eq!(settings.output_layer, "Review");
        assert!(!settings.attach_metadata);
        assert!(!settings.run_inference);
    }

    #[test]
    fn test_pipeline_settings() {
        let settings = config().pipeline_settings();
        assert_eq!(settings.project, "Test Project");
        assert_eq!(settings.group, "luke");
        assert_eq!(settings.poll_interval, DEFAULT_POLL_INTERVAL);
    }
}
