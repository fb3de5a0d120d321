//! Ingest Runner
//!
//! Batch document-ingestion client for a remote document-processing service.
//!
//! Architecture:
//! - Configuration: Load settings from environment variables
//! - Rows: Read the CSV input table
//! - Repositories: HTTP communication with the service (documents, inference)
//! - Scheduler: Phase sequencing and status polling
//!
//! A run uploads every listed file, waits for OCR to finish on all of them,
//! then runs each configured model group as a batch inference round, waiting
//! for each round to finish before starting the next.

mod config;
mod repository;
mod rows;
mod scheduler;

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::repository::{
    DocumentRepository, HttpDocumentRepository, HttpInferenceRepository, InferenceRepository,
};
use crate::scheduler::{PhaseSequencer, RunSummary};
use ingest_client::IngestClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ingest_runner=info,ingest_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ingest runner");

    let config = load_config()?;
    let span = info_span!("run", run_id = %config.run_id);

    run(config).instrument(span).await
}

/// Loads configuration from environment variables and validates it
fn load_config() -> Result<Config> {
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    Ok(config)
}

async fn run(config: Config) -> Result<()> {
    info!(
        "Loaded configuration: api_url={}, project={}, group={}, input={}",
        config.api_url,
        config.project,
        config.group,
        config.input_path.display()
    );

    let rows = rows::read_rows(&config.input_path)?;
    info!("Read {} row(s) from input table", rows.len());

    // One client, and so one connection pool, for the whole run
    let client = Arc::new(
        IngestClient::new(config.api_url.clone(), &config.api_key)
            .context("Failed to create API client")?,
    );

    let documents: Arc<dyn DocumentRepository> =
        Arc::new(HttpDocumentRepository::new(Arc::clone(&client)));
    let inference: Arc<dyn InferenceRepository> =
        Arc::new(HttpInferenceRepository::new(Arc::clone(&client)));

    info!(
        "Poll interval: {:?}, model groups: {:?}, inference enabled: {}",
        config.poll_interval, config.model_groups, config.run_inference
    );

    let sequencer = PhaseSequencer::new(config.pipeline_settings(), documents, inference);

    match sequencer.run(&rows).await {
        Ok(summary) => {
            report(&summary);
            Ok(())
        }
        Err(e) => {
            let e = anyhow::Error::new(e);
            error!("Run aborted: {:#}", e);
            Err(e)
        }
    }
}

/// Logs the final state of a completed run
fn report(summary: &RunSummary) {
    info!(
        "Run complete: {} document(s) uploaded, {} resolved, {} unresolved",
        summary.documents.len(),
        summary.resolved_count(),
        summary.unresolved_count()
    );

    for round in &summary.rounds {
        if round.is_skipped() {
            info!("  batch {}: skipped", round.round);
            continue;
        }

        info!(
            "  batch {} (models {:?}): {} job(s), {} errored, took {}s",
            round.round,
            round.model_ids,
            round.jobs.len(),
            round.errored_count(),
            (round.completed_at - round.started_at).num_seconds()
        );
    }
}
