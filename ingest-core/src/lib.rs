//! Ingest Core
//!
//! Core types and abstractions for the batch document-ingestion client.
//!
//! This crate contains:
//! - Domain types: input rows, pending documents, inference jobs and their statuses
//! - The `RemoteJob` trait the poller uses to drive records to completion
//! - DTOs: request bodies sent to the document-processing service

pub mod domain;
pub mod dto;
