//! Core domain types
//!
//! These types mirror the records the document-processing service hands back
//! and are shared between the HTTP client (which deserializes them) and the
//! runner (which polls them to a terminal state).

pub mod document;
pub mod inference;
pub mod job;
pub mod row;
pub mod status;
