//! Data Transfer Objects sent to the document-processing service

pub mod inference;
pub mod source;
