//! Repository layer
//!
//! Repositories are thin wrappers over the HTTP client, one per remote
//! concern. The sequencer only sees the traits, so tests can script the
//! service's answers.

mod inference;
mod sources;

// Re-export traits
pub use inference::InferenceRepository;
pub use sources::DocumentRepository;

// Re-export implementations
pub use inference::HttpInferenceRepository;
pub use sources::HttpDocumentRepository;
