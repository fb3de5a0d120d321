//! Remote job abstraction
//!
//! A remote job is anything the runner tracks until the service reports it
//! done: an uploaded document waiting on OCR, or a submitted inference batch.

use std::fmt;

/// A record tracked to completion on the document-processing service
pub trait RemoteJob {
    /// Identifier used to ask the service for the record's latest state
    type Key: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync;

    /// Returns the lookup key for a status refresh
    fn key(&self) -> Self::Key;

    /// Returns `true` when no further state change is expected
    fn is_terminal(&self) -> bool;
}

/// Returns `true` if every job in the slice is terminal
pub fn all_terminal<J: RemoteJob>(jobs: &[J]) -> bool {
    jobs.iter().all(RemoteJob::is_terminal)
}

/// Number of jobs that still need polling
pub fn count_incomplete<J: RemoteJob>(jobs: &[J]) -> usize {
    jobs.iter().filter(|job| !job.is_terminal()).count()
}
