//! Scheduler layer for the runner
//!
//! Drives a run through its phases: upload, wait for OCR, then one
//! submit-and-wait round per model group. Every wait goes through the
//! `Poller`, and a phase only starts once the previous one is fully drained.

pub mod error;
pub mod poller;
pub mod sequencer;

pub use error::PhaseError;
pub use poller::Poller;
pub use sequencer::{PhaseSequencer, RunSummary};
