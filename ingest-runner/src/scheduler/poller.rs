//! Job poller
//!
//! Refreshes a batch of remote jobs on a fixed interval until all of them
//! are terminal. Jobs are refreshed one at a time, in input order, and a
//! terminal job is never fetched again.
//!
//! There is no overall deadline: a job the service never finishes keeps the
//! poller waiting.

use ingest_client::Result as ClientResult;
use ingest_core::domain::job::{RemoteJob, count_incomplete};
use std::future::Future;
use tokio::time::{self, Duration};
use tracing::{debug, info};

use crate::scheduler::error::PhaseError;

/// Polls remote jobs to a terminal state
#[derive(Debug, Clone)]
pub struct Poller {
    interval: Duration,
}

impl Poller {
    /// Creates a poller waiting `interval` between passes
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Refreshes `jobs` until every one of them is terminal
    ///
    /// Each pass calls `refresh` once per non-terminal job and replaces the
    /// job with the result. If the pass leaves everything terminal the jobs
    /// are returned right away, otherwise the poller sleeps for the interval
    /// and runs another pass.
    ///
    /// The returned jobs are in input order. The first refresh failure aborts
    /// polling for the whole batch, and so does a refresh answering with a
    /// record whose key differs from the one requested.
    pub async fn poll_until_terminal<J, F, Fut>(
        &self,
        mut jobs: Vec<J>,
        mut refresh: F,
    ) -> Result<Vec<J>, PhaseError>
    where
        J: RemoteJob,
        F: FnMut(J::Key) -> Fut,
        Fut: Future<Output = ClientResult<J>>,
    {
        let mut pass: u64 = 0;

        loop {
            pass += 1;

            for job in &mut jobs {
                if job.is_terminal() {
                    continue;
                }

                let key = job.key();
                debug!("Refreshing {} (pass {})", key, pass);

                let updated = refresh(key).await.map_err(|source| PhaseError::Refresh {
                    key: key.to_string(),
                    source,
                })?;

                if updated.key() != key {
                    return Err(PhaseError::KeyMismatch {
                        expected: key.to_string(),
                        got: updated.key().to_string(),
                    });
                }

                *job = updated;
            }

            let incomplete = count_incomplete(&jobs);
            if incomplete == 0 {
                debug!("All {} job(s) terminal after {} pass(es)", jobs.len(), pass);
                return Ok(jobs);
            }

            info!(
                "{} of {} job(s) incomplete, polling again in {:?}",
                incomplete,
                jobs.len(),
                self.interval
            );

            time::sleep(self.interval).await;
        }
    }
}
