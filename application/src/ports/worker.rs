//! Work unit port.
//!
//! One implementation per role variant; each performs a single simulated
//! work unit. Adapters absorb their own subprocess and filesystem hiccups
//! into the report where the behavior is advisory; a [`WorkerError`] is
//! reserved for failures that should count against the retry budget.

use async_trait::async_trait;
use rolerun_domain::{Role, WorkReport};
use thiserror::Error;

/// Errors a work unit can surface to the lifecycle controller.
///
/// Deadline overruns are the controller's business; it wraps `perform` in a
/// timeout and reports them itself.
#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("work unit failed: {0}")]
    Failed(String),
}

/// Port for performing one unit of role-specific work.
#[async_trait]
pub trait Worker: Send + Sync {
    /// The role this worker serves.
    fn role(&self) -> &Role;

    /// Perform one work unit. `iteration` is zero-based.
    async fn perform(&self, iteration: u32) -> Result<WorkReport, WorkerError>;
}
