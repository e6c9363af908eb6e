//! Sleep port.
//!
//! Backoff and cooldown delays go through this port so tests can record
//! requested durations instead of waiting them out. All lifecycle sleeps are
//! raced against the shutdown handle via [`sleep_unless_shutdown`].

use crate::ports::shutdown::Shutdown;
use async_trait::async_trait;
use rolerun_domain::AgentError;
use std::time::Duration;

/// Port for suspending execution.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleep for `duration`, returning early with [`AgentError::Interrupted`] if
/// shutdown is requested first.
pub async fn sleep_unless_shutdown(
    sleeper: &dyn Sleeper,
    duration: Duration,
    shutdown: &Shutdown,
) -> Result<(), AgentError> {
    if shutdown.is_triggered() {
        return Err(AgentError::Interrupted);
    }
    tokio::select! {
        () = sleeper.sleep(duration) => Ok(()),
        () = shutdown.triggered() => Err(AgentError::Interrupted),
    }
}
