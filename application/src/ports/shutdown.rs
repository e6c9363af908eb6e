//! Cooperative shutdown handle.
//!
//! Replaces asynchronous signal-handler control flow: the signal listener
//! only records why shutdown was requested and cancels the token; the run
//! loop observes the token between iterations and inside every sleep, so the
//! normal exit and cleanup path is always the one taken.

use rolerun_domain::ShutdownReason;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

/// Shared handle used to request and observe a graceful shutdown.
#[derive(Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
    reason: Arc<OnceLock<ShutdownReason>>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown. The first reason wins; later triggers are no-ops.
    pub fn trigger(&self, reason: ShutdownReason) {
        let _ = self.reason.set(reason);
        self.token.cancel();
    }

    /// Whether shutdown has been requested.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// The recorded reason, if shutdown was requested.
    pub fn reason(&self) -> Option<ShutdownReason> {
        self.reason.get().copied()
    }

    /// Resolves when shutdown is requested.
    pub async fn triggered(&self) {
        self.token.cancelled().await;
    }
}
