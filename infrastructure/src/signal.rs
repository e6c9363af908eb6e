//! OS signal listener driving cooperative shutdown.
//!
//! The listener only records the shutdown request on the shared [`Shutdown`]
//! handle; the run loop observes it at its checkpoints and winds down. No
//! work is done inside signal context.

use rolerun_application::Shutdown;
use rolerun_domain::ShutdownReason;
use tracing::{info, warn};

/// Spawn a background task that translates Ctrl-C and SIGTERM into a
/// shutdown request. Ctrl-C maps to an interrupt, SIGTERM to a terminate.
pub fn install_signal_handlers(shutdown: Shutdown) {
    tokio::spawn(async move {
        let reason = wait_for_signal().await;
        info!(?reason, "shutdown signal received");
        shutdown.trigger(reason);
    });
}

#[cfg(unix)]
async fn wait_for_signal() -> ShutdownReason {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(err) => {
            warn!(error = %err, "could not register SIGTERM handler, listening for Ctrl-C only");
            wait_for_interrupt().await;
            return ShutdownReason::Interrupt;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => ShutdownReason::Interrupt,
        _ = sigterm.recv() => ShutdownReason::Terminate,
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> ShutdownReason {
    wait_for_interrupt().await;
    ShutdownReason::Interrupt
}

async fn wait_for_interrupt() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Ctrl-C handler failed, waiting for cancellation instead");
        std::future::pending::<()>().await;
    }
}
