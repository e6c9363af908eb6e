//! External tool availability probing.

use async_trait::async_trait;
use rolerun_application::{ToolProbe, ToolStatus};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Probe that resolves tools on `PATH` and asks each one for its version.
///
/// A tool counts as available only when it resolves and its `--version`
/// invocation exits successfully within the deadline. Absence, nonzero exit,
/// and timeout all read as unavailable.
#[derive(Debug, Clone, Default)]
pub struct SystemToolProbe;

impl SystemToolProbe {
    pub fn new() -> Self {
        Self
    }

    async fn version_of(tool: &str) -> Result<String, String> {
        let output = tokio::time::timeout(
            VERSION_PROBE_TIMEOUT,
            Command::new(tool).arg("--version").output(),
        )
        .await
        .map_err(|_| "version query timed out".to_string())?
        .map_err(|err| format!("version query failed to start: {err}"))?;

        if !output.status.success() {
            return Err(format!("version query exited with {}", output.status));
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .next()
            .unwrap_or_default()
            .trim()
            .to_string())
    }
}

#[async_trait]
impl ToolProbe for SystemToolProbe {
    async fn probe(&self, tool: &str) -> ToolStatus {
        let path = match which::which(tool) {
            Ok(path) => path,
            Err(err) => {
                debug!(tool, error = %err, "tool not found on PATH");
                return ToolStatus::unavailable(tool, "not found on PATH");
            }
        };
        debug!(tool, path = %path.display(), "tool resolved");

        match Self::version_of(tool).await {
            Ok(line) if line.is_empty() => {
                ToolStatus::available(tool, Some(path.display().to_string()))
            }
            Ok(line) => ToolStatus::available(tool, Some(line)),
            Err(reason) => {
                warn!(tool, %reason, "tool resolved but failed its version query");
                ToolStatus::unavailable(tool, reason)
            }
        }
    }
}
