//! Standalone environment validation.
//!
//! Backs the `--validate` flag: probes every required external tool and
//! reports per-tool status without running the lifecycle.

use crate::ports::tool_probe::{ToolProbe, ToolStatus};
use crate::use_cases::REQUIRED_TOOLS;
use std::sync::Arc;
use tracing::info;

/// Per-tool results of a validation pass.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub checks: Vec<ToolStatus>,
}

impl ValidationReport {
    pub fn all_available(&self) -> bool {
        self.checks.iter().all(|check| check.available)
    }

    /// Exit code for validation mode: 0 when everything is available.
    pub fn exit_code(&self) -> i32 {
        if self.all_available() { 0 } else { 1 }
    }
}

/// Use case for the standalone dependency check.
pub struct ValidateSetupUseCase<P: ToolProbe> {
    tool_probe: Arc<P>,
}

impl<P: ToolProbe> ValidateSetupUseCase<P> {
    pub fn new(tool_probe: Arc<P>) -> Self {
        Self { tool_probe }
    }

    pub async fn execute(&self) -> ValidationReport {
        info!(tools = ?REQUIRED_TOOLS, "validating setup");

        let checks = futures::future::join_all(
            REQUIRED_TOOLS.iter().map(|tool| self.tool_probe.probe(tool)),
        )
        .await;

        ValidationReport { checks }
    }
}
