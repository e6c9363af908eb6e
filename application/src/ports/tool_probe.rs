//! External tool availability port.
//!
//! The adapter invokes the named program with a version-query argument under
//! a timeout; absence, nonzero exit, and timeout all read as unavailable.

use async_trait::async_trait;

/// Result of probing one external tool.
#[derive(Debug, Clone)]
pub struct ToolStatus {
    pub tool: String,
    pub available: bool,
    /// Version line when available, reason when not.
    pub detail: Option<String>,
}

impl ToolStatus {
    pub fn available(tool: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            tool: tool.into(),
            available: true,
            detail,
        }
    }

    pub fn unavailable(tool: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            available: false,
            detail: Some(reason.into()),
        }
    }
}

/// Port for checking whether an external tool can be invoked.
#[async_trait]
pub trait ToolProbe: Send + Sync {
    async fn probe(&self, tool: &str) -> ToolStatus;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_available_status() {
        let status = ToolStatus::available("git", Some("git version 2.47.0".to_string()));
        assert!(status.available);
        assert_eq!(status.tool, "git");
    }

    #[test]
    fn test_unavailable_status_keeps_reason() {
        let status = ToolStatus::unavailable("curl", "not found on PATH");
        assert!(!status.available);
        assert_eq!(status.detail.as_deref(), Some("not found on PATH"));
    }
}
