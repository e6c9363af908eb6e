//! Domain error types

use thiserror::Error;

/// Errors that can end or redirect an agent run.
///
/// The variants carry distinct propagation rules:
///
/// - [`AgentError::Environment`] is fatal and never retried.
/// - [`AgentError::Configuration`] is absorbed by the defaults fallback and
///   never reaches the top level.
/// - [`AgentError::Work`] is retried up to the configured bound, then fatal.
/// - [`AgentError::Interrupted`] is not an error in the usual sense; it maps
///   to its own exit code and must never be retried.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("environment validation failed: {0}")]
    Environment(String),

    #[error("configuration could not be loaded: {0}")]
    Configuration(String),

    #[error("agent work failed: {0}")]
    Work(String),

    #[error("run interrupted by shutdown signal")]
    Interrupted,
}

impl AgentError {
    /// Check if this error represents a shutdown-signal interruption
    pub fn is_interrupted(&self) -> bool {
        matches!(self, AgentError::Interrupted)
    }

    /// Check if this error is fatal without retry
    pub fn is_fatal(&self) -> bool {
        matches!(self, AgentError::Environment(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interrupted_display() {
        let error = AgentError::Interrupted;
        assert_eq!(error.to_string(), "run interrupted by shutdown signal");
    }

    #[test]
    fn test_is_interrupted_check() {
        assert!(AgentError::Interrupted.is_interrupted());
        assert!(!AgentError::Work("boom".to_string()).is_interrupted());
        assert!(!AgentError::Environment("no git".to_string()).is_interrupted());
        assert!(!AgentError::Configuration("bad toml".to_string()).is_interrupted());
    }

    #[test]
    fn test_only_environment_is_fatal() {
        assert!(AgentError::Environment("no git".to_string()).is_fatal());
        assert!(!AgentError::Work("boom".to_string()).is_fatal());
        assert!(!AgentError::Interrupted.is_fatal());
    }

    #[test]
    fn test_work_error_carries_context() {
        let error = AgentError::Work("iteration 3 timed out".to_string());
        assert!(error.to_string().contains("iteration 3 timed out"));
    }
}
