//! Raw TOML configuration data types.
//!
//! These structs represent the exact structure of a role file. Every field
//! has a default, so a partial file deserializes into the default set with
//! only its explicit keys overridden; defaults never clobber loaded values.

use rolerun_application::{AgentConfig, WorkParams};
use rolerun_domain::Role;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete role file configuration (raw TOML structure).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Display name; defaults to the role name when absent.
    pub name: Option<String>,
    /// Role description; defaults to "Agent role: <role>" when absent.
    pub description: Option<String>,
    /// Per-work-unit deadline in seconds.
    pub timeout: u64,
    /// Work-phase attempt budget.
    pub retry_count: u32,
    /// Declared capabilities.
    pub capabilities: Vec<String>,
    /// Work loop parameters.
    pub config: FileWorkConfig,
}

/// The nested `[config]` section of a role file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileWorkConfig {
    pub max_iterations: u32,
    pub error_threshold: u32,
    pub cooldown_seconds: f64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            timeout: 300,
            retry_count: 3,
            capabilities: vec!["basic".to_string()],
            config: FileWorkConfig::default(),
        }
    }
}

impl Default for FileWorkConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            error_threshold: 5,
            cooldown_seconds: 5.0,
        }
    }
}

impl FileConfig {
    /// Resolve into the merged [`AgentConfig`] a run consumes.
    pub fn into_agent_config(self, role: &Role) -> AgentConfig {
        AgentConfig {
            name: self.name.unwrap_or_else(|| role.name().to_string()),
            description: self
                .description
                .unwrap_or_else(|| format!("Agent role: {role}")),
            timeout: Duration::from_secs(self.timeout),
            retry_count: self.retry_count,
            capabilities: self.capabilities,
            work: WorkParams {
                max_iterations: self.config.max_iterations,
                error_threshold: self.config.error_threshold,
                cooldown: saturating_secs(self.config.cooldown_seconds),
            },
        }
    }
}

/// Negative and NaN clamp to zero; values beyond the representable range
/// saturate instead of panicking.
fn saturating_secs(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds.max(0.0)).unwrap_or(Duration::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
name = "reviewer"
description = "Reviews pull requests"
timeout = 120
retry_count = 7
capabilities = ["basic", "review"]

[config]
max_iterations = 4
error_threshold = 2
cooldown_seconds = 1.5
"#;

        let file: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(file.name.as_deref(), Some("reviewer"));
        assert_eq!(file.timeout, 120);
        assert_eq!(file.retry_count, 7);
        assert_eq!(file.capabilities.len(), 2);
        assert_eq!(file.config.max_iterations, 4);
        assert_eq!(file.config.cooldown_seconds, 1.5);
    }

    #[test]
    fn test_partial_config_gets_defaults_without_overriding() {
        let toml_str = r#"
retry_count = 7

[config]
max_iterations = 2
"#;

        let file: FileConfig = toml::from_str(toml_str).unwrap();
        // Explicit values survive.
        assert_eq!(file.retry_count, 7);
        assert_eq!(file.config.max_iterations, 2);
        // Absent keys come from the fixed defaults.
        assert_eq!(file.timeout, 300);
        assert_eq!(file.capabilities, vec!["basic".to_string()]);
        assert_eq!(file.config.error_threshold, 5);
        assert_eq!(file.config.cooldown_seconds, 5.0);
    }

    #[test]
    fn test_empty_config_is_pure_defaults() {
        let file: FileConfig = toml::from_str("").unwrap();
        let defaults = FileConfig::default();
        assert_eq!(file.timeout, defaults.timeout);
        assert_eq!(file.retry_count, defaults.retry_count);
        assert_eq!(file.config.max_iterations, defaults.config.max_iterations);
    }

    #[test]
    fn test_into_agent_config_derives_name_from_role() {
        let config = FileConfig::default().into_agent_config(&Role::Testing);
        assert_eq!(config.name, "testing");
        assert_eq!(config.description, "Agent role: testing");
        assert_eq!(config.timeout, Duration::from_secs(300));
        assert_eq!(config.work.cooldown, Duration::from_secs(5));
    }

    #[test]
    fn test_into_agent_config_keeps_explicit_name() {
        let file = FileConfig {
            name: Some("custom name".to_string()),
            ..FileConfig::default()
        };
        let config = file.into_agent_config(&Role::Testing);
        assert_eq!(config.name, "custom name");
    }

    #[test]
    fn test_huge_cooldown_saturates_instead_of_panicking() {
        let file = FileConfig {
            config: FileWorkConfig {
                cooldown_seconds: 1e30,
                ..FileWorkConfig::default()
            },
            ..FileConfig::default()
        };
        let config = file.into_agent_config(&Role::Testing);
        assert_eq!(config.work.cooldown, Duration::MAX);
    }

    #[test]
    fn test_negative_cooldown_is_clamped() {
        let file = FileConfig {
            config: FileWorkConfig {
                cooldown_seconds: -1.0,
                ..FileWorkConfig::default()
            },
            ..FileConfig::default()
        };
        let config = file.into_agent_config(&Role::Testing);
        assert_eq!(config.work.cooldown, Duration::ZERO);
    }
}
