//! Configuration source port.
//!
//! The adapter searches its candidate locations and hands back a fully merged
//! [`AgentConfig`] with provenance. Per-source parse failures are the
//! adapter's business (it logs and falls through); an `Err` from this port
//! means the source machinery itself broke, and callers absorb even that into
//! the defaults fallback.

use crate::config::AgentConfig;
use rolerun_domain::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Where a loaded configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProvenance {
    /// Parsed from a file at this path, merged over defaults.
    File(PathBuf),
    /// No usable source found; pure defaults.
    Defaults,
}

impl ConfigProvenance {
    pub fn is_defaults(&self) -> bool {
        matches!(self, ConfigProvenance::Defaults)
    }
}

/// A merged configuration plus where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AgentConfig,
    pub provenance: ConfigProvenance,
}

impl LoadedConfig {
    /// The pure-defaults configuration for a role.
    pub fn defaults(role: &Role) -> Self {
        Self {
            config: AgentConfig::default()
                .with_name(role.name())
                .with_description_for(role),
            provenance: ConfigProvenance::Defaults,
        }
    }
}

/// Errors from the configuration source machinery.
#[derive(Error, Debug)]
pub enum ConfigSourceError {
    #[error("config source unavailable: {0}")]
    Unavailable(String),
}

/// Port for loading role configuration.
pub trait ConfigSource: Send + Sync {
    /// Load the configuration for `role`, merged over defaults.
    fn load(&self, role: &Role) -> Result<LoadedConfig, ConfigSourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_role_name() {
        let loaded = LoadedConfig::defaults(&Role::Testing);
        assert_eq!(loaded.config.name, "testing");
        assert_eq!(loaded.config.description, "Agent role: testing");
        assert!(loaded.provenance.is_defaults());
    }

    #[test]
    fn test_defaults_keep_fixed_values() {
        let loaded = LoadedConfig::defaults(&Role::Custom("ops".to_string()));
        assert_eq!(loaded.config.retry_count, 3);
        assert_eq!(loaded.config.work.max_iterations, 10);
    }
}
