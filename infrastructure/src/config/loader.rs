//! Configuration file loader with ordered candidate-path search.
//!
//! Search order (first hit wins):
//! 1. Explicit path from `--config` (if provided)
//! 2. Project: `roles/<role>.toml`
//! 3. Project: `.github/roles/<role>.toml`
//! 4. Project: `config/roles/<role>.toml`
//! 5. XDG config dir: `rolerun/roles/<role>.toml`
//!
//! A file that exists but fails to parse is logged and skipped, never fatal;
//! when no candidate is usable the fixed defaults apply. A parsed file is
//! deep-merged over the serialized defaults, so absent keys are populated
//! without overriding anything explicit.

use crate::config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use rolerun_application::{ConfigProvenance, ConfigSource, ConfigSourceError, LoadedConfig};
use rolerun_domain::Role;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Loader that discovers and merges role configuration files.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    base_dir: Option<PathBuf>,
    explicit_path: Option<PathBuf>,
    defaults_only: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve project-relative candidates against `dir` instead of the
    /// current working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Consult an explicit config file before the fixed candidates.
    pub fn with_explicit_path(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_path = path;
        self
    }

    /// Skip file discovery entirely (for `--no-config`).
    pub fn defaults_only(mut self) -> Self {
        self.defaults_only = true;
        self
    }

    /// Candidate locations for a role, in priority order.
    pub fn candidate_paths(&self, role: &Role) -> Vec<PathBuf> {
        let base = self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut paths = Vec::new();

        if let Some(explicit) = &self.explicit_path {
            paths.push(explicit.clone());
        }

        let file_name = format!("{role}.toml");
        paths.push(base.join("roles").join(&file_name));
        paths.push(base.join(".github").join("roles").join(&file_name));
        paths.push(base.join("config").join("roles").join(&file_name));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("rolerun").join("roles").join(&file_name));
        }

        paths
    }

    fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }
}

impl ConfigSource for ConfigLoader {
    fn load(&self, role: &Role) -> Result<LoadedConfig, ConfigSourceError> {
        if self.defaults_only {
            info!(role = %role, "config files disabled, using defaults");
            return Ok(LoadedConfig::defaults(role));
        }

        for path in self.candidate_paths(role) {
            if !path.exists() {
                continue;
            }
            match Self::load_file(&path) {
                Ok(file) => {
                    info!(role = %role, path = %path.display(), "loaded role config");
                    return Ok(LoadedConfig {
                        config: file.into_agent_config(role),
                        provenance: ConfigProvenance::File(path),
                    });
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse role config, trying next source"
                    );
                }
            }
        }

        info!(role = %role, "no configuration file found, using defaults");
        Ok(LoadedConfig::defaults(role))
    }
}
