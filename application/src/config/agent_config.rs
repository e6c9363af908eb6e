//! Resolved run configuration.
//!
//! [`AgentConfig`] is the merged view a run consumes read-only: whatever a
//! config source provided, with every absent key populated from the fixed
//! defaults. Construction happens once per run, in the config loader; the
//! builder methods exist for tests and programmatic callers.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Merged configuration for one agent run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Display name, defaults to the role name.
    pub name: String,
    /// Free-form description of the role.
    pub description: String,
    /// Deadline applied to each individual work unit.
    pub timeout: Duration,
    /// Attempt budget for the work phase (total attempts, not extra retries).
    pub retry_count: u32,
    /// Declared capabilities; carried as data, logged at startup.
    pub capabilities: Vec<String>,
    /// Work loop parameters (the nested `config` section of a role file).
    pub work: WorkParams,
}

/// Work loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkParams {
    /// Number of sequential work iterations.
    pub max_iterations: u32,
    /// Error budget carried from the role file; data only, not enforced here.
    pub error_threshold: u32,
    /// Delay between iterations (never after the last one).
    pub cooldown: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: "agent".to_string(),
            description: "Agent role: agent".to_string(),
            timeout: Duration::from_secs(300),
            retry_count: 3,
            capabilities: vec!["basic".to_string()],
            work: WorkParams::default(),
        }
    }
}

impl Default for WorkParams {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            error_threshold: 5,
            cooldown: Duration::from_secs(5),
        }
    }
}

impl AgentConfig {
    // ==================== Builder Methods ====================

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Fill in the role-derived description, as the defaults do for any
    /// source that omits one.
    pub fn with_description_for(mut self, role: &rolerun_domain::Role) -> Self {
        self.description = format!("Agent role: {role}");
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_count(mut self, retry_count: u32) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.work.max_iterations = max;
        self
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.work.cooldown = cooldown;
        self
    }
}
