//! Lifecycle phase state machine.
//!
//! A run moves `Init → Validating → LoadingConfig → Running` and ends in
//! exactly one of `Complete`, `Failed`, or `Interrupted`. `Interrupted` is
//! reachable from any non-terminal phase via signal delivery; `Failed` is
//! reachable from `Validating` (fatal environment error) and from
//! `LoadingConfig` or `Running` once retries are exhausted.

use serde::Serialize;
use std::fmt;

/// Phase of an agent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Init,
    Validating,
    LoadingConfig,
    Running,
    Complete,
    Failed,
    Interrupted,
}

impl LifecyclePhase {
    /// Whether the run has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LifecyclePhase::Complete | LifecyclePhase::Failed | LifecyclePhase::Interrupted
        )
    }

    /// Whether `next` is a legal successor of this phase.
    pub fn can_transition_to(&self, next: LifecyclePhase) -> bool {
        if self.is_terminal() {
            return false;
        }
        // Signal delivery can interrupt any live phase.
        if next == LifecyclePhase::Interrupted {
            return true;
        }
        matches!(
            (self, next),
            (LifecyclePhase::Init, LifecyclePhase::Validating)
                | (LifecyclePhase::Validating, LifecyclePhase::LoadingConfig)
                | (LifecyclePhase::Validating, LifecyclePhase::Failed)
                | (LifecyclePhase::LoadingConfig, LifecyclePhase::Running)
                | (LifecyclePhase::LoadingConfig, LifecyclePhase::Failed)
                | (LifecyclePhase::Running, LifecyclePhase::Complete)
                | (LifecyclePhase::Running, LifecyclePhase::Failed)
        )
    }
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecyclePhase::Init => "init",
            LifecyclePhase::Validating => "validating",
            LifecyclePhase::LoadingConfig => "loading_config",
            LifecyclePhase::Running => "running",
            LifecyclePhase::Complete => "complete",
            LifecyclePhase::Failed => "failed",
            LifecyclePhase::Interrupted => "interrupted",
        };
        f.write_str(name)
    }
}
