//! Run outcomes and exit codes.
//!
//! The exit code convention is deterministic: SIGINT-style interruption exits
//! 130, everything else that goes wrong exits 1. A SIGTERM-triggered shutdown
//! is a requested termination, not a user interruption, so it maps to 1.

use serde::Serialize;
use std::fmt;

/// Final result of an agent run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    Success,
    Failure,
    Interrupted,
}

impl RunOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::Success => 0,
            RunOutcome::Failure => 1,
            RunOutcome::Interrupted => 130,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunOutcome::Success => "success",
            RunOutcome::Failure => "failure",
            RunOutcome::Interrupted => "interrupted",
        };
        f.write_str(name)
    }
}

/// Why a cooperative shutdown was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// User interruption (SIGINT / Ctrl-C)
    Interrupt,
    /// Requested termination (SIGTERM)
    Terminate,
}

impl ShutdownReason {
    /// The outcome a run interrupted for this reason ends with.
    pub fn outcome(&self) -> RunOutcome {
        match self {
            ShutdownReason::Interrupt => RunOutcome::Interrupted,
            ShutdownReason::Terminate => RunOutcome::Failure,
        }
    }
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShutdownReason::Interrupt => "interrupt",
            ShutdownReason::Terminate => "terminate",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunOutcome::Success.exit_code(), 0);
        assert_eq!(RunOutcome::Failure.exit_code(), 1);
        assert_eq!(RunOutcome::Interrupted.exit_code(), 130);
    }

    #[test]
    fn test_interrupt_maps_to_130() {
        assert_eq!(ShutdownReason::Interrupt.outcome(), RunOutcome::Interrupted);
        assert_eq!(ShutdownReason::Interrupt.outcome().exit_code(), 130);
    }

    #[test]
    fn test_terminate_maps_to_1() {
        assert_eq!(ShutdownReason::Terminate.outcome(), RunOutcome::Failure);
        assert_eq!(ShutdownReason::Terminate.outcome().exit_code(), 1);
    }

    #[test]
    fn test_only_success_is_success() {
        assert!(RunOutcome::Success.is_success());
        assert!(!RunOutcome::Failure.is_success());
        assert!(!RunOutcome::Interrupted.is_success());
    }
}
