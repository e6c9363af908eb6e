//! Domain layer for rolerun
//!
//! This crate contains the core types of an agent run. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Role
//!
//! A [`Role`] selects which configuration and simulated work variant a run
//! uses. Known roles are explicit enum variants; anything else falls back to
//! [`Role::Custom`].
//!
//! ## Lifecycle
//!
//! A run moves through [`LifecyclePhase`]s in a fixed order and ends in
//! exactly one terminal phase, which maps to a [`RunOutcome`] and its
//! process exit code.

pub mod agent;
pub mod core;
pub mod lifecycle;

// Re-export commonly used types
pub use agent::{
    role::Role,
    work::WorkReport,
};
pub use crate::core::error::AgentError;
pub use lifecycle::{
    outcome::{RunOutcome, ShutdownReason},
    phase::LifecyclePhase,
};
