//! Use cases

pub mod run_agent;
pub mod validate;

/// External tools every run requires, probed during environment validation.
pub const REQUIRED_TOOLS: &[&str] = &["git", "curl"];
