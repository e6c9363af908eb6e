//! Application configuration types

mod agent_config;

pub use agent_config::{AgentConfig, WorkParams};
