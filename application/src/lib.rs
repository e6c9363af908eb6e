//! Application layer for rolerun
//!
//! Use cases and the ports they depend on. The lifecycle controller
//! ([`RunAgentUseCase`]) drives one end-to-end run: environment validation,
//! configuration loading with defaults fallback, the bounded work loop with
//! cooldowns, retry with exponential backoff, and idempotent cleanup.
//! Infrastructure adapters implement the ports; nothing in this crate touches
//! the filesystem, processes, or signals directly.

pub mod config;
pub mod ports;
pub mod retry;
pub mod use_cases;

// Re-export commonly used types
pub use config::{AgentConfig, WorkParams};
pub use ports::{
    config_source::{ConfigProvenance, ConfigSource, ConfigSourceError, LoadedConfig},
    progress::{NoRunProgress, RunProgress},
    run_logger::{NoRunLogger, RunEvent, RunLogger},
    shutdown::Shutdown,
    sleeper::Sleeper,
    tool_probe::{ToolProbe, ToolStatus},
    worker::{Worker, WorkerError},
};
pub use retry::{RetryPolicy, execute_with_retry};
pub use use_cases::{
    REQUIRED_TOOLS,
    run_agent::{RunAgentInput, RunAgentUseCase, RunReport},
    validate::{ValidateSetupUseCase, ValidationReport},
};
