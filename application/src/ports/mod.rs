//! Ports (interfaces) implemented by the infrastructure layer

pub mod config_source;
pub mod progress;
pub mod run_logger;
pub mod shutdown;
pub mod sleeper;
pub mod tool_probe;
pub mod worker;
