//! Infrastructure layer for rolerun
//!
//! Adapters implementing the application ports: TOML configuration loading
//! with candidate-path search, external tool probing, per-role simulated
//! workers, JSONL run-event logging, the signal listener, and the tokio
//! sleeper.

pub mod clock;
pub mod config;
pub mod logging;
pub mod probe;
pub mod signal;
pub mod work;

// Re-export commonly used types
pub use clock::TokioSleeper;
pub use config::{ConfigLoader, FileConfig, FileWorkConfig};
pub use logging::JsonlRunLogger;
pub use probe::SystemToolProbe;
pub use signal::install_signal_handlers;
pub use work::{
    CodeReviewWorker, DocumentationWorker, GenericWorker, TestingWorker, worker_for_role,
};
