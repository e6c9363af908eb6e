//! Role configuration loading

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileWorkConfig};
pub use loader::ConfigLoader;
