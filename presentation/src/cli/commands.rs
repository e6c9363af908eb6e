//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for rolerun
#[derive(Parser, Debug)]
#[command(name = "rolerun")]
#[command(author, version, about = "Run a bounded agent work loop for a named role")]
#[command(long_about = r#"
Rolerun validates the environment, loads the configuration for a role, and
executes a bounded loop of work iterations with cooldowns between them.

Role configuration files are loaded from (in priority order):
1. --config <path>                 Explicit config file
2. ./roles/<role>.toml             Project-level config
3. ./.github/roles/<role>.toml
4. ./config/roles/<role>.toml
5. ~/.config/rolerun/roles/<role>.toml

Exit codes: 0 on success, 1 on failure, 130 when interrupted.

Example:
  rolerun --role code-reviewer --pr-number 123
  rolerun --role documentation --debug
  rolerun --validate
"#)]
pub struct Cli {
    /// Agent role to execute (e.g., code-reviewer, documentation, testing)
    #[arg(long, value_name = "ROLE", required_unless_present = "validate")]
    pub role: Option<String>,

    /// Pull request number (if running in PR context)
    #[arg(long, value_name = "NUMBER")]
    pub pr_number: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Validate agent configuration and dependencies, then exit
    #[arg(long)]
    pub validate: bool,

    /// Path to a role configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory for run log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}
