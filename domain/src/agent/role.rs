//! Agent role selection.
//!
//! A [`Role`] picks the configuration file and the simulated work variant for
//! a run. Known roles are explicit variants; unrecognized role names are kept
//! verbatim in [`Role::Custom`] and run the generic work variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The role an agent run executes under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Reviews recently changed files
    CodeReviewer,
    /// Surveys documentation coverage
    Documentation,
    /// Surveys test coverage
    Testing,
    /// Fallback for unrecognized role names; runs generic work
    Custom(String),
}

impl Role {
    /// Parse a role name. Unknown names become [`Role::Custom`], never an error.
    pub fn parse(name: &str) -> Self {
        match name.trim() {
            "code-reviewer" => Role::CodeReviewer,
            "documentation" => Role::Documentation,
            "testing" => Role::Testing,
            other => Role::Custom(other.to_string()),
        }
    }

    /// The role name as used in config file paths and log fields.
    pub fn name(&self) -> &str {
        match self {
            Role::CodeReviewer => "code-reviewer",
            Role::Documentation => "documentation",
            Role::Testing => "testing",
            Role::Custom(name) => name,
        }
    }

    /// Whether this is the fallback variant for an unrecognized name.
    pub fn is_custom(&self) -> bool {
        matches!(self, Role::Custom(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}
