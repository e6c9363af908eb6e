//! Work unit results

use serde::Serialize;

/// Summary of a single completed work unit.
///
/// Workers report what they looked at so iterations can be logged and
/// inspected; the content carries no behavioral guarantees.
#[derive(Debug, Clone, Serialize)]
pub struct WorkReport {
    /// Number of items (files, directories, matches) the work unit examined.
    pub items: usize,
    /// Human-readable note about what happened.
    pub detail: String,
}

impl WorkReport {
    pub fn new(items: usize, detail: impl Into<String>) -> Self {
        Self {
            items,
            detail: detail.into(),
        }
    }

    /// Report for a work unit that examined nothing.
    pub fn empty(detail: impl Into<String>) -> Self {
        Self::new(0, detail)
    }
}
