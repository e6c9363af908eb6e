//! Per-role work unit implementations.
//!
//! Each worker performs one bounded unit of analysis for its role. External
//! command or filesystem trouble is absorbed into the report detail rather
//! than failing the run; a degraded environment is a finding, not an error.

mod code_review;
mod documentation;
mod generic;
mod testing;

pub use code_review::CodeReviewWorker;
pub use documentation::DocumentationWorker;
pub use generic::GenericWorker;
pub use testing::TestingWorker;

use rolerun_application::Worker;
use rolerun_domain::Role;
use std::sync::Arc;

/// Select the worker implementation for a role.
///
/// Unknown roles fall back to the generic worker.
pub fn worker_for_role(role: &Role) -> Arc<dyn Worker> {
    match role {
        Role::CodeReviewer => Arc::new(CodeReviewWorker::new()),
        Role::Documentation => Arc::new(DocumentationWorker::new()),
        Role::Testing => Arc::new(TestingWorker::new()),
        Role::Custom(_) => Arc::new(GenericWorker::new(role.clone())),
    }
}
