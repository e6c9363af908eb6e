//! Documentation worker

use async_trait::async_trait;
use rolerun_application::{Worker, WorkerError};
use rolerun_domain::{Role, WorkReport};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const DOC_CANDIDATES: &[&str] = &["README.md", "CONTRIBUTING.md", "docs", "documentation"];

/// Surveys the well-known documentation files and directories of a project.
pub struct DocumentationWorker {
    role: Role,
    base_dir: Option<PathBuf>,
    analysis_delay: Duration,
}

impl DocumentationWorker {
    pub fn new() -> Self {
        Self {
            role: Role::Documentation,
            base_dir: None,
            analysis_delay: Duration::from_secs(2),
        }
    }

    /// Look for documentation under `dir` instead of the working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Override the simulated analysis time.
    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = delay;
        self
    }

    fn found_docs(&self) -> Vec<String> {
        let base = self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        DOC_CANDIDATES
            .iter()
            .filter(|candidate| base.join(candidate).exists())
            .map(|candidate| candidate.to_string())
            .collect()
    }
}

impl Default for DocumentationWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for DocumentationWorker {
    fn role(&self) -> &Role {
        &self.role
    }

    async fn perform(&self, iteration: u32) -> Result<WorkReport, WorkerError> {
        info!(iteration, "analyzing documentation needs");

        let docs = self.found_docs();
        info!(count = docs.len(), "found documentation files/directories");

        tokio::time::sleep(self.analysis_delay).await;
        info!("documentation analysis completed");

        let detail = if docs.is_empty() {
            "no documentation found".to_string()
        } else {
            format!("found: {}", docs.join(", "))
        };
        Ok(WorkReport::new(docs.len(), detail))
    }
}
