//! Code review worker

use async_trait::async_trait;
use rolerun_application::{Worker, WorkerError};
use rolerun_domain::{Role, WorkReport};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info, warn};

const GIT_DIFF_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_LISTED_FILES: usize = 5;

/// Reviews the files changed by the most recent commit.
pub struct CodeReviewWorker {
    role: Role,
    repo_dir: Option<PathBuf>,
}

impl CodeReviewWorker {
    pub fn new() -> Self {
        Self {
            role: Role::CodeReviewer,
            repo_dir: None,
        }
    }

    /// Run `git` in `dir` instead of the current working directory.
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    async fn changed_files(&self) -> Result<Vec<String>, String> {
        let mut command = Command::new("git");
        command.args(["diff", "--name-only", "HEAD~1..HEAD"]);
        if let Some(dir) = &self.repo_dir {
            command.current_dir(dir);
        }

        let output = tokio::time::timeout(GIT_DIFF_TIMEOUT, command.output())
            .await
            .map_err(|_| "git diff timed out".to_string())?
            .map_err(|err| format!("git diff failed to start: {err}"))?;

        if !output.status.success() {
            return Err("could not get list of changed files".to_string());
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

impl Default for CodeReviewWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for CodeReviewWorker {
    fn role(&self) -> &Role {
        &self.role
    }

    async fn perform(&self, iteration: u32) -> Result<WorkReport, WorkerError> {
        info!(iteration, "performing code review analysis");

        match self.changed_files().await {
            Ok(files) => {
                info!(count = files.len(), "found changed files to review");
                for file in files.iter().take(MAX_LISTED_FILES) {
                    debug!(file, "reviewing file");
                }
                Ok(WorkReport::new(
                    files.len(),
                    format!("reviewed {} changed files", files.len()),
                ))
            }
            Err(reason) => {
                warn!(%reason, "code review degraded");
                Ok(WorkReport::new(0, reason))
            }
        }
    }
}
