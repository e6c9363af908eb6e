//! Testing worker

use async_trait::async_trait;
use rolerun_application::{Worker, WorkerError};
use rolerun_domain::{Role, WorkReport};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

const TEST_DIRS: &[&str] = &["tests", "test"];
const TEST_GLOBS: &[&str] = &["test_*.py", "*_test.py", "tests/**/*.rs"];

/// Surveys test directories and test files by glob pattern.
pub struct TestingWorker {
    role: Role,
    base_dir: Option<PathBuf>,
    analysis_delay: Duration,
}

impl TestingWorker {
    pub fn new() -> Self {
        Self {
            role: Role::Testing,
            base_dir: None,
            analysis_delay: Duration::from_secs(3),
        }
    }

    /// Look for tests under `dir` instead of the working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Override the simulated analysis time.
    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = delay;
        self
    }

    fn found_tests(&self) -> Vec<String> {
        let base = self.base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut found = Vec::new();

        for dir in TEST_DIRS {
            if base.join(dir).exists() {
                found.push(dir.to_string());
            }
        }

        for pattern in TEST_GLOBS {
            let full_pattern = base.join(pattern).display().to_string();
            match glob::glob(&full_pattern) {
                Ok(entries) => {
                    for entry in entries.flatten() {
                        if let Ok(relative) = entry.strip_prefix(&base) {
                            found.push(relative.display().to_string());
                        }
                    }
                }
                Err(err) => warn!(pattern, error = %err, "invalid test glob"),
            }
        }

        found.sort();
        found.dedup();
        found
    }
}

impl Default for TestingWorker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Worker for TestingWorker {
    fn role(&self) -> &Role {
        &self.role
    }

    async fn perform(&self, iteration: u32) -> Result<WorkReport, WorkerError> {
        info!(iteration, "analyzing test coverage and quality");

        let tests = self.found_tests();
        info!(count = tests.len(), "found test files/directories");

        tokio::time::sleep(self.analysis_delay).await;
        info!("test analysis completed");

        let detail = if tests.is_empty() {
            "no tests found".to_string()
        } else {
            format!("found {} test files/directories", tests.len())
        };
        Ok(WorkReport::new(tests.len(), detail))
    }
}
