//! Generic worker for roles without a dedicated implementation

use async_trait::async_trait;
use rolerun_application::{Worker, WorkerError};
use rolerun_domain::{Role, WorkReport};
use std::time::Duration;
use tracing::info;

pub struct GenericWorker {
    role: Role,
    analysis_delay: Duration,
}

impl GenericWorker {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            analysis_delay: Duration::from_secs(1),
        }
    }

    /// Override the simulated analysis time.
    pub fn with_analysis_delay(mut self, delay: Duration) -> Self {
        self.analysis_delay = delay;
        self
    }
}

#[async_trait]
impl Worker for GenericWorker {
    fn role(&self) -> &Role {
        &self.role
    }

    async fn perform(&self, iteration: u32) -> Result<WorkReport, WorkerError> {
        info!(iteration, role = %self.role, "performing generic agent analysis");
        tokio::time::sleep(self.analysis_delay).await;
        info!("generic analysis completed");
        Ok(WorkReport::new(1, format!("generic analysis for {}", self.role)))
    }
}
