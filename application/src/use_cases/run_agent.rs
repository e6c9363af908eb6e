//! Lifecycle controller for one agent run.
//!
//! Drives a run deterministically from `Init` to a terminal phase:
//! environment validation, configuration loading (retried, with a defaults
//! fallback that is never an error), the bounded work loop with cooldowns,
//! and idempotent cleanup on every exit path. Shutdown is cooperative: the
//! loop head and every sleep observe the shared [`Shutdown`] handle, so
//! signal delivery reaches the same exit path as normal completion.

use crate::config::AgentConfig;
use crate::ports::config_source::{ConfigProvenance, ConfigSource, LoadedConfig};
use crate::ports::progress::RunProgress;
use crate::ports::run_logger::{NoRunLogger, RunEvent, RunLogger};
use crate::ports::shutdown::Shutdown;
use crate::ports::sleeper::{Sleeper, sleep_unless_shutdown};
use crate::ports::tool_probe::ToolProbe;
use crate::ports::worker::Worker;
use crate::retry::{RetryPolicy, execute_with_retry};
use crate::use_cases::REQUIRED_TOOLS;
use rolerun_domain::{AgentError, LifecyclePhase, Role, RunOutcome};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Input for one agent run.
#[derive(Debug, Clone)]
pub struct RunAgentInput {
    pub role: Role,
    /// Contextual metadata only; logged, never otherwise consumed.
    pub pr_number: Option<String>,
}

impl RunAgentInput {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            pr_number: None,
        }
    }

    pub fn with_pr_number(mut self, pr_number: impl Into<String>) -> Self {
        self.pr_number = Some(pr_number.into());
        self
    }
}

/// What a completed run looked like.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub role: Role,
    pub outcome: RunOutcome,
    pub final_phase: LifecyclePhase,
    /// Iterations finished in the last work-phase attempt.
    pub iterations_completed: u32,
    pub elapsed: Duration,
    /// Where configuration came from; `None` if the run failed before the
    /// work phase settled on one.
    pub config_provenance: Option<ConfigProvenance>,
}

/// The lifecycle controller.
///
/// Constructed once per run; `execute` may be called once. Cleanup is
/// idempotent, so a second invocation (from any path) is a logged no-op.
pub struct RunAgentUseCase<C: ConfigSource, P: ToolProbe> {
    config_source: Arc<C>,
    tool_probe: Arc<P>,
    worker: Arc<dyn Worker>,
    sleeper: Arc<dyn Sleeper>,
    run_logger: Arc<dyn RunLogger>,
    shutdown: Shutdown,
    config_retry: RetryPolicy,
    work_backoff_base: f64,
    iterations_done: AtomicU32,
    cleaned: AtomicBool,
}

impl<C: ConfigSource, P: ToolProbe> RunAgentUseCase<C, P> {
    pub fn new(
        config_source: Arc<C>,
        tool_probe: Arc<P>,
        worker: Arc<dyn Worker>,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            config_source,
            tool_probe,
            worker,
            sleeper,
            run_logger: Arc::new(NoRunLogger),
            shutdown: Shutdown::new(),
            config_retry: RetryPolicy::default(),
            work_backoff_base: 2.0,
            iterations_done: AtomicU32::new(0),
            cleaned: AtomicBool::new(false),
        }
    }

    /// Set a run logger for structured event logging.
    pub fn with_run_logger(mut self, logger: Arc<dyn RunLogger>) -> Self {
        self.run_logger = logger;
        self
    }

    /// Set the shutdown handle shared with the signal listener.
    pub fn with_shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = shutdown;
        self
    }

    /// Override the retry policy for configuration loading.
    pub fn with_config_retry(mut self, policy: RetryPolicy) -> Self {
        self.config_retry = policy;
        self
    }

    /// Execute the run end to end. Never panics, always cleans up, and maps
    /// every exit path to a deterministic outcome.
    pub async fn execute(&self, input: RunAgentInput, progress: &dyn RunProgress) -> RunReport {
        let started = Instant::now();
        let mut phase = LifecyclePhase::Init;

        let result = self.drive(&input, &mut phase, progress).await;

        let (outcome, provenance) = match result {
            Ok(provenance) => {
                self.transition(&mut phase, LifecyclePhase::Complete, progress);
                info!("agent run completed successfully");
                (RunOutcome::Success, Some(provenance))
            }
            Err(AgentError::Interrupted) => {
                self.transition(&mut phase, LifecyclePhase::Interrupted, progress);
                let outcome = self
                    .shutdown
                    .reason()
                    .map(|reason| reason.outcome())
                    .unwrap_or(RunOutcome::Interrupted);
                warn!(reason = ?self.shutdown.reason(), "agent run interrupted");
                (outcome, None)
            }
            Err(err) => {
                self.transition(&mut phase, LifecyclePhase::Failed, progress);
                error!(error = %err, "agent run failed");
                (RunOutcome::Failure, None)
            }
        };

        self.cleanup(started);
        progress.finished(outcome);
        self.run_logger.log(RunEvent::new(
            "run_finished",
            json!({
                "outcome": outcome.to_string(),
                "exit_code": outcome.exit_code(),
            }),
        ));

        RunReport {
            role: input.role,
            outcome,
            final_phase: phase,
            iterations_completed: self.iterations_done.load(Ordering::SeqCst),
            elapsed: started.elapsed(),
            config_provenance: provenance,
        }
    }

    async fn drive(
        &self,
        input: &RunAgentInput,
        phase: &mut LifecyclePhase,
        progress: &dyn RunProgress,
    ) -> Result<ConfigProvenance, AgentError> {
        info!(role = %input.role, pr_number = ?input.pr_number, "starting agent run");

        self.transition(phase, LifecyclePhase::Validating, progress);
        self.initialize().await?;

        self.transition(phase, LifecyclePhase::LoadingConfig, progress);
        let loaded = self.load_configuration(&input.role).await?;
        info!(
            name = %loaded.config.name,
            capabilities = ?loaded.config.capabilities,
            source = ?loaded.provenance,
            "configuration ready"
        );

        self.transition(phase, LifecyclePhase::Running, progress);
        let work_retry = RetryPolicy::new(
            loaded.config.retry_count.max(1),
            self.work_backoff_base,
        );
        let config = loaded.config.clone();
        execute_with_retry(
            "agent work",
            work_retry,
            self.sleeper.as_ref(),
            &self.shutdown,
            || self.run_work(&config, progress),
        )
        .await?;

        Ok(loaded.provenance)
    }

    /// Validate that required external tools are present. Fatal on failure;
    /// environment errors are never retried.
    async fn initialize(&self) -> Result<(), AgentError> {
        info!(tools = ?REQUIRED_TOOLS, "validating environment");

        let checks = futures::future::join_all(
            REQUIRED_TOOLS.iter().map(|tool| self.tool_probe.probe(tool)),
        )
        .await;

        let mut missing = Vec::new();
        for status in checks {
            if status.available {
                debug!(tool = %status.tool, detail = ?status.detail, "tool available");
            } else {
                warn!(tool = %status.tool, detail = ?status.detail, "tool unavailable");
                missing.push(status.tool);
            }
        }

        if missing.is_empty() {
            info!("environment validation completed");
            Ok(())
        } else {
            Err(AgentError::Environment(format!(
                "required tools not available: {}",
                missing.join(", ")
            )))
        }
    }

    /// Load configuration with retry. A post-retry failure falls back to the
    /// defaults (logged, never fatal); only interruption propagates.
    async fn load_configuration(&self, role: &Role) -> Result<LoadedConfig, AgentError> {
        let result = execute_with_retry(
            "load configuration",
            self.config_retry,
            self.sleeper.as_ref(),
            &self.shutdown,
            || {
                let source = self.config_source.clone();
                let role = role.clone();
                async move {
                    source
                        .load(&role)
                        .map_err(|err| AgentError::Configuration(err.to_string()))
                }
            },
        )
        .await;

        match result {
            Ok(loaded) => Ok(loaded),
            Err(AgentError::Interrupted) => Err(AgentError::Interrupted),
            Err(err) => {
                warn!(error = %err, "configuration loading failed, using defaults");
                self.run_logger.log(RunEvent::new(
                    "config_fallback",
                    json!({ "error": err.to_string() }),
                ));
                Ok(LoadedConfig::defaults(role))
            }
        }
    }

    /// One work-phase attempt: `max_iterations` sequential work units with a
    /// cooldown between iterations but not after the last. Failures inside
    /// the loop propagate immediately; transience is the retry wrapper's job.
    async fn run_work(
        &self,
        config: &AgentConfig,
        progress: &dyn RunProgress,
    ) -> Result<(), AgentError> {
        let total = config.work.max_iterations;
        self.iterations_done.store(0, Ordering::SeqCst);
        info!(total, "starting work phase");

        for iteration in 0..total {
            if self.shutdown.is_triggered() {
                return Err(AgentError::Interrupted);
            }

            progress.iteration_started(iteration + 1, total);
            info!(iteration = iteration + 1, total, "work iteration");

            let report = match tokio::time::timeout(
                config.timeout,
                self.worker.perform(iteration),
            )
            .await
            {
                Ok(Ok(report)) => report,
                Ok(Err(err)) => return Err(AgentError::Work(err.to_string())),
                Err(_) => {
                    return Err(AgentError::Work(format!(
                        "work unit exceeded {}s deadline",
                        config.timeout.as_secs()
                    )));
                }
            };

            debug!(items = report.items, detail = %report.detail, "work unit finished");
            self.run_logger.log(RunEvent::new(
                "iteration_completed",
                json!({
                    "iteration": iteration + 1,
                    "items": report.items,
                    "detail": report.detail,
                }),
            ));
            self.iterations_done.store(iteration + 1, Ordering::SeqCst);

            if iteration + 1 < total {
                debug!(
                    cooldown_secs = config.work.cooldown.as_secs_f64(),
                    "cooling down"
                );
                sleep_unless_shutdown(self.sleeper.as_ref(), config.work.cooldown, &self.shutdown)
                    .await?;
            }
        }

        info!("work phase completed");
        Ok(())
    }

    /// Release run resources and record elapsed wall-clock time. Safe to
    /// invoke more than once; only the first call has effect.
    pub fn cleanup(&self, started: Instant) {
        if self.cleaned.swap(true, Ordering::SeqCst) {
            debug!("cleanup already performed");
            return;
        }

        let elapsed = started.elapsed();
        info!(elapsed_secs = elapsed.as_secs_f64(), "performing cleanup");
        self.run_logger.log(RunEvent::new(
            "cleanup",
            json!({ "elapsed_secs": elapsed.as_secs_f64() }),
        ));
    }

    fn transition(
        &self,
        phase: &mut LifecyclePhase,
        next: LifecyclePhase,
        progress: &dyn RunProgress,
    ) {
        debug_assert!(
            phase.can_transition_to(next),
            "illegal lifecycle transition {phase} -> {next}"
        );
        *phase = next;
        info!(phase = %next, "entering lifecycle phase");
        self.run_logger.log(RunEvent::new(
            "phase_changed",
            json!({ "phase": next.to_string() }),
        ));
        progress.phase_changed(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::config_source::ConfigSourceError;
    use crate::ports::progress::NoRunProgress;
    use crate::ports::tool_probe::ToolStatus;
    use crate::ports::worker::WorkerError;
    use async_trait::async_trait;
    use rolerun_domain::{ShutdownReason, WorkReport};
    use std::sync::Mutex;

    // === Mock implementations ===

    struct MockConfigSource {
        config: Option<AgentConfig>,
    }

    impl MockConfigSource {
        fn returning(config: AgentConfig) -> Self {
            Self {
                config: Some(config),
            }
        }

        fn failing() -> Self {
            Self { config: None }
        }
    }

    impl ConfigSource for MockConfigSource {
        fn load(&self, role: &Role) -> Result<LoadedConfig, ConfigSourceError> {
            match &self.config {
                Some(config) => Ok(LoadedConfig {
                    config: config.clone(),
                    provenance: ConfigProvenance::Defaults,
                }),
                None => Err(ConfigSourceError::Unavailable(format!(
                    "no source for {role}"
                ))),
            }
        }
    }

    struct MockProbe {
        missing: Vec<&'static str>,
    }

    impl MockProbe {
        fn all_available() -> Self {
            Self { missing: vec![] }
        }

        fn missing(tools: Vec<&'static str>) -> Self {
            Self { missing: tools }
        }
    }

    #[async_trait]
    impl ToolProbe for MockProbe {
        async fn probe(&self, tool: &str) -> ToolStatus {
            if self.missing.contains(&tool) {
                ToolStatus::unavailable(tool, "not found")
            } else {
                ToolStatus::available(tool, None)
            }
        }
    }

    struct MockWorker {
        role: Role,
        performs: AtomicU32,
        fail_first: u32,
    }

    impl MockWorker {
        fn new() -> Self {
            Self {
                role: Role::Testing,
                performs: AtomicU32::new(0),
                fail_first: 0,
            }
        }

        fn failing_first(fail_first: u32) -> Self {
            Self {
                fail_first,
                ..Self::new()
            }
        }

        fn perform_count(&self) -> u32 {
            self.performs.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Worker for MockWorker {
        fn role(&self) -> &Role {
            &self.role
        }

        async fn perform(&self, iteration: u32) -> Result<WorkReport, WorkerError> {
            let call = self.performs.fetch_add(1, Ordering::SeqCst);
            if call < self.fail_first {
                Err(WorkerError::Failed(format!(
                    "simulated failure on call {call}"
                )))
            } else {
                Ok(WorkReport::new(1, format!("iteration {iteration} done")))
            }
        }
    }

    struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        fn new() -> Self {
            Self {
                slept: Mutex::new(Vec::new()),
            }
        }

        fn durations(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Sleeper for RecordingSleeper {
        async fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    struct CollectingLogger {
        events: Mutex<Vec<RunEvent>>,
    }

    impl CollectingLogger {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
            }
        }

        fn count(&self, event_type: &str) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|e| e.event_type == event_type)
                .count()
        }
    }

    impl RunLogger for CollectingLogger {
        fn log(&self, event: RunEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn test_config(max_iterations: u32) -> AgentConfig {
        AgentConfig::default()
            .with_max_iterations(max_iterations)
            .with_cooldown(Duration::from_secs(5))
    }

    struct Fixture {
        worker: Arc<MockWorker>,
        sleeper: Arc<RecordingSleeper>,
        logger: Arc<CollectingLogger>,
        use_case: RunAgentUseCase<MockConfigSource, MockProbe>,
    }

    fn fixture(source: MockConfigSource, probe: MockProbe, worker: MockWorker) -> Fixture {
        let worker = Arc::new(worker);
        let sleeper = Arc::new(RecordingSleeper::new());
        let logger = Arc::new(CollectingLogger::new());
        let use_case = RunAgentUseCase::new(
            Arc::new(source),
            Arc::new(probe),
            worker.clone(),
            sleeper.clone(),
        )
        .with_run_logger(logger.clone());
        Fixture {
            worker,
            sleeper,
            logger,
            use_case,
        }
    }

    #[tokio::test]
    async fn test_successful_run_performs_all_iterations() {
        let f = fixture(
            MockConfigSource::returning(test_config(3)),
            MockProbe::all_available(),
            MockWorker::new(),
        );

        let report = f
            .use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Success);
        assert_eq!(report.final_phase, LifecyclePhase::Complete);
        assert_eq!(report.iterations_completed, 3);
        assert_eq!(f.worker.perform_count(), 3);
        // N - 1 cooldown sleeps, no trailing sleep.
        assert_eq!(f.sleeper.durations(), vec![Duration::from_secs(5); 2]);
    }

    #[tokio::test]
    async fn test_zero_iterations_means_zero_work_and_zero_sleeps() {
        let f = fixture(
            MockConfigSource::returning(test_config(0)),
            MockProbe::all_available(),
            MockWorker::new(),
        );

        let report = f
            .use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Success);
        assert_eq!(report.iterations_completed, 0);
        assert_eq!(f.worker.perform_count(), 0);
        assert!(f.sleeper.durations().is_empty());
    }

    #[tokio::test]
    async fn test_missing_tool_is_fatal_before_running() {
        let f = fixture(
            MockConfigSource::returning(test_config(3)),
            MockProbe::missing(vec!["curl"]),
            MockWorker::new(),
        );

        let report = f
            .use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Failure);
        assert_eq!(report.outcome.exit_code(), 1);
        assert_eq!(report.final_phase, LifecyclePhase::Failed);
        assert_eq!(f.worker.perform_count(), 0);
        assert!(report.config_provenance.is_none());
    }

    #[tokio::test]
    async fn test_work_failures_exhaust_retry_budget() {
        let f = fixture(
            MockConfigSource::returning(test_config(3).with_retry_count(2)),
            MockProbe::all_available(),
            MockWorker::failing_first(u32::MAX),
        );

        let report = f
            .use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Failure);
        assert_eq!(report.final_phase, LifecyclePhase::Failed);
        // Two attempts, each failing on its first work unit.
        assert_eq!(f.worker.perform_count(), 2);
        // One backoff sleep between attempts (2^0 seconds), no cooldowns.
        assert_eq!(f.sleeper.durations(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn test_work_phase_recovers_on_retry() {
        let f = fixture(
            MockConfigSource::returning(test_config(2).with_retry_count(3)),
            MockProbe::all_available(),
            MockWorker::failing_first(1),
        );

        let report = f
            .use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Success);
        // 1 failed call, then a clean 2-iteration attempt.
        assert_eq!(f.worker.perform_count(), 3);
        assert_eq!(report.iterations_completed, 2);
        // Backoff (1s) then one cooldown (5s).
        assert_eq!(
            f.sleeper.durations(),
            vec![Duration::from_secs(1), Duration::from_secs(5)]
        );
    }

    #[tokio::test]
    async fn test_cleanup_runs_once_even_if_invoked_again() {
        let f = fixture(
            MockConfigSource::returning(test_config(1)),
            MockProbe::all_available(),
            MockWorker::new(),
        );

        f.use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;
        // Second invocation, as a signal path would do.
        f.use_case.cleanup(Instant::now());

        assert_eq!(f.logger.count("cleanup"), 1);
    }

    #[tokio::test]
    async fn test_interrupt_shutdown_maps_to_130() {
        let shutdown = Shutdown::new();
        shutdown.trigger(ShutdownReason::Interrupt);
        let f = fixture(
            MockConfigSource::returning(test_config(3)),
            MockProbe::all_available(),
            MockWorker::new(),
        );
        let use_case = f.use_case.with_shutdown(shutdown);

        let report = use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Interrupted);
        assert_eq!(report.outcome.exit_code(), 130);
        assert_eq!(report.final_phase, LifecyclePhase::Interrupted);
        assert_eq!(f.worker.perform_count(), 0);
    }

    #[tokio::test]
    async fn test_terminate_shutdown_maps_to_1() {
        let shutdown = Shutdown::new();
        shutdown.trigger(ShutdownReason::Terminate);
        let f = fixture(
            MockConfigSource::returning(test_config(3)),
            MockProbe::all_available(),
            MockWorker::new(),
        );
        let use_case = f.use_case.with_shutdown(shutdown);

        let report = use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Failure);
        assert_eq!(report.outcome.exit_code(), 1);
        assert_eq!(report.final_phase, LifecyclePhase::Interrupted);
    }

    #[tokio::test]
    async fn test_config_source_failure_falls_back_to_defaults() {
        let f = fixture(
            MockConfigSource::failing(),
            MockProbe::all_available(),
            MockWorker::new(),
        );
        let use_case = f.use_case.with_config_retry(RetryPolicy::new(1, 2.0));

        let report = use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        // Defaults: 10 iterations, run to completion.
        assert_eq!(report.outcome, RunOutcome::Success);
        assert_eq!(
            report.config_provenance,
            Some(ConfigProvenance::Defaults)
        );
        assert_eq!(f.worker.perform_count(), 10);
        assert_eq!(f.logger.count("config_fallback"), 1);
    }

    #[tokio::test]
    async fn test_config_load_is_retried_before_fallback() {
        let f = fixture(
            MockConfigSource::failing(),
            MockProbe::all_available(),
            MockWorker::new(),
        );
        let use_case = f
            .use_case
            .with_config_retry(RetryPolicy::new(3, 2.0));

        let report = use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        assert_eq!(report.outcome, RunOutcome::Success);
        // Config backoff sleeps 1s and 2s precede the nine 5s cooldowns.
        let durations = f.sleeper.durations();
        assert_eq!(
            &durations[..2],
            &[Duration::from_secs(1), Duration::from_secs(2)]
        );
        assert_eq!(durations.len(), 2 + 9);
    }

    #[tokio::test]
    async fn test_run_report_carries_role_and_elapsed() {
        let f = fixture(
            MockConfigSource::returning(test_config(1)),
            MockProbe::all_available(),
            MockWorker::new(),
        );

        let report = f
            .use_case
            .execute(
                RunAgentInput::new(Role::CodeReviewer).with_pr_number("123"),
                &NoRunProgress,
            )
            .await;

        assert_eq!(report.role, Role::CodeReviewer);
        assert!(report.elapsed > Duration::ZERO);
    }

    #[tokio::test]
    async fn test_phase_events_are_recorded() {
        let f = fixture(
            MockConfigSource::returning(test_config(1)),
            MockProbe::all_available(),
            MockWorker::new(),
        );

        f.use_case
            .execute(RunAgentInput::new(Role::Testing), &NoRunProgress)
            .await;

        // validating, loading_config, running, complete
        assert_eq!(f.logger.count("phase_changed"), 4);
        assert_eq!(f.logger.count("run_finished"), 1);
    }
}
