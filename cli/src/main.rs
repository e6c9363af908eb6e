//! CLI entrypoint for rolerun
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::Result;
use clap::Parser;
use rolerun_application::{
    NoRunProgress, RunAgentInput, RunAgentUseCase, RunProgress, Shutdown, Sleeper,
    ValidateSetupUseCase,
};
use rolerun_domain::Role;
use rolerun_infrastructure::{
    ConfigLoader, JsonlRunLogger, SystemToolProbe, TokioSleeper, install_signal_handlers,
    worker_for_role,
};
use rolerun_presentation::{Cli, ConsoleFormatter, ProgressReporter, SimpleProgress};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // The guard must outlive the run so buffered file logs are flushed.
    let _log_guard = match init_logging(&cli) {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("Failed to initialize logging: {err:#}");
            return ExitCode::from(1);
        }
    };

    // Validation mode: check the environment and exit
    if cli.validate {
        let use_case = ValidateSetupUseCase::new(Arc::new(SystemToolProbe::new()));
        let report = use_case.execute().await;
        println!("{}", ConsoleFormatter::format_validation(&report));
        return exit_code(report.exit_code());
    }

    let Some(role_name) = cli.role.as_deref() else {
        // clap enforces this; kept as a guard for direct construction
        eprintln!("--role is required unless --validate is given");
        return ExitCode::from(1);
    };
    let role = Role::parse(role_name);

    info!(role = %role, "Starting rolerun");
    if let Some(pr_number) = &cli.pr_number {
        info!(pr_number, "Running in PR context");
    }

    // === Dependency Injection ===
    let mut loader = ConfigLoader::new().with_explicit_path(cli.config.clone());
    if cli.no_config {
        loader = loader.defaults_only();
    }

    let sleeper: Arc<dyn Sleeper> = Arc::new(TokioSleeper);
    let shutdown = Shutdown::new();
    install_signal_handlers(shutdown.clone());

    let mut use_case = RunAgentUseCase::new(
        Arc::new(loader),
        Arc::new(SystemToolProbe::new()),
        worker_for_role(&role),
        sleeper,
    )
    .with_shutdown(shutdown);

    // Run events go to a JSONL file next to the text logs; an unwritable
    // event log degrades to no-op logging rather than failing the run.
    let event_log_path = log_dir(&cli).join(format!(
        "run_{}_{}.jsonl",
        role,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    ));
    if let Some(logger) = JsonlRunLogger::new(&event_log_path) {
        info!(path = %event_log_path.display(), "Writing run events");
        use_case = use_case.with_run_logger(Arc::new(logger));
    }

    let mut input = RunAgentInput::new(role.clone());
    if let Some(pr_number) = &cli.pr_number {
        input = input.with_pr_number(pr_number);
    }

    // Progress bars interleave badly with debug logs; fall back to plain text
    let progress: Box<dyn RunProgress> = if cli.quiet {
        Box::new(NoRunProgress)
    } else if cli.debug {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let report = use_case.execute(input, progress.as_ref()).await;

    if !cli.quiet {
        println!("{}", ConsoleFormatter::format_run(&report));
    }
    info!(outcome = %report.outcome, "Run finished");

    exit_code(report.outcome.exit_code())
}

fn log_dir(cli: &Cli) -> PathBuf {
    cli.log_dir.clone().unwrap_or_else(|| PathBuf::from("logs"))
}

/// Set up stdout logging plus a timestamped log file under the log directory.
fn init_logging(cli: &Cli) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let role_label = cli.role.as_deref().unwrap_or("validate");
    let file_name = format!(
        "agent_{}_{}.log",
        role_label,
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    );
    let appender = tracing_appender::rolling::never(log_dir(cli), file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()?;

    Ok(Some(guard))
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
