//! Console output formatter for run and validation results

use colored::Colorize;
use rolerun_application::{ConfigProvenance, RunReport, ValidationReport};
use rolerun_domain::RunOutcome;

/// Formats run results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a completed run summary
    pub fn format_run(report: &RunReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Run Summary"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Role:".cyan().bold(), report.role));
        output.push_str(&format!(
            "{} {}\n",
            "Outcome:".cyan().bold(),
            Self::outcome_label(report.outcome)
        ));
        output.push_str(&format!(
            "{} {} (final phase: {})\n",
            "Iterations:".cyan().bold(),
            report.iterations_completed,
            report.final_phase
        ));
        output.push_str(&format!(
            "{} {:.1}s\n",
            "Elapsed:".cyan().bold(),
            report.elapsed.as_secs_f64()
        ));

        if let Some(provenance) = &report.config_provenance {
            let source = match provenance {
                ConfigProvenance::File(path) => path.display().to_string(),
                ConfigProvenance::Defaults => "built-in defaults".to_string(),
            };
            output.push_str(&format!("{} {}\n", "Config:".cyan().bold(), source));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format an environment validation report
    pub fn format_validation(report: &ValidationReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Environment Validation"));
        output.push('\n');

        for check in &report.checks {
            if check.available {
                let detail = check.detail.as_deref().unwrap_or("ok");
                output.push_str(&format!(
                    "  {} {} ({})\n",
                    "v".green(),
                    check.tool.bold(),
                    detail.dimmed()
                ));
            } else {
                let detail = check.detail.as_deref().unwrap_or("unavailable");
                output.push_str(&format!(
                    "  {} {} ({})\n",
                    "x".red(),
                    check.tool.bold(),
                    detail
                ));
            }
        }

        output.push('\n');
        if report.all_available() {
            output.push_str(&format!("{}\n", "All required tools available".green().bold()));
        } else {
            output.push_str(&format!("{}\n", "Missing required tools".red().bold()));
        }

        output.push_str(&Self::footer());
        output
    }

    fn outcome_label(outcome: RunOutcome) -> String {
        match outcome {
            RunOutcome::Success => "success".green().bold().to_string(),
            RunOutcome::Failure => "failure".red().bold().to_string(),
            RunOutcome::Interrupted => "interrupted".yellow().bold().to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn footer() -> String {
        format!("{}\n", "=".repeat(60).cyan())
    }
}
