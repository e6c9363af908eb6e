//! Progress reporting for agent runs

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rolerun_application::RunProgress;
use rolerun_domain::{LifecyclePhase, RunOutcome};
use std::sync::Mutex;

/// Reports run progress with a progress bar for the work loop.
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: LifecyclePhase) -> &'static str {
        match phase {
            LifecyclePhase::Init => "Initializing",
            LifecyclePhase::Validating => "Validating environment",
            LifecyclePhase::LoadingConfig => "Loading configuration",
            LifecyclePhase::Running => "Running agent work",
            LifecyclePhase::Complete => "Complete",
            LifecyclePhase::Failed => "Failed",
            LifecyclePhase::Interrupted => "Interrupted",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunProgress for ProgressReporter {
    fn phase_changed(&self, phase: LifecyclePhase) {
        if phase.is_terminal() {
            return;
        }
        println!("{} {}", "->".cyan(), Self::phase_display_name(phase).bold());
    }

    fn iteration_started(&self, iteration: u32, total: u32) {
        let mut guard = self.bar.lock().unwrap();
        let bar = guard.get_or_insert_with(|| {
            let pb = ProgressBar::new(total as u64);
            pb.set_style(Self::bar_style());
            pb.set_prefix("Work");
            pb
        });
        bar.set_position(iteration.saturating_sub(1) as u64);
        bar.set_message(format!("iteration {}/{}", iteration, total));
    }

    fn finished(&self, outcome: RunOutcome) {
        if let Some(bar) = self.bar.lock().unwrap().take() {
            match outcome {
                RunOutcome::Success => {
                    bar.finish_with_message(format!("{}", "done!".green()));
                }
                RunOutcome::Failure => {
                    bar.abandon_with_message(format!("{}", "failed".red()));
                }
                RunOutcome::Interrupted => {
                    bar.abandon_with_message(format!("{}", "interrupted".yellow()));
                }
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl RunProgress for SimpleProgress {
    fn phase_changed(&self, phase: LifecyclePhase) {
        if phase.is_terminal() {
            return;
        }
        println!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold()
        );
    }

    fn iteration_started(&self, iteration: u32, total: u32) {
        println!("  {} iteration {}/{}", "*".cyan(), iteration, total);
    }

    fn finished(&self, outcome: RunOutcome) {
        match outcome {
            RunOutcome::Success => println!("  {} run complete", "v".green()),
            RunOutcome::Failure => println!("  {} run failed", "x".red()),
            RunOutcome::Interrupted => println!("  {} run interrupted", "!".yellow()),
        }
    }
}
