//! Run progress notification port

use rolerun_domain::{LifecyclePhase, RunOutcome};

/// Port for surfacing run progress to the presentation layer.
pub trait RunProgress: Send + Sync {
    /// The run entered a new lifecycle phase.
    fn phase_changed(&self, phase: LifecyclePhase);

    /// A work iteration is starting. `iteration` is 1-based.
    fn iteration_started(&self, iteration: u32, total: u32);

    /// The run ended.
    fn finished(&self, outcome: RunOutcome);
}

/// Silent progress implementation for quiet mode and tests.
pub struct NoRunProgress;

impl RunProgress for NoRunProgress {
    fn phase_changed(&self, _phase: LifecyclePhase) {}
    fn iteration_started(&self, _iteration: u32, _total: u32) {}
    fn finished(&self, _outcome: RunOutcome) {}
}
