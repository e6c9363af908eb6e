//! Structured run-event logging port.
//!
//! Run events are a write-once append stream with no read-back contract.
//! Adapters decide the encoding; the JSONL adapter in infrastructure writes
//! one JSON object per line.

use serde_json::Value;

/// A single structured event emitted during a run.
#[derive(Debug, Clone)]
pub struct RunEvent {
    /// Event type, e.g. `phase_changed`, `iteration_completed`, `cleanup`.
    pub event_type: String,
    /// Arbitrary JSON payload.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
        }
    }
}

/// Port for recording run events.
pub trait RunLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op logger for runs that do not record events.
pub struct NoRunLogger;

impl RunLogger for NoRunLogger {
    fn log(&self, _event: RunEvent) {}
}
