//! Remote status values
//!
//! The compute API reports status as free-form strings. Only a handful of
//! values are meaningful to the CLI; everything else counts as in progress.

/// Status an orchestration reaches once all of its objects are running
pub const READY: &str = "ready";

/// Status an orchestration reaches once all of its objects are torn down
pub const STOPPED: &str = "stopped";

/// Status of a running instance
pub const RUNNING: &str = "running";

/// How a status should be presented to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Resource is up (ready orchestration, running instance)
    Success,

    /// Resource is down
    Failure,

    /// Anything in between
    Caution,
}

impl StatusTone {
    /// Classify a raw status string, ignoring case
    pub fn of(status: &str) -> Self {
        let status = status.to_lowercase();
        match status.as_str() {
            READY | RUNNING => StatusTone::Success,
            STOPPED => StatusTone::Failure,
            _ => StatusTone::Caution,
        }
    }
}
