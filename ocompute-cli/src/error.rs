//! Workflow errors
//!
//! Failures the CLI reports to the operator. Every one of them ends the
//! invocation with exit status 1.

use ocompute_client::ClientError;
use thiserror::Error;

/// Errors raised by commands and lifecycle workflows
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Required configuration values were not supplied
    #[error("The following required parameters are missing: {}", .0.join(", "))]
    MissingParameters(Vec<&'static str>),

    /// Wrong number or shape of command arguments
    #[error("{0}")]
    InvalidArguments(String),

    /// The remote resource did not reach the awaited status in time
    ///
    /// The remote operation may still complete later; only the wait is
    /// abandoned.
    #[error(
        "Request did not complete in {seconds} seconds. Check the Oracle Cloud web console for more information."
    )]
    Timeout { seconds: u64 },

    /// The create workflow expected exactly one instance
    #[error("Server create failed: {0}")]
    ServerCreate(String),

    /// Direct deletion of an orchestration-owned instance
    #[error(
        "Unable to delete this server. Delete the orchestration instead (orchestration: {orchestration})."
    )]
    OwnedByOrchestration { orchestration: String },

    /// The operator declined a confirmation prompt
    #[error("Operation cancelled; nothing was deleted.")]
    Declined,

    /// Reading the operator's answer failed
    #[error("Failed to read confirmation: {0}")]
    Prompt(#[from] std::io::Error),

    /// Errors from the compute API, passed through unchanged
    #[error(transparent)]
    Client(#[from] ClientError),
}
