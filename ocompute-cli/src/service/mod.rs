//! Service layer
//!
//! Workflows that sequence calls against the compute API: the status
//! poller, the orchestration lifecycle and confirmation prompts.
//!
//! The API, the prompt and the output sink are injected so every workflow
//! can be tested without a live endpoint.

pub mod lifecycle;
pub mod poller;
pub mod prompt;

#[cfg(test)]
pub mod fake;
