//! Data Transfer Objects for the compute REST API
//!
//! This module contains the request bodies the CLI sends and the records the
//! API returns. Records are converted into domain types before the rest of
//! the CLI sees them.

pub mod auth;
pub mod instance;
pub mod network;
pub mod orchestration;

use serde::{Deserialize, Serialize};

/// Envelope the API wraps every collection response in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub result: Vec<T>,
}
