//! Authentication DTOs

use serde::{Deserialize, Serialize};

/// Request to open an API session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticateRequest {
    /// User path (e.g. "/Compute-acme/jdoe")
    pub user: String,

    pub password: String,
}
