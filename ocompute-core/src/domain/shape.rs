//! Shape domain model

use serde::{Deserialize, Serialize};

/// Size class of an instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    /// Shape name (e.g. "oc3")
    pub name: String,

    /// Number of OCPUs
    pub cpus: f64,

    /// Memory in MB
    pub ram: u64,

    /// Relative I/O weight
    pub io: u64,
}
