//! Orchestration domain model
//!
//! An orchestration groups one or more instance requests into a launch plan
//! that the compute service starts and stops as a unit.

use serde::{Deserialize, Serialize};

use super::identity::strip_container;
use crate::dto::orchestration::OrchestrationRecord;

/// Snapshot of a remote orchestration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orchestration {
    /// Fully qualified name (e.g. "/Compute-acme/jdoe/web01")
    pub name: String,

    /// Human readable description
    pub description: Option<String>,

    /// Lifecycle status as reported by the API
    pub status: String,

    /// Number of instances requested across all launch plans
    pub instance_count: usize,
}

impl Orchestration {
    /// Identifier shown to the operator: the name without its container
    pub fn id(&self) -> &str {
        strip_container(&self.name)
    }
}

impl From<OrchestrationRecord> for Orchestration {
    fn from(record: OrchestrationRecord) -> Self {
        let instance_count = record.instance_count();
        Orchestration {
            name: record.name,
            description: record.description,
            status: record.status,
            instance_count,
        }
    }
}
