//! Orchestration DTOs
//!
//! Data transfer objects for orchestration creation and orchestration records.

use serde::{Deserialize, Serialize};

use crate::dto::instance::InstanceRequest;

/// Request to create an orchestration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationRequest {
    /// Fully qualified orchestration name
    pub name: String,

    pub description: String,

    /// Relationships between launch plans; unused for single-plan requests
    pub relationships: Vec<serde_json::Value>,

    pub oplans: Vec<LaunchPlan>,
}

impl OrchestrationRequest {
    /// Build a request with a single launch plan holding the given instances
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        instances: Vec<InstanceRequest>,
    ) -> Self {
        let name = name.into();
        OrchestrationRequest {
            description: description.into(),
            relationships: Vec::new(),
            oplans: vec![LaunchPlan::active(name.clone(), instances)],
            name,
        }
    }

    /// All instance requests across launch plans
    pub fn instances(&self) -> impl Iterator<Item = &InstanceRequest> {
        self.oplans
            .iter()
            .flat_map(|plan| plan.objects.iter())
            .flat_map(|object| object.instances.iter())
    }
}

/// One plan of an orchestration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchPlan {
    pub label: String,
    pub obj_type: String,
    pub ha_policy: String,
    pub objects: Vec<PlanObject>,
}

impl LaunchPlan {
    /// Launch plan whose instances are restarted by the service if they fail
    pub fn active(label: impl Into<String>, instances: Vec<InstanceRequest>) -> Self {
        LaunchPlan {
            label: label.into(),
            obj_type: "launchplan".to_string(),
            ha_policy: "active".to_string(),
            objects: vec![PlanObject { instances }],
        }
    }
}

/// Object list of a launch plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanObject {
    pub instances: Vec<InstanceRequest>,
}

/// Orchestration as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationRecord {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub status: String,

    #[serde(default)]
    pub oplans: Vec<LaunchPlanRecord>,
}

impl OrchestrationRecord {
    /// Number of instances requested across all launch plans
    pub fn instance_count(&self) -> usize {
        self.oplans
            .iter()
            .flat_map(|plan| plan.objects.iter())
            .map(|object| object.instances.len())
            .sum()
    }
}

/// Launch plan as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchPlanRecord {
    #[serde(default)]
    pub objects: Vec<PlanObjectRecord>,
}

/// Launch plan object as returned by the API
///
/// Instance entries are kept opaque; only their count matters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanObjectRecord {
    #[serde(default)]
    pub instances: Vec<serde_json::Value>,
}
