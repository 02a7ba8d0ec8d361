//! Instance domain model
//!
//! Represents a single compute node, either standalone or owned by an
//! orchestration.

use serde::{Deserialize, Serialize};

use super::identity::strip_container;
use crate::dto::instance::InstanceRecord;

/// Snapshot of a remote instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Fully qualified name (e.g. "/Compute-acme/jdoe/web01/4f1c...")
    pub name: String,

    /// Operator supplied label
    pub label: Option<String>,

    /// Lifecycle status as reported by the API
    pub status: String,

    /// Hostname assigned to the instance
    pub hostname: Option<String>,

    /// Private IP address
    pub ip_address: Option<String>,

    /// Public IP addresses associated with the instance's vcable
    pub public_ip_addresses: Vec<String>,

    /// Image list the instance was launched from
    pub image: Option<String>,

    /// Shape (size class) of the instance
    pub shape: Option<String>,

    /// Name of the owning orchestration, if any
    pub orchestration: Option<String>,

    /// Virtual cable used to match public IP associations
    pub vcable_id: Option<String>,
}

impl Instance {
    /// Identifier shown to the operator: the name without its container
    pub fn id(&self) -> &str {
        strip_container(&self.name)
    }

    /// Whether this instance belongs to the orchestration with the given name
    pub fn belongs_to(&self, orchestration_name: &str) -> bool {
        self.orchestration
            .as_deref()
            .is_some_and(|owner| strip_container(owner) == strip_container(orchestration_name))
    }
}

impl Instance {
    /// Build an instance from its API record and the public IPs found for it
    pub fn from_record(record: InstanceRecord, public_ip_addresses: Vec<String>) -> Self {
        let orchestration = record.orchestration().map(str::to_string);
        Instance {
            name: record.name,
            label: record.label,
            status: record.state,
            hostname: record.hostname,
            ip_address: record.ip,
            public_ip_addresses,
            image: record.imagelist,
            shape: record.shape,
            orchestration,
            vcable_id: record.vcable_id,
        }
    }
}
