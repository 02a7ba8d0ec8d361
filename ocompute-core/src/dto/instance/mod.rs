//! Instance DTOs
//!
//! Data transfer objects for instance requests and instance records.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Public pool every account can draw addresses from
pub const PUBLIC_IP_POOL: &str = "ippool:/oracle/public/ippool";

/// Where an instance's public IP comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicIp {
    /// Any free address from the default public pool
    Pool,

    /// A previously reserved address, by reservation name
    Reservation(String),
}

impl PublicIp {
    /// Parse the operator's `--public-ip` value
    ///
    /// `pool` selects the default pool; anything else names a reservation.
    pub fn parse(input: &str) -> Self {
        if input == "pool" {
            PublicIp::Pool
        } else {
            PublicIp::Reservation(input.to_string())
        }
    }

    /// NAT setting understood by the API
    pub fn nat(&self) -> String {
        match self {
            PublicIp::Pool => PUBLIC_IP_POOL.to_string(),
            PublicIp::Reservation(name) => format!("ipreservation:{}", name),
        }
    }
}

/// Network interface settings of an instance request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    /// Public IP source, as produced by [`PublicIp::nat`]
    pub nat: String,
}

/// Networking block of an instance request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Networking {
    pub eth0: NetworkInterface,
}

impl From<&PublicIp> for Networking {
    fn from(public_ip: &PublicIp) -> Self {
        Networking {
            eth0: NetworkInterface {
                nat: public_ip.nat(),
            },
        }
    }
}

/// Request for a single instance inside a launch plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRequest {
    /// Fully qualified instance name
    pub name: String,

    /// Shape name
    pub shape: String,

    /// Image list to boot from
    #[serde(rename = "imagelist")]
    pub image: String,

    /// Label for the instance
    pub label: String,

    /// Fully qualified SSH key names
    pub sshkeys: Vec<String>,

    /// Public IP settings; omitted for private-only instances
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Networking>,
}

/// Instance as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub name: String,

    #[serde(default)]
    pub label: Option<String>,

    pub state: String,

    #[serde(default)]
    pub hostname: Option<String>,

    #[serde(default)]
    pub ip: Option<String>,

    #[serde(default)]
    pub imagelist: Option<String>,

    #[serde(default)]
    pub shape: Option<String>,

    #[serde(default)]
    pub vcable_id: Option<String>,

    #[serde(default)]
    pub attributes: HashMap<String, serde_json::Value>,
}

impl InstanceRecord {
    /// Name of the orchestration that launched this instance, if any
    pub fn orchestration(&self) -> Option<&str> {
        self.attributes
            .get("nimbula_orchestration")
            .and_then(|value| value.as_str())
    }
}
