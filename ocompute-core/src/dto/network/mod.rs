//! Network DTOs

use serde::{Deserialize, Serialize};

/// Association of a public IP with an instance's virtual cable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpAssociation {
    pub name: String,

    /// The public address
    pub ip: String,

    /// Virtual cable the address is attached to
    pub vcable: String,
}
