//! Image list domain model

use serde::{Deserialize, Serialize};

use super::identity::strip_container;

/// A named list of machine images instances can boot from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageList {
    /// Fully qualified name (e.g. "/oracle/public/oel_6.6_20GB")
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
}

impl ImageList {
    /// Name shown to the operator
    ///
    /// Public images keep their full `/oracle/public/...` path since that is
    /// what `--image` expects for them.
    pub fn display_name(&self) -> &str {
        if self.name.starts_with("/oracle/") {
            &self.name
        } else {
            strip_container(&self.name)
        }
    }
}
