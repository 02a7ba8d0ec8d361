//! Identity domain
//!
//! Every compute object name is scoped by an identity container, e.g.
//! `/Compute-acme/jdoe/web01`. Public cloud accounts use a `Compute-`
//! prefixed container, private cloud endpoints use the bare domain.

use serde::{Deserialize, Serialize};

/// Identity domain of the compute account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDomain {
    /// Identity domain name as given by the operator (e.g. "acme")
    pub domain: String,

    /// Whether the API endpoint is a private cloud installation
    pub private_cloud: bool,
}

impl IdentityDomain {
    /// Create a new identity domain
    pub fn new(domain: impl Into<String>, private_cloud: bool) -> Self {
        Self {
            domain: domain.into(),
            private_cloud,
        }
    }

    /// Container name without the leading slash (e.g. "Compute-acme")
    pub fn compute_domain(&self) -> String {
        if self.private_cloud {
            self.domain.clone()
        } else {
            format!("Compute-{}", self.domain)
        }
    }

    /// Full container path (e.g. "/Compute-acme")
    pub fn container(&self) -> String {
        format!("/{}", self.compute_domain())
    }

    /// Container path of a user (e.g. "/Compute-acme/jdoe")
    pub fn user_path(&self, username: &str) -> String {
        format!("{}/{}", self.container(), username)
    }

    /// Prefix a path with the container
    ///
    /// Used for SSH key names, which the operator gives as `user/keyname`.
    pub fn prepend(&self, path: &str) -> String {
        format!("{}/{}", self.container(), path.trim_start_matches('/'))
    }

    /// Turn an operator-supplied identifier into a fully qualified object name
    ///
    /// - `/Compute-acme/jdoe/web01` is already qualified and kept as is
    /// - `jdoe/web01` is relative to the container
    /// - `web01` is relative to the user's own path
    pub fn qualify(&self, username: &str, name: &str) -> String {
        if name.starts_with('/') {
            name.to_string()
        } else if name.contains('/') {
            self.prepend(name)
        } else {
            format!("{}/{}", self.user_path(username), name)
        }
    }
}

/// Strip the identity container from a fully qualified object name
///
/// `/Compute-acme/jdoe/web01` becomes `jdoe/web01`. Names that are not
/// qualified are returned unchanged.
pub fn strip_container(name: &str) -> &str {
    match name.strip_prefix('/') {
        Some(rest) => rest.split_once('/').map(|(_, tail)| tail).unwrap_or(rest),
        None => name,
    }
}
