//! ocompute HTTP Client
//!
//! A small, type-safe HTTP client for the Oracle Compute Cloud REST API.
//!
//! The [`ComputeApi`] trait is the seam the CLI workflows are written
//! against; [`ComputeClient`] is its HTTP implementation. Handles in
//! [`handle`] wrap a snapshot of a remote resource together with the API
//! that can refresh it.
//!
//! # Example
//!
//! ```no_run
//! use ocompute_client::{ComputeClient, ConnectionSettings};
//! use ocompute_core::domain::identity::IdentityDomain;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ComputeClient::new(ConnectionSettings {
//!         api_url: "https://api.compute.us2.oraclecloud.com".to_string(),
//!         identity: IdentityDomain::new("acme", false),
//!         username: "jdoe".to_string(),
//!         password: "secret".to_string(),
//!         verify_ssl: true,
//!     })?;
//!     client.authenticate().await?;
//!
//!     for shape in client.list_shapes().await? {
//!         println!("{}: {} OCPU", shape.name, shape.cpus);
//!     }
//!     Ok(())
//! }
//! ```

mod api;
mod catalog;
pub mod error;
pub mod handle;
mod instances;
mod orchestrations;

// Re-export commonly used types
pub use api::ComputeApi;
pub use error::{ClientError, Result};
pub use handle::{InstanceHandle, OrchestrationHandle, Refresh};

use ocompute_core::domain::identity::IdentityDomain;
use ocompute_core::dto::ListResponse;
use ocompute_core::dto::auth::AuthenticateRequest;
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Media type of the compute API
pub const COMPUTE_MEDIA_TYPE: &str = "application/oracle-compute-v3+json";

/// Everything needed to open a session against the compute API
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    /// Base URL of the API endpoint
    pub api_url: String,

    /// Identity domain of the account
    pub identity: IdentityDomain,

    /// User name inside the identity domain
    pub username: String,

    pub password: String,

    /// Whether TLS certificates are verified
    pub verify_ssl: bool,
}

/// HTTP client for the compute API
///
/// The session cookie returned by [`ComputeClient::authenticate`] is kept
/// in the underlying client's cookie store and sent with every request.
#[derive(Debug, Clone)]
pub struct ComputeClient {
    /// Base URL of the API (e.g., "https://api.compute.us2.oraclecloud.com")
    base_url: String,
    /// Identity domain all object names are scoped by
    identity: IdentityDomain,
    username: String,
    password: String,
    /// HTTP client instance
    client: Client,
}

impl ComputeClient {
    /// Create a new compute client
    ///
    /// Does not contact the API; call [`ComputeClient::authenticate`] before
    /// issuing requests.
    pub fn new(settings: ConnectionSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(COMPUTE_MEDIA_TYPE));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(COMPUTE_MEDIA_TYPE));

        let client = Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(!settings.verify_ssl)
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(settings, client))
    }

    /// Create a new compute client with a custom HTTP client
    ///
    /// The client must keep cookies for the session to survive
    /// authentication.
    pub fn with_client(settings: ConnectionSettings, client: Client) -> Self {
        Self {
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            identity: settings.identity,
            username: settings.username,
            password: settings.password,
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the identity domain
    pub fn identity(&self) -> &IdentityDomain {
        &self.identity
    }

    /// Get the user name
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Open an API session
    pub async fn authenticate(&self) -> Result<()> {
        let user = self.identity.user_path(&self.username);
        let url = format!("{}/authenticate/", self.base_url);
        info!("Authenticating as {}", user);

        let response = self
            .client
            .post(&url)
            .json(&AuthenticateRequest {
                user: user.clone(),
                password: self.password.clone(),
            })
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 401 {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::AuthenticationFailed { user, message });
        }

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // URL Helpers
    // =============================================================================

    /// URL of a single object, e.g. `{base}/instance/Compute-acme/jdoe/web01`
    fn object_url(&self, kind: &str, name: &str) -> String {
        let qualified = self.identity.qualify(&self.username, name);
        format!("{}/{}{}", self.base_url, kind, qualified)
    }

    /// URL listing every object of a kind in the account's container
    fn container_url(&self, kind: &str) -> String {
        format!("{}/{}{}/", self.base_url, kind, self.identity.container())
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Fetch a collection and unwrap its `result` envelope
    async fn get_list<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let list: ListResponse<T> = self.handle_response(response).await?;
        Ok(list.result)
    }

    /// Handle an API response and deserialize JSON
    ///
    /// This method checks the status code and returns an appropriate error if
    /// the request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is not needed (e.g., DELETE operations)
    ///
    /// This method checks the status code and returns an error if the request failed.
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}
