//! Configuration module
//!
//! Connection settings and polling parameters, gathered from global flags
//! and their environment variables.

use std::time::Duration;

use ocompute_client::ConnectionSettings;
use ocompute_core::domain::identity::IdentityDomain;

use crate::error::WorkflowError;
use crate::service::poller::PollSettings;

/// Default overall wait for an orchestration to change state
pub const DEFAULT_WAIT_TIME_SECS: u64 = 600;

/// Default pause between status checks
pub const DEFAULT_REFRESH_RATE_SECS: u64 = 2;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the compute API endpoint
    pub api_url: Option<String>,

    pub username: Option<String>,

    pub password: Option<String>,

    /// Identity domain of the account
    pub domain: Option<String>,

    /// Whether TLS certificates are verified
    pub verify_ssl: bool,

    /// Whether the endpoint is a private cloud installation
    pub private_cloud: bool,

    /// How long to wait for an orchestration to change state
    pub wait_time: Duration,

    /// How often to check the status while waiting
    pub refresh_rate: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            username: None,
            password: None,
            domain: None,
            verify_ssl: true,
            private_cloud: false,
            wait_time: Duration::from_secs(DEFAULT_WAIT_TIME_SECS),
            refresh_rate: Duration::from_secs(DEFAULT_REFRESH_RATE_SECS),
        }
    }
}

impl Config {
    /// Names of the connection parameters that were not supplied
    pub fn missing_parameters(&self) -> Vec<&'static str> {
        [
            ("api-url", &self.api_url),
            ("username", &self.username),
            ("password", &self.password),
            ("domain", &self.domain),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
        .map(|(name, _)| name)
        .collect()
    }

    /// Settings for opening an API session
    ///
    /// # Errors
    /// Returns [`WorkflowError::MissingParameters`] naming every absent value.
    pub fn connection_settings(&self) -> Result<ConnectionSettings, WorkflowError> {
        let missing = self.missing_parameters();
        if !missing.is_empty() {
            return Err(WorkflowError::MissingParameters(missing));
        }

        Ok(ConnectionSettings {
            api_url: self.api_url.clone().unwrap_or_default(),
            identity: IdentityDomain::new(self.domain.clone().unwrap_or_default(), self.private_cloud),
            username: self.username.clone().unwrap_or_default(),
            password: self.password.clone().unwrap_or_default(),
            verify_ssl: self.verify_ssl,
        })
    }

    /// Polling parameters for lifecycle workflows
    pub fn poll_settings(&self) -> PollSettings {
        PollSettings {
            interval: self.refresh_rate,
            timeout: self.wait_time,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(url) = &self.api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("api-url must start with http:// or https://");
            }
        }

        if self.refresh_rate.is_zero() {
            anyhow::bail!("request-refresh-rate must be greater than 0");
        }

        if self.wait_time.is_zero() {
            anyhow::bail!("wait-time must be greater than 0");
        }

        Ok(())
    }
}
