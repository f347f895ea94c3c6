//! Secret store configuration

use std::time::Duration;

use secrecy::Secret;
use serde::Deserialize;

/// Region used when none is configured
pub const DEFAULT_REGION: &str = "ap-south-1";

/// Secret store client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SecretStoreConfig {
    /// Region the secret lives in
    #[serde(default = "default_region")]
    pub region: String,

    /// Static access key, only used together with `secret_key`
    #[serde(default)]
    pub access_key: Option<Secret<String>>,

    /// Static secret key, only used together with `access_key`
    #[serde(default)]
    pub secret_key: Option<Secret<String>>,

    /// Endpoint override
    #[serde(default)]
    pub endpoint_url: Option<String>,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Upper bound for a single secret fetch in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_connect_timeout() -> u64 {
    3
}

fn default_request_timeout() -> u64 {
    5
}

impl Default for SecretStoreConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            access_key: None,
            secret_key: None,
            endpoint_url: None,
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SecretStoreConfig {
    /// Configured region, or [`DEFAULT_REGION`] when blank
    pub fn effective_region(&self) -> &str {
        let region = self.region.trim();
        if region.is_empty() { DEFAULT_REGION } else { region }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Builder for SecretStoreConfig
pub struct SecretStoreConfigBuilder {
    config: SecretStoreConfig,
}

impl SecretStoreConfigBuilder {
    /// Create a new builder for a region
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            config: SecretStoreConfig {
                region: region.into(),
                ..Default::default()
            },
        }
    }

    /// Set a static credential pair
    pub fn with_static_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.config.access_key = Some(Secret::new(access_key.into()));
        self.config.secret_key = Some(Secret::new(secret_key.into()));
        self
    }

    /// Set the access key alone
    pub fn with_access_key(mut self, access_key: Option<Secret<String>>) -> Self {
        self.config.access_key = access_key;
        self
    }

    /// Set the secret key alone
    pub fn with_secret_key(mut self, secret_key: Option<Secret<String>>) -> Self {
        self.config.secret_key = secret_key;
        self
    }

    /// Override the service endpoint
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.config.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set connection timeout
    pub fn with_connect_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.connect_timeout_secs = timeout_secs;
        self
    }

    /// Set request timeout
    pub fn with_request_timeout(mut self, timeout_secs: u64) -> Self {
        self.config.request_timeout_secs = timeout_secs;
        self
    }

    /// Build the configuration
    pub fn build(self) -> SecretStoreConfig {
        self.config
    }
}
