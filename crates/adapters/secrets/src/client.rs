//! Secret store client abstraction and AWS Secrets Manager implementation

use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_config::timeout::TimeoutConfig;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::config::{Credentials, Region};
use secrecy::ExposeSecret;
use tracing::{debug, info};

use crate::config::SecretStoreConfig;
use crate::credentials::CredentialSource;
use crate::error::{SecretStoreError, map_sdk_error};

const STATIC_PROVIDER_NAME: &str = "product-service-static";

/// An open connection to a secret store
#[async_trait]
pub trait SecretStoreClient: Send + Sync {
    /// Fetch the string payload of a secret; `None` when the secret carries no string
    async fn get_secret_string(
        &self,
        secret_name: &str,
    ) -> Result<Option<String>, SecretStoreError>;

    /// Release the connection
    fn close(&mut self);
}

/// Opens clients for a region and credential strategy
#[async_trait]
pub trait SecretStoreConnector: Send + Sync {
    type Client: SecretStoreClient;

    async fn connect(
        &self,
        region: &str,
        credentials: &CredentialSource,
        config: &SecretStoreConfig,
    ) -> Result<Self::Client, SecretStoreError>;
}

/// Owns a client and closes it exactly once when dropped
pub struct ClientGuard<C: SecretStoreClient> {
    client: C,
}

impl<C: SecretStoreClient> ClientGuard<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

impl<C: SecretStoreClient> Deref for ClientGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.client
    }
}

impl<C: SecretStoreClient> DerefMut for ClientGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.client
    }
}

impl<C: SecretStoreClient> Drop for ClientGuard<C> {
    fn drop(&mut self) {
        self.client.close();
    }
}

/// Connector for AWS Secrets Manager
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsSecretsManagerConnector;

#[async_trait]
impl SecretStoreConnector for AwsSecretsManagerConnector {
    type Client = AwsSecretsManagerClient;

    async fn connect(
        &self,
        region: &str,
        credentials: &CredentialSource,
        config: &SecretStoreConfig,
    ) -> Result<AwsSecretsManagerClient, SecretStoreError> {
        info!(region, credentials = credentials.kind(), "Opening Secrets Manager client");

        let shared_config = sdk_config_loader(region, credentials, config).load().await;

        Ok(AwsSecretsManagerClient {
            client: Some(Client::new(&shared_config)),
            region: region.to_string(),
        })
    }
}

/// SDK loader for a single resolution
///
/// Retries are disabled: a failed fetch is reported as is and never re-sent.
pub(crate) fn sdk_config_loader(
    region: &str,
    credentials: &CredentialSource,
    config: &SecretStoreConfig,
) -> ConfigLoader {
    let timeouts = TimeoutConfig::builder()
        .connect_timeout(config.connect_timeout())
        .operation_timeout(config.request_timeout())
        .build();

    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(region.to_string()))
        .timeout_config(timeouts)
        .retry_config(RetryConfig::disabled());

    if let CredentialSource::Static {
        access_key,
        secret_key,
    } = credentials
    {
        loader = loader.credentials_provider(Credentials::new(
            access_key.expose_secret().clone(),
            secret_key.expose_secret().clone(),
            None,
            None,
            STATIC_PROVIDER_NAME,
        ));
    }

    if let Some(endpoint) = config.endpoint_url.as_deref() {
        debug!(endpoint, "Using Secrets Manager endpoint override");
        loader = loader.endpoint_url(endpoint);
    }

    loader
}

/// AWS Secrets Manager client
pub struct AwsSecretsManagerClient {
    client: Option<Client>,
    region: String,
}

impl AwsSecretsManagerClient {
    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn is_closed(&self) -> bool {
        self.client.is_none()
    }
}

#[async_trait]
impl SecretStoreClient for AwsSecretsManagerClient {
    async fn get_secret_string(
        &self,
        secret_name: &str,
    ) -> Result<Option<String>, SecretStoreError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SecretStoreError::Other("client already closed".to_string()))?;

        debug!(secret_name, "Reading secret");

        let output = client
            .get_secret_value()
            .secret_id(secret_name)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("GetSecretValue for {}", secret_name)))?;

        Ok(output.secret_string().map(str::to_owned))
    }

    fn close(&mut self) {
        if self.client.take().is_some() {
            debug!(region = %self.region, "Secrets Manager client released");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        closes: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl SecretStoreClient for CountingClient {
        async fn get_secret_string(
            &self,
            _secret_name: &str,
        ) -> Result<Option<String>, SecretStoreError> {
            Ok(None)
        }

        fn close(&mut self) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_guard_closes_once_on_drop() {
        let closes = Arc::new(AtomicUsize::new(0));
        {
            let _guard = ClientGuard::new(CountingClient {
                closes: closes.clone(),
            });
            assert_eq!(closes.load(Ordering::SeqCst), 0);
        }
        assert_eq!(closes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_aws_client_close_is_idempotent() {
        let config = SecretStoreConfig::default();
        let mut client = AwsSecretsManagerConnector
            .connect("ap-south-1", &CredentialSource::Ambient, &config)
            .await
            .unwrap();

        assert_eq!(client.region(), "ap-south-1");
        assert!(!client.is_closed());

        client.close();
        client.close();
        assert!(client.is_closed());

        let err = client.get_secret_string("anything").await.unwrap_err();
        assert!(matches!(err, SecretStoreError::Other(_)));
    }

    #[tokio::test]
    async fn test_sdk_config_disables_retries() {
        let config = SecretStoreConfig {
            connect_timeout_secs: 2,
            request_timeout_secs: 4,
            ..Default::default()
        };
        let credentials = CredentialSource::Static {
            access_key: secrecy::Secret::new("AKIAEXAMPLE".to_string()),
            secret_key: secrecy::Secret::new("xyz".to_string()),
        };

        let shared = sdk_config_loader("eu-west-1", &credentials, &config)
            .load()
            .await;

        assert_eq!(shared.retry_config().map(|r| r.max_attempts()), Some(1));
        assert_eq!(
            shared.region().map(ToString::to_string),
            Some("eu-west-1".to_string())
        );

        let timeouts = shared.timeout_config().unwrap();
        assert_eq!(timeouts.connect_timeout(), Some(std::time::Duration::from_secs(2)));
        assert_eq!(timeouts.operation_timeout(), Some(std::time::Duration::from_secs(4)));
    }
}
