//! Secret-backed datasource initializer

use adapter_secrets::{
    ClientGuard, CredentialSource, SecretStoreClient, SecretStoreConfig, SecretStoreConnector,
    SecretStoreError,
};
use tokio::time::timeout;
use tracing::{debug, error, info};

use crate::descriptor::DataSourceDescriptor;
use crate::error::{DataSourceError, ResolveStage};
use crate::payload::SecretPayload;

/// Secret name used when none is configured
pub const DEFAULT_SECRET_NAME: &str = "product-db-credentials";

/// Resolves the database secret into a [`DataSourceDescriptor`]
///
/// Meant to run once at startup. Each call opens exactly one client and closes it
/// before returning, whether resolution succeeded or not.
pub struct DataSourceInitializer<C> {
    connector: C,
    store: SecretStoreConfig,
    secret_name: String,
}

impl<C: SecretStoreConnector> DataSourceInitializer<C> {
    pub fn new(connector: C, store: SecretStoreConfig, secret_name: impl Into<String>) -> Self {
        let secret_name = secret_name.into();
        let secret_name = if secret_name.trim().is_empty() {
            DEFAULT_SECRET_NAME.to_string()
        } else {
            secret_name
        };

        Self {
            connector,
            store,
            secret_name,
        }
    }

    pub fn secret_name(&self) -> &str {
        &self.secret_name
    }

    pub async fn resolve(&self) -> Result<DataSourceDescriptor, DataSourceError> {
        let result = self.run().await;
        if let Err(e) = &result {
            error!(secret_name = %self.secret_name, stage = %e.stage(), "Datasource resolution failed: {}", e);
        }
        result
    }

    async fn run(&self) -> Result<DataSourceDescriptor, DataSourceError> {
        let region = self.store.effective_region();
        let credentials =
            CredentialSource::select(self.store.access_key.as_ref(), self.store.secret_key.as_ref());
        debug!(stage = %ResolveStage::CredentialsSelected, credentials = credentials.kind());

        let client = self
            .connector
            .connect(region, &credentials, &self.store)
            .await
            .map_err(|e| self.unavailable(ResolveStage::ClientOpened, e))?;
        let client = ClientGuard::new(client);
        debug!(stage = %ResolveStage::ClientOpened, region);

        let request_timeout = self.store.request_timeout();
        let secret_string = timeout(request_timeout, client.get_secret_string(&self.secret_name))
            .await
            .map_err(|_| {
                self.unavailable(
                    ResolveStage::SecretFetched,
                    SecretStoreError::Timeout(format!("no response within {:?}", request_timeout)),
                )
            })?
            .map_err(|e| self.unavailable(ResolveStage::SecretFetched, e))?
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| DataSourceError::SecretUnavailable {
                stage: ResolveStage::SecretFetched,
                secret_name: self.secret_name.clone(),
                reason: "response contained no secret string".to_string(),
            })?;
        debug!(stage = %ResolveStage::SecretFetched);

        let payload = SecretPayload::from_json(&secret_string).map_err(|source| {
            DataSourceError::SecretMalformed {
                secret_name: self.secret_name.clone(),
                source,
            }
        })?;
        debug!(stage = %ResolveStage::Parsed);

        let descriptor = DataSourceDescriptor::from_payload(payload)?;
        info!(
            stage = %ResolveStage::DescriptorBuilt,
            url = descriptor.url(),
            username = descriptor.username(),
            "Datasource resolved from secret store"
        );

        Ok(descriptor)
    }

    fn unavailable(&self, stage: ResolveStage, err: SecretStoreError) -> DataSourceError {
        DataSourceError::SecretUnavailable {
            stage,
            secret_name: self.secret_name.clone(),
            reason: err.to_string(),
        }
    }
}
