//! adapter-secrets - secret store adapter
//!
//! Provides a small secret store interface with:
//! - AWS Secrets Manager client (static or ambient credentials)
//! - Explicit connect/request timeouts
//! - Scoped client release via [`ClientGuard`]
//! - Automatic error mapping to AppError

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;

pub use client::{
    AwsSecretsManagerClient, AwsSecretsManagerConnector, ClientGuard, SecretStoreClient,
    SecretStoreConnector,
};
pub use config::{DEFAULT_REGION, SecretStoreConfig, SecretStoreConfigBuilder};
pub use credentials::CredentialSource;
pub use error::{SecretStoreError, map_sdk_error};
