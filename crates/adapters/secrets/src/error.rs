//! Error types for the secret store adapter

use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use errors::AppError;
use thiserror::Error;

/// Secret store failures
#[derive(Debug, Error)]
pub enum SecretStoreError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("secret store unreachable: {0}")]
    Unreachable(String),

    #[error("secret store request timed out: {0}")]
    Timeout(String),

    #[error("secret store error: {0}")]
    Other(String),
}

impl From<SecretStoreError> for AppError {
    fn from(err: SecretStoreError) -> Self {
        match err {
            SecretStoreError::NotFound(_) => AppError::not_found(err.to_string()),
            SecretStoreError::AccessDenied(_) => AppError::forbidden(err.to_string()),
            _ => AppError::external_service(err.to_string()),
        }
    }
}

/// Convert an SDK error into a SecretStoreError
pub fn map_sdk_error<E, R>(err: SdkError<E, R>, context: &str) -> SecretStoreError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    let detail = format!("{}: {}", context, DisplayErrorContext(&err));

    match &err {
        SdkError::ServiceError(ctx) => classify_service_error(ctx.err().code(), detail),
        SdkError::TimeoutError(_) => SecretStoreError::Timeout(detail),
        SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
            SecretStoreError::Unreachable(detail)
        }
        _ => SecretStoreError::Other(detail),
    }
}

/// Map a service error code to a SecretStoreError
pub fn classify_service_error(code: Option<&str>, detail: String) -> SecretStoreError {
    match code {
        Some("ResourceNotFoundException") => SecretStoreError::NotFound(detail),
        Some(
            "AccessDeniedException"
            | "UnrecognizedClientException"
            | "InvalidSignatureException"
            | "ExpiredTokenException"
            | "DecryptionFailure",
        ) => SecretStoreError::AccessDenied(detail),
        _ => SecretStoreError::Other(detail),
    }
}
