//! Datasource resolution errors

use std::fmt;

use errors::AppError;
use thiserror::Error;

/// Steps of a single resolution, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStage {
    NotStarted,
    CredentialsSelected,
    ClientOpened,
    SecretFetched,
    Parsed,
    DescriptorBuilt,
}

impl fmt::Display for ResolveStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "not-started",
            Self::CredentialsSelected => "credentials-selected",
            Self::ClientOpened => "client-opened",
            Self::SecretFetched => "secret-fetched",
            Self::Parsed => "parsed",
            Self::DescriptorBuilt => "descriptor-built",
        };
        f.write_str(name)
    }
}

/// Fatal startup errors; none of them are retried
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Store unreachable, authentication failure, timeout, or no secret string.
    /// `stage` is the step that could not be completed.
    #[error("secret '{secret_name}' unavailable (stage {stage}): {reason}")]
    SecretUnavailable {
        stage: ResolveStage,
        secret_name: String,
        reason: String,
    },

    #[error("secret '{secret_name}' is malformed (stage {stage}): {source}", stage = ResolveStage::Parsed)]
    SecretMalformed {
        secret_name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("secret field '{field}' is empty (stage {stage})", stage = ResolveStage::DescriptorBuilt)]
    MissingField { field: &'static str },
}

impl DataSourceError {
    /// The step at which resolution stopped
    pub fn stage(&self) -> ResolveStage {
        match self {
            Self::SecretUnavailable { stage, .. } => *stage,
            Self::SecretMalformed { .. } => ResolveStage::Parsed,
            Self::MissingField { .. } => ResolveStage::DescriptorBuilt,
        }
    }
}

impl From<DataSourceError> for AppError {
    fn from(err: DataSourceError) -> Self {
        match err {
            DataSourceError::SecretUnavailable { .. } => AppError::external_service(err.to_string()),
            _ => AppError::failed_precondition(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_stage() {
        let err = DataSourceError::SecretUnavailable {
            stage: ResolveStage::SecretFetched,
            secret_name: "db".into(),
            reason: "timed out".into(),
        };
        assert_eq!(
            err.to_string(),
            "secret 'db' unavailable (stage secret-fetched): timed out"
        );
        assert_eq!(err.stage(), ResolveStage::SecretFetched);

        let err = DataSourceError::MissingField { field: "host" };
        assert_eq!(
            err.to_string(),
            "secret field 'host' is empty (stage descriptor-built)"
        );
    }

    #[test]
    fn test_malformed_stage() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = DataSourceError::SecretMalformed {
            secret_name: "db".into(),
            source,
        };
        assert_eq!(err.stage(), ResolveStage::Parsed);
        assert!(err.to_string().starts_with("secret 'db' is malformed (stage parsed)"));
    }

    #[test]
    fn test_into_app_error() {
        let err: AppError = DataSourceError::MissingField { field: "port" }.into();
        assert!(matches!(err, AppError::FailedPrecondition(_)));
    }
}
