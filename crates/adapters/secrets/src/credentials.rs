//! Credential strategy selection

use secrecy::{ExposeSecret, Secret};

/// How the secret store client authenticates
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Explicit access/secret key pair
    Static {
        access_key: Secret<String>,
        secret_key: Secret<String>,
    },
    /// Default provider chain (environment, profile, instance role)
    Ambient,
}

impl CredentialSource {
    /// Static credentials when both values are present and non-blank, ambient otherwise
    pub fn select(
        access_key: Option<&Secret<String>>,
        secret_key: Option<&Secret<String>>,
    ) -> Self {
        match (non_blank(access_key), non_blank(secret_key)) {
            (Some(access_key), Some(secret_key)) => Self::Static {
                access_key: access_key.clone(),
                secret_key: secret_key.clone(),
            },
            _ => Self::Ambient,
        }
    }

    pub fn is_static(&self) -> bool {
        matches!(self, Self::Static { .. })
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Static { .. } => "static",
            Self::Ambient => "ambient",
        }
    }
}

fn non_blank(value: Option<&Secret<String>>) -> Option<&Secret<String>> {
    value.filter(|v| !v.expose_secret().trim().is_empty())
}
