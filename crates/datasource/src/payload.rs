//! Decoded database secret

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer};

use crate::error::DataSourceError;

/// Database name used when the secret does not carry one
pub const DEFAULT_DATABASE_NAME: &str = "productdb";

/// Credentials as stored in the secret string
///
/// Missing keys fail deserialization; empty values are caught by [`SecretPayload::validate`].
#[derive(Debug, Clone, Deserialize)]
pub struct SecretPayload {
    pub username: String,
    pub password: Secret<String>,
    pub host: String,
    pub engine: String,
    /// Kept as text; stores write it either as a string or a number
    #[serde(deserialize_with = "string_or_number")]
    pub port: String,
    #[serde(default, rename = "dbName")]
    pub database_name: Option<String>,
    /// Older key for the database name; `dbName` wins when both are set
    #[serde(default, rename = "databaseName")]
    pub legacy_database_name: Option<String>,
    #[serde(default, rename = "dbInstanceIdentifier")]
    pub instance_identifier: Option<String>,
    #[serde(default, rename = "instanceIdentifier")]
    pub legacy_instance_identifier: Option<String>,
}

impl SecretPayload {
    pub fn from_json(secret_string: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(secret_string)
    }

    /// Database name, falling back to [`DEFAULT_DATABASE_NAME`] when absent or null
    pub fn resolved_database_name(&self) -> &str {
        self.database_name
            .as_deref()
            .or(self.legacy_database_name.as_deref())
            .unwrap_or(DEFAULT_DATABASE_NAME)
    }

    pub fn resolved_instance_identifier(&self) -> Option<&str> {
        self.instance_identifier
            .as_deref()
            .or(self.legacy_instance_identifier.as_deref())
    }

    /// Every connection field must be non-blank
    pub fn validate(&self) -> Result<(), DataSourceError> {
        let fields: [(&'static str, &str); 5] = [
            ("username", &self.username),
            ("password", self.password.expose_secret()),
            ("host", &self.host),
            ("engine", &self.engine),
            ("port", &self.port),
        ];

        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(DataSourceError::MissingField { field: *field }),
            None => Ok(()),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(serde_json::Number),
    }

    // Numbers are kept as written, `3306.0` included
    Ok(match Port::deserialize(deserializer)? {
        Port::Text(text) => text,
        Port::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"{"username":"app","password":"pw","host":"db.internal","engine":"mysql","port":"3306"}"#;

    #[test]
    fn test_parse_minimal_secret() {
        let payload = SecretPayload::from_json(FULL).unwrap();
        assert_eq!(payload.username, "app");
        assert_eq!(payload.password.expose_secret(), "pw");
        assert_eq!(payload.host, "db.internal");
        assert_eq!(payload.engine, "mysql");
        assert_eq!(payload.port, "3306");
        assert!(payload.database_name.is_none());
        assert_eq!(payload.resolved_database_name(), "productdb");
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_parse_rds_shaped_secret() {
        let payload = SecretPayload::from_json(
            r#"{
                "username": "admin",
                "password": "pw",
                "engine": "mysql",
                "host": "prod.cluster.ap-south-1.rds.amazonaws.com",
                "port": 3306,
                "dbName": "catalog",
                "dbInstanceIdentifier": "prod-instance-1"
            }"#,
        )
        .unwrap();

        assert_eq!(payload.port, "3306");
        assert_eq!(payload.resolved_database_name(), "catalog");
        assert_eq!(payload.resolved_instance_identifier(), Some("prod-instance-1"));
    }

    #[test]
    fn test_null_database_name_uses_default() {
        let payload = SecretPayload::from_json(
            r#"{"username":"app","password":"pw","host":"h","engine":"mysql","port":"3306","dbName":null}"#,
        )
        .unwrap();
        assert_eq!(payload.resolved_database_name(), DEFAULT_DATABASE_NAME);
    }

    #[test]
    fn test_database_name_alias() {
        let payload = SecretPayload::from_json(
            r#"{"username":"app","password":"pw","host":"h","engine":"mysql","port":"3306","databaseName":"orders"}"#,
        )
        .unwrap();
        assert_eq!(payload.resolved_database_name(), "orders");
    }

    #[test]
    fn test_db_name_wins_over_legacy_key() {
        let payload = SecretPayload::from_json(
            r#"{"username":"app","password":"pw","host":"h","engine":"mysql","port":"3306","databaseName":"orders","dbName":"catalog","instanceIdentifier":"i-1","dbInstanceIdentifier":"i-2"}"#,
        )
        .unwrap();
        assert_eq!(payload.resolved_database_name(), "catalog");
        assert_eq!(payload.resolved_instance_identifier(), Some("i-2"));
    }

    #[test]
    fn test_fractional_port_is_kept_as_written() {
        let payload = SecretPayload::from_json(
            r#"{"username":"app","password":"pw","host":"h","engine":"mysql","port":3306.0}"#,
        )
        .unwrap();
        assert_eq!(payload.port, "3306.0");
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_missing_key_is_a_parse_error() {
        let result = SecretPayload::from_json(
            r#"{"username":"app","password":"pw","engine":"mysql","port":"3306"}"#,
        );
        assert!(result.unwrap_err().to_string().contains("host"));
    }

    #[test]
    fn test_validate_reports_first_blank_field() {
        let payload = SecretPayload::from_json(
            r#"{"username":"app","password":"pw","host":"  ","engine":"mysql","port":""}"#,
        )
        .unwrap();

        match payload.validate() {
            Err(DataSourceError::MissingField { field }) => assert_eq!(field, "host"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_blank_password_is_rejected() {
        let payload = SecretPayload::from_json(
            r#"{"username":"app","password":"","host":"h","engine":"mysql","port":"3306"}"#,
        )
        .unwrap();
        assert!(matches!(
            payload.validate(),
            Err(DataSourceError::MissingField { field: "password" })
        ));
    }
}
