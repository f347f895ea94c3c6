//! Data source descriptor

use secrecy::Secret;

use crate::error::DataSourceError;
use crate::payload::SecretPayload;

/// Database driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    MySql,
}

impl Driver {
    pub fn name(&self) -> &'static str {
        match self {
            Self::MySql => "mysql",
        }
    }
}

/// Everything needed to open the relational data source
///
/// Built once from a [`SecretPayload`] and never mutated. `Debug` keeps the password redacted.
#[derive(Debug, Clone)]
pub struct DataSourceDescriptor {
    driver: Driver,
    url: String,
    engine: String,
    host: String,
    port: String,
    database: String,
    username: String,
    password: Secret<String>,
}

impl DataSourceDescriptor {
    /// Validate the payload and assemble `jdbc:{engine}://{host}:{port}/{database}`
    pub fn from_payload(payload: SecretPayload) -> Result<Self, DataSourceError> {
        payload.validate()?;

        let database = payload.resolved_database_name().to_string();
        let url = format!(
            "jdbc:{}://{}:{}/{}",
            payload.engine, payload.host, payload.port, database
        );

        Ok(Self {
            driver: Driver::MySql,
            url,
            engine: payload.engine,
            host: payload.host,
            port: payload.port,
            database,
            username: payload.username,
            password: payload.password,
        })
    }

    pub fn driver(&self) -> Driver {
        self.driver
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn payload(json: &str) -> SecretPayload {
        SecretPayload::from_json(json).unwrap()
    }

    #[test]
    fn test_url_with_default_database() {
        let descriptor = DataSourceDescriptor::from_payload(payload(
            r#"{"username":"app","password":"pw","host":"db.internal","engine":"mysql","port":"3306"}"#,
        ))
        .unwrap();

        assert_eq!(descriptor.url(), "jdbc:mysql://db.internal:3306/productdb");
        assert_eq!(descriptor.driver(), Driver::MySql);
        assert_eq!(descriptor.driver().name(), "mysql");
        assert_eq!(descriptor.database(), "productdb");
        assert_eq!(descriptor.username(), "app");
        assert_eq!(descriptor.password().expose_secret(), "pw");
    }

    #[test]
    fn test_url_with_explicit_database() {
        let descriptor = DataSourceDescriptor::from_payload(payload(
            r#"{"username":"app","password":"pw","host":"db.internal","engine":"mysql","port":"3306","dbName":"catalog"}"#,
        ))
        .unwrap();

        assert_eq!(descriptor.url(), "jdbc:mysql://db.internal:3306/catalog");
    }

    #[test]
    fn test_engine_and_port_are_copied_verbatim() {
        let descriptor = DataSourceDescriptor::from_payload(payload(
            r#"{"username":"u","password":"p","host":"h","engine":"mariadb","port":"port-a"}"#,
        ))
        .unwrap();

        assert_eq!(descriptor.url(), "jdbc:mariadb://h:port-a/productdb");
        assert_eq!(descriptor.engine(), "mariadb");
        assert_eq!(descriptor.port(), "port-a");
    }

    #[test]
    fn test_blank_field_builds_nothing() {
        let result = DataSourceDescriptor::from_payload(payload(
            r#"{"username":"","password":"pw","host":"h","engine":"mysql","port":"3306"}"#,
        ));
        assert!(matches!(
            result,
            Err(DataSourceError::MissingField { field: "username" })
        ));
    }

    #[test]
    fn test_debug_redacts_password() {
        let descriptor = DataSourceDescriptor::from_payload(payload(
            r#"{"username":"app","password":"hunter2","host":"h","engine":"mysql","port":"3306"}"#,
        ))
        .unwrap();
        assert!(!format!("{:?}", descriptor).contains("hunter2"));
    }
}
