use serde::Deserialize;

use crate::error::{GuardError, Guards};

/// Connection settings shared by the SES and SNS connectors
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AwsConnectorConfig {
    /// Service endpoint URL, e.g. `http://localhost:4566` for LocalStack
    pub endpoint: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Push applications resolved by `SnsPushNotificationConnector::start`
    #[serde(default)]
    pub applications: Vec<AwsApplicationSettings>,
}

/// A push platform application to resolve at startup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AwsApplicationSettings {
    /// Caller-facing id used when registering devices
    pub application_id: String,
    /// Platform type, e.g. `GCM` or `APNS`
    pub platform_type: String,
    pub platform_credentials: String,
}

impl AwsConnectorConfig {
    /// Reject blank connection fields before a client is built
    pub fn validate(&self, component: &'static str) -> Result<(), GuardError> {
        Guards::string_value(component, "endpoint", &self.endpoint)?;
        Guards::string_value(component, "region", &self.region)?;
        Guards::string_value(component, "access_key_id", &self.access_key_id)?;
        Guards::string_value(component, "secret_access_key", &self.secret_access_key)?;
        for application in &self.applications {
            application.validate(component)?;
        }
        Ok(())
    }
}

impl AwsApplicationSettings {
    pub fn validate(&self, component: &'static str) -> Result<(), GuardError> {
        Guards::string_value(component, "application_id", &self.application_id)?;
        Guards::string_value(component, "platform_type", &self.platform_type)?;
        Guards::string_value(component, "platform_credentials", &self.platform_credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AwsConnectorConfig {
        AwsConnectorConfig {
            endpoint: "http://localhost:4566".to_string(),
            region: "eu-central-1".to_string(),
            access_key_id: "test".to_string(),
            secret_access_key: "secret".to_string(),
            applications: vec![],
        }
    }

    #[test]
    fn test_validate_accepts_complete_config() {
        assert!(config().validate("Test").is_ok());
    }

    #[test]
    fn test_validate_names_missing_field() {
        let mut config = config();
        config.region = String::new();

        let err = config.validate("SnsSmsConnector").unwrap_err();
        assert_eq!(err.component, "SnsSmsConnector");
        assert_eq!(err.property, "region");
    }

    #[test]
    fn test_validate_checks_applications() {
        let mut config = config();
        config.applications.push(AwsApplicationSettings {
            application_id: "mobile".to_string(),
            platform_type: "GCM".to_string(),
            platform_credentials: String::new(),
        });

        let err = config.validate("Test").unwrap_err();
        assert_eq!(err.property, "platform_credentials");
    }
}
