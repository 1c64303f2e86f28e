//! Configuration structures for Director clients.
//!
//! This module provides the configuration used to connect to an Icinga
//! Director instance, with serde support and validation.

use crate::credentials::Credentials;
use crate::Error;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use validator::Validate;

/// Configuration for a Director client instance.
///
/// `url` is the Icinga Web base under which the Director module is mounted,
/// e.g. `https://icinga.example.com/icingaweb2/`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct DirectorConfig {
    /// Icinga Web base URL
    #[validate(url)]
    pub url: String,

    /// Login name for basic authentication
    pub username: String,

    /// Password for basic authentication
    #[serde(skip_serializing, deserialize_with = "deserialize_secret")]
    pub password: SecretString,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

impl DirectorConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid. Credentials are not checked.
    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, Error> {
        let config = Self {
            url: url.into(),
            username: username.into(),
            password: SecretString::from(password.into()),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Credentials built from the configured username and password.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.expose_secret())
    }
}

impl Clone for DirectorConfig {
    fn clone(&self) -> Self {
        Self {
            url: self.url.clone(),
            username: self.username.clone(),
            password: SecretString::from(self.password.expose_secret().to_owned()),
            tls_verify: self.tls_verify,
            tls_ca_cert: self.tls_ca_cert.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_director_config_new() {
        let config =
            DirectorConfig::new("https://icinga.example.com/icingaweb2/", "director", "secret")
                .unwrap();
        assert_eq!(config.url, "https://icinga.example.com/icingaweb2/");
        assert_eq!(config.username, "director");
        assert!(config.tls_verify);
        assert!(config.tls_ca_cert.is_none());
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_director_config_invalid_url() {
        let result = DirectorConfig::new("not-a-url", "director", "secret");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_director_config_accepts_empty_credentials() {
        let config = DirectorConfig::new("https://icinga.example.com", "", "").unwrap();
        assert_eq!(config.credentials().authorization_header(), "Basic Og==");
    }

    #[test]
    fn test_director_config_builder() {
        let config = DirectorConfig::new("https://icinga.example.com", "director", "secret")
            .unwrap()
            .with_tls_verify(false)
            .with_ca_cert(PathBuf::from("/etc/ssl/icinga-ca.pem"))
            .with_timeout(60);

        assert!(!config.tls_verify);
        assert_eq!(
            config.tls_ca_cert.as_deref(),
            Some(std::path::Path::new("/etc/ssl/icinga-ca.pem"))
        );
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_config_deserialization_defaults() {
        let config: DirectorConfig = serde_json::from_str(
            r#"{"url": "https://icinga.example.com", "username": "director", "password": "pw"}"#,
        )
        .unwrap();

        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.password.expose_secret(), "pw");
    }

    #[test]
    fn test_config_serialization_omits_password() {
        let config = DirectorConfig::new("https://icinga.example.com", "director", "secret")
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("director"));
        assert!(!json.contains("secret"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_config_clone_keeps_password() {
        let config = DirectorConfig::new("https://icinga.example.com", "director", "secret")
            .unwrap();
        let cloned = config.clone();
        assert_eq!(cloned.password.expose_secret(), "secret");
        assert_eq!(cloned.url, config.url);
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config =
            DirectorConfig::new("https://icinga.example.com", "director", "secret").unwrap();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 301;
        assert!(config.validate().is_err());

        config.request_timeout_secs = 30;
        assert!(config.validate().is_ok());
    }
}
