//! Basic-auth credentials for the Director.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use secrecy::{ExposeSecret, SecretString};

/// Username and password sent with every Director request.
///
/// The password is kept in a [`SecretString`] and is redacted from `Debug`
/// output. Nothing is validated locally; the Director rejects bad
/// credentials on the first request.
#[derive(Debug)]
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    /// Create credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    /// The login name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password, wrapped.
    #[must_use]
    pub const fn password(&self) -> &SecretString {
        &self.password
    }

    /// Value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password.expose_secret());
        format!("Basic {}", STANDARD.encode(pair))
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(
            self.username.clone(),
            self.password.expose_secret().to_owned(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_header_is_basic_base64() {
        let credentials = Credentials::new("director", "secret");
        assert_eq!(
            credentials.authorization_header(),
            "Basic ZGlyZWN0b3I6c2VjcmV0"
        );
    }

    #[test]
    fn debug_output_redacts_password() {
        let credentials = Credentials::new("director", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("director"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn clone_keeps_both_parts() {
        let credentials = Credentials::new("admin", "pw").clone();
        assert_eq!(credentials.username(), "admin");
        assert_eq!(credentials.password().expose_secret(), "pw");
        assert_eq!(credentials.authorization_header(), "Basic YWRtaW46cHc=");
    }

    #[test]
    fn empty_credentials_are_accepted() {
        let credentials = Credentials::new("", "");
        assert_eq!(credentials.authorization_header(), "Basic Og==");
    }
}
