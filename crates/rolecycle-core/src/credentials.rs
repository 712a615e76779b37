//! Temporary credentials produced by a role assumption.

use std::fmt;
use std::time::SystemTime;

/// A temporary access key, secret key and session token.
///
/// Produced fresh by every assumption and never mutated afterwards. The
/// secret key and session token are redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
    session_token: String,
    expiration: Option<SystemTime>,
}

impl Credentials {
    /// Create a credential triple.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: impl Into<String>,
        expiration: Option<SystemTime>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
            expiration,
        }
    }

    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    pub fn session_token(&self) -> &str {
        &self.session_token
    }

    /// When the provider says the credentials stop working, if it said.
    pub fn expiration(&self) -> Option<SystemTime> {
        self.expiration
    }

    /// Name of the first empty field, if any.
    ///
    /// A credential with a missing field cannot be published.
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.access_key_id.is_empty() {
            Some("access_key_id")
        } else if self.secret_access_key.is_empty() {
            Some("secret_access_key")
        } else if self.session_token.is_empty() {
            Some("session_token")
        } else {
            None
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field("session_token", &"** redacted **")
            .field("expiration", &self.expiration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::new("ASIAEXAMPLE", "very-secret", "very-token", None);
        let debug = format!("{creds:?}");

        assert!(debug.contains("ASIAEXAMPLE"));
        assert!(!debug.contains("very-secret"));
        assert!(!debug.contains("very-token"));
    }

    #[test]
    fn test_missing_field() {
        assert_eq!(Credentials::new("a", "b", "c", None).missing_field(), None);
        assert_eq!(
            Credentials::new("", "b", "c", None).missing_field(),
            Some("access_key_id")
        );
        assert_eq!(
            Credentials::new("a", "", "c", None).missing_field(),
            Some("secret_access_key")
        );
        assert_eq!(
            Credentials::new("a", "b", "", None).missing_field(),
            Some("session_token")
        );
    }
}
