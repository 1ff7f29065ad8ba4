//! SASL mechanisms and client response computation.
//!
//! # Supported Mechanisms
//!
//! - **PLAIN**: Simple username/password authentication (RFC 4616)
//! - **EXTERNAL**: Credentials established out of band, such as a TLS
//!   client certificate
//!
//! # Reference
//! - IRCv3 SASL: <https://ircv3.net/specs/extensions/sasl-3.1>
//! - RFC 4616 (PLAIN): <https://tools.ietf.org/html/rfc4616>

use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secure string that is zeroized when dropped.
///
/// Used for the session password to ensure credential material does not
/// linger in memory after the exchange ends.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecureString(String);

impl SecureString {
    /// Create a new secure string.
    #[must_use]
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Get the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print actual content
        f.debug_struct("SecureString")
            .field("len", &self.0.len())
            .finish()
    }
}

/// The mechanism driving one authentication session, with the credentials
/// it needs.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum Mechanism {
    /// PLAIN (RFC 4616): username/password sent as a NUL-separated triple.
    Plain {
        /// Account name, used as both the authorization and the
        /// authentication identity.
        username: String,
        /// Account password, sent verbatim.
        password: SecureString,
    },
    /// EXTERNAL: the server authenticates the connection from out-of-band
    /// credentials; the client response is empty.
    External,
}

impl Mechanism {
    /// Build a PLAIN mechanism from account credentials.
    #[must_use]
    pub fn plain(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Plain {
            username: username.into(),
            password: SecureString::new(password.into()),
        }
    }

    /// Canonical mechanism name, as announced in `AUTHENTICATE <name>`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Plain { .. } => "PLAIN",
            Self::External => "EXTERNAL",
        }
    }

    /// Compute the client response to a completed server challenge.
    ///
    /// Returns `None` when the mechanism answers with the empty response
    /// (a single `AUTHENTICATE +`). The challenge bytes are ignored by
    /// both supported mechanisms: PLAIN is one-shot and EXTERNAL carries
    /// no payload. The bytes are not interpreted or validated as UTF-8.
    #[must_use]
    pub fn respond(&self, _challenge: &[u8]) -> Option<Vec<u8>> {
        match self {
            Self::Plain { username, password } => {
                // authzid NUL authcid NUL password, with the authorization
                // identity explicitly set to the account username.
                let password = password.as_str().as_bytes();
                let mut response =
                    Vec::with_capacity(username.len() * 2 + password.len() + 2);
                response.extend_from_slice(username.as_bytes());
                response.push(0);
                response.extend_from_slice(username.as_bytes());
                response.push(0);
                response.extend_from_slice(password);
                Some(response)
            }
            Self::External => None,
        }
    }
}

impl std::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_response_layout() {
        let mechanism = Mechanism::plain("alice", "hunter2");
        let response = mechanism.respond(b"").unwrap();
        assert_eq!(response, b"alice\0alice\0hunter2");
    }

    #[test]
    fn test_plain_ignores_challenge() {
        let mechanism = Mechanism::plain("alice", "hunter2");
        assert_eq!(mechanism.respond(b""), mechanism.respond(b"challenge"));
    }

    #[test]
    fn test_external_response_is_absent() {
        assert_eq!(Mechanism::External.respond(b""), None);
    }

    #[test]
    fn test_mechanism_name() {
        assert_eq!(Mechanism::plain("a", "b").name(), "PLAIN");
        assert_eq!(Mechanism::External.name(), "EXTERNAL");
        assert_eq!(Mechanism::External.to_string(), "EXTERNAL");
    }

    #[test]
    fn test_secure_string_debug_hides_content() {
        let secret = SecureString::new("super_secret_password".to_string());
        let debug_output = format!("{:?}", secret);

        assert!(!debug_output.contains("super_secret_password"));
        assert!(debug_output.contains("SecureString"));
        assert!(debug_output.contains("len"));
    }

    #[test]
    fn test_password_bytes_sent_verbatim() {
        // Passwords are raw bytes as far as the exchange is concerned;
        // no normalization is applied.
        let mechanism = Mechanism::plain("alice", "p\u{e4}ss\u{a0}word");
        let response = mechanism.respond(b"").unwrap();
        let tail = &response[b"alice\0alice\0".len()..];
        assert_eq!(tail, "p\u{e4}ss\u{a0}word".as_bytes());
    }
}
