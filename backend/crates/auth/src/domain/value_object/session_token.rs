//! Session Token Value Object
//!
//! Opaque bearer secret carried in the session cookie. It is random, never
//! derived from user input, and looked up verbatim.

use platform::crypto::generate_token;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Fresh 256-bit token
    pub fn generate() -> Self {
        Self(generate_token())
    }

    /// Wrap a value read from a cookie or the database
    pub fn from_string(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SessionToken([REDACTED])")
    }
}
