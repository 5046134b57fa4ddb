//! Session token type.

use std::fmt;

/// An opaque Dynect session token.
///
/// Tokens are minted by the `Session` login call and attached to subsequent
/// requests via the `Auth-Token` header.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AuthToken(String);

impl AuthToken {
    /// Create a new session token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in the `Auth-Token` header.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP headers.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide the token value in Debug output
impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hides_value_in_debug() {
        let token = AuthToken::new("5tEsTtOkEn123");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("5tEsTtOkEn123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
