//! Session token acquisition and caching.

use std::sync::RwLock;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use dynect_core::{ApiResponse, AuthToken, Credentials, Error, RequestParams, Result};

/// Path of the login operation, relative to the base path.  The login call
/// is the one request that carries no `Auth-Token` header.
pub(crate) const SESSION_PATH: &str = "Session";

/// Token payload of a successful login response.
#[derive(Debug, Deserialize)]
struct SessionData {
    token: String,
}

/// Owns the cached session token for one client instance.
///
/// The token is minted lazily on the first authenticated request and
/// cleared when the dispatcher detects credential expiry.  The cache is
/// lock-guarded so hosts that share a client across threads do not race
/// invalidation against re-fetch.
#[derive(Debug)]
pub struct SessionManager {
    credentials: Credentials,
    token: RwLock<Option<AuthToken>>,
}

impl SessionManager {
    pub(crate) fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token: RwLock::new(None),
        }
    }

    /// Returns the cached token, if any.
    pub(crate) fn cached(&self) -> Option<AuthToken> {
        self.token.read().unwrap().clone()
    }

    /// Whether a token is currently cached.
    pub(crate) fn has_token(&self) -> bool {
        self.token.read().unwrap().is_some()
    }

    /// Clears the cached token.  The next request mints a fresh one; this
    /// does not retry anything by itself.
    pub fn invalidate(&self) {
        debug!("invalidating cached session token");
        *self.token.write().unwrap() = None;
    }

    /// The login request that mints a fresh token.
    pub(crate) fn login_params(&self) -> RequestParams {
        RequestParams::post(SESSION_PATH).body(json!({
            "customer_name": self.credentials.customer_name(),
            "user_name": self.credentials.user_name(),
            "password": self.credentials.password(),
        }))
    }

    /// Extract `data.token` from a login response and cache it.
    pub(crate) fn absorb_login(&self, response: &ApiResponse) -> Result<AuthToken> {
        let data = response
            .data()
            .ok_or_else(|| Error::malformed("login response without data"))?;
        let session: SessionData = serde_json::from_value(data.clone())
            .map_err(|_| Error::malformed("login response without data.token"))?;

        let token = AuthToken::new(session.token);
        *self.token.write().unwrap() = Some(token.clone());
        Ok(token)
    }
}

/// Whether a transport failure message reports expired or inactivity-logged-out
/// credentials, the two conditions the dispatcher recovers from by
/// re-authenticating.
pub(crate) fn is_credential_expiry(message: &str) -> bool {
    message.contains("login: Bad or expired credentials")
        || message.contains("login: inactivity logout")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynect_core::Method;
    use std::collections::BTreeMap;

    fn manager() -> SessionManager {
        SessionManager::new(Credentials::new("acme", "ops", "hunter2"))
    }

    fn login_response(body: serde_json::Value) -> ApiResponse {
        ApiResponse {
            status: 200,
            headers: BTreeMap::new(),
            body: dynect_core::ResponseBody::Json(body),
        }
    }

    #[test]
    fn login_params_shape() {
        let params = manager().login_params();
        assert_eq!(params.method, Method::Post);
        assert_eq!(params.path, "Session");
        let body = params.body.unwrap();
        assert_eq!(body["customer_name"], "acme");
        assert_eq!(body["user_name"], "ops");
        assert_eq!(body["password"], "hunter2");
    }

    #[test]
    fn absorb_login_caches_the_token() {
        let manager = manager();
        assert!(!manager.has_token());

        let response = login_response(json!({"status": "success", "data": {"token": "abc123"}}));
        let token = manager.absorb_login(&response).unwrap();
        assert_eq!(token.as_str(), "abc123");
        assert!(manager.has_token());
        assert_eq!(manager.cached().unwrap().as_str(), "abc123");
    }

    #[test]
    fn invalidate_clears_the_cache() {
        let manager = manager();
        let response = login_response(json!({"status": "success", "data": {"token": "abc123"}}));
        manager.absorb_login(&response).unwrap();

        manager.invalidate();
        assert!(!manager.has_token());
        assert!(manager.cached().is_none());
    }

    #[test]
    fn login_without_token_is_malformed() {
        let manager = manager();
        let response = login_response(json!({"status": "success", "data": {}}));
        assert!(matches!(
            manager.absorb_login(&response),
            Err(Error::MalformedResponse { .. })
        ));
        assert!(!manager.has_token());
    }

    #[test]
    fn expiry_pattern_matches_both_phrases() {
        assert!(is_credential_expiry(
            "unexpected HTTP status 400: login: Bad or expired credentials"
        ));
        assert!(is_credential_expiry("login: inactivity logout"));
        assert!(!is_credential_expiry("zone: No such zone"));
        assert!(!is_credential_expiry("login: Login successful"));
    }
}
