//! The request dispatcher.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};
use url::Url;

use dynect_core::error::InvalidInputError;
use dynect_core::{
    ApiError, ApiResponse, AuthToken, Error, RequestParams, Result, Transport, TransportError,
    WireRequest,
};

use crate::config::Config;
use crate::http::HttpTransport;
use crate::retry::recover_once;
use crate::session::{self, SESSION_PATH, SessionManager};

/// Client for the Dynect Managed DNS REST API.
///
/// Cheap to clone; clones share the session token cache.
///
/// Every call flows through [`Client::request`], which decorates the
/// request, detects job redirects and polls them to completion, and
/// re-authenticates once when the server reports expired credentials.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: Config,
    endpoint: Url,
    transport: Box<dyn Transport>,
    session: SessionManager,
}

impl Client {
    /// Build a client with the reqwest-backed transport.
    pub fn new(config: Config) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Self::with_transport(config, Box::new(transport))
    }

    /// Build a client over a caller-supplied transport.
    pub fn with_transport(config: Config, transport: Box<dyn Transport>) -> Result<Self> {
        let endpoint = config.endpoint()?;
        let session = SessionManager::new(config.credentials.clone());
        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                endpoint,
                transport,
                session,
            }),
        })
    }

    /// The session manager owning this client's token cache.
    pub fn session(&self) -> &SessionManager {
        &self.inner.session
    }

    pub(crate) fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Issue an API request, resolving any job redirect before returning.
    ///
    /// If the server rejects a cached token as expired, the token is
    /// invalidated and the whole request re-run exactly once with a fresh
    /// login.
    #[instrument(skip(self, params), fields(method = %params.method, path = %params.path))]
    pub async fn request(&self, params: RequestParams) -> Result<ApiResponse> {
        recover_once(
            || self.execute(params.clone()),
            |err| self.token_expired(err),
            || {
                warn!("session token rejected as expired, re-authenticating");
                self.inner.session.invalidate();
            },
        )
        .await
    }

    /// [`Client::request`] behind pointer indirection, for the re-entrant
    /// poll loop.
    pub(crate) fn request_boxed(
        &self,
        params: RequestParams,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + '_>> {
        Box::pin(self.request(params))
    }

    fn token_expired(&self, err: &Error) -> bool {
        let Error::Transport(TransportError::Status { message, .. }) = err else {
            return false;
        };
        self.inner.session.has_token() && session::is_credential_expiry(message)
    }

    /// One pass of the dispatch sequence: decorate, exchange, decode,
    /// detect jobs.
    async fn execute(&self, mut params: RequestParams) -> Result<ApiResponse> {
        // Any request may become a job redirect.
        params.expects.insert(307);

        params
            .headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        params
            .headers
            .insert("API-Version".to_string(), self.inner.config.version.clone());
        if params.path != SESSION_PATH {
            let token = self.auth_token().await?;
            params
                .headers
                .insert("Auth-Token".to_string(), token.as_str().to_string());
        }

        let path = self.inner.config.api_path(&params.path);
        let url = self.inner.endpoint.join(&path).map_err(|e| {
            Error::from(InvalidInputError::Endpoint {
                value: path.clone(),
                reason: e.to_string(),
            })
        })?;
        debug!(%url, "dispatching request");

        let wire = WireRequest {
            method: params.method,
            url,
            headers: params.headers.clone(),
            body: params.body.as_ref().map(|body| body.to_string()),
            expects: params.expects.clone(),
            idempotent: params.idempotent,
        };
        let response = ApiResponse::decode(self.inner.transport.exchange(wire).await?)?;

        if response.is_failure() {
            return Err(ApiError {
                message: response.first_info()?.to_string(),
            }
            .into());
        }

        if !self.inner.config.is_job_path(&path) {
            if response.status == 307 {
                return self.follow_job_redirect(response, &params.expects).await;
            }
            // The API sometimes reports an asynchronous job with a plain
            // 200 instead of a redirect; those must be polled too.
            if response.status == 200 && response.is_incomplete() {
                let job_id = response
                    .job_id()
                    .ok_or_else(|| Error::malformed("incomplete response without job_id"))?;
                let location = self.inner.config.job_location(&job_id);
                return self.poll_job(location, Some(job_id), &params.expects).await;
            }
        }

        Ok(response)
    }

    /// Cached token, minting one via the login exchange when absent.
    async fn auth_token(&self) -> Result<AuthToken> {
        if let Some(token) = self.inner.session.cached() {
            return Ok(token);
        }

        info!("creating new session");
        let login = self.inner.session.login_params();
        let response = self
            .execute_boxed(login)
            .await
            .map_err(|source| Error::Auth {
                source: Box::new(source),
            })?;

        self.inner.session.absorb_login(&response)
    }

    /// [`Client::execute`] behind pointer indirection, for the re-entrant
    /// login exchange.
    fn execute_boxed(
        &self,
        params: RequestParams,
    ) -> Pin<Box<dyn Future<Output = Result<ApiResponse>> + Send + '_>> {
        Box::pin(self.execute(params))
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("session", &self.inner.session)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::test_support::{
        ScriptedTransport, expiry_rejection, json_response, login_success, test_client,
        test_config, zone_success,
    };

    #[tokio::test]
    async fn first_request_logs_in_and_decorates() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("abc123"));
        transport.push_ok(zone_success("example.com"));
        let client = test_client(&transport);

        let response = client
            .request(RequestParams::get("Zone/example.com"))
            .await
            .unwrap();
        assert_eq!(response.data().unwrap()["zone"], "example.com");

        let seen = transport.seen();
        assert_eq!(seen.len(), 2);

        // Login: no Auth-Token, credentials in the body, path under the base.
        let login = &seen[0];
        assert_eq!(login.url.path(), "/REST/Session");
        assert!(!login.headers.contains_key("Auth-Token"));
        assert_eq!(login.headers["Content-Type"], "application/json");
        assert_eq!(login.headers["API-Version"], "3.7.13");
        let body: serde_json::Value = serde_json::from_str(login.body.as_ref().unwrap()).unwrap();
        assert_eq!(body["customer_name"], "acme");
        assert_eq!(body["user_name"], "ops");
        assert_eq!(body["password"], "hunter2");

        // The zone request carries the freshly minted token.
        let zone = &seen[1];
        assert_eq!(zone.url.path(), "/REST/Zone/example.com");
        assert_eq!(zone.headers["Auth-Token"], "abc123");
        assert!(zone.expects.contains(&307));
    }

    #[tokio::test]
    async fn cached_token_is_reused() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("abc123"));
        transport.push_ok(zone_success("a.com"));
        transport.push_ok(zone_success("b.com"));
        let client = test_client(&transport);

        client.request(RequestParams::get("Zone/a.com")).await.unwrap();
        client.request(RequestParams::get("Zone/b.com")).await.unwrap();

        let seen = transport.seen();
        assert_eq!(seen.len(), 3, "one login, two zone requests");
        assert_eq!(seen[2].headers["Auth-Token"], "abc123");
    }

    #[tokio::test]
    async fn prefixed_paths_are_not_doubled() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("abc123"));
        transport.push_ok(zone_success("example.com"));
        let client = test_client(&transport);

        client
            .request(RequestParams::get("/REST/Zone/example.com"))
            .await
            .unwrap();
        assert_eq!(transport.seen()[1].url.path(), "/REST/Zone/example.com");
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_exactly_once() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("stale"));
        transport.push_err(expiry_rejection());
        transport.push_ok(login_success("fresh"));
        transport.push_ok(zone_success("example.com"));
        let client = test_client(&transport);

        let response = client
            .request(RequestParams::get("Zone/example.com"))
            .await
            .unwrap();
        assert_eq!(response.data().unwrap()["zone"], "example.com");

        let seen = transport.seen();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[1].headers["Auth-Token"], "stale");
        assert_eq!(seen[3].headers["Auth-Token"], "fresh");
    }

    #[tokio::test]
    async fn second_expiry_surfaces_after_two_attempts() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("stale"));
        transport.push_err(expiry_rejection());
        transport.push_ok(login_success("fresh"));
        transport.push_err(expiry_rejection());
        let client = test_client(&transport);

        let err = client
            .request(RequestParams::get("Zone/example.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Status { status: 400, .. })
        ));
        assert_eq!(transport.seen().len(), 4, "two logins, two zone attempts");
    }

    #[tokio::test]
    async fn unrelated_status_errors_are_not_retried() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("abc123"));
        transport.push_err(TransportError::Status {
            status: 404,
            message: "not found".to_string(),
        });
        let client = test_client(&transport);

        let err = client
            .request(RequestParams::get("Zone/missing.com"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Transport(TransportError::Status { status: 404, .. })
        ));
        assert_eq!(transport.seen().len(), 2);
    }

    #[tokio::test]
    async fn failed_login_is_an_auth_error() {
        let transport = ScriptedTransport::default();
        transport.push_err(TransportError::Status {
            status: 400,
            message: "login: There was a problem with your credentials".to_string(),
        });
        let client = test_client(&transport);

        let err = client
            .request(RequestParams::get("Zone/example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth { .. }));
        assert_eq!(transport.seen().len(), 1, "no retry without a cached token");
    }

    #[tokio::test]
    async fn failure_body_maps_to_api_error() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("abc123"));
        transport.push_ok(json_response(
            200,
            json!({
                "status": "failure",
                "msgs": [{"INFO": "zone: No such zone", "SOURCE": "BLL", "LVL": "ERROR"}]
            }),
        ));
        let client = test_client(&transport);

        let err = client
            .request(RequestParams::get("Zone/missing.com"))
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => assert_eq!(api.message, "zone: No such zone"),
            other => panic!("expected an API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failure_without_msgs_is_malformed() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("abc123"));
        transport.push_ok(json_response(200, json!({"status": "failure"})));
        let client = test_client(&transport);

        let err = client
            .request(RequestParams::get("Zone/missing.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn invalidated_sessions_log_in_again() {
        let transport = ScriptedTransport::default();
        transport.push_ok(login_success("first"));
        transport.push_ok(zone_success("a.com"));
        transport.push_ok(login_success("second"));
        transport.push_ok(zone_success("b.com"));
        let client = test_client(&transport);

        client.request(RequestParams::get("Zone/a.com")).await.unwrap();
        client.session().invalidate();
        client.request(RequestParams::get("Zone/b.com")).await.unwrap();

        let seen = transport.seen();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[3].headers["Auth-Token"], "second");
    }

    #[tokio::test]
    async fn debug_output_redacts_secrets() {
        let transport = ScriptedTransport::default();
        let client = Client::with_transport(test_config(), Box::new(transport)).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("hunter2"));
    }
}
