//! reqwest-backed implementation of the transport seam.

use std::collections::BTreeMap;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect;
use tracing::trace;

use dynect_core::{Method, Transport, TransportError, WireRequest, WireResponse};

use crate::config::Config;

/// HTTP transport for the Dynect API.
///
/// Redirects are disabled: a `307` is protocol data for the dispatcher,
/// never something to follow here.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport from client configuration.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("dynect/", env!("CARGO_PKG_VERSION")))
            .redirect(redirect::Policy::none());

        if !config.persistent {
            builder = builder.pool_max_idle_per_host(0);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TransportError::Http {
            message: e.to_string(),
        })?;
        Ok(Self { client })
    }

    async fn send_once(&self, request: &WireRequest) -> Result<WireResponse, TransportError> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                TransportError::Http {
                    message: format!("invalid header name '{name}'"),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|_| TransportError::Http {
                message: format!("invalid value for header '{name}'"),
            })?;
            headers.insert(name, value);
        }

        let mut builder = self
            .client
            .request(reqwest_method(request.method), request.url.clone())
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(classify)?;

        let status = response.status().as_u16();
        let mut response_headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                response_headers.insert(name.as_str().to_string(), value.to_string());
            }
        }
        let body = response.bytes().await.map_err(classify)?.to_vec();
        trace!(status, bytes = body.len(), "HTTP exchange complete");

        if !request.expects.contains(&status) {
            return Err(TransportError::Status {
                status,
                message: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(WireResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn exchange(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        match self.send_once(&request).await {
            // One resend for idempotent requests that died before a status
            // line was observed.  Status errors are never resent.
            Err(err) if request.idempotent && is_connection_failure(&err) => {
                trace!(%err, "resending idempotent request");
                self.send_once(&request).await
            }
            other => other,
        }
    }
}

fn is_connection_failure(err: &TransportError) -> bool {
    matches!(
        err,
        TransportError::Connection { .. } | TransportError::Timeout
    )
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    }
}
