//! Client configuration.

use std::time::Duration;

use url::Url;

use dynect_core::error::InvalidInputError;
use dynect_core::{Credentials, Result};

/// Default API host.
pub const DEFAULT_HOST: &str = "api.dynect.net";
/// Default API version string sent with every request.
pub const DEFAULT_VERSION: &str = "3.7.13";
/// Default base path under which all API paths are namespaced.
pub const DEFAULT_BASE_PATH: &str = "/REST";

/// Configuration for a [`Client`](crate::Client).
///
/// Only the credentials are required; everything else defaults to the
/// production API.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dynect::Config;
///
/// let config = Config::new("acme", "ops", "hunter2")
///     .persistent(true)
///     .job_poll_timeout(Duration::from_secs(30));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) credentials: Credentials,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) scheme: String,
    pub(crate) base_path: String,
    pub(crate) version: String,
    pub(crate) persistent: bool,
    pub(crate) job_poll_timeout: Duration,
    pub(crate) job_poll_interval: Duration,
    pub(crate) connect_timeout: Option<Duration>,
    pub(crate) timeout: Option<Duration>,
}

impl Config {
    /// Configuration for the production API with default options.
    pub fn new(
        customer_name: impl Into<String>,
        user_name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Credentials::new(customer_name, user_name, password),
            host: DEFAULT_HOST.to_string(),
            port: 443,
            scheme: "https".to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            version: DEFAULT_VERSION.to_string(),
            persistent: false,
            job_poll_timeout: Duration::from_secs(10),
            job_poll_interval: Duration::from_secs(1),
            connect_timeout: None,
            timeout: None,
        }
    }

    /// Override the API host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the API port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Override the URL scheme.
    pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Override the base path all API paths are joined under.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Override the `API-Version` header value.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Keep connections alive between requests.
    pub fn persistent(mut self, persistent: bool) -> Self {
        self.persistent = persistent;
        self
    }

    /// Wall-clock budget for polling one job to completion.
    pub fn job_poll_timeout(mut self, timeout: Duration) -> Self {
        self.job_poll_timeout = timeout;
        self
    }

    /// Pause between consecutive job polls.
    pub fn job_poll_interval(mut self, interval: Duration) -> Self {
        self.job_poll_interval = interval;
        self
    }

    /// Connection timeout passed to the transport.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Per-exchange timeout passed to the transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The API endpoint, e.g. `https://api.dynect.net:443`.
    pub(crate) fn endpoint(&self) -> Result<Url> {
        let raw = format!("{}://{}:{}", self.scheme, self.host, self.port);
        Url::parse(&raw).map_err(|e| {
            InvalidInputError::Endpoint {
                value: raw,
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Join a request path under the base path unless already prefixed.
    pub(crate) fn api_path(&self, path: &str) -> String {
        if path.starts_with(&format!("{}/", self.base_path)) {
            path.to_string()
        } else {
            format!("{}/{}", self.base_path, path)
        }
    }

    /// The job-status path for a job id.
    pub(crate) fn job_location(&self, job_id: &str) -> String {
        format!("{}/Job/{}", self.base_path, job_id)
    }

    /// Whether a normalized path addresses job status.  Job paths are
    /// excluded from job-redirect detection to avoid polling recursion.
    pub(crate) fn is_job_path(&self, path: &str) -> bool {
        path.starts_with(&format!("{}/Job/", self.base_path))
    }
}
