//! The HTTP transport seam.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use url::Url;

use crate::error::TransportError;
use crate::params::Method;

/// A fully decorated request, ready for a single HTTP exchange.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
    /// Status codes the exchange accepts; anything else is a
    /// [`TransportError::Status`].
    pub expects: BTreeSet<u16>,
    /// Whether the exchange may be re-sent after a connection failure.
    pub idempotent: bool,
}

/// The raw result of one HTTP exchange.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
}

impl WireResponse {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Performs a single HTTP exchange.
///
/// Implementations must fail with [`TransportError::Status`], carrying the
/// response body text in the message, when the observed status code is not
/// in the request's accepted set.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn exchange(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_lookup_ignores_case() {
        let response = WireResponse {
            status: 307,
            headers: BTreeMap::from([("location".to_string(), "/REST/Job/5".to_string())]),
            body: Vec::new(),
        };
        assert_eq!(response.header("Location"), Some("/REST/Job/5"));
        assert_eq!(response.header("LOCATION"), Some("/REST/Job/5"));
        assert_eq!(response.header("Content-Type"), None);
    }
}
