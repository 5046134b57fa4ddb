//! Request parameters handed to the dispatcher.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde_json::Value;

/// HTTP methods used by the Dynect REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Returns the method name as it appears on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for one API request, before decoration by the dispatcher.
///
/// The dispatcher injects headers and prefixes the path; both mutations are
/// local to a single call.  Params are `Clone` because the dispatcher's
/// recovery boundary may re-run the same request once.
#[derive(Debug, Clone)]
pub struct RequestParams {
    pub method: Method,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
    /// Status codes the transport accepts without failing.
    pub expects: BTreeSet<u16>,
    /// Marks requests that are safe for the transport to re-send.
    pub idempotent: bool,
}

impl RequestParams {
    /// Create params for `method` against an API path such as
    /// `Zone/example.com`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            body: None,
            expects: BTreeSet::from([200]),
            idempotent: false,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// A PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Replace the accepted status codes.
    pub fn expects<I: IntoIterator<Item = u16>>(mut self, codes: I) -> Self {
        self.expects = codes.into_iter().collect();
        self
    }

    /// Mark the request as safe to re-send.
    pub fn idempotent(mut self) -> Self {
        self.idempotent = true;
        self
    }
}
