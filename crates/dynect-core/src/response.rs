//! Decoded API responses and the Dynect response envelope.
//!
//! Every JSON response from the API wraps its payload in an envelope:
//! `{status, data, msgs, job_id}` where `status` is one of `success`,
//! `failure`, or `incomplete`.  A job is terminal once its status is
//! anything other than `incomplete`.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::Error;
use crate::transport::WireResponse;

/// Envelope status of an operation that is still running as a job.
pub const STATUS_INCOMPLETE: &str = "incomplete";
/// Envelope status of a rejected operation.
pub const STATUS_FAILURE: &str = "failure";

/// A decoded response body.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    /// The raw body was empty.
    Empty,
    /// The body was `application/json` and parsed into a value.
    Json(Value),
    /// Any other content type, kept as text.
    Raw(String),
}

/// A response with its body decoded.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: ResponseBody,
}

impl ApiResponse {
    /// Decode a wire response.
    ///
    /// An empty raw body behaves like an empty mapping; a JSON content type
    /// is parsed; anything else is kept as raw text.  A JSON content type
    /// with an unparseable body is a malformed response.
    pub fn decode(wire: WireResponse) -> Result<Self, Error> {
        let body = if wire.body.is_empty() {
            ResponseBody::Empty
        } else if is_json(wire.header("Content-Type")) {
            let value = serde_json::from_slice(&wire.body)
                .map_err(|e| Error::malformed(format!("invalid JSON body: {e}")))?;
            ResponseBody::Json(value)
        } else {
            ResponseBody::Raw(String::from_utf8_lossy(&wire.body).into_owned())
        };

        Ok(Self {
            status: wire.status,
            headers: wire.headers,
            body,
        })
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn json(&self) -> Option<&Value> {
        match &self.body {
            ResponseBody::Json(value) => Some(value),
            _ => None,
        }
    }

    /// The envelope `status` field, if the body carries one.
    pub fn api_status(&self) -> Option<&str> {
        self.json()?.get("status")?.as_str()
    }

    /// Whether the envelope reports `status: failure`.
    pub fn is_failure(&self) -> bool {
        self.api_status() == Some(STATUS_FAILURE)
    }

    /// Whether the envelope reports `status: incomplete`.
    pub fn is_incomplete(&self) -> bool {
        self.api_status() == Some(STATUS_INCOMPLETE)
    }

    /// The envelope `job_id`, normalized to a string.
    pub fn job_id(&self) -> Option<String> {
        match self.json()?.get("job_id")? {
            Value::Number(id) => Some(id.to_string()),
            Value::String(id) => Some(id.clone()),
            _ => None,
        }
    }

    /// The envelope `data` payload.
    pub fn data(&self) -> Option<&Value> {
        self.json()?.get("data")
    }

    /// The first `msgs[].INFO` text.
    ///
    /// A failure body without messages is malformed, not silently empty.
    pub fn first_info(&self) -> Result<&str, Error> {
        let msgs = self
            .json()
            .and_then(|value| value.get("msgs"))
            .and_then(Value::as_array)
            .ok_or_else(|| Error::malformed("response without msgs"))?;
        let first = msgs
            .first()
            .ok_or_else(|| Error::malformed("response with empty msgs"))?;
        first
            .get("INFO")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::malformed("msgs entry without INFO"))
    }
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|value| {
        let mime = value.split(';').next().unwrap_or(value);
        mime.trim().eq_ignore_ascii_case("application/json")
    })
}
