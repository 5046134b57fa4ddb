//! Error types for the dynect client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, API, and job-polling failures.

use std::time::Duration;
use thiserror::Error;

/// The unified error type for dynect operations.
///
/// Explicit variants allow callers to distinguish a rejected request from a
/// job that never finished or a session that could not be established.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, unexpected status).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The login exchange itself failed.
    #[error("authentication failed: {source}")]
    Auth {
        #[source]
        source: Box<Error>,
    },

    /// The API reported `status: failure` in a decoded response body.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A job was still incomplete when the polling budget ran out.
    #[error("Job {job_id} is still incomplete")]
    JobIncomplete { job_id: String },

    /// The polling budget elapsed while the last observed job status was
    /// already terminal.  Reported as-is rather than suppressed.
    #[error("job polling timed out after {elapsed:?}")]
    PollTimeout { elapsed: Duration },

    /// The response was missing a field the protocol requires.
    #[error("malformed response: {reason}")]
    MalformedResponse { reason: String },

    /// Input validation errors (endpoint construction).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Shorthand for a malformed-response error.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedResponse {
            reason: reason.into(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a status code outside the accepted set.
    /// `message` carries the raw response body text.
    #[error("unexpected HTTP status {status}: {message}")]
    Status { status: u16, message: String },

    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// The HTTP exchange timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Body-level API failure, carrying the first `msgs[].INFO` text.
#[derive(Debug, Error)]
#[error("API request failed: {message}")]
pub struct ApiError {
    /// Message text reported by the server.
    pub message: String,
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// The configured endpoint does not form a valid URL.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },
}
