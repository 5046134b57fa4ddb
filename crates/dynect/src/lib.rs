//! dynect - Client for the Dynect Managed DNS REST API.
//!
//! The Dynect API models long-running operations as jobs: any request may
//! answer with a `307` redirect (or a `200` whose body reports
//! `incomplete`) pointing at a job resource that must be polled until it
//! resolves.  This client hides that protocol: [`Client::request`] logs in
//! lazily, decorates and dispatches the request, polls any job to
//! completion, and re-authenticates once when the server reports an
//! expired session.
//!
//! # Example
//!
//! ```no_run
//! use dynect::{Client, Config};
//!
//! # async fn example() -> dynect::Result<()> {
//! let config = Config::new("customer", "user", "password");
//! let client = Client::new(config)?;
//!
//! let zone = client.get_zone("example.com").await?;
//! println!("{:?}", zone.data());
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod config;
mod http;
mod jobs;
mod retry;
mod session;
mod wait;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::Client;
pub use config::Config;
pub use http::HttpTransport;
pub use session::SessionManager;

// Re-export the foundation types callers interact with.
pub use dynect_core::{
    ApiError, ApiResponse, AuthToken, Credentials, Error, Method, RequestParams, ResponseBody,
    Result, Transport, TransportError, WireRequest, WireResponse,
};
