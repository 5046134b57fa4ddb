//! dynect-core - Core types and traits for the Dynect Managed DNS client.
//!
//! This crate holds the dependency-light foundation: the error taxonomy,
//! credential and token types, request parameters, the decoded response
//! envelope, and the [`Transport`] seam that the HTTP layer implements.

pub mod credentials;
pub mod error;
pub mod params;
pub mod response;
pub mod token;
pub mod transport;

pub use credentials::Credentials;
pub use error::{ApiError, Error, InvalidInputError, TransportError};
pub use params::{Method, RequestParams};
pub use response::{ApiResponse, ResponseBody};
pub use token::AuthToken;
pub use transport::{Transport, WireRequest, WireResponse};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
