//! Transport error types.
//!
//! This module contains error types for HTTP operations, including response
//! errors, body decoding failures, and request validation failures.
//!
//! # Error Handling
//!
//! - [`HttpResponseError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all transport errors
//!
//! # Example
//!
//! ```rust,ignore
//! use crossref_api::clients::{HttpError, Transport};
//!
//! match transport.get(&url, &params, timeout).await {
//!     Ok(body) => println!("Body: {body}"),
//!     Err(HttpError::Response(e)) => println!("API error {}: {}", e.code, e.message),
//!     Err(HttpError::Decode { url, .. }) => println!("Malformed JSON from {url}"),
//!     Err(HttpError::InvalidRequest(e)) => println!("Invalid request: {e}"),
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//! }
//! ```

use thiserror::Error;

/// Error returned when an HTTP request receives a non-successful response.
///
/// # Example
///
/// ```rust
/// use crossref_api::clients::HttpResponseError;
///
/// let error = HttpResponseError {
///     code: 404,
///     url: "http://api.crossref.org/works/10.0/nope".to_string(),
///     message: "Resource not found.".to_string(),
/// };
///
/// assert!(error.to_string().contains("404"));
/// ```
#[derive(Debug, Error)]
#[error("Request to {url} failed with status {code}: {message}")]
pub struct HttpResponseError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The URL that was requested.
    pub url: String,
    /// The response body, or the canonical reason when the body was empty.
    pub message: String,
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The URL does not start with `http://` or `https://`.
    #[error("Invalid request URL '{url}'. Expected an absolute http(s) URL.")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
    },

    /// A request body was provided for a method that does not take one.
    #[error("Cannot send a body with {method}.")]
    UnexpectedBody {
        /// The HTTP method that was used.
        method: String,
    },

    /// A POST request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all transport errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// An HTTP response error (non-2xx status code).
    #[error(transparent)]
    Response(#[from] HttpResponseError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// The response body was not valid JSON.
    #[error("Malformed JSON from {url}: {source}")]
    Decode {
        /// The URL that produced the body.
        url: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code if the server answered with a non-2xx status.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }
}
