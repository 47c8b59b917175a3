//! Error types for the Crossref API client.
//!
//! This module contains the configuration error type and [`CrossrefError`],
//! the single error type surfaced by queries, lookups, and pagination.
//!
//! # Error Handling
//!
//! Errors fall into three families:
//!
//! - **Validation** ([`ValidationError`]): raised synchronously while a
//!   [`Query`](crate::Query) is being configured, before any network call.
//! - **Ceiling** ([`CrossrefError::OffsetExceeded`]): raised mid-iteration when
//!   the client-side offset ceiling is reached. This is distinct from the
//!   normal end of results (an empty page).
//! - **Transport** ([`HttpError`]): surfaced verbatim from the transport. No
//!   retry and no suppression happens in this crate.
//!
//! # Example
//!
//! ```rust
//! use crossref_api::{ApiHost, ConfigError};
//!
//! let result = ApiHost::new("");
//! assert!(matches!(result, Err(ConfigError::InvalidApiHost { .. })));
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::query::ValidationError;

/// Errors that can occur while building a [`CrossrefConfig`](crate::CrossrefConfig).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API host is invalid.
    #[error("Invalid API host '{host}'. Expected a bare host name with an optional port (e.g., 'api.crossref.org' or '127.0.0.1:8080').")]
    InvalidApiHost {
        /// The invalid host that was provided.
        host: String,
    },

    /// Request timeout must be non-zero.
    #[error("Request timeout must be greater than zero.")]
    ZeroTimeout,

    /// Page limits are invalid.
    #[error("Invalid page limits: {reason}")]
    InvalidPageLimits {
        /// The reason the limits are invalid.
        reason: String,
    },
}

/// Unified error type for queries, lookups, and pagination.
///
/// # Example
///
/// ```rust
/// use crossref_api::{CrossrefError, ValidationError};
///
/// let error = CrossrefError::OffsetExceeded { offset: 42, max_offset: 40 };
/// assert!(error.to_string().contains("40"));
///
/// let error: CrossrefError = ValidationError::InvalidSampleSize { size: 150 }.into();
/// assert!(error.is_validation());
/// ```
#[derive(Debug, Error)]
pub enum CrossrefError {
    /// A query parameter was rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The pagination offset reached the client-side ceiling.
    ///
    /// No request was issued for `offset`.
    #[error("Offset {offset} exceeded the max offset of {max_offset}")]
    OffsetExceeded {
        /// The offset that would have been requested next.
        offset: u32,
        /// The configured ceiling.
        max_offset: u32,
    },

    /// The transport failed (network, non-2xx status, or malformed JSON).
    #[error(transparent)]
    Transport(#[from] HttpError),

    /// The JSON body did not have the expected `message` shape.
    #[error("Unexpected response from {url}: {reason}")]
    UnexpectedResponse {
        /// The URL that produced the response.
        url: String,
        /// What was missing or malformed.
        reason: String,
    },
}

impl CrossrefError {
    /// Returns `true` if this is a [`CrossrefError::Validation`] error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns `true` if the pagination ceiling was reached.
    #[must_use]
    pub const fn is_offset_exceeded(&self) -> bool {
        matches!(self, Self::OffsetExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;

    #[test]
    fn test_invalid_api_host_error_message() {
        let error = ConfigError::InvalidApiHost {
            host: "http://bad host".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("http://bad host"));
        assert!(message.contains("Expected a bare host name"));
    }

    #[test]
    fn test_zero_timeout_error_message() {
        assert!(ConfigError::ZeroTimeout
            .to_string()
            .contains("greater than zero"));
    }

    #[test]
    fn test_offset_exceeded_message_names_both_offsets() {
        let error = CrossrefError::OffsetExceeded {
            offset: 42,
            max_offset: 40,
        };
        assert_eq!(error.to_string(), "Offset 42 exceeded the max offset of 40");
        assert!(error.is_offset_exceeded());
        assert!(!error.is_validation());
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let inner = ValidationError::InvalidSampleSize { size: 0 };
        let expected = inner.to_string();
        let error = CrossrefError::from(inner);
        assert_eq!(error.to_string(), expected);
        assert!(error.is_validation());
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let error = CrossrefError::from(HttpError::Response(HttpResponseError {
            code: 404,
            url: "http://api.crossref.org/works/missing".to_string(),
            message: "Resource not found.".to_string(),
        }));
        assert!(error.to_string().contains("Resource not found."));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = CrossrefError::OffsetExceeded {
            offset: 42,
            max_offset: 40,
        };
        let _: &dyn std::error::Error = &error;
        let _: &dyn std::error::Error = &ConfigError::ZeroTimeout;
    }
}
