//! HTTP response types for the transport layer.
//!
//! This module provides [`ResponseHeaders`], the header map returned by HEAD
//! requests, [`HttpResponse`], and [`RateLimits`], the rate-limit values the
//! server reports on every response.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Placeholder reported when a rate-limit header is absent.
pub const UNDEFINED_HEADER: &str = "undefined";

/// Response headers keyed by lowercased name (headers may have multiple values).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseHeaders(HashMap<String, Vec<String>>);

impl ResponseHeaders {
    /// Creates an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a header value. The name is stored lowercased.
    pub fn append(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        self.0
            .entry(name.as_ref().to_lowercase())
            .or_default()
            .push(value.into());
    }

    /// Returns the first value of a header, matching the name case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns `true` if no headers are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for ResponseHeaders {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.append(name, value);
        }
        headers
    }
}

/// Rate limit values reported through the `X-Rate-Limit-*` headers.
///
/// Values are surfaced verbatim. When a header is absent the literal string
/// `"undefined"` is used instead.
///
/// # Example
///
/// ```rust
/// use crossref_api::clients::{RateLimits, ResponseHeaders};
///
/// let headers: ResponseHeaders = [("X-Rate-Limit-Limit", "50")].into_iter().collect();
/// let limits = RateLimits::from_headers(&headers);
///
/// assert_eq!(limits.limit, "50");
/// assert_eq!(limits.interval, "undefined");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimits {
    /// Value of `X-Rate-Limit-Limit`.
    #[serde(rename = "X-Rate-Limit-Limit")]
    pub limit: String,
    /// Value of `X-Rate-Limit-Interval`.
    #[serde(rename = "X-Rate-Limit-Interval")]
    pub interval: String,
}

impl RateLimits {
    /// Name of the header carrying the request limit.
    pub const LIMIT_HEADER: &'static str = "X-Rate-Limit-Limit";

    /// Name of the header carrying the limit interval.
    pub const INTERVAL_HEADER: &'static str = "X-Rate-Limit-Interval";

    /// Extracts the rate limit headers, substituting `"undefined"` when absent.
    #[must_use]
    pub fn from_headers(headers: &ResponseHeaders) -> Self {
        let read = |name: &str| headers.get(name).unwrap_or(UNDEFINED_HEADER).to_string();

        Self {
            limit: read(Self::LIMIT_HEADER),
            interval: read(Self::INTERVAL_HEADER),
        }
    }
}

/// An HTTP response received by the reqwest transport.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers.
    pub headers: ResponseHeaders,
    /// The raw response body.
    pub body: String,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub const fn new(code: u16, headers: ResponseHeaders, body: String) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }
}
