//! HTTP request types for the transport layer.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests against the Crossref REST API.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::clients::errors::InvalidHttpRequestError;
use crate::query::QueryParams;

/// HTTP methods used by the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    /// HTTP GET method for paged and single-resource fetches.
    Get,
    /// HTTP POST method, present for symmetry with the remote API.
    Post,
    /// HTTP HEAD method, used for rate-limit header introspection.
    Head,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Head => write!(f, "head"),
        }
    }
}

/// A file attached to a multipart POST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    /// The multipart field name.
    pub field: String,
    /// The file name reported to the server.
    pub file_name: String,
    /// The raw file contents.
    pub contents: Vec<u8>,
}

/// Body of a POST request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostBody {
    /// URL-encoded form fields.
    Form(BTreeMap<String, String>),
    /// Multipart form with form fields and attached files.
    Multipart {
        /// Plain form fields.
        fields: BTreeMap<String, String>,
        /// Attached files.
        files: Vec<FilePart>,
    },
}

/// An HTTP request to be sent by the transport.
///
/// Use [`HttpRequest::builder`] to construct requests with the builder pattern.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use crossref_api::clients::{HttpRequest, HttpMethod};
///
/// let request = HttpRequest::builder(HttpMethod::Get, "http://api.crossref.org/works")
///     .query_param("rows", "20")
///     .timeout(Duration::from_secs(5))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.http_method, HttpMethod::Get);
/// ```
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The absolute URL for this request.
    pub url: String,
    /// Query parameters to append to the URL.
    pub query: Option<QueryParams>,
    /// The request body, if any.
    pub body: Option<PostBody>,
    /// Per-request timeout.
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `url` is not an absolute http(s) URL
    /// - `http_method` is `Post` but `body` is `None`
    /// - `http_method` is `Get` or `Head` but `body` is `Some`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(InvalidHttpRequestError::InvalidUrl {
                url: self.url.clone(),
            });
        }

        match (self.http_method, &self.body) {
            (HttpMethod::Post, None) => Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            }),
            (HttpMethod::Get | HttpMethod::Head, Some(_)) => {
                Err(InvalidHttpRequestError::UnexpectedBody {
                    method: self.http_method.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    query: Option<QueryParams>,
    body: Option<PostBody>,
    timeout: Option<Duration>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            query: None,
            body: None,
            timeout: None,
        }
    }

    /// Sets all query parameters at once.
    #[must_use]
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = Some(query);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let query = self.query.take().unwrap_or_default();
        self.query = Some(query.with(key, value));
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: PostBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            query: self.query,
            body: self.body,
            timeout: self.timeout,
        };
        request.verify()?;
        Ok(request)
    }
}
