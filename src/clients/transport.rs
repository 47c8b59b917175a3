//! The transport boundary.
//!
//! The query builder and the pagination cursor never talk to the network
//! directly. Every request goes through a [`Transport`], which the caller can
//! replace (for testing, caching, or retry policies) without touching the core.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::HttpError;
use crate::clients::http_request::PostBody;
use crate::clients::http_response::ResponseHeaders;
use crate::query::QueryParams;

/// Executes HTTP requests on behalf of the client.
///
/// Implementations own every transport-level concern: TLS, connection
/// pooling, retries, caching. The timeout is supplied on every call.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use serde_json::{json, Value};
/// use crossref_api::clients::{HttpError, PostBody, ResponseHeaders, Transport};
/// use crossref_api::query::QueryParams;
///
/// struct Canned;
///
/// impl Transport for Canned {
///     async fn get(&self, _url: &str, _params: &QueryParams, _timeout: Duration) -> Result<Value, HttpError> {
///         Ok(json!({"status": "ok", "message": {"items": []}}))
///     }
///
///     async fn head(&self, _url: &str, _timeout: Duration) -> Result<ResponseHeaders, HttpError> {
///         Ok(ResponseHeaders::new())
///     }
///
///     async fn post(&self, _url: &str, _body: PostBody, _timeout: Duration) -> Result<Value, HttpError> {
///         Ok(json!({}))
///     }
/// }
/// ```
#[allow(async_fn_in_trait)]
pub trait Transport: Send + Sync {
    /// Issues a GET and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on network failure, non-2xx status, or malformed JSON.
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<Value, HttpError>;

    /// Issues a HEAD and returns the response headers.
    ///
    /// Headers are returned for every status the server answers with,
    /// including 4xx and 5xx.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] only when no response was received.
    async fn head(&self, url: &str, timeout: Duration) -> Result<ResponseHeaders, HttpError>;

    /// Issues a POST and returns the decoded JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] on network failure, non-2xx status, or malformed JSON.
    async fn post(&self, url: &str, body: PostBody, timeout: Duration)
        -> Result<Value, HttpError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<Value, HttpError> {
        (**self).get(url, params, timeout).await
    }

    async fn head(&self, url: &str, timeout: Duration) -> Result<ResponseHeaders, HttpError> {
        (**self).head(url, timeout).await
    }

    async fn post(
        &self,
        url: &str,
        body: PostBody,
        timeout: Duration,
    ) -> Result<Value, HttpError> {
        (**self).post(url, body, timeout).await
    }
}
