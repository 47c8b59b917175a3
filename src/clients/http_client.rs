//! Reqwest-backed transport.
//!
//! This module provides [`HttpClient`], the default [`Transport`]
//! implementation used by [`CrossrefClient::new`](crate::CrossrefClient::new).

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::clients::errors::{HttpError, HttpResponseError};
use crate::clients::http_request::{HttpMethod, HttpRequest, PostBody};
use crate::clients::http_response::{HttpResponse, ResponseHeaders};
use crate::clients::transport::Transport;
use crate::config::CrossrefConfig;
use crate::query::QueryParams;

/// Crate version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for the Crossref REST API.
///
/// The client handles:
/// - Default headers including User-Agent and Accept
/// - Per-request timeouts
/// - JSON body decoding and non-2xx status mapping
///
/// It performs no retries and no caching.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust,ignore
/// use crossref_api::clients::{HttpClient, Transport};
/// use crossref_api::query::QueryParams;
/// use crossref_api::CrossrefConfig;
///
/// let config = CrossrefConfig::default();
/// let client = HttpClient::new(&config)?;
///
/// let body = client
///     .get("http://api.crossref.org/works", &QueryParams::new(), config.timeout())
///     .await?;
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Default headers to include in all requests.
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &CrossrefConfig) -> Result<Self, HttpError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Crossref API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            default_headers,
        })
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let url = request.url.clone();
        let response = self.send(request).await?;

        if !response.is_ok() {
            let message = if response.body.trim().is_empty() {
                reason_phrase(response.code)
            } else {
                response.body
            };
            return Err(HttpError::Response(HttpResponseError {
                code: response.code,
                url,
                message,
            }));
        }

        Ok(response)
    }

    /// Sends an HTTP request and returns the response whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if validation fails, or
    /// [`HttpError::Network`] if no response was received.
    pub async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
            HttpMethod::Head => self.client.head(&request.url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(query) = &request.query {
            req_builder = req_builder.query(query);
        }

        if let Some(timeout) = request.timeout {
            req_builder = req_builder.timeout(timeout);
        }

        req_builder = match request.body {
            Some(PostBody::Form(fields)) => req_builder.form(&fields),
            Some(PostBody::Multipart { fields, files }) => {
                let mut form = reqwest::multipart::Form::new();
                for (key, value) in fields {
                    form = form.text(key, value);
                }
                for file in files {
                    let part =
                        reqwest::multipart::Part::bytes(file.contents).file_name(file.file_name);
                    form = form.part(file.field, part);
                }
                req_builder.multipart(form)
            }
            None => req_builder,
        };

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.text().await?;

        tracing::debug!(
            method = %request.http_method,
            url = %request.url,
            status = code,
            "Crossref API request completed"
        );

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Parses response headers into [`ResponseHeaders`].
    fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> ResponseHeaders {
        headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.to_str().unwrap_or_default()))
            .collect()
    }

    /// Decodes a JSON body. An empty body decodes to an empty object.
    fn decode_body(url: &str, body: &str) -> Result<Value, HttpError> {
        if body.trim().is_empty() {
            return Ok(serde_json::json!({}));
        }
        serde_json::from_str(body).map_err(|source| HttpError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

/// Returns the canonical reason phrase of a status code.
fn reason_phrase(code: u16) -> String {
    reqwest::StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or_default()
        .to_string()
}

impl Transport for HttpClient {
    async fn get(
        &self,
        url: &str,
        params: &QueryParams,
        timeout: Duration,
    ) -> Result<Value, HttpError> {
        let mut builder = HttpRequest::builder(HttpMethod::Get, url).timeout(timeout);
        if !params.is_empty() {
            builder = builder.query(params.clone());
        }
        let response = self.request(builder.build()?).await?;
        Self::decode_body(url, &response.body)
    }

    /// Headers are returned for any status, so rate-limit headers survive
    /// a `429 Too Many Requests`.
    async fn head(&self, url: &str, timeout: Duration) -> Result<ResponseHeaders, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Head, url)
            .timeout(timeout)
            .build()?;
        let response = self.send(request).await?;
        Ok(response.headers)
    }

    async fn post(
        &self,
        url: &str,
        body: PostBody,
        timeout: Duration,
    ) -> Result<Value, HttpError> {
        let request = HttpRequest::builder(HttpMethod::Post, url)
            .body(body)
            .timeout(timeout)
            .build()?;
        let response = self.request(request).await?;
        Self::decode_body(url, &response.body)
    }
}
