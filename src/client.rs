//! The client facade.
//!
//! [`CrossrefClient`] binds a [`CrossrefConfig`] to a [`Transport`] and is the
//! entry point for everything that touches the network: paginated queries,
//! single-resource lookups, and rate-limit introspection.

use serde_json::Value;

use crate::clients::{HttpClient, HttpError, PostBody, RateLimits, Transport};
use crate::config::CrossrefConfig;
use crate::error::CrossrefError;
use crate::pagination::Cursor;
use crate::query::{Collection, Query};

/// Path segments of the resource whose headers carry the rate limits.
const RATE_LIMIT_PATH: [&str; 2] = ["members", "1"];

/// Client for the Crossref REST API.
///
/// Generic over its [`Transport`]; [`CrossrefClient::new`] uses the bundled
/// reqwest [`HttpClient`].
///
/// # Example
///
/// ```rust,no_run
/// use crossref_api::{CrossrefClient, CrossrefConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CrossrefClient::new(CrossrefConfig::default())?;
///
/// let work = client.work("10.1038/nphys1170").await?;
/// println!("{}", work["title"][0]);
///
/// let query = client.funders().query_terms(["health"]);
/// let funders = client.iter(&query).collect_all().await?;
/// println!("{} funders", funders.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CrossrefClient<T: Transport = HttpClient> {
    config: CrossrefConfig,
    transport: T,
}

impl CrossrefClient<HttpClient> {
    /// Creates a client backed by [`HttpClient`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the underlying reqwest client cannot be built.
    pub fn new(config: CrossrefConfig) -> Result<Self, HttpError> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> CrossrefClient<T> {
    /// Creates a client that sends every request through `transport`.
    #[must_use]
    pub const fn with_transport(config: CrossrefConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &CrossrefConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns an empty query over `collection` on the configured host.
    #[must_use]
    pub fn query(&self, collection: Collection) -> Query {
        Query::new(collection, self.config.api_host().clone())
    }

    /// Returns an empty `/works` query on the configured host.
    #[must_use]
    pub fn works(&self) -> Query {
        self.query(Collection::Works)
    }

    /// Returns an empty `/funders` query on the configured host.
    #[must_use]
    pub fn funders(&self) -> Query {
        self.query(Collection::Funders)
    }

    /// Starts a fresh cursor over `query`, at offset 0.
    #[must_use]
    pub fn iter(&self, query: &Query) -> Cursor<'_, T> {
        Cursor::new(
            &self.transport,
            query,
            self.config.page_limits(),
            self.config.timeout(),
        )
    }

    /// Fetches one work by DOI and returns its `message` payload.
    ///
    /// # Errors
    ///
    /// Returns [`CrossrefError::Transport`] if the request fails (including a
    /// 404 for an unknown DOI), or [`CrossrefError::UnexpectedResponse`] if the
    /// body has no `message`.
    pub async fn work(&self, doi: &str) -> Result<Value, CrossrefError> {
        self.works()
            .lookup(doi)
            .fetch(&self.transport, self.config.timeout())
            .await
    }

    /// Fetches one funder by identifier and returns its `message` payload.
    ///
    /// # Errors
    ///
    /// See [`CrossrefClient::work`].
    pub async fn funder(&self, id: &str) -> Result<Value, CrossrefError> {
        self.funders()
            .lookup(id)
            .fetch(&self.transport, self.config.timeout())
            .await
    }

    /// Reads the service's rate-limit headers with a HEAD request.
    ///
    /// Absent headers are reported as `"undefined"`. The headers are read
    /// whatever the response status, including `429 Too Many Requests`.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if no response was received.
    pub async fn rate_limits(&self) -> Result<RateLimits, HttpError> {
        let url = self.url_for(&RATE_LIMIT_PATH);
        let headers = self.transport.head(&url, self.config.timeout()).await?;
        Ok(RateLimits::from_headers(&headers))
    }

    /// Returns the `X-Rate-Limit-Limit` header value.
    ///
    /// # Errors
    ///
    /// See [`CrossrefClient::rate_limits`].
    pub async fn x_rate_limit_limit(&self) -> Result<String, HttpError> {
        Ok(self.rate_limits().await?.limit)
    }

    /// Returns the `X-Rate-Limit-Interval` header value.
    ///
    /// # Errors
    ///
    /// See [`CrossrefClient::rate_limits`].
    pub async fn x_rate_limit_interval(&self) -> Result<String, HttpError> {
        Ok(self.rate_limits().await?.interval)
    }

    /// Sends a POST to `path` on the configured host.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request fails.
    pub async fn post(&self, path: &str, body: PostBody) -> Result<Value, HttpError> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let url = self.url_for(&segments);
        self.transport.post(&url, body, self.config.timeout()).await
    }

    fn url_for(&self, segments: &[&str]) -> String {
        format!("http://{}/{}", self.config.api_host(), segments.join("/"))
    }
}

// Verify CrossrefClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CrossrefClient>();
};
