//! Configuration types for the Crossref API client.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`CrossrefConfig`]: The configuration struct holding all client settings
//! - [`CrossrefConfigBuilder`]: A builder for constructing [`CrossrefConfig`] instances
//! - [`ApiHost`]: A validated API host newtype
//! - [`PageLimits`]: Page size and offset ceiling for the pagination cursor
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use crossref_api::{CrossrefConfig, ApiHost};
//!
//! let config = CrossrefConfig::builder()
//!     .api_host(ApiHost::new("api.crossref.org").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.timeout(), Duration::from_secs(30));
//! ```

mod newtypes;

pub use newtypes::{ApiHost, PageLimits};

use std::time::Duration;

use crate::error::ConfigError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the Crossref API client.
///
/// All fields have defaults, so `CrossrefConfig::default()` talks to the
/// public API with a 10 second timeout.
///
/// # Thread Safety
///
/// `CrossrefConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CrossrefConfig {
    api_host: ApiHost,
    timeout: Duration,
    user_agent_prefix: Option<String>,
    page_limits: PageLimits,
}

impl CrossrefConfig {
    /// Creates a new builder for constructing a `CrossrefConfig`.
    #[must_use]
    pub fn builder() -> CrossrefConfigBuilder {
        CrossrefConfigBuilder::new()
    }

    /// Returns the API host.
    #[must_use]
    pub const fn api_host(&self) -> &ApiHost {
        &self.api_host
    }

    /// Returns the timeout passed to the transport on every request.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the page size and offset ceiling used for pagination.
    #[must_use]
    pub const fn page_limits(&self) -> PageLimits {
        self.page_limits
    }
}

impl Default for CrossrefConfig {
    fn default() -> Self {
        Self {
            api_host: ApiHost::default(),
            timeout: DEFAULT_TIMEOUT,
            user_agent_prefix: None,
            page_limits: PageLimits::default(),
        }
    }
}

// Verify CrossrefConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CrossrefConfig>();
};

/// Builder for constructing [`CrossrefConfig`] instances.
///
/// # Defaults
///
/// - `api_host`: `api.crossref.org`
/// - `timeout`: 10 seconds
/// - `user_agent_prefix`: `None`
/// - `page_limits`: 20 rows per page, offset ceiling 40
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use crossref_api::{CrossrefConfig, PageLimits};
///
/// let config = CrossrefConfig::builder()
///     .timeout(Duration::from_secs(5))
///     .user_agent_prefix("MyTool/1.0 (mailto:me@example.org)")
///     .page_limits(PageLimits::new(50, 1000).unwrap())
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Default)]
pub struct CrossrefConfigBuilder {
    api_host: Option<ApiHost>,
    timeout: Option<Duration>,
    user_agent_prefix: Option<String>,
    page_limits: Option<PageLimits>,
}

impl CrossrefConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API host.
    #[must_use]
    pub fn api_host(mut self, host: ApiHost) -> Self {
        self.api_host = Some(host);
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the pagination page size and offset ceiling.
    #[must_use]
    pub const fn page_limits(mut self, limits: PageLimits) -> Self {
        self.page_limits = Some(limits);
        self
    }

    /// Builds the [`CrossrefConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] if the timeout was set to zero.
    pub fn build(self) -> Result<CrossrefConfig, ConfigError> {
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(CrossrefConfig {
            api_host: self.api_host.unwrap_or_default(),
            timeout,
            user_agent_prefix: self.user_agent_prefix,
            page_limits: self.page_limits.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = CrossrefConfig::builder().build().unwrap();

        assert_eq!(config.api_host().as_ref(), "api.crossref.org");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.page_limits(), PageLimits::default());
        assert_eq!(config, CrossrefConfig::default());
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = CrossrefConfig::builder().timeout(Duration::ZERO).build();
        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let host = ApiHost::new("localhost:8080").unwrap();
        let limits = PageLimits::new(10, 500).unwrap();

        let config = CrossrefConfig::builder()
            .api_host(host.clone())
            .timeout(Duration::from_millis(250))
            .user_agent_prefix("MyApp/1.0")
            .page_limits(limits)
            .build()
            .unwrap();

        assert_eq!(config.api_host(), &host);
        assert_eq!(config.timeout(), Duration::from_millis(250));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
        assert_eq!(config.page_limits(), limits);
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CrossrefConfig>();
    }
}
