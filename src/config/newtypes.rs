//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers that validate their contents on
//! construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated API host, with an optional port.
///
/// The host is the first path segment of every request URL
/// (`http://<host>/<resource>[/<id>]`), so it must not carry a scheme,
/// a path, or a query string.
///
/// # Example
///
/// ```rust
/// use crossref_api::ApiHost;
///
/// let host = ApiHost::new("api.crossref.org").unwrap();
/// assert_eq!(host.as_ref(), "api.crossref.org");
/// assert_eq!(host.port(), None);
///
/// let local = ApiHost::new("127.0.0.1:8080").unwrap();
/// assert_eq!(local.host_name(), "127.0.0.1");
/// assert_eq!(local.port(), Some(8080));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiHost {
    host: String,
    name_end: usize,
}

impl ApiHost {
    /// The public Crossref REST API host.
    pub const DEFAULT: &'static str = "api.crossref.org";

    /// Creates a new validated API host.
    ///
    /// Surrounding whitespace is trimmed and the host is lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiHost`] if the host is empty, contains a
    /// scheme or path, has characters outside `[a-z0-9.-]`, or has a
    /// non-numeric port.
    pub fn new(host: impl Into<String>) -> Result<Self, ConfigError> {
        let host = host.into().trim().to_lowercase();
        let invalid = || ConfigError::InvalidApiHost { host: host.clone() };

        if host.is_empty() || host.contains("://") || host.contains(['/', '?', '#']) {
            return Err(invalid());
        }

        let (name, port) = match host.split_once(':') {
            Some((name, port)) => (name, Some(port)),
            None => (host.as_str(), None),
        };

        if !Self::is_valid_host_name(name) {
            return Err(invalid());
        }

        if let Some(port) = port {
            if port.parse::<u16>().is_err() {
                return Err(invalid());
            }
        }

        Ok(Self {
            name_end: name.len(),
            host,
        })
    }

    /// Returns the host name without the port.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.host[..self.name_end]
    }

    /// Returns the explicit port, if one was given.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.host
            .get(self.name_end + 1..)
            .and_then(|port| port.parse().ok())
    }

    fn is_valid_host_name(name: &str) -> bool {
        if name.is_empty() || name.starts_with(['.', '-']) || name.ends_with(['.', '-']) {
            return false;
        }

        name.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    }
}

impl Default for ApiHost {
    fn default() -> Self {
        Self {
            host: Self::DEFAULT.to_string(),
            name_end: Self::DEFAULT.len(),
        }
    }
}

impl AsRef<str> for ApiHost {
    fn as_ref(&self) -> &str {
        &self.host
    }
}

impl fmt::Display for ApiHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)
    }
}

impl Serialize for ApiHost {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.host)
    }
}

impl<'de> Deserialize<'de> for ApiHost {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// Page size and offset ceiling used by the pagination cursor.
///
/// The cursor requests `page_size` rows per page and refuses to request any
/// offset at or beyond `max_offset`. The defaults (20 rows, ceiling 40) are
/// deliberately conservative; the remote service enforces its own, larger
/// limit.
///
/// # Example
///
/// ```rust
/// use crossref_api::PageLimits;
///
/// let limits = PageLimits::default();
/// assert_eq!(limits.page_size(), 20);
/// assert_eq!(limits.max_offset(), 40);
///
/// assert!(PageLimits::new(0, 40).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLimits {
    page_size: u32,
    max_offset: u32,
}

impl PageLimits {
    /// Default number of rows per page.
    pub const DEFAULT_PAGE_SIZE: u32 = 20;

    /// Default offset ceiling.
    pub const DEFAULT_MAX_OFFSET: u32 = 40;

    /// Creates new page limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPageLimits`] if either value is zero.
    pub fn new(page_size: u32, max_offset: u32) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::InvalidPageLimits {
                reason: "page size must be greater than zero".to_string(),
            });
        }
        if max_offset == 0 {
            return Err(ConfigError::InvalidPageLimits {
                reason: "max offset must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            page_size,
            max_offset,
        })
    }

    /// Returns the number of rows requested per page.
    #[must_use]
    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Returns the offset ceiling.
    #[must_use]
    pub const fn max_offset(&self) -> u32 {
        self.max_offset
    }

    /// Returns the offset stride between consecutive pages.
    ///
    /// The stride is one more than the page size, matching the offsets the
    /// service has always been queried with.
    #[must_use]
    pub const fn stride(&self) -> u32 {
        self.page_size.saturating_add(1)
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            max_offset: Self::DEFAULT_MAX_OFFSET,
        }
    }
}
