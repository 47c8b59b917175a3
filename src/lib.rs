//! # Crossref API Rust Client
//!
//! A Rust client for the Crossref REST API, providing validated query
//! building, lazy offset-based pagination, and single-resource lookups over
//! the `works` and `funders` collections.
//!
//! ## Overview
//!
//! This crate provides:
//! - An immutable, chainable [`Query`] builder that validates sort, order,
//!   filter, field-query, and sample parameters before any request is made
//! - Per-collection allow-lists held in static, read-only tables
//! - A pull-based [`Cursor`](pagination::Cursor) that fetches one page at a
//!   time and refuses to paginate past a client-side offset ceiling
//! - Single-resource lookups by DOI or funder id
//! - Rate-limit introspection through the `X-Rate-Limit-*` headers
//! - A [`Transport`](clients::Transport) boundary with a reqwest-backed default
//!
//! ## Quick Start
//!
//! ```rust
//! use crossref_api::Query;
//!
//! let query = Query::works()
//!     .query_terms(["bacteria"])
//!     .filter([("type", "journal-article")])?;
//!
//! assert_eq!(
//!     query.url(),
//!     "http://api.crossref.org/works?filter=type:journal-article&query=bacteria"
//! );
//! # Ok::<(), crossref_api::ValidationError>(())
//! ```
//!
//! ## Iterating Results
//!
//! ```rust,no_run
//! use crossref_api::{CrossrefClient, CrossrefConfig, CrossrefError};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = CrossrefClient::new(CrossrefConfig::default())?;
//! let query = client.works().filter([("from_pub_date", "2020-01-01")])?;
//!
//! let mut cursor = client.iter(&query);
//! while let Some(item) = cursor.next().await {
//!     match item {
//!         Ok(work) => println!("{}", work["DOI"]),
//!         Err(CrossrefError::OffsetExceeded { .. }) => break,
//!         Err(error) => return Err(error.into()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! ```rust
//! use std::time::Duration;
//! use crossref_api::{ApiHost, CrossrefConfig, PageLimits};
//!
//! let config = CrossrefConfig::builder()
//!     .api_host(ApiHost::new("api.crossref.org").unwrap())
//!     .timeout(Duration::from_secs(30))
//!     .user_agent_prefix("MyApp/1.0 (mailto:dev@example.org)")
//!     .page_limits(PageLimits::new(20, 1000).unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.page_limits().max_offset(), 1000);
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Queries and newtypes validate on construction
//! - **Immutable queries**: Every configuring call returns a new [`Query`]
//! - **Thread-safe**: Queries, configuration, and the default client are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

mod client;
pub mod clients;
pub mod config;
pub mod error;
pub mod message;
pub mod pagination;
pub mod query;

pub use client::CrossrefClient;
pub use config::{ApiHost, CrossrefConfig, CrossrefConfigBuilder, PageLimits};
pub use error::{ConfigError, CrossrefError};
pub use pagination::{Cursor, CursorState};
pub use query::{Collection, Query, ResourceLookup, ValidationError};

// Re-export transport types
pub use clients::{HttpClient, HttpError, HttpResponseError, RateLimits, Transport};
