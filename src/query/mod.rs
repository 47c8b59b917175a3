//! Query building for the Crossref collections.
//!
//! - [`Query`]: immutable, chainable builder for a collection query
//! - [`ResourceLookup`]: single resource by identifier
//! - [`Collection`]: the collections and their allow-lists
//! - [`QueryParams`]: the ordered parameter map behind a query
//! - [`validators`]: filter value validators
//!
//! Validation happens while the query is configured, so a [`Query`] that
//! exists is always well-formed.
//!
//! # Example
//!
//! ```rust
//! use crossref_api::query::{Collection, Query};
//!
//! let query = Query::works()
//!     .filter([("has_orcid", "t")])?
//!     .sort("deposited")?;
//!
//! assert_eq!(query.collection(), Collection::Works);
//! assert_eq!(
//!     query.url(),
//!     "http://api.crossref.org/works?filter=has-orcid:t&sort=deposited"
//! );
//! # Ok::<(), crossref_api::ValidationError>(())
//! ```

mod builder;
mod collection;
mod errors;
mod params;
pub mod validators;

pub use builder::{Query, ResourceLookup, MAX_SAMPLE_SIZE};
pub use collection::{wire_name, Collection, CollectionSpec, ORDER_VALUES};
pub use errors::ValidationError;
pub use params::{names, QueryParams, PAGING_PARAMS};
pub use validators::Validator;
