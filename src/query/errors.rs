//! Validation errors raised while configuring a [`Query`](crate::Query).
//!
//! Every variant is raised synchronously, before any network call, and is
//! recoverable by adjusting the input.

use thiserror::Error;

/// Error returned when a query parameter is rejected.
///
/// # Example
///
/// ```rust
/// use crossref_api::{Query, ValidationError};
///
/// let result = Query::works().order("upwards");
/// assert!(matches!(result, Err(ValidationError::InvalidOrder { .. })));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The sort order is not one of the accepted values.
    #[error("Sort order specified as {value} but must be one of: {}", .allowed.join(", "))]
    InvalidOrder {
        /// The rejected value.
        value: String,
        /// The accepted values.
        allowed: &'static [&'static str],
    },

    /// The sort field is not sortable for this collection.
    #[error("Sort field specified as {value} but must be one of: {}", .allowed.join(", "))]
    InvalidSort {
        /// The rejected value.
        value: String,
        /// The sortable fields.
        allowed: &'static [&'static str],
    },

    /// The filter name is not in the collection's allow-list.
    #[error("Filter {name} specified but there is no such filter for the {collection} route")]
    UnknownFilter {
        /// The rejected filter name.
        name: String,
        /// The collection the filter was applied to.
        collection: &'static str,
    },

    /// The field query name is not in the collection's allow-list.
    #[error("Field query {name} specified but there is no such field query for the {collection} route")]
    UnknownFieldQuery {
        /// The rejected field name.
        name: String,
        /// The collection the field query was applied to.
        collection: &'static str,
    },

    /// The filter value would split into more than one clause.
    #[error("Filter {name} specified with value {value}, which must not contain ','")]
    InvalidFilterValue {
        /// The filter name.
        name: String,
        /// The rejected value.
        value: String,
    },

    /// The sample size is outside `1..=100`.
    #[error("Integer specified as {size} but must be a positive integer less than or equal to 100.")]
    InvalidSampleSize {
        /// The rejected size.
        size: u32,
    },

    /// The value is not a `YYYY`, `YYYY-MM`, or `YYYY-MM-DD` date.
    #[error("Invalid date {value}. Expected YYYY, YYYY-MM or YYYY-MM-DD.")]
    InvalidDate {
        /// The rejected value.
        value: String,
    },

    /// The value is not `t` or `f`.
    #[error("Invalid boolean {value}. Expected t or f.")]
    InvalidBool {
        /// The rejected value.
        value: String,
    },

    /// The value is not a base-10 integer.
    #[error("Invalid integer {value}.")]
    InvalidInteger {
        /// The rejected value.
        value: String,
    },
}
