//! Query parameter map.
//!
//! [`QueryParams`] is an ordered, immutable-by-convention map from parameter
//! name to value. Keys are kept sorted so the canonical URL of a query is
//! deterministic.

use std::collections::BTreeMap;

use serde::Serialize;

/// Pagination parameters owned by the cursor.
pub const PAGING_PARAMS: [&str; 2] = ["offset", "rows"];

/// Parameter names with fixed meaning on the wire.
pub mod names {
    /// Comma-joined `name:value` filter clauses.
    pub const FILTER: &str = "filter";
    /// Sort field.
    pub const SORT: &str = "sort";
    /// Sort order.
    pub const ORDER: &str = "order";
    /// Space-joined free-text terms.
    pub const QUERY: &str = "query";
    /// Prefix of field-scoped queries (`query.<field>`).
    pub const FIELD_QUERY_PREFIX: &str = "query.";
    /// Random sample size.
    pub const SAMPLE: &str = "sample";
    /// Pagination offset.
    pub const OFFSET: &str = "offset";
    /// Pagination page size.
    pub const ROWS: &str = "rows";
}

/// A map of query parameters.
///
/// Mutating methods consume `self` and return the updated map, which keeps
/// the owning [`Query`](crate::Query) free of in-place mutation.
///
/// # Example
///
/// ```rust
/// use crossref_api::query::QueryParams;
///
/// let params = QueryParams::new()
///     .with("query", "bacteria ecology")
///     .with("filter", "type:journal-article")
///     .with("rows", "20");
///
/// assert_eq!(
///     params.without_paging().to_query_string(),
///     "filter=type:journal-article&query=bacteria%20ecology"
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    /// Creates an empty parameter map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Returns the map with `key` set to `value`, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Returns the map with `key` removed.
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        self.0.remove(key);
        self
    }

    /// Returns the map with the cursor-owned `offset` and `rows` removed.
    #[must_use]
    pub fn without_paging(self) -> Self {
        PAGING_PARAMS
            .iter()
            .fold(self, |params, key| params.without(key))
    }

    /// Returns the value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encodes the parameters as a query string, in key order.
    ///
    /// Names and values are percent-encoded, except that `:` and `,` stay
    /// literal so filter clauses remain readable.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        self.iter()
            .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Percent-encodes a query component, keeping `:` and `,` literal.
fn encode_component(component: &str) -> String {
    urlencoding::encode(component)
        .replace("%3A", ":")
        .replace("%2C", ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_replaces_existing_value() {
        let params = QueryParams::new().with("sort", "score").with("sort", "issued");
        assert_eq!(params.get("sort"), Some("issued"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_without_paging_strips_offset_and_rows_only() {
        let params = QueryParams::new()
            .with("offset", "21")
            .with("rows", "20")
            .with("sample", "5");

        let stripped = params.without_paging();
        assert!(!stripped.contains("offset"));
        assert!(!stripped.contains("rows"));
        assert_eq!(stripped.get("sample"), Some("5"));
    }

    #[test]
    fn test_query_string_is_sorted_and_encoded() {
        let params: QueryParams = [
            ("query.container-title", "Nature & Science"),
            ("filter", "from-pub-date:2020-01-01,type:journal-article"),
            ("order", "desc"),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            params.to_query_string(),
            "filter=from-pub-date:2020-01-01,type:journal-article&order=desc&query.container-title=Nature%20%26%20Science"
        );
    }

    #[test]
    fn test_empty_query_string() {
        assert_eq!(QueryParams::new().to_query_string(), "");
        assert!(QueryParams::new().is_empty());
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let params = QueryParams::new().with("rows", "20").with("offset", "0");
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            serde_json::json!({"offset": "0", "rows": "20"})
        );
    }
}
