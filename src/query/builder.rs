//! The immutable query builder.
//!
//! A [`Query`] describes one collection query: the collection, the host it
//! lives on, and its parameters. Every configuring method borrows the
//! receiver and returns a new `Query`; the receiver is never modified, so a
//! partially configured query can be shared and extended in several
//! directions.
//!
//! Single-resource lookups go through [`ResourceLookup`], which copies the
//! path and appends the identifier without touching the originating query.

use std::time::Duration;

use serde_json::Value;

use crate::clients::Transport;
use crate::config::ApiHost;
use crate::error::CrossrefError;
use crate::message::decode_message;
use crate::query::collection::{wire_name, Collection, ORDER_VALUES};
use crate::query::errors::ValidationError;
use crate::query::params::{names, QueryParams};

/// Largest accepted sample size.
pub const MAX_SAMPLE_SIZE: u32 = 100;

/// Builds `http://<host>/<segment>/<segment>...`.
fn build_url_endpoint(host: &ApiHost, segments: &[&str]) -> String {
    let mut url = format!("http://{host}");
    for segment in segments {
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// An immutable, chainable collection query.
///
/// # Example
///
/// ```rust
/// use crossref_api::Query;
///
/// let base = Query::works();
/// let query = base
///     .query(["bacteria"], [("author", "Smith")])?
///     .filter([("type", "journal-article"), ("from_pub_date", "2020-01")])?
///     .sort("published")?
///     .order("desc")?;
///
/// let url = query.url();
/// assert!(url.starts_with("http://api.crossref.org/works?"));
/// assert!(url.contains("filter=type:journal-article,from-pub-date:2020-01"));
/// assert!(url.contains("query=bacteria"));
/// assert!(url.contains("query.author=Smith"));
///
/// // The base query is unchanged.
/// assert_eq!(base.url(), "http://api.crossref.org/works");
/// # Ok::<(), crossref_api::ValidationError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Query {
    collection: Collection,
    host: ApiHost,
    params: QueryParams,
}

impl Query {
    /// Conventional sort order: `asc`.
    pub const DEFAULT_ORDER: &'static str = "asc";

    /// Conventional sort field for `/works`: `score`.
    pub const DEFAULT_SORT: &'static str = "score";

    /// Conventional sample size: 20.
    pub const DEFAULT_SAMPLE_SIZE: u32 = 20;

    /// Creates an empty query over `collection` on `host`.
    #[must_use]
    pub const fn new(collection: Collection, host: ApiHost) -> Self {
        Self::with_params(collection, host, QueryParams::new())
    }

    /// Creates a query from existing parameters.
    ///
    /// The parameters are taken as-is; cursor-owned `offset`/`rows` are
    /// ignored when iterating and when computing the canonical URL.
    #[must_use]
    pub const fn with_params(collection: Collection, host: ApiHost, params: QueryParams) -> Self {
        Self {
            collection,
            host,
            params,
        }
    }

    /// Creates an empty `/works` query on the public API.
    #[must_use]
    pub fn works() -> Self {
        Self::new(Collection::Works, ApiHost::default())
    }

    /// Creates an empty `/funders` query on the public API.
    #[must_use]
    pub fn funders() -> Self {
        Self::new(Collection::Funders, ApiHost::default())
    }

    /// Returns the collection this query targets.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// Returns the API host.
    #[must_use]
    pub const fn host(&self) -> &ApiHost {
        &self.host
    }

    /// Returns the configured parameters.
    #[must_use]
    pub const fn params(&self) -> &QueryParams {
        &self.params
    }

    /// Returns `true` if the query is in sample mode.
    #[must_use]
    pub fn is_sample(&self) -> bool {
        self.params.contains(names::SAMPLE)
    }

    /// Returns the collection endpoint, without parameters.
    #[must_use]
    pub fn endpoint(&self) -> String {
        build_url_endpoint(&self.host, &[self.collection.resource()])
    }

    /// Returns the canonical GET URL of this query.
    ///
    /// Pagination parameters (`offset`, `rows`) are never part of it.
    #[must_use]
    pub fn url(&self) -> String {
        let query_string = self.params.clone().without_paging().to_query_string();
        if query_string.is_empty() {
            self.endpoint()
        } else {
            format!("{}?{query_string}", self.endpoint())
        }
    }

    /// Sets the sort order.
    ///
    /// Pass [`Query::DEFAULT_ORDER`] for the conventional `asc`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidOrder`] unless `order` is one of
    /// `asc`, `desc`, `1`, `-1`.
    pub fn order(&self, order: &str) -> Result<Self, ValidationError> {
        if !ORDER_VALUES.contains(&order) {
            return Err(ValidationError::InvalidOrder {
                value: order.to_string(),
                allowed: ORDER_VALUES,
            });
        }
        Ok(self.derive(self.params.clone().with(names::ORDER, order)))
    }

    /// Sets the sort field.
    ///
    /// Pass [`Query::DEFAULT_SORT`] to sort `/works` by relevance score.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSort`] unless `sort` is sortable for
    /// this collection.
    pub fn sort(&self, sort: &str) -> Result<Self, ValidationError> {
        let spec = self.collection.spec();
        if !spec.is_sortable(sort) {
            return Err(ValidationError::InvalidSort {
                value: sort.to_string(),
                allowed: spec.sort_values,
            });
        }
        Ok(self.derive(self.params.clone().with(names::SORT, sort)))
    }

    /// Adds filter clauses.
    ///
    /// Each value is lowercased, checked by the filter's validator (if any),
    /// and appended as `name:value` to the comma-joined `filter` parameter.
    /// Names may be spelled with `_` or `-`; the wire form uses `-`.
    ///
    /// All clauses are validated before any is merged, so a failing call
    /// leaves nothing half-applied.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownFilter`] for a name outside the
    /// collection's allow-list, [`ValidationError::InvalidFilterValue`] for a
    /// value containing `,` (the clause separator), or the validator's error
    /// for a bad value.
    pub fn filter<I, K, V>(&self, clauses: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: ToString,
    {
        let spec = self.collection.spec();
        let mut accepted = Vec::new();

        for (name, value) in clauses {
            let name = name.as_ref();
            let validator = spec
                .filter(name)
                .ok_or_else(|| ValidationError::UnknownFilter {
                    name: name.to_string(),
                    collection: spec.resource,
                })?;

            let value = value.to_string().to_lowercase();
            if value.contains(',') {
                return Err(ValidationError::InvalidFilterValue {
                    name: name.to_string(),
                    value,
                });
            }
            if let Some(validator) = validator {
                validator(&value)?;
            }

            accepted.push(format!("{}:{value}", wire_name(name)));
        }

        if accepted.is_empty() {
            return Ok(self.clone());
        }

        let joined = match self.params.get(names::FILTER) {
            Some(existing) => format!("{existing},{}", accepted.join(",")),
            None => accepted.join(","),
        };
        Ok(self.derive(self.params.clone().with(names::FILTER, joined)))
    }

    /// Sets free-text terms and field-scoped queries.
    ///
    /// Terms are space-joined into `query` (left untouched when `terms` is
    /// empty). Each field is written as its own `query.<field>` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnknownFieldQuery`] for a field outside the
    /// collection's allow-list.
    pub fn query<T, S, F, K, V>(&self, terms: T, fields: F) -> Result<Self, ValidationError>
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let spec = self.collection.spec();
        let mut params = self.params.clone();

        for (field, value) in fields {
            let field = field.as_ref();
            if !spec.has_field_query(field) {
                return Err(ValidationError::UnknownFieldQuery {
                    name: field.to_string(),
                    collection: spec.resource,
                });
            }
            params = params.with(
                format!("{}{}", names::FIELD_QUERY_PREFIX, wire_name(field)),
                value,
            );
        }

        let terms: Vec<String> = terms
            .into_iter()
            .map(|term| term.as_ref().to_string())
            .collect();
        if !terms.is_empty() {
            params = params.with(names::QUERY, terms.join(" "));
        }

        Ok(self.derive(params))
    }

    /// Sets free-text terms only.
    #[must_use]
    pub fn query_terms<T, S>(&self, terms: T) -> Self
    where
        T: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms: Vec<String> = terms
            .into_iter()
            .map(|term| term.as_ref().to_string())
            .collect();
        if terms.is_empty() {
            return self.clone();
        }
        self.derive(self.params.clone().with(names::QUERY, terms.join(" ")))
    }

    /// Switches to sample mode with `size` random items.
    ///
    /// [`Query::DEFAULT_SAMPLE_SIZE`] is the conventional size.
    ///
    /// Every other parameter is dropped. A sampled query is fetched with a
    /// single request and never paginated.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSampleSize`] unless `1 <= size <= 100`.
    pub fn sample(&self, size: u32) -> Result<Self, ValidationError> {
        if size == 0 || size > MAX_SAMPLE_SIZE {
            return Err(ValidationError::InvalidSampleSize { size });
        }
        Ok(self.derive(QueryParams::new().with(names::SAMPLE, size.to_string())))
    }

    /// Returns a fresh query over the same collection with no parameters.
    #[must_use]
    pub fn all(&self) -> Self {
        self.derive(QueryParams::new())
    }

    /// Prepares a single-resource lookup by identifier.
    ///
    /// The returned [`ResourceLookup`] owns its own path; this query is not
    /// affected.
    #[must_use]
    pub fn lookup(&self, id: impl Into<String>) -> ResourceLookup {
        ResourceLookup {
            collection: self.collection,
            host: self.host.clone(),
            id: id.into(),
        }
    }

    /// Returns the parameters sent for one page of results.
    pub(crate) fn page_params(&self, offset: u32, rows: u32) -> QueryParams {
        self.params
            .clone()
            .with(names::OFFSET, offset.to_string())
            .with(names::ROWS, rows.to_string())
    }

    fn derive(&self, params: QueryParams) -> Self {
        Self::with_params(self.collection, self.host.clone(), params)
    }
}

/// A request for one resource by identifier (a work by DOI, a funder by id).
///
/// Resolves with a single GET; never paginated.
///
/// # Example
///
/// ```rust
/// use crossref_api::Query;
///
/// let lookup = Query::works().lookup("10.1038/nphys1170");
/// assert_eq!(lookup.url(), "http://api.crossref.org/works/10.1038/nphys1170");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLookup {
    collection: Collection,
    host: ApiHost,
    id: String,
}

impl ResourceLookup {
    /// Returns the collection the resource belongs to.
    #[must_use]
    pub const fn collection(&self) -> Collection {
        self.collection
    }

    /// Returns the resource identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the resource URL.
    ///
    /// The identifier is percent-encoded except for `/`, which DOIs use as
    /// the prefix separator.
    #[must_use]
    pub fn url(&self) -> String {
        let id = urlencoding::encode(&self.id).replace("%2F", "/");
        build_url_endpoint(&self.host, &[self.collection.resource(), &id])
    }

    /// Fetches the resource and returns its `message` payload.
    ///
    /// # Errors
    ///
    /// Returns [`CrossrefError::Transport`] if the request fails, or
    /// [`CrossrefError::UnexpectedResponse`] if the body has no `message`.
    pub async fn fetch<T: Transport>(
        &self,
        transport: &T,
        timeout: Duration,
    ) -> Result<Value, CrossrefError> {
        let url = self.url();
        tracing::debug!(collection = %self.collection, id = %self.id, "Fetching single resource");
        let body = transport.get(&url, &QueryParams::new(), timeout).await?;
        decode_message(&url, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_url_has_no_query_string() {
        assert_eq!(Query::works().url(), "http://api.crossref.org/works");
        assert_eq!(Query::funders().url(), "http://api.crossref.org/funders");
    }

    #[test]
    fn test_order_accepts_exactly_the_allowed_values() {
        for collection in [Collection::Works, Collection::Funders] {
            let query = Query::new(collection, ApiHost::default());
            for order in ["asc", "desc", "1", "-1"] {
                let ordered = query.order(order).unwrap();
                assert_eq!(ordered.params().get("order"), Some(order));
            }
            for order in ["ASC", "ascending", "0", "", " asc"] {
                assert!(matches!(
                    query.order(order),
                    Err(ValidationError::InvalidOrder { .. })
                ));
            }
        }
    }

    #[test]
    fn test_sort_uses_collection_allow_list() {
        let sorted = Query::works().sort("issued").unwrap();
        assert_eq!(sorted.params().get("sort"), Some("issued"));

        assert!(matches!(
            Query::works().sort("title"),
            Err(ValidationError::InvalidSort { .. })
        ));
        assert!(matches!(
            Query::funders().sort("score"),
            Err(ValidationError::InvalidSort { .. })
        ));
    }

    #[test]
    fn test_filter_lowercases_and_hyphenates() {
        let query = Query::works()
            .filter([("has_orcid", "T"), ("type", "Journal-Article")])
            .unwrap();
        assert_eq!(
            query.params().get("filter"),
            Some("has-orcid:t,type:journal-article")
        );
    }

    #[test]
    fn test_filter_appends_to_existing_clauses() {
        let query = Query::works()
            .filter([("type", "journal-article")])
            .unwrap()
            .filter([("from_issued_date", "2020-01-01")])
            .unwrap();
        assert_eq!(
            query.params().get("filter"),
            Some("type:journal-article,from-issued-date:2020-01-01")
        );
    }

    #[test]
    fn test_filter_accepts_non_string_values() {
        let query = Query::works().filter([("license.delay", 0)]).unwrap();
        assert_eq!(query.params().get("filter"), Some("license.delay:0"));
    }

    #[test]
    fn test_filter_rejects_unknown_name_without_partial_update() {
        let base = Query::works().filter([("type", "book")]).unwrap();
        let result = base.filter([("doi", "10.1/abc"), ("colour", "red")]);

        assert!(matches!(
            result,
            Err(ValidationError::UnknownFilter { ref name, collection: "works" }) if name == "colour"
        ));
        assert_eq!(base.params().get("filter"), Some("type:book"));
    }

    #[test]
    fn test_filter_value_cannot_smuggle_extra_clauses() {
        let base = Query::works().filter([("type", "book")]).unwrap();
        let result = base.filter([("type", "book,colour:red,has-orcid:maybe")]);

        assert_eq!(
            result,
            Err(ValidationError::InvalidFilterValue {
                name: "type".to_string(),
                value: "book,colour:red,has-orcid:maybe".to_string(),
            })
        );
        assert_eq!(base.params().get("filter"), Some("type:book"));
    }

    #[test]
    fn test_filter_value_may_contain_colons() {
        let query = Query::works()
            .filter([("license.url", "http://creativecommons.org/licenses/by/4.0/")])
            .unwrap();
        assert_eq!(
            query.params().get("filter"),
            Some("license.url:http://creativecommons.org/licenses/by/4.0/")
        );
    }

    #[test]
    fn test_filter_runs_validators() {
        assert!(matches!(
            Query::works().filter([("from_issued_date", "2020-13-40")]),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(matches!(
            Query::works().filter([("has-funder", "yes")]),
            Err(ValidationError::InvalidBool { .. })
        ));
        assert!(matches!(
            Query::works().filter([("license.delay", "soon")]),
            Err(ValidationError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_empty_filter_is_a_no_op() {
        let base = Query::works();
        let filtered = base.filter(Vec::<(&str, &str)>::new()).unwrap();
        assert_eq!(filtered, base);
        assert!(!filtered.params().contains("filter"));
    }

    #[test]
    fn test_query_terms_and_fields() {
        let query = Query::works()
            .query(
                ["renear", "ontologies"],
                [("container_title", "Nature"), ("author", "Renear")],
            )
            .unwrap();

        assert_eq!(query.params().get("query"), Some("renear ontologies"));
        assert_eq!(query.params().get("query.container-title"), Some("Nature"));
        assert_eq!(query.params().get("query.author"), Some("Renear"));
    }

    #[test]
    fn test_query_without_terms_keeps_previous_terms() {
        let query = Query::works()
            .query_terms(["bacteria"])
            .query(Vec::<&str>::new(), [("title", "Growth")])
            .unwrap();

        assert_eq!(query.params().get("query"), Some("bacteria"));
        assert_eq!(query.params().get("query.title"), Some("Growth"));
    }

    #[test]
    fn test_query_rejects_unknown_field() {
        assert!(matches!(
            Query::works().query(["x"], [("colour", "red")]),
            Err(ValidationError::UnknownFieldQuery { .. })
        ));
        assert!(matches!(
            Query::funders().query(["x"], [("title", "y")]),
            Err(ValidationError::UnknownFieldQuery { collection: "funders", .. })
        ));
    }

    #[test]
    fn test_conventional_defaults_are_accepted() {
        let query = Query::works()
            .sort(Query::DEFAULT_SORT)
            .unwrap()
            .order(Query::DEFAULT_ORDER)
            .unwrap();
        assert_eq!(
            query.url(),
            "http://api.crossref.org/works?order=asc&sort=score"
        );

        let sampled = Query::works().sample(Query::DEFAULT_SAMPLE_SIZE).unwrap();
        assert_eq!(sampled.url(), "http://api.crossref.org/works?sample=20");
    }

    #[test]
    fn test_sample_bounds() {
        assert!(matches!(
            Query::works().sample(0),
            Err(ValidationError::InvalidSampleSize { size: 0 })
        ));
        assert!(matches!(
            Query::works().sample(101),
            Err(ValidationError::InvalidSampleSize { size: 101 })
        ));
        assert!(Query::works().sample(1).is_ok());
        assert!(Query::works().sample(100).is_ok());
    }

    #[test]
    fn test_sample_resets_other_parameters() {
        let query = Query::works()
            .query_terms(["bacteria"])
            .order("asc")
            .unwrap()
            .sample(20)
            .unwrap();

        assert!(query.is_sample());
        assert_eq!(query.params().len(), 1);
        assert_eq!(query.url(), "http://api.crossref.org/works?sample=20");
    }

    #[test]
    fn test_all_resets_parameters_but_keeps_collection_and_host() {
        let host = ApiHost::new("localhost:9000").unwrap();
        let query = Query::new(Collection::Funders, host.clone())
            .query_terms(["health"])
            .all();

        assert!(query.params().is_empty());
        assert_eq!(query.collection(), Collection::Funders);
        assert_eq!(query.host(), &host);
    }

    #[test]
    fn test_canonical_url_never_contains_paging() {
        let params = QueryParams::new()
            .with("offset", "42")
            .with("rows", "20")
            .with("query", "bacteria");
        let query = Query::with_params(Collection::Works, ApiHost::default(), params);

        assert_eq!(query.url(), "http://api.crossref.org/works?query=bacteria");
        assert_eq!(query.params().get("offset"), Some("42"));
    }

    #[test]
    fn test_page_params_add_offset_and_rows() {
        let query = Query::works().query_terms(["bacteria"]);
        let params = query.page_params(21, 20);

        assert_eq!(params.get("offset"), Some("21"));
        assert_eq!(params.get("rows"), Some("20"));
        assert_eq!(params.get("query"), Some("bacteria"));
        assert!(!query.params().contains("offset"));
    }

    #[test]
    fn test_lookup_copies_path() {
        let query = Query::works().query_terms(["bacteria"]);
        let lookup = query.lookup("10.5555/12345678");

        assert_eq!(lookup.url(), "http://api.crossref.org/works/10.5555/12345678");
        assert_eq!(lookup.id(), "10.5555/12345678");
        assert_eq!(query.endpoint(), "http://api.crossref.org/works");

        let other = query.lookup("10.1000/other");
        assert_eq!(other.url(), "http://api.crossref.org/works/10.1000/other");
    }

    #[test]
    fn test_lookup_encodes_unsafe_characters() {
        let lookup = Query::works().lookup("10.1002/(SICI)1097 0258#x");
        assert_eq!(
            lookup.url(),
            "http://api.crossref.org/works/10.1002/%28SICI%291097%200258%23x"
        );
    }

    #[test]
    fn test_query_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Query>();
        assert_send_sync::<ResourceLookup>();
    }
}
