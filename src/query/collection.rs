//! Collection types and their allow-lists.
//!
//! Every collection exposes its own sortable fields, field queries, and
//! filters. The tables are `static` and never mutated; each [`Query`] only
//! reads them through its [`Collection`].
//!
//! [`Query`]: crate::Query

use std::fmt;

use crate::query::validators::{is_bool, is_date, is_integer, Validator};

/// Values accepted by `order`, shared by every collection.
pub const ORDER_VALUES: &[&str] = &["asc", "desc", "1", "-1"];

/// A remote resource family with its own allow-lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    /// `/works`: scholarly works (articles, books, datasets, ...).
    Works,
    /// `/funders`: funding organizations.
    Funders,
}

/// Read-only allow-lists for one collection.
pub struct CollectionSpec {
    /// The path segment of the collection (e.g. `works`).
    pub resource: &'static str,
    /// Fields accepted by `sort`.
    pub sort_values: &'static [&'static str],
    /// Fields accepted as `query.<field>`.
    pub field_queries: &'static [&'static str],
    /// Filter names and their optional value validators.
    pub filters: &'static [(&'static str, Option<Validator>)],
}

impl fmt::Debug for CollectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionSpec")
            .field("resource", &self.resource)
            .field("sort_values", &self.sort_values)
            .field("field_queries", &self.field_queries)
            .field("filters", &self.filters.len())
            .finish()
    }
}

impl CollectionSpec {
    /// Looks up a filter. `Some(None)` means the filter exists but accepts any value.
    ///
    /// `_` and `-` are interchangeable in `name`.
    #[must_use]
    pub fn filter(&self, name: &str) -> Option<Option<Validator>> {
        self.filters
            .iter()
            .find(|(filter, _)| same_name(filter, name))
            .map(|(_, validator)| *validator)
    }

    /// Returns `true` if `name` may be passed to `sort`.
    #[must_use]
    pub fn is_sortable(&self, name: &str) -> bool {
        self.sort_values.contains(&name)
    }

    /// Returns `true` if `name` may be used as a field query.
    ///
    /// `_` and `-` are interchangeable in `name`.
    #[must_use]
    pub fn has_field_query(&self, name: &str) -> bool {
        self.field_queries
            .iter()
            .any(|field| same_name(field, name))
    }
}

/// Translates a filter or field name to its wire spelling (`_` becomes `-`).
#[must_use]
pub fn wire_name(name: &str) -> String {
    name.replace('_', "-")
}

/// Compares two names treating `_` and `-` as the same character.
fn same_name(a: &str, b: &str) -> bool {
    let is_separator = |c: u8| c == b'_' || c == b'-';
    a.len() == b.len()
        && a.bytes()
            .zip(b.bytes())
            .all(|(x, y)| x == y || (is_separator(x) && is_separator(y)))
}

impl Collection {
    /// Returns the static allow-lists for this collection.
    #[must_use]
    pub fn spec(self) -> &'static CollectionSpec {
        match self {
            Self::Works => &WORKS,
            Self::Funders => &FUNDERS,
        }
    }

    /// Returns the path segment of this collection.
    #[must_use]
    pub fn resource(self) -> &'static str {
        self.spec().resource
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resource())
    }
}

static WORKS: CollectionSpec = CollectionSpec {
    resource: "works",
    sort_values: &[
        "created",
        "deposited",
        "indexed",
        "is-referenced-by-count",
        "issued",
        "published",
        "published-online",
        "published-print",
        "references-count",
        "relevance",
        "score",
        "submitted",
        "updated",
    ],
    field_queries: &[
        "affiliation",
        "author",
        "bibliographic",
        "chair",
        "container_title",
        "contributor",
        "editor",
        "event_acronym",
        "event_location",
        "event_name",
        "event_sponsor",
        "event_theme",
        "funder_name",
        "publisher_location",
        "publisher_name",
        "title",
        "translator",
    ],
    filters: WORKS_FILTERS,
};

const WORKS_FILTERS: &[(&str, Option<Validator>)] = &[
    ("alternative_id", None),
    ("archive", None),
    ("article_number", None),
    ("assertion", None),
    ("assertion-group", None),
    ("award.funder", None),
    ("award.number", None),
    ("category-name", None),
    ("clinical-trial-number", None),
    ("container-title", None),
    ("content-domain", None),
    ("directory", None),
    ("doi", None),
    ("from-accepted_date", Some(is_date)),
    ("from-created-date", Some(is_date)),
    ("from-deposit-date", Some(is_date)),
    ("from-event-end-date", Some(is_date)),
    ("from-event-start-date", Some(is_date)),
    ("from-index-date", Some(is_date)),
    ("from-issued-date", Some(is_date)),
    ("from-online-pub-date", Some(is_date)),
    ("from-posted-date", Some(is_date)),
    ("from-print-pub-date", Some(is_date)),
    ("from-pub-date", Some(is_date)),
    ("from-update-date", Some(is_date)),
    ("full-text.application", None),
    ("full-text.type", None),
    ("full-text.version", None),
    ("funder", None),
    ("funder-doi-asserted-by", None),
    ("group-title", None),
    ("has_abstract", Some(is_bool)),
    ("has-affiliation", Some(is_bool)),
    ("has-archive", Some(is_bool)),
    ("has-assertion", Some(is_bool)),
    ("has-authenticated-orcid", Some(is_bool)),
    ("has-award", Some(is_bool)),
    ("has-clinical-trial-number", Some(is_bool)),
    ("has-content-domain", Some(is_bool)),
    ("has-domain-restriction", Some(is_bool)),
    ("has-event", Some(is_bool)),
    ("has-full-text", Some(is_bool)),
    ("has-funder", Some(is_bool)),
    ("has-funder-doi", Some(is_bool)),
    ("has-license", Some(is_bool)),
    ("has-orcid", Some(is_bool)),
    ("has-references", Some(is_bool)),
    ("has-relation", Some(is_bool)),
    ("has-update", Some(is_bool)),
    ("has-update-policy", Some(is_bool)),
    ("is-update", Some(is_bool)),
    ("isbn", None),
    ("issn", None),
    ("license.delay", Some(is_integer)),
    ("license.url", None),
    ("license.version", None),
    ("member", None),
    ("orcid", None),
    ("prefix", None),
    ("relation.object", None),
    ("relation.object-type", None),
    ("relation.type", None),
    ("type", None),
    ("type-name", None),
    ("until-accepted-date", Some(is_bool)),
    ("until-created-date", Some(is_bool)),
    ("until-deposit-date", Some(is_bool)),
    ("until-event-end-date", Some(is_bool)),
    ("until-event-start-date", Some(is_bool)),
    ("until-index-date", Some(is_bool)),
    ("until-issued-date", Some(is_bool)),
    ("until-online-pub-date", Some(is_bool)),
    ("until-posted-date", Some(is_bool)),
    ("until-print-pub-date", Some(is_bool)),
    ("until-pub-date", Some(is_bool)),
    ("until-update-date", Some(is_bool)),
    ("update-type", None),
    ("updates", None),
];

static FUNDERS: CollectionSpec = CollectionSpec {
    resource: "funders",
    sort_values: &[],
    field_queries: &[],
    filters: &[("location", None)],
};
