//! Offset-based pagination over a [`Query`].
//!
//! A [`Cursor`] turns a query into a lazy sequence of items. It pulls one
//! page at a time from the [`Transport`], hands the items out one by one,
//! and advances its offset only once a page is drained. Nothing is
//! prefetched and no two requests are ever in flight for the same cursor.
//!
//! # States
//!
//! ```text
//!            +-----------+   non-empty page   +-----------+
//!  start --> | Fetching  | -----------------> | Emitting  |
//!            +-----------+ <----------------- +-----------+
//!              |  |        offset < ceiling       |   |
//!   empty page |  | error                 sample  |   | offset >= ceiling
//!              v  v                               v   v
//!            +-----------+               +-----------------+
//!            | Exhausted | <------------ | CeilingExceeded |
//!            +-----------+               +-----------------+
//! ```
//!
//! A cursor is single-use. Iterating the same query again means building a
//! new cursor, which starts back at offset 0.

use std::collections::VecDeque;
use std::time::Duration;

use futures::Stream;
use serde_json::Value;

use crate::clients::Transport;
use crate::config::PageLimits;
use crate::error::CrossrefError;
use crate::message::decode_page;
use crate::query::Query;

/// Where a [`Cursor`] is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    /// The next call to [`Cursor::next`] issues a request.
    Fetching,
    /// Items of the current page are being handed out.
    Emitting,
    /// The sequence ended, either on an empty page, after a sample, or after
    /// an error.
    Exhausted,
    /// The offset ceiling was reached; [`CrossrefError::OffsetExceeded`] has
    /// been yielded.
    CeilingExceeded,
}

impl CursorState {
    /// Returns `true` if no more items will be produced.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Exhausted | Self::CeilingExceeded)
    }
}

/// A lazy, pull-based cursor over the items of a query.
///
/// # Example
///
/// ```rust,no_run
/// use crossref_api::{CrossrefClient, CrossrefConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CrossrefClient::new(CrossrefConfig::default())?;
/// let query = client.works().query_terms(["bacteria"]);
///
/// let mut cursor = client.iter(&query);
/// while let Some(item) = cursor.next().await {
///     let item = item?;
///     println!("{}", item["DOI"]);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Cursor<'t, T: Transport> {
    transport: &'t T,
    query: Query,
    url: String,
    limits: PageLimits,
    timeout: Duration,
    offset: u32,
    state: CursorState,
    buffer: VecDeque<Value>,
    pages_fetched: u32,
    total_results: Option<u64>,
}

impl<'t, T: Transport> Cursor<'t, T> {
    /// Creates a cursor positioned before the first page of `query`.
    #[must_use]
    pub fn new(transport: &'t T, query: &Query, limits: PageLimits, timeout: Duration) -> Self {
        Self {
            transport,
            url: query.endpoint(),
            query: query.clone(),
            limits,
            timeout,
            offset: 0,
            state: CursorState::Fetching,
            buffer: VecDeque::new(),
            pages_fetched: 0,
            total_results: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> CursorState {
        self.state
    }

    /// Returns the offset of the page being (or about to be) read.
    #[must_use]
    pub const fn offset(&self) -> u32 {
        self.offset
    }

    /// Returns the number of requests issued so far.
    #[must_use]
    pub const fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Returns `total-results` from the most recent page, when reported.
    #[must_use]
    pub const fn total_results(&self) -> Option<u64> {
        self.total_results
    }

    /// Returns the query being iterated.
    #[must_use]
    pub const fn query(&self) -> &Query {
        &self.query
    }

    /// Pulls the next item.
    ///
    /// Returns `None` once the sequence has ended. An error ends the
    /// sequence: the call after an `Err` returns `None`.
    pub async fn next(&mut self) -> Option<Result<Value, CrossrefError>> {
        loop {
            match self.state {
                CursorState::Exhausted | CursorState::CeilingExceeded => return None,
                CursorState::Fetching => match self.fetch().await {
                    Ok(items) if items.is_empty() => self.state = CursorState::Exhausted,
                    Ok(items) => {
                        self.buffer = items.into();
                        self.state = CursorState::Emitting;
                    }
                    Err(error) => {
                        self.state = CursorState::Exhausted;
                        return Some(Err(error));
                    }
                },
                CursorState::Emitting => {
                    if let Some(item) = self.buffer.pop_front() {
                        return Some(Ok(item));
                    }
                    if let Err(error) = self.advance() {
                        return Some(Err(error));
                    }
                }
            }
        }
    }

    /// Drains the cursor into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first error the cursor yields. Under the default
    /// [`PageLimits`], any query with more than two pages of results ends in
    /// [`CrossrefError::OffsetExceeded`].
    pub async fn collect_all(mut self) -> Result<Vec<Value>, CrossrefError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }

    /// Converts the cursor into a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = Result<Value, CrossrefError>> + 't {
        futures::stream::unfold(self, |mut cursor| async move {
            cursor.next().await.map(|item| (item, cursor))
        })
    }

    async fn fetch(&mut self) -> Result<Vec<Value>, CrossrefError> {
        let params = if self.query.is_sample() {
            self.query.params().clone().without_paging()
        } else {
            self.query.page_params(self.offset, self.limits.page_size())
        };

        tracing::trace!(
            url = %self.url,
            offset = self.offset,
            sample = self.query.is_sample(),
            "Fetching page"
        );

        let body = self.transport.get(&self.url, &params, self.timeout).await?;
        self.pages_fetched += 1;

        let page = decode_page(&self.url, body)?;
        if page.total_results.is_some() {
            self.total_results = page.total_results;
        }
        Ok(page.items)
    }

    /// Moves past a drained page.
    fn advance(&mut self) -> Result<(), CrossrefError> {
        if self.query.is_sample() {
            self.state = CursorState::Exhausted;
            return Ok(());
        }

        self.offset = self.offset.saturating_add(self.limits.stride());
        if self.offset >= self.limits.max_offset() {
            tracing::trace!(
                offset = self.offset,
                max_offset = self.limits.max_offset(),
                "Offset ceiling reached"
            );
            self.state = CursorState::CeilingExceeded;
            return Err(CrossrefError::OffsetExceeded {
                offset: self.offset,
                max_offset: self.limits.max_offset(),
            });
        }

        self.state = CursorState::Fetching;
        Ok(())
    }
}
