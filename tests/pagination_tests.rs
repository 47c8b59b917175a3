//! Integration tests for the pagination cursor.
//!
//! A scripted in-memory transport answers each GET by offset, so these tests
//! pin down the paging protocol (stride, ceiling, termination) without a
//! network.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossref_api::clients::{HttpError, PostBody, ResponseHeaders, Transport};
use crossref_api::query::QueryParams;
use crossref_api::{CrossrefClient, CrossrefConfig, CrossrefError, CursorState, PageLimits};
use futures::StreamExt;
use serde_json::{json, Value};

/// Serves pages whose sizes are looked up by request offset.
struct PagedTransport {
    /// `(offset, item count)`; unknown offsets answer with an empty page.
    pages: Vec<(u32, usize)>,
    requested: Mutex<Vec<QueryParams>>,
}

impl PagedTransport {
    fn new(pages: &[(u32, usize)]) -> Self {
        Self {
            pages: pages.to_vec(),
            requested: Mutex::new(Vec::new()),
        }
    }

    fn offsets(&self) -> Vec<String> {
        self.requested
            .lock()
            .unwrap()
            .iter()
            .filter_map(|params| params.get("offset").map(str::to_string))
            .collect()
    }

    fn request_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

impl Transport for PagedTransport {
    async fn get(
        &self,
        _url: &str,
        params: &QueryParams,
        _timeout: Duration,
    ) -> Result<Value, HttpError> {
        self.requested.lock().unwrap().push(params.clone());

        let count = if let Some(sample) = params.get("sample") {
            sample.parse().unwrap()
        } else {
            let offset: u32 = params.get("offset").unwrap().parse().unwrap();
            self.pages
                .iter()
                .find(|(at, _)| *at == offset)
                .map_or(0, |(_, count)| *count)
        };

        let items: Vec<Value> = (0..count).map(|n| json!({ "n": n })).collect();
        Ok(json!({ "status": "ok", "message": { "items": items } }))
    }

    async fn head(&self, _url: &str, _timeout: Duration) -> Result<ResponseHeaders, HttpError> {
        Ok(ResponseHeaders::new())
    }

    async fn post(
        &self,
        _url: &str,
        _body: PostBody,
        _timeout: Duration,
    ) -> Result<Value, HttpError> {
        Ok(json!({}))
    }
}

fn client(
    pages: &[(u32, usize)],
    limits: PageLimits,
) -> CrossrefClient<Arc<PagedTransport>> {
    let config = CrossrefConfig::builder().page_limits(limits).build().unwrap();
    CrossrefClient::with_transport(config, Arc::new(PagedTransport::new(pages)))
}

// ============================================================================
// Termination
// ============================================================================

#[tokio::test]
async fn test_empty_page_ends_iteration_before_ceiling() {
    let client = client(&[(0, 20), (21, 20), (42, 0)], PageLimits::new(20, 100).unwrap());

    let items = client.iter(&client.works()).collect_all().await.unwrap();

    assert_eq!(items.len(), 40);
    assert_eq!(client.transport().offsets(), ["0", "21", "42"]);
}

#[tokio::test]
async fn test_ceiling_is_raised_instead_of_requesting_offset_42() {
    let client = client(&[(0, 20), (21, 20), (42, 20)], PageLimits::default());

    let mut cursor = client.iter(&client.works());
    let mut items = 0;
    let mut outcome = None;
    while let Some(next) = cursor.next().await {
        match next {
            Ok(_) => items += 1,
            Err(error) => outcome = Some(error),
        }
    }

    assert_eq!(items, 40);
    assert!(matches!(
        outcome,
        Some(CrossrefError::OffsetExceeded { offset: 42, max_offset: 40 })
    ));
    assert_eq!(cursor.state(), CursorState::CeilingExceeded);
    assert_eq!(client.transport().offsets(), ["0", "21"]);
}

#[tokio::test]
async fn test_short_final_page_still_advances() {
    let client = client(&[(0, 20), (21, 7)], PageLimits::new(20, 100).unwrap());

    let items = client.iter(&client.works()).collect_all().await.unwrap();

    assert_eq!(items.len(), 27);
    assert_eq!(client.transport().offsets(), ["0", "21", "42"]);
}

#[tokio::test]
async fn test_sample_is_a_single_request() {
    let client = client(&[], PageLimits::default());
    let query = client.works().sample(20).unwrap();

    let items = client.iter(&query).collect_all().await.unwrap();

    assert_eq!(items.len(), 20);
    assert_eq!(client.transport().request_count(), 1);
    assert!(client.transport().offsets().is_empty());
}

// ============================================================================
// Restartability and independence
// ============================================================================

#[tokio::test]
async fn test_early_stop_then_restart_begins_at_zero() {
    let client = client(&[(0, 20), (21, 20)], PageLimits::new(20, 100).unwrap());
    let query = client.works().query_terms(["ocean"]);

    let mut first = client.iter(&query);
    for _ in 0..3 {
        first.next().await.unwrap().unwrap();
    }
    drop(first);

    let second = client.iter(&query);
    assert_eq!(second.offset(), 0);
    let items = second.collect_all().await.unwrap();

    assert_eq!(items.len(), 40);
    assert_eq!(client.transport().offsets(), ["0", "0", "21", "42"]);
}

#[tokio::test]
async fn test_concurrent_cursors_keep_their_own_offsets() {
    let client = client(&[(0, 5), (6, 5)], PageLimits::new(5, 100).unwrap());
    let works = client.works();
    let filtered = works.filter([("type", "dataset")]).unwrap();

    let (a, b) = tokio::join!(
        client.iter(&works).collect_all(),
        client.iter(&filtered).collect_all()
    );

    assert_eq!(a.unwrap().len(), 10);
    assert_eq!(b.unwrap().len(), 10);
    assert_eq!(client.transport().request_count(), 6);
}

#[tokio::test]
async fn test_canonical_url_is_stable_while_paging() {
    let client = client(&[(0, 20), (21, 20)], PageLimits::new(20, 100).unwrap());
    let query = client.works().query_terms(["ocean"]);
    let before = query.url();

    let mut cursor = client.iter(&query);
    while let Some(item) = cursor.next().await {
        item.unwrap();
        assert_eq!(cursor.query().url(), before);
        assert!(!cursor.query().url().contains("offset"));
        assert!(!cursor.query().url().contains("rows"));
    }
    assert_eq!(query.url(), before);
}

#[tokio::test]
async fn test_stream_adapter_stops_after_error() {
    let client = client(&[(0, 20), (21, 20), (42, 20)], PageLimits::default());

    let results: Vec<_> = client.iter(&client.works()).into_stream().collect().await;

    assert_eq!(results.len(), 41);
    assert!(results[..40].iter().all(Result::is_ok));
    assert!(matches!(
        results[40],
        Err(CrossrefError::OffsetExceeded { .. })
    ));
}
