//! Response envelope decoding.
//!
//! Every response from the API is wrapped in the same envelope:
//!
//! ```json
//! {
//!   "status": "ok",
//!   "message-type": "work-list",
//!   "message-version": "1.0.0",
//!   "message": { "items": [ ... ], "total-results": 1234, "items-per-page": 20 }
//! }
//! ```
//!
//! List responses carry an `items` array inside `message`; single-resource
//! responses carry the resource itself as `message`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::CrossrefError;

/// The outer envelope of every response.
#[derive(Clone, Debug, Deserialize)]
pub struct Envelope {
    /// `"ok"` on success.
    #[serde(default)]
    pub status: Option<String>,
    /// The kind of payload, e.g. `work-list` or `work`.
    #[serde(rename = "message-type", default)]
    pub message_type: Option<String>,
    /// Version of the payload schema.
    #[serde(rename = "message-version", default)]
    pub message_version: Option<String>,
    /// The payload.
    pub message: Value,
}

/// The `message` payload of a list response.
#[derive(Clone, Debug, Deserialize)]
pub struct ItemPage {
    /// The items of this page, in server order.
    pub items: Vec<Value>,
    /// Total number of matching items, when reported.
    #[serde(rename = "total-results", default)]
    pub total_results: Option<u64>,
    /// Page size the server applied, when reported.
    #[serde(rename = "items-per-page", default)]
    pub items_per_page: Option<u64>,
}

fn unexpected(url: &str, reason: impl ToString) -> CrossrefError {
    CrossrefError::UnexpectedResponse {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

/// Decodes the envelope of a response body.
pub(crate) fn decode_envelope(url: &str, body: Value) -> Result<Envelope, CrossrefError> {
    serde_json::from_value(body).map_err(|e| unexpected(url, e))
}

/// Extracts the `message` payload of a single-resource response.
pub(crate) fn decode_message(url: &str, body: Value) -> Result<Value, CrossrefError> {
    decode_envelope(url, body).map(|envelope| envelope.message)
}

/// Extracts the item page of a list response.
pub(crate) fn decode_page(url: &str, body: Value) -> Result<ItemPage, CrossrefError> {
    let envelope = decode_envelope(url, body)?;
    serde_json::from_value(envelope.message).map_err(|e| unexpected(url, e))
}
