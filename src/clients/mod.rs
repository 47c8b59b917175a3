//! Transport layer for Crossref API communication.
//!
//! The query builder and pagination cursor reach the network only through the
//! [`Transport`] trait. This module defines that boundary and ships the
//! default reqwest-backed implementation.
//!
//! # Overview
//!
//! - [`Transport`]: `get` / `head` / `post` with a per-call timeout
//! - [`HttpClient`]: The reqwest implementation of [`Transport`]
//! - [`HttpRequest`]: A request to be sent by [`HttpClient`]
//! - [`HttpResponse`]: A raw response received by [`HttpClient`]
//! - [`ResponseHeaders`]: Case-insensitive header map returned by `head`
//! - [`RateLimits`]: `X-Rate-Limit-*` header values
//! - [`HttpError`]: Unified transport error
//!
//! # Retry Behavior
//!
//! None. Retries, backoff, and caching belong to the transport the caller
//! injects; [`HttpClient`] sends each request exactly once.

mod errors;
mod http_client;
mod http_request;
mod http_response;
mod transport;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{FilePart, HttpMethod, HttpRequest, HttpRequestBuilder, PostBody};
pub use http_response::{HttpResponse, RateLimits, ResponseHeaders, UNDEFINED_HEADER};
pub use transport::Transport;
