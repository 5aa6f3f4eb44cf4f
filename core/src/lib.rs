//! Minimal JSON-over-HTTP request gateway.
//!
//! # Overview
//! Resolves an endpoint against a configured base address, performs one HTTP
//! exchange through a `Transport`, and returns the decoded JSON body, `None`
//! for 204, or a single message-bearing `GatewayError`.
//!
//! # Design
//! - `RequestGateway` is stateless apart from its base address and transport;
//!   it is safe to share across threads when the transport is.
//! - Request building and response parsing are pure; only `Transport::send`
//!   touches the network.
//! - The base address comes from `API_BASE_URL`, read once per process. The
//!   free functions `get`, `post`, `put`, and `del` use that process-wide
//!   gateway.
//! - No retries, timeouts, caching, or authentication.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod address;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use address::build_address;
pub use client::{parse_response, RequestGateway};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
pub use transport::{Transport, UreqTransport};

static GATEWAY: OnceLock<RequestGateway> = OnceLock::new();

/// The process-wide gateway, bound to `API_BASE_URL`.
pub fn gateway() -> &'static RequestGateway {
    GATEWAY.get_or_init(RequestGateway::from_global)
}

pub fn get<R: DeserializeOwned>(
    endpoint: &str,
    options: RequestOptions,
) -> Result<Option<R>, GatewayError> {
    gateway().get(endpoint, options)
}

pub fn post<B, R>(
    endpoint: &str,
    body: &B,
    options: RequestOptions,
) -> Result<Option<R>, GatewayError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    gateway().post(endpoint, body, options)
}

pub fn put<B, R>(
    endpoint: &str,
    body: &B,
    options: RequestOptions,
) -> Result<Option<R>, GatewayError>
where
    B: Serialize + ?Sized,
    R: DeserializeOwned,
{
    gateway().put(endpoint, body, options)
}

pub fn del<R: DeserializeOwned>(
    endpoint: &str,
    options: RequestOptions,
) -> Result<Option<R>, GatewayError> {
    gateway().del(endpoint, options)
}
