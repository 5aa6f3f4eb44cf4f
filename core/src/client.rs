//! The request gateway: address resolution, dispatch, and response handling.
//!
//! # Design
//! `RequestGateway` holds only a base address and a transport, and carries no
//! mutable state between calls. Each operation is split the same way:
//! `build_request` produces an `HttpRequest`, the transport performs the
//! exchange, and `parse_response` turns the `HttpResponse` into a value or a
//! `GatewayError`. The build and parse halves are plain functions of their
//! inputs and are tested without a network.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use crate::address::build_address;
use crate::config::{self, GatewayConfig};
use crate::error::GatewayError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestOptions};
use crate::transport::{Transport, UreqTransport};

const CONTENT_TYPE: &str = "Content-Type";
const APPLICATION_JSON: &str = "application/json";
const NO_CONTENT: u16 = 204;

/// Thin JSON-over-HTTP client bound to one base address.
#[derive(Debug, Clone)]
pub struct RequestGateway<T = UreqTransport> {
    base_address: String,
    transport: T,
}

impl RequestGateway<UreqTransport> {
    /// Gateway using the process-wide configuration and a `ureq` transport.
    pub fn from_global() -> Self {
        Self::with_config(config::global(), UreqTransport::new())
    }

    pub fn new(base_address: &str) -> Self {
        Self::with_transport(base_address, UreqTransport::new())
    }
}

impl<T: Transport> RequestGateway<T> {
    pub fn with_transport(base_address: &str, transport: T) -> Self {
        Self {
            base_address: base_address.to_string(),
            transport,
        }
    }

    pub fn with_config(config: &GatewayConfig, transport: T) -> Self {
        Self::with_transport(&config.base_address, transport)
    }

    pub fn base_address(&self) -> &str {
        &self.base_address
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn get<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<R>, GatewayError> {
        self.execute(HttpMethod::Get, endpoint, options)
    }

    pub fn post<B, R>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Option<R>, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute_with_body(HttpMethod::Post, endpoint, body, options)
    }

    pub fn put<B, R>(
        &self,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Option<R>, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.execute_with_body(HttpMethod::Put, endpoint, body, options)
    }

    pub fn del<R: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<R>, GatewayError> {
        self.execute(HttpMethod::Delete, endpoint, options)
    }

    /// Perform one request and decode the response.
    ///
    /// Returns `Ok(None)` for 204. Every failure is logged with the method and
    /// resolved address before it is returned.
    pub fn execute<R: DeserializeOwned>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<Option<R>, GatewayError> {
        let request = self.build_request(method, endpoint, options);
        debug!(method = %request.method, url = %request.url, "dispatching request");

        self.transport
            .send(&request)
            .and_then(parse_response::<R>)
            .inspect_err(|e| log_failure(&request, e))
    }

    fn execute_with_body<B, R>(
        &self,
        method: HttpMethod,
        endpoint: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<Option<R>, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = match serde_json::to_string(body) {
            Ok(body) => body,
            Err(e) => {
                let err = GatewayError::from(e);
                error!(
                    method = %method,
                    url = %build_address(endpoint, &self.base_address),
                    error = %err,
                    "request failed"
                );
                return Err(err);
            }
        };
        let options = RequestOptions {
            body: Some(body),
            ..options
        };
        self.execute(method, endpoint, options)
    }

    /// Resolve the address and merge headers into a request descriptor.
    ///
    /// Caller headers override the default `Content-Type` when names match
    /// case-insensitively; duplicate caller names keep the last value.
    pub fn build_request(
        &self,
        method: HttpMethod,
        endpoint: &str,
        options: RequestOptions,
    ) -> HttpRequest {
        let mut headers = vec![(CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string())];
        for (name, value) in options.headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(&name)) {
                Some(slot) => *slot = (name, value),
                None => headers.push((name, value)),
            }
        }

        HttpRequest {
            method,
            url: build_address(endpoint, &self.base_address),
            headers,
            body: options.body,
        }
    }
}

/// Interpret a completed exchange.
///
/// Non-2xx statuses become a `GatewayError` whose message is the body's
/// `detail` field when one can be read, else `HTTP error {status}`. A 204 is
/// `None` without looking at the body.
pub fn parse_response<R: DeserializeOwned>(
    response: HttpResponse,
) -> Result<Option<R>, GatewayError> {
    if !response.is_success() {
        return Err(error_from_response(&response));
    }
    if response.status == NO_CONTENT {
        return Ok(None);
    }
    debug!(status = response.status, "request succeeded");
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(GatewayError::from)
}

fn error_from_response(response: &HttpResponse) -> GatewayError {
    let detail = serde_json::from_str::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|mut body| body.get_mut("detail").map(serde_json::Value::take));

    match detail {
        Some(serde_json::Value::String(message)) => GatewayError::new(message),
        Some(serde_json::Value::Null) | None => GatewayError::status(response.status),
        Some(other) => GatewayError::new(other.to_string()),
    }
}

fn log_failure(request: &HttpRequest, err: &GatewayError) {
    error!(
        method = %request.method,
        url = %request.url,
        error = %err,
        "request failed"
    );
}
