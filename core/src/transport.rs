//! The network seam between the gateway and an HTTP implementation.
//!
//! # Design
//! `Transport::send` performs exactly one exchange. Any response the server
//! sends back, whatever its status, is returned as an `HttpResponse`; an `Err`
//! means the exchange itself could not complete. Status interpretation belongs
//! to `RequestGateway`.

use crate::error::GatewayError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GatewayError>;
}

/// Blocking transport backed by a `ureq` agent.
///
/// The agent is configured with `http_status_as_error(false)` so 4xx/5xx
/// responses reach the gateway as data.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, GatewayError> {
        let url = request.url.as_str();
        let result = match request.method {
            HttpMethod::Get => {
                let mut builder = self.agent.get(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Delete => {
                let mut builder = self.agent.delete(url);
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if request.method == HttpMethod::Post {
                    self.agent.post(url)
                } else {
                    self.agent.put(url)
                };
                for (name, value) in &request.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match &request.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };

        let mut response = result.map_err(|e| GatewayError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let read = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_string();
        let body = match read {
            Ok(body) => body,
            // Unreadable error bodies read as empty; the status message applies.
            Err(e) if !(200..300).contains(&status) => {
                tracing::debug!(status, error = %e, "discarding unreadable error body");
                String::new()
            }
            Err(e) => return Err(GatewayError::new(e.to_string())),
        };

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
