//! Error type for the request gateway.
//!
//! # Design
//! Every failure (transport, non-2xx status, body encoding or decoding)
//! collapses into one `GatewayError` carrying a message. Callers never branch
//! on the cause, so there are no variants.

use thiserror::Error;

/// Message-bearing failure returned by every gateway operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GatewayError {
    message: String,
}

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Generic message for a non-2xx response without a usable `detail`.
    pub fn status(status: u16) -> Self {
        Self::new(format!("HTTP error {status}"))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}
