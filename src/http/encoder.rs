//! Serialization of request bodies.

use anyhow::{Context, Result};
use serde::Serialize;

/// Turns POST bodies into their wire representation. Only called when a body is present.
pub trait BodyEncoder: Send + Sync {
    /// Content type sent when the caller did not set one.
    fn content_type(&self) -> &'static str;

    /// Serializes `value`; an error means the request is never sent.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>>;
}

/// Encodes bodies with serde_json as `application/json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl BodyEncoder for JsonEncoder {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).context("Failed to encode request body as JSON")
    }
}
