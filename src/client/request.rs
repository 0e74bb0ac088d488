//! Per-call request options

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

/// Optional body, header overrides and query parameters for one call
#[derive(Debug, Default)]
pub struct RequestOptions {
    /// Serialized JSON body; a serialization failure is reported when the
    /// call is sent, so it goes through the error observers like any other
    pub(crate) body: Option<Result<Vec<u8>, serde_json::Error>>,
    /// Overrides client default headers of the same name
    pub(crate) headers: HeaderMap,
    pub(crate) query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        self.body = Some(serde_json::to_vec(body));
        self
    }

    /// Set a header for this call only
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Append a query parameter
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }
}
