//! Error observers
//!
//! The single interception point of the API client. Every failed call is
//! shown to each registered observer, in registration order, before it is
//! returned to the caller. Observers only get shared references; they can
//! log or count, never alter, swallow or retry.

use reqwest::Method;
use std::fmt;
use uuid::Uuid;

use super::error::ApiError;

/// Identity of an outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Unique per call
    pub request_id: Uuid,
    pub method: Method,
    /// Absolute URL (base address + path)
    pub url: String,
}

impl RequestInfo {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            method,
            url: url.into(),
        }
    }
}

impl fmt::Display for RequestInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}

/// Side-effecting hook run on every failed call
pub trait ErrorObserver: Send + Sync {
    fn on_error(&self, request: &RequestInfo, error: &ApiError);
}

impl<F> ErrorObserver for F
where
    F: Fn(&RequestInfo, &ApiError) + Send + Sync,
{
    fn on_error(&self, request: &RequestInfo, error: &ApiError) {
        self(request, error)
    }
}

/// Logs every API failure as a tracing error event
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl ErrorObserver for LoggingObserver {
    fn on_error(&self, request: &RequestInfo, error: &ApiError) {
        tracing::error!(
            request_id = %request.request_id,
            method = %request.method,
            url = %request.url,
            status = ?error.status().map(|s| s.as_u16()),
            error = %error,
            "API error"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_request_ids_unique() {
        let a = RequestInfo::new(Method::GET, "http://localhost:8000/api/fields");
        let b = RequestInfo::new(Method::GET, "http://localhost:8000/api/fields");
        assert_ne!(a.request_id, b.request_id);
        assert_eq!(a.to_string(), "GET http://localhost:8000/api/fields");
    }

    #[test]
    fn test_closure_observer() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let observer = move |_: &RequestInfo, _: &ApiError| {
            counter.fetch_add(1, Ordering::SeqCst);
        };

        let info = RequestInfo::new(Method::DELETE, "http://localhost:8000/api/fields/x");
        let err = ApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: serde_json::Value::Null,
        };
        observer.on_error(&info, &err);
        LoggingObserver.on_error(&info, &err);

        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }
}
