//! Shared API Client
//!
//! One pre-configured HTTP entry point for every view that talks to the
//! pasture backend.
//!
//! ## Contract
//!
//! - Base address, timeout and default headers are fixed at construction.
//! - On success only the decoded JSON payload is returned; status line and
//!   response headers never reach the caller.
//! - On failure the error passes once through every registered
//!   [`ErrorObserver`], in registration order, and is then returned
//!   unchanged.
//! - No retries, no caching, no request deduplication. Each call is one
//!   network round trip.
//!
//! ## Example
//!
//! ```rust,no_run
//! use pasture_dashboard::client::ApiClient;
//! use pasture_dashboard::config::ClientConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ClientConfig::from_env())?;
//!     let fields: serde_json::Value = client.get("/api/fields").await?;
//!     println!("{fields}");
//!     Ok(())
//! }
//! ```

mod error;
mod observer;
mod request;

#[cfg(test)]
pub(crate) mod test_server;

pub use error::{ApiError, ApiResult};
pub use observer::{ErrorObserver, LoggingObserver, RequestInfo};
pub use request::RequestOptions;

use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{ClientConfig, ConfigError};

/// Shared HTTP client for the backend API
///
/// Cheap to clone; clones share the connection pool and observers.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    observers: Arc<[Arc<dyn ErrorObserver>]>,
}

/// Builder for [`ApiClient`]
pub struct ApiClientBuilder {
    config: ClientConfig,
    observers: Vec<Arc<dyn ErrorObserver>>,
    default_logging: bool,
}

/// Errors constructing the client
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid client configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create HTTP client: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiClientBuilder {
    /// Register an observer; observers run in registration order
    pub fn observer(mut self, observer: impl ErrorObserver + 'static) -> Self {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Do not install the default [`LoggingObserver`]
    pub fn without_default_logging(mut self) -> Self {
        self.default_logging = false;
        self
    }

    pub fn build(self) -> Result<ApiClient, BuildError> {
        let http = reqwest::Client::builder()
            .timeout(self.config.timeout())
            .default_headers(self.config.default_headers()?)
            .build()?;

        let mut observers: Vec<Arc<dyn ErrorObserver>> = Vec::with_capacity(self.observers.len() + 1);
        if self.default_logging {
            observers.push(Arc::new(LoggingObserver));
        }
        observers.extend(self.observers);

        tracing::debug!(
            base_url = %self.config.base_url,
            timeout_ms = self.config.timeout_ms,
            observers = observers.len(),
            "API client created"
        );

        Ok(ApiClient {
            http,
            config: Arc::new(self.config),
            observers: observers.into(),
        })
    }
}

impl ApiClient {
    /// Create a client with the default logging observer
    pub fn new(config: ClientConfig) -> Result<Self, BuildError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ClientConfig) -> ApiClientBuilder {
        ApiClientBuilder {
            config,
            observers: Vec::new(),
            default_logging: true,
        }
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Absolute URL for a path relative to the base address
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.config.base_url.clone();
        }
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::GET, path, RequestOptions::new()).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::POST, path, RequestOptions::new().json(body)).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PUT, path, RequestOptions::new().json(body)).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::PATCH, path, RequestOptions::new().json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.send(Method::DELETE, path, RequestOptions::new()).await
    }

    /// HEAD request; succeeds with no payload
    pub async fn head(&self, path: &str) -> ApiResult<()> {
        self.send(Method::HEAD, path, RequestOptions::new()).await
    }

    /// Send a request with any method and options
    pub async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let info = RequestInfo::new(method, self.url(path));
        tracing::debug!(request_id = %info.request_id, "{}", info);

        self.dispatch(&info, options)
            .await
            .map_err(|error| self.intercept(&info, error))
    }

    /// Run every observer on the error, then hand it back untouched
    fn intercept(&self, info: &RequestInfo, error: ApiError) -> ApiError {
        for observer in self.observers.iter() {
            observer.on_error(info, &error);
        }
        error
    }

    async fn dispatch<T: DeserializeOwned>(
        &self,
        info: &RequestInfo,
        options: RequestOptions,
    ) -> ApiResult<T> {
        let url = reqwest::Url::parse(&info.url).map_err(|e| ApiError::InvalidUrl {
            url: info.url.clone(),
            reason: e.to_string(),
        })?;

        let mut request = self
            .http
            .request(info.method.clone(), url)
            .headers(options.headers);

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = options.body {
            request = request.body(body.map_err(ApiError::Encode)?);
        }

        let response = request.send().await.map_err(ApiError::Network)?;
        let status = response.status();

        if !status.is_success() {
            // An unreadable error body still reports the status
            let body = match response.bytes().await {
                Ok(bytes) => error_body(&bytes),
                Err(e) => {
                    tracing::debug!(%status, error = %e, "Failed to read error body");
                    Value::Null
                }
            };
            return Err(ApiError::Status { status, body });
        }

        let bytes = response.bytes().await.map_err(ApiError::Network)?;
        decode_payload(status, &bytes)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Decode a success payload; an empty body is JSON `null`
fn decode_payload<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> ApiResult<T> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        bytes
    };

    serde_json::from_slice(bytes).map_err(|source| ApiError::Decode { status, source })
}

/// Error response detail: JSON when it parses, otherwise the raw text
fn error_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
