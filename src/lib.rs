//! # Pasture Dashboard
//!
//! Client-side shell of the Pasture Manager dashboard: the static route
//! table that maps URL paths to views, and the shared HTTP client the
//! views use to reach the backend API.
//!
//! ## Modules
//!
//! - [`routes`]: Route table and navigator
//! - [`client`]: Shared API client with error observers
//! - [`pasture`]: Typed backend endpoints
//! - [`config`]: TOML + environment configuration
//! - [`logging`]: Tracing subscriber setup
//! - [`state`]: Startup state handed to views
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pasture_dashboard::{AppState, Config, View};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let mut state = AppState::new(&config, "/")?;
//!
//!     // Navigate by name instead of hardcoding paths
//!     let location = state.navigator.push_named("Fields")?;
//!     assert_eq!(location.view, View::Fields);
//!
//!     // Fetch what the Fields view renders
//!     let fields = state.pasture().list_fields().await?;
//!     println!("{} fields", fields.len());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod logging;
pub mod pasture;
pub mod routes;
pub mod state;

pub use client::{
    ApiClient, ApiClientBuilder, ApiError, ApiResult, BuildError, ErrorObserver, LoggingObserver,
    RequestInfo, RequestOptions,
};

pub use config::{ClientConfig, Config, ConfigError, LoggingConfig};

pub use pasture::{Field, HealthStatus, IngestReceipt, PastureApi, SensorReading, TimeseriesQuery};

pub use routes::{Location, Navigator, RouteEntry, RouteError, RouteResult, RouteTable, View};

pub use state::{AppState, StartupError};
