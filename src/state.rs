//! Application State
//!
//! Everything the host constructs once at startup: the shared API client
//! and the navigator with the installed route table. Views receive what
//! they need from here by reference instead of reaching for globals.

use thiserror::Error;

use crate::client::{ApiClient, BuildError};
use crate::config::Config;
use crate::pasture::PastureApi;
use crate::routes::{Navigator, RouteError, RouteTable};

/// Startup state shared with every view
#[derive(Debug)]
pub struct AppState {
    /// Shared API client; clones share the same pool and observers
    pub client: ApiClient,
    /// Navigation over the dashboard routes
    pub navigator: Navigator,
}

/// Errors during startup
#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Failed to build API client: {0}")]
    Client(#[from] BuildError),

    #[error("Failed to resolve initial route: {0}")]
    Route(#[from] RouteError),
}

impl AppState {
    /// Build the client and install the dashboard routes at `initial_path`
    pub fn new(config: &Config, initial_path: &str) -> Result<Self, StartupError> {
        let client = ApiClient::new(config.client.clone())?;
        Self::with_client(client, initial_path)
    }

    /// Use an already constructed client
    pub fn with_client(client: ApiClient, initial_path: &str) -> Result<Self, StartupError> {
        let navigator = Navigator::new(RouteTable::dashboard(), initial_path)?;
        tracing::info!(
            base_url = %client.base_url(),
            routes = navigator.table().len(),
            "Dashboard shell ready"
        );

        Ok(Self { client, navigator })
    }

    /// Typed backend endpoints over the shared client
    pub fn pasture(&self) -> PastureApi<'_> {
        PastureApi::new(&self.client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::View;

    #[test]
    fn test_startup() {
        let state = AppState::new(&Config::default(), "/").unwrap();
        assert_eq!(state.client.base_url(), "http://localhost:8000");
        assert_eq!(state.navigator.current().view, View::Dashboard);
    }

    #[test]
    fn test_startup_on_unknown_path() {
        let err = AppState::new(&Config::default(), "/nowhere").unwrap_err();
        assert!(matches!(err, StartupError::Route(RouteError::NotFound(_))));
    }
}
