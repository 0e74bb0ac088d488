//! View identities
//!
//! The views themselves are rendered elsewhere; the route table only holds
//! which one a path maps to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Top-level dashboard views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Dashboard,
    Fields,
    Analytics,
    Alerts,
    Settings,
}

impl View {
    /// All views in navigation order
    pub const ALL: [View; 5] = [
        View::Dashboard,
        View::Fields,
        View::Analytics,
        View::Alerts,
        View::Settings,
    ];

    /// Route name used for programmatic navigation
    pub fn name(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Fields => "Fields",
            View::Analytics => "Analytics",
            View::Alerts => "Alerts",
            View::Settings => "Settings",
        }
    }

    /// Static path the view is mounted at
    pub fn path(&self) -> &'static str {
        match self {
            View::Dashboard => "/",
            View::Fields => "/fields",
            View::Analytics => "/analytics",
            View::Alerts => "/alerts",
            View::Settings => "/settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
