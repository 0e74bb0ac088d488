//! Routing error types

use thiserror::Error;

/// Errors raised by the route table and navigator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// No entry has this exact path
    #[error("Route not found: {0}")]
    NotFound(String),

    /// No entry has this name
    #[error("Unknown route name: {0}")]
    UnknownName(String),

    /// Two entries declare the same path
    #[error("Duplicate route path: {0}")]
    DuplicatePath(String),

    /// Two entries declare the same name
    #[error("Duplicate route name: {0}")]
    DuplicateName(String),

    /// Path is not a static absolute path
    #[error("Invalid route path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
}

/// Result type alias for routing operations
pub type RouteResult<T> = Result<T, RouteError>;
