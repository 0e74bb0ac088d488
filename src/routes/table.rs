//! Route Table
//!
//! Immutable ordered sequence of route entries plus two lookup indices,
//! one by path and one by name. Built once at startup.

use std::collections::HashMap;

use super::error::{RouteError, RouteResult};
use super::view::View;

/// One navigable location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry<V = View> {
    /// Static absolute path, e.g. `/fields`
    pub path: String,
    /// Unique name for programmatic navigation
    pub name: String,
    /// View rendered at this path
    pub view: V,
}

impl<V> RouteEntry<V> {
    pub fn new(path: impl Into<String>, name: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            view,
        }
    }
}

/// Static mapping from path to view
#[derive(Debug, Clone)]
pub struct RouteTable<V = View> {
    /// Entries in declaration order
    entries: Vec<RouteEntry<V>>,
    /// path → index into `entries`
    by_path: HashMap<String, usize>,
    /// name → index into `entries`
    by_name: HashMap<String, usize>,
}

impl RouteTable<View> {
    /// The dashboard's fixed set of routes
    pub fn dashboard() -> Self {
        let entries = View::ALL
            .iter()
            .map(|view| RouteEntry::new(view.path(), view.name(), *view))
            .collect();

        // The declared views have distinct static paths and names
        Self::new(entries).unwrap_or_else(|e| unreachable!("dashboard routes are valid: {e}"))
    }
}

impl<V> RouteTable<V> {
    /// Build a table, rejecting duplicate paths or names and non-static paths
    pub fn new(entries: Vec<RouteEntry<V>>) -> RouteResult<Self> {
        let mut by_path = HashMap::with_capacity(entries.len());
        let mut by_name = HashMap::with_capacity(entries.len());

        for (idx, entry) in entries.iter().enumerate() {
            validate_path(&entry.path)?;

            if by_path.insert(entry.path.clone(), idx).is_some() {
                return Err(RouteError::DuplicatePath(entry.path.clone()));
            }
            if by_name.insert(entry.name.clone(), idx).is_some() {
                return Err(RouteError::DuplicateName(entry.name.clone()));
            }
        }

        Ok(Self {
            entries,
            by_path,
            by_name,
        })
    }

    /// Resolve the view bound to an exact path
    pub fn resolve(&self, path: &str) -> RouteResult<&V> {
        self.entry(path).map(|entry| &entry.view)
    }

    /// Resolve the static path of a named route
    pub fn resolve_by_name(&self, name: &str) -> RouteResult<&str> {
        self.by_name
            .get(name)
            .map(|&idx| self.entries[idx].path.as_str())
            .ok_or_else(|| RouteError::UnknownName(name.to_string()))
    }

    /// Full entry for an exact path
    pub fn entry(&self, path: &str) -> RouteResult<&RouteEntry<V>> {
        self.by_path
            .get(path)
            .map(|&idx| &self.entries[idx])
            .ok_or_else(|| RouteError::NotFound(path.to_string()))
    }

    pub fn contains_path(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    /// Entries in declaration order
    pub fn entries(&self) -> &[RouteEntry<V>] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteEntry<V>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_path(path: &str) -> RouteResult<()> {
    let reason = if !path.starts_with('/') {
        "must start with '/'"
    } else if path.contains(':') {
        "parameters are not supported"
    } else if path.contains('*') {
        "wildcards are not supported"
    } else {
        return Ok(());
    };

    Err(RouteError::InvalidPath {
        path: path.to_string(),
        reason,
    })
}
