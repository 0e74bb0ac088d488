//! Navigator
//!
//! Owns the route table, tracks the current location and keeps a
//! back/forward history like a browser. Unknown paths are reported to the
//! caller, which decides what fallback to render; the navigator's state is
//! left untouched in that case.

use super::error::RouteResult;
use super::table::RouteTable;
use super::view::View;

/// A resolved location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location<V = View> {
    pub path: String,
    pub view: V,
}

/// Navigation component bound to a route table
#[derive(Debug)]
pub struct Navigator<V = View> {
    table: RouteTable<V>,
    current: Location<V>,
    back: Vec<Location<V>>,
    forward: Vec<Location<V>>,
}

impl<V: Clone> Navigator<V> {
    /// Install the table and resolve the startup location
    pub fn new(table: RouteTable<V>, initial_path: &str) -> RouteResult<Self> {
        let current = resolve_location(&table, initial_path)?;
        tracing::debug!(path = %current.path, "Navigator started");

        Ok(Self {
            table,
            current,
            back: Vec::new(),
            forward: Vec::new(),
        })
    }

    pub fn table(&self) -> &RouteTable<V> {
        &self.table
    }

    pub fn current(&self) -> &Location<V> {
        &self.current
    }

    /// Navigate to a path, recording the previous location in history
    pub fn push(&mut self, path: &str) -> RouteResult<&Location<V>> {
        let next = resolve_location(&self.table, path)?;
        tracing::debug!(from = %self.current.path, to = %next.path, "Navigating");

        let previous = std::mem::replace(&mut self.current, next);
        self.back.push(previous);
        self.forward.clear();

        Ok(&self.current)
    }

    /// Navigate to a named route
    pub fn push_named(&mut self, name: &str) -> RouteResult<&Location<V>> {
        let path = self.table.resolve_by_name(name)?.to_string();
        self.push(&path)
    }

    /// Step back in history; `None` when already at the oldest entry
    pub fn back(&mut self) -> Option<&Location<V>> {
        let previous = self.back.pop()?;
        let current = std::mem::replace(&mut self.current, previous);
        self.forward.push(current);
        Some(&self.current)
    }

    /// Step forward in history; `None` when nothing to redo
    pub fn forward(&mut self) -> Option<&Location<V>> {
        let next = self.forward.pop()?;
        let current = std::mem::replace(&mut self.current, next);
        self.back.push(current);
        Some(&self.current)
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }
}

fn resolve_location<V: Clone>(table: &RouteTable<V>, path: &str) -> RouteResult<Location<V>> {
    let entry = table.entry(path)?;
    Ok(Location {
        path: entry.path.clone(),
        view: entry.view.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::RouteError;

    fn navigator() -> Navigator {
        Navigator::new(RouteTable::dashboard(), "/").unwrap()
    }

    #[test]
    fn test_startup_resolution() {
        let nav = navigator();
        assert_eq!(nav.current().view, View::Dashboard);
        assert!(!nav.can_go_back());

        let err = Navigator::new(RouteTable::dashboard(), "/missing").unwrap_err();
        assert_eq!(err, RouteError::NotFound("/missing".to_string()));
    }

    #[test]
    fn test_push_and_history() {
        let mut nav = navigator();

        nav.push("/fields").unwrap();
        nav.push_named("Alerts").unwrap();
        assert_eq!(nav.current().view, View::Alerts);
        assert_eq!(nav.current().path, "/alerts");

        assert_eq!(nav.back().map(|l| l.view), Some(View::Fields));
        assert_eq!(nav.back().map(|l| l.view), Some(View::Dashboard));
        assert!(nav.back().is_none());

        assert_eq!(nav.forward().map(|l| l.view), Some(View::Fields));
        assert!(nav.can_go_forward());
    }

    #[test]
    fn test_push_clears_forward_stack() {
        let mut nav = navigator();

        nav.push("/fields").unwrap();
        nav.back();
        assert!(nav.can_go_forward());

        nav.push("/settings").unwrap();
        assert!(!nav.can_go_forward());
        assert!(nav.forward().is_none());
    }

    #[test]
    fn test_unknown_path_leaves_state() {
        let mut nav = navigator();
        nav.push("/analytics").unwrap();

        let err = nav.push("/nope").unwrap_err();
        assert_eq!(err, RouteError::NotFound("/nope".to_string()));
        assert_eq!(nav.current().view, View::Analytics);

        let err = nav.push_named("Nope").unwrap_err();
        assert_eq!(err, RouteError::UnknownName("Nope".to_string()));
        assert_eq!(nav.back().map(|l| l.view), Some(View::Dashboard));
    }
}
