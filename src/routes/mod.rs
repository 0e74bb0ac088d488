//! Navigation
//!
//! Static route table for the dashboard and the navigator that resolves
//! views on startup and on every path change.
//!
//! ## Routes
//!
//! | path         | name      |
//! |--------------|-----------|
//! | `/`          | Dashboard |
//! | `/fields`    | Fields    |
//! | `/analytics` | Analytics |
//! | `/alerts`    | Alerts    |
//! | `/settings`  | Settings  |
//!
//! Adding a route means adding an entry to [`RouteTable::dashboard`]; lookup
//! logic never changes.

mod error;
mod navigator;
mod table;
mod view;

pub use error::{RouteError, RouteResult};
pub use navigator::{Location, Navigator};
pub use table::{RouteEntry, RouteTable};
pub use view::View;
