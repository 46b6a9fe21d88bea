//! HTTP request routing.
//!
//! This module provides a compressed radix-tree router that resolves a request
//! method and path to a handler and its path parameters, derives `Allow`
//! headers for 405 responses and builds URLs from route names.

mod config;
mod error;
mod method;
mod method_table;
mod node;
mod params;
mod pattern;
mod route;
#[allow(clippy::module_inception)]
mod router;
mod tree;

// Re-export public items
pub use config::RouterConfig;
pub use error::Error;
pub use method::Method;
pub use method_table::MethodEntry;
pub use params::{Params, PathParams, Stash};
pub use route::Route;
pub use router::{Lookup, Router};
pub use tree::RouteMatch;
