//! A compressed radix-tree HTTP request router.
//!
//! Routes are registered as (method, pattern) pairs bound to opaque handler
//! references. Matching a request walks the tree once, without backtracking, so
//! lookup cost depends on the path length rather than on the number of routes.
//!
//! # Features
//!
//! - Static, named parameter (`:id`) and trailing wildcard (`*path`) segments
//! - Fixed precedence at every branch: static, then parameter, then wildcard
//! - Distinguishes "method not allowed" (with an `Allow` header) from "not found"
//! - Per-subtree not-found fallbacks
//! - Reverse routing by route name
//! - Allocation-free matching through a reusable parameter [`Stash`]
//!
//! # Examples
//!
//! ## Basic usage
//!
//! ```
//! use microrouter_rs::{Lookup, Method, Router};
//!
//! let mut router = Router::new();
//! router.add(Method::GET, "/files/*path", "files", "serve_file").unwrap();
//!
//! if let Lookup::Matched { handler, params } = router.find(&Method::GET, "/files/css/site.css") {
//!     assert_eq!(*handler, "serve_file");
//!     assert_eq!(params.get("path"), Some("css/site.css"));
//! }
//! ```
//!
//! ## Method not allowed
//!
//! ```
//! use microrouter_rs::{Lookup, Method, Router};
//!
//! let mut router = Router::new();
//! router.add(Method::GET, "/items", "", "list").unwrap();
//! router.add(Method::POST, "/items", "", "create").unwrap();
//!
//! match router.find(&Method::DELETE, "/items") {
//!     Lookup::MethodNotAllowed { allow } => assert_eq!(allow, "OPTIONS, GET, POST"),
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```
//!
//! ## Reusing a stash
//!
//! ```
//! use microrouter_rs::{Method, RouteMatch, Router};
//!
//! let mut router = Router::new();
//! router.add(Method::GET, "/users/:user/repos/:repo", "repo", 7).unwrap();
//!
//! let mut stash = router.stash();
//! if let RouteMatch::Matched(entry) = router.find_with_stash(&Method::GET, "/users/ann/repos/x", &mut stash) {
//!     let params = stash.params(entry.param_names());
//!     assert_eq!(params.get("repo"), Some("x"));
//! }
//! ```

// Export the router module
pub mod router;

// Re-export commonly used items for convenience
pub use router::{
    Error as RouterError, Lookup, Method, MethodEntry, PathParams, Route, RouteMatch, Router,
    RouterConfig, Stash,
};
