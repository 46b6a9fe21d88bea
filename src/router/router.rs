//! The router: route registry, tree and public routing operations.

use std::collections::HashMap;
use std::fmt;

use log::{debug, info, warn};

use crate::router::config::RouterConfig;
use crate::router::error::Error;
use crate::router::method::Method;
use crate::router::method_table::MethodEntry;
use crate::router::params::{PathParams, Stash};
use crate::router::pattern::{normalize, Pattern};
use crate::router::route::Route;
use crate::router::tree::{RadixTree, RouteMatch};

/// Result of [`Router::find`], with parameters already paired with their names.
#[derive(Debug)]
pub enum Lookup<'r, H> {
    /// A handler is registered for the method and path.
    Matched {
        /// The handler.
        handler: &'r H,
        /// Captured parameters in path order.
        params: PathParams,
    },
    /// The path is registered, but not for this method. Answer with 405.
    MethodNotAllowed {
        /// Value for the `Allow` response header.
        allow: &'r str,
    },
    /// Nothing matches. Answer with 404 or the fallback.
    NotFound {
        /// The nearest subtree fallback registered with [`Router::not_found`].
        fallback: Option<&'r H>,
    },
}

impl<'r, H> Lookup<'r, H> {
    /// Returns the handler of a successful match.
    pub fn handler(&self) -> Option<&'r H> {
        match self {
            Lookup::Matched { handler, .. } => Some(*handler),
            _ => None,
        }
    }

    /// Returns the parameters of a successful match.
    pub fn params(&self) -> Option<&PathParams> {
        match self {
            Lookup::Matched { params, .. } => Some(params),
            _ => None,
        }
    }
}

/// An HTTP request router backed by a compressed radix tree.
///
/// Routes are registered through `&mut self` and matched through `&self`, so
/// once a router is shared (for example behind an `Arc`) it can no longer change.
///
/// # Examples
///
/// ```
/// use microrouter_rs::{Lookup, Method, Router};
///
/// let mut router = Router::new();
/// router.add(Method::GET, "/users/:id", "user", "show_user").unwrap();
///
/// match router.find(&Method::GET, "/users/42") {
///     Lookup::Matched { handler, params } => {
///         assert_eq!(*handler, "show_user");
///         assert_eq!(params.get("id"), Some("42"));
///     }
///     other => panic!("unexpected result: {other:?}"),
/// }
///
/// assert_eq!(router.reverse("user", [42]), "/users/42");
/// ```
pub struct Router<H> {
    /// The router configuration.
    pub config: RouterConfig,
    tree: RadixTree<H>,
    routes: Vec<Route>,
    by_key: HashMap<(Method, String), usize>,
    by_name: HashMap<String, usize>,
    max_param_count: usize,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::with_config(RouterConfig::default())
    }
}

impl<H> fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("config", &self.config)
            .field("routes", &self.routes)
            .field("max_param_count", &self.max_param_count)
            .finish_non_exhaustive()
    }
}

impl<H> Router<H> {
    /// Create a new router with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new router with the given configuration.
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            tree: RadixTree::new(),
            routes: Vec::new(),
            by_key: HashMap::new(),
            by_name: HashMap::new(),
            max_param_count: 0,
        }
    }

    /// Registers `handler` for `method` and `pattern`.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method
    /// * `pattern` - The path pattern; `:name` segments capture one segment and a
    ///   trailing `*name` segment captures the rest of the path
    /// * `name` - The name for [`Router::reverse`], or `""` for an unnamed route
    /// * `handler` - The handler reference returned on a match
    ///
    /// # Returns
    ///
    /// The registered route. Registering the same method and pattern again
    /// replaces the previous handler.
    ///
    /// # Errors
    ///
    /// Fails when a wildcard is not the last segment, when a parameter name is
    /// empty, or when a parameter and a wildcard would share a tree position.
    pub fn add(&mut self, method: Method, pattern: &str, name: &str, handler: H) -> Result<Route, Error> {
        let pattern = Pattern::parse(pattern)?;
        let entry = MethodEntry::new(handler, pattern.path.clone(), pattern.param_names.clone());

        let replaced = self.tree.insert_route(&pattern, method.clone(), entry)?;
        if replaced.is_some() {
            warn!(
                "[{}] replacing handler for {method} {}",
                self.config.name, pattern.path
            );
        }
        self.max_param_count = self.max_param_count.max(pattern.param_names.len());

        let route = Route {
            method: method.clone(),
            path: pattern.path.clone(),
            name: name.to_string(),
        };
        self.register(route.clone());
        debug!(
            "[{}] added route {method} {} ({} params)",
            self.config.name,
            pattern.path,
            pattern.param_names.len()
        );
        Ok(route)
    }

    fn register(&mut self, route: Route) {
        let key = (route.method.clone(), route.path.clone());
        let index = match self.by_key.get(&key) {
            Some(&index) => {
                let old_name = std::mem::take(&mut self.routes[index].name);
                self.routes[index] = route;
                if self.by_name.get(&old_name) == Some(&index) && self.routes[index].name != old_name {
                    self.rebind_name(&old_name);
                }
                index
            }
            None => {
                self.routes.push(route);
                self.by_key.insert(key, self.routes.len() - 1);
                self.routes.len() - 1
            }
        };

        let name = &self.routes[index].name;
        if !name.is_empty() {
            self.by_name.insert(name.clone(), index);
        }
    }

    /// Points `name` at the latest route still carrying it, or drops it.
    fn rebind_name(&mut self, name: &str) {
        match self.routes.iter().rposition(|route| route.name == name) {
            Some(index) => {
                self.by_name.insert(name.to_string(), index);
            }
            None => {
                self.by_name.remove(name);
            }
        }
    }

    /// Registers a fallback for misses under `scope`.
    ///
    /// `/users`, `/users/` and `/users/*` all name the subtree below `/users/`;
    /// `/` covers the whole tree. On a miss the deepest fallback passed while
    /// walking the path is reported.
    pub fn not_found(&mut self, scope: &str, handler: H) -> Result<(), Error> {
        let mut scope = normalize(scope);
        if let Some(slash) = scope.rfind('/') {
            if scope[slash + 1..].starts_with('*') {
                scope.truncate(slash + 1);
            }
        }
        if !scope.ends_with('/') {
            scope.push('/');
        }

        let pattern = Pattern::parse(&scope)?;
        let id = self.tree.insert(&pattern)?;
        self.tree.node_mut(id).not_found = Some(handler);
        debug!("[{}] added not-found fallback for {scope}", self.config.name);
        Ok(())
    }

    /// Matches `method` and `path`, capturing parameter values into `stash`.
    ///
    /// Pair the values with names through [`Stash::params`] and
    /// [`MethodEntry::param_names`].
    pub fn find_with_stash<'r, 'p>(
        &'r self,
        method: &Method,
        path: &'p str,
        stash: &mut Stash<'p>,
    ) -> RouteMatch<'r, H> {
        self.tree.find(method, path, stash)
    }

    /// Matches `method` and `path`, returning owned named parameters.
    pub fn find(&self, method: &Method, path: &str) -> Lookup<'_, H> {
        let mut stash = self.stash();
        match self.find_with_stash(method, path, &mut stash) {
            RouteMatch::Matched(entry) => Lookup::Matched {
                handler: entry.handler(),
                params: stash.params(entry.param_names()).to_owned_params(),
            },
            RouteMatch::MethodNotAllowed { allow } => Lookup::MethodNotAllowed { allow },
            RouteMatch::NotFound { fallback } => Lookup::NotFound { fallback },
        }
    }

    /// Builds the URL of the route registered as `name`.
    ///
    /// Returns an empty string for an unknown name. See [`Route::reverse`].
    pub fn reverse<I>(&self, name: &str, values: I) -> String
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.route(name)
            .map(|route| route.reverse(values))
            .unwrap_or_default()
    }

    /// The route registered as `name`.
    pub fn route(&self, name: &str) -> Option<&Route> {
        self.by_name.get(name).map(|&index| &self.routes[index])
    }

    /// Registered routes in insertion order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// The largest parameter count of any registered route.
    pub fn max_param_count(&self) -> usize {
        self.max_param_count
    }

    /// An empty stash large enough for any route of this router.
    pub fn stash<'p>(&self) -> Stash<'p> {
        Stash::with_capacity(self.max_param_count.max(self.config.stash_capacity))
    }

    /// Renders the routing tree for debugging.
    pub fn dump_tree(&self) -> String {
        self.tree.dump()
    }

    /// Logs the registered routes.
    pub fn log_routes(&self) {
        info!("[{}] registered routes:", self.config.name);
        for route in &self.routes {
            if route.name.is_empty() {
                info!("  {} {}", route.method, route.path);
            } else {
                info!("  {} {} ({})", route.method, route.path, route.name);
            }
        }
    }
}
