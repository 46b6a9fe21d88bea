//! Registered route records.

use serde::{Deserialize, Serialize};

use crate::router::method::Method;

/// A route as registered with the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// The HTTP method to match.
    pub method: Method,
    /// The normalized path pattern.
    pub path: String,
    /// The name used for reverse routing. Empty when the route is unnamed.
    pub name: String,
}

impl Route {
    /// Builds the URL for this route, substituting `values` for its parameters in order.
    ///
    /// A wildcard segment ends the URL. A parameter without a value is left out.
    pub fn reverse<I>(&self, values: I) -> String
    where
        I: IntoIterator,
        I::Item: std::fmt::Display,
    {
        let mut values = values.into_iter();
        let mut segments = Vec::new();

        let path = self.path.strip_prefix('/').unwrap_or(&self.path);
        for segment in path.split('/') {
            if segment.starts_with('*') {
                break;
            }
            if segment.starts_with(':') {
                if let Some(value) = values.next() {
                    segments.push(value.to_string());
                }
                continue;
            }
            segments.push(segment.to_string());
        }

        format!("/{}", segments.join("/"))
    }
}
