//! Router configuration.

use serde::Deserialize;

use crate::router::error::Error;

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// The router name, used in log output.
    pub name: String,
    /// The minimum capacity of stashes handed out by the router.
    pub stash_capacity: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            name: "router".to_string(),
            stash_capacity: 4,
        }
    }
}

impl RouterConfig {
    /// Loads a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }
}
