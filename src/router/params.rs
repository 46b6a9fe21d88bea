//! Captured path parameters.
//!
//! Matching writes values positionally into a [`Stash`]. Names are attached only
//! when the caller asks for them, either as a borrowed [`Params`] view or as
//! owned [`PathParams`].

use serde::Serialize;

/// Reusable positional buffer of parameter values for one match call.
///
/// A stash must not be shared between concurrent matches. Get one sized for a
/// router from [`Router::stash`](crate::router::Router::stash).
#[derive(Debug, Default)]
pub struct Stash<'p> {
    values: Vec<&'p str>,
}

impl<'p> Stash<'p> {
    /// Creates an empty stash able to hold `capacity` values without reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
        }
    }

    /// Captured values in path order.
    pub fn values(&self) -> &[&'p str] {
        &self.values
    }

    /// Number of captured values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Allocated capacity.
    pub fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub(crate) fn push(&mut self, value: &'p str) {
        self.values.push(value);
    }

    pub(crate) fn clear(&mut self) {
        self.values.clear();
    }

    /// Empties the stash so it can capture from a path with a different lifetime.
    ///
    /// Reuses the allocation when possible.
    pub fn recycle<'q>(self) -> Stash<'q> {
        let mut values = self.values;
        values.clear();
        // The vector is empty, so the map never runs; collecting back into a
        // `Vec` of the same layout reuses the buffer in place.
        Stash {
            values: values.into_iter().map(|_| "").collect(),
        }
    }

    /// Pairs the captured values with `names`.
    pub fn params<'s>(&'s self, names: &'s [String]) -> Params<'s> {
        Params {
            names,
            values: &self.values,
        }
    }
}

/// Borrowed named view over a stash.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    names: &'a [String],
    values: &'a [&'a str],
}

impl<'a> Params<'a> {
    /// Returns the value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&'a str> {
        self.names
            .iter()
            .position(|n| n == name)
            .and_then(|i| self.values.get(i).copied())
    }

    /// Iterates `(name, value)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let (names, values) = (self.names, self.values);
        names
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
    }

    /// Number of named values.
    pub fn len(&self) -> usize {
        self.names.len().min(self.values.len())
    }

    /// True when no parameter was captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the pairs into an owned map.
    pub fn to_owned_params(&self) -> PathParams {
        PathParams(
            self.iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        )
    }
}

/// Owned path parameters in path order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Returns the value captured for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates `(name, value)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_pair_names_with_values() {
        let names = vec!["user".to_string(), "repo".to_string()];
        let mut stash = Stash::with_capacity(2);
        stash.push("alice");
        stash.push("microrouter");

        let params = stash.params(&names);
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("repo"), Some("microrouter"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(
            params.iter().collect::<Vec<_>>(),
            vec![("user", "alice"), ("repo", "microrouter")]
        );
    }

    #[test]
    fn test_owned_params() {
        let names = vec!["id".to_string()];
        let mut stash = Stash::default();
        stash.push("42");

        let owned = stash.params(&names).to_owned_params();
        assert_eq!(owned.get("id"), Some("42"));
        assert_eq!(serde_json::to_string(&owned).unwrap(), r#"[["id","42"]]"#);
    }

    #[test]
    fn test_recycle_empties_stash() {
        let path = String::from("/a/b");
        let mut stash = Stash::with_capacity(8);
        stash.push(&path[1..2]);
        assert_eq!(stash.values(), &["a"]);

        let mut recycled: Stash<'static> = stash.recycle();
        assert!(recycled.is_empty());
        recycled.push("b");
        assert_eq!(recycled.len(), 1);
    }
}
