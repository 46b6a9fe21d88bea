//! Per-node method table and `Allow` header derivation.

use crate::router::method::Method;

/// A handler registered for one method at one tree node.
#[derive(Debug, Clone)]
pub struct MethodEntry<H> {
    handler: H,
    pristine_path: String,
    param_names: Vec<String>,
}

impl<H> MethodEntry<H> {
    pub(crate) fn new(handler: H, pristine_path: String, param_names: Vec<String>) -> Self {
        Self {
            handler,
            pristine_path,
            param_names,
        }
    }

    /// The registered handler.
    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// The normalized pattern the entry was registered with.
    pub fn pristine_path(&self) -> &str {
        &self.pristine_path
    }

    /// Parameter names in the order they occur along the pattern.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }
}

/// Maps method tokens to entries for a single node.
///
/// Entries are kept in insertion order. The `Allow` header is rebuilt on every
/// mutation by walking [`Method::canonical`], so slot order never matters.
#[derive(Debug, Clone)]
pub struct MethodTable<H> {
    entries: Vec<(Method, MethodEntry<H>)>,
    allow: String,
}

impl<H> Default for MethodTable<H> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            allow: String::new(),
        }
    }
}

impl<H> MethodTable<H> {
    /// Returns the entry registered for `method`.
    pub fn get(&self, method: &Method) -> Option<&MethodEntry<H>> {
        self.entries
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, entry)| entry)
    }

    /// Sets the entry for `method`, returning the entry it replaced.
    pub fn insert(&mut self, method: Method, entry: MethodEntry<H>) -> Option<MethodEntry<H>> {
        let previous = match self.entries.iter_mut().find(|(m, _)| *m == method) {
            Some(slot) => Some(std::mem::replace(&mut slot.1, entry)),
            None => {
                self.entries.push((method, entry));
                None
            }
        };
        self.update_allow_header();
        previous
    }

    /// True when any method has a handler at this node.
    pub fn is_handler(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Registered methods in insertion order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        self.entries.iter().map(|(m, _)| m)
    }

    /// The `Allow` header value for a 405 response from this node.
    pub fn allow_header(&self) -> &str {
        &self.allow
    }

    fn update_allow_header(&mut self) {
        let mut allow = String::from(Method::OPTIONS.as_str());
        let standard = Method::canonical()
            .iter()
            .filter(|m| self.get(m).is_some());
        let other = self.methods().filter(|m| m.is_other());
        for method in standard.chain(other) {
            allow.push_str(", ");
            allow.push_str(method.as_str());
        }
        self.allow = allow;
    }
}
