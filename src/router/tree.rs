//! Compressed radix tree: insertion and matching.
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Static text is
//! prefix-compressed and split on demand; parameters and wildcards are single
//! character nodes (`:` and `*`) hanging off the node that precedes them.

use std::fmt::Write as _;

use log::trace;

use crate::router::error::Error;
use crate::router::method::Method;
use crate::router::method_table::MethodEntry;
use crate::router::node::{Node, NodeId, NodeKind};
use crate::router::params::Stash;
use crate::router::pattern::{Pattern, Piece};

const ROOT: NodeId = NodeId(0);

/// Outcome of matching a request against the tree.
#[derive(Debug)]
pub enum RouteMatch<'r, H> {
    /// A handler is registered for the method; parameter values are in the stash.
    Matched(&'r MethodEntry<H>),
    /// The path exists but not for this method.
    MethodNotAllowed {
        /// Value for the `Allow` response header.
        allow: &'r str,
    },
    /// No route consumes the path.
    NotFound {
        /// The nearest subtree fallback on the descent path, if any.
        fallback: Option<&'r H>,
    },
}

/// The routing tree.
#[derive(Debug)]
pub(crate) struct RadixTree<H> {
    nodes: Vec<Node<H>>,
}

impl<H> Default for RadixTree<H> {
    fn default() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }
}

/// Byte length of the longest common prefix, always ending on a char boundary.
fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .map(|(c, _)| c.len_utf8())
        .sum()
}

fn first_char(text: &str) -> char {
    text.chars().next().unwrap_or_default()
}

impl<H> RadixTree<H> {
    /// Creates an empty tree.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Number of nodes, root included.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when nothing has been inserted.
    pub(crate) fn is_empty(&self) -> bool {
        self.nodes[ROOT.0].prefix.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn node(&self, id: NodeId) -> &Node<H> {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<H> {
        &mut self.nodes[id.0]
    }

    /// Attaches `entry` for `method` at the end of `pattern`.
    ///
    /// Returns the entry previously registered for the same method and pattern.
    pub(crate) fn insert_route(
        &mut self,
        pattern: &Pattern,
        method: Method,
        entry: MethodEntry<H>,
    ) -> Result<Option<MethodEntry<H>>, Error> {
        let id = self.insert(pattern)?;
        let node = self.node_mut(id);
        node.original_path.clone_from(&pattern.path);
        Ok(node.methods.insert(method, entry))
    }

    /// Builds the nodes for `pattern` and returns the node its last piece ends on.
    pub(crate) fn insert(&mut self, pattern: &Pattern) -> Result<NodeId, Error> {
        let mut current: Option<NodeId> = None;
        for piece in &pattern.pieces {
            let next = match (piece, current) {
                (Piece::Static(text), None) => self.insert_static(ROOT, text),
                (Piece::Static(text), Some(parent)) => {
                    match self.static_child(parent, first_char(text)) {
                        Some(child) => self.insert_static(child, text),
                        None => self.add_child(parent, NodeKind::Static, text),
                    }
                }
                (Piece::Param, Some(parent)) => self.dynamic_child(parent, NodeKind::Param, pattern)?,
                (Piece::Wildcard, Some(parent)) => {
                    self.dynamic_child(parent, NodeKind::Wildcard, pattern)?
                }
                // Patterns always start with a static `/` piece.
                (_, None) => unreachable!("pattern does not start with a static piece"),
            };
            current = Some(next);
        }
        Ok(current.unwrap_or(ROOT))
    }

    /// LCP walk of static `search` starting at `current`, whose prefix is compared first.
    fn insert_static(&mut self, mut current: NodeId, mut search: &str) -> NodeId {
        loop {
            let prefix = &self.nodes[current.0].prefix;
            if prefix.is_empty() {
                // First insertion into an empty root.
                self.node_mut(current).set_prefix(search.to_string());
                return current;
            }

            let prefix_len = prefix.len();
            let lcp = common_prefix_len(prefix, search);
            if lcp < prefix_len {
                self.split(current, lcp);
            }
            if lcp == search.len() {
                return current;
            }

            search = &search[lcp..];
            match self.static_child(current, first_char(search)) {
                Some(child) => current = child,
                None => return self.add_child(current, NodeKind::Static, search),
            }
        }
    }

    /// Moves everything past `at` in the node's prefix into a new static child.
    fn split(&mut self, id: NodeId, at: usize) {
        let child_id = NodeId(self.nodes.len());
        let node = &mut self.nodes[id.0];

        let suffix = node.prefix.split_off(at);
        let mut child = Node::new(node.kind, suffix, Some(id));
        child.static_children = std::mem::take(&mut node.static_children);
        child.param_child = node.param_child.take();
        child.any_child = node.any_child.take();
        child.methods = std::mem::take(&mut node.methods);
        child.not_found = node.not_found.take();
        child.original_path = std::mem::take(&mut node.original_path);
        child.update_is_leaf();

        node.kind = NodeKind::Static;
        node.static_children.push(child_id);
        node.update_is_leaf();

        let grandchildren: Vec<NodeId> = child.children().collect();
        self.nodes.push(child);
        for grandchild in grandchildren {
            self.nodes[grandchild.0].parent = Some(child_id);
        }
        trace!(
            "split node at {:?}, moved {:?} into a child",
            self.full_path(id),
            self.nodes[child_id.0].prefix
        );
    }

    fn add_child(&mut self, parent: NodeId, kind: NodeKind, prefix: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind, prefix.to_string(), Some(parent)));

        let node = &mut self.nodes[parent.0];
        match kind {
            NodeKind::Static => node.static_children.push(id),
            NodeKind::Param => node.param_child = Some(id),
            NodeKind::Wildcard => node.any_child = Some(id),
        }
        node.update_is_leaf();
        id
    }

    fn dynamic_child(&mut self, parent: NodeId, kind: NodeKind, pattern: &Pattern) -> Result<NodeId, Error> {
        let node = &self.nodes[parent.0];
        let (existing, rival) = match kind {
            NodeKind::Param => (node.param_child, node.any_child),
            NodeKind::Wildcard => (node.any_child, node.param_child),
            NodeKind::Static => unreachable!("static pieces are inserted by prefix"),
        };
        if let Some(id) = existing {
            return Ok(id);
        }
        if rival.is_some() {
            return Err(Error::ConflictingWildcard(pattern.path.clone()));
        }
        let marker = kind.marker().unwrap_or_default();
        Ok(self.add_child(parent, kind, marker))
    }

    fn static_child(&self, parent: NodeId, label: char) -> Option<NodeId> {
        self.nodes[parent.0]
            .static_children
            .iter()
            .copied()
            .find(|child| self.nodes[child.0].label == label)
    }

    /// Picks the next hop for the unmatched `search`: static, then param, then wildcard.
    fn next_child(&self, node: &Node<H>, search: &str) -> Option<NodeId> {
        let label = first_char(search);
        let matching_static = node.static_children.iter().copied().find(|child| {
            let child = &self.nodes[child.0];
            child.label == label && search.starts_with(child.prefix.as_str())
        });
        matching_static
            .or(node.param_child.filter(|_| label != '/'))
            .or(node.any_child)
    }

    /// Resolves `path` for `method`, capturing parameter values into `stash`.
    pub(crate) fn find<'r, 'p>(&'r self, method: &Method, path: &'p str, stash: &mut Stash<'p>) -> RouteMatch<'r, H> {
        stash.clear();
        let mut fallback = None;
        if self.is_empty() {
            return RouteMatch::NotFound { fallback };
        }

        let mut id = ROOT;
        let mut search = path;
        let reached = loop {
            let node = &self.nodes[id.0];
            match node.kind {
                NodeKind::Static => match search.strip_prefix(node.prefix.as_str()) {
                    Some(rest) => search = rest,
                    None => break None,
                },
                NodeKind::Param => {
                    let end = search.find('/').unwrap_or(search.len());
                    stash.push(&search[..end]);
                    search = &search[end..];
                }
                NodeKind::Wildcard => {
                    stash.push(search);
                    search = "";
                }
            }
            if node.not_found.is_some() {
                fallback = node.not_found.as_ref();
            }

            if search.is_empty() {
                match node.any_child {
                    // An empty remainder still satisfies a trailing wildcard.
                    Some(any) if !node.is_handler() => id = any,
                    _ => break Some(node),
                }
                continue;
            }
            if node.is_leaf {
                break None;
            }
            match self.next_child(node, search) {
                Some(next) => id = next,
                None => break None,
            }
        };

        match reached {
            Some(node) => match node.methods.get(method) {
                Some(entry) => RouteMatch::Matched(entry),
                None if node.is_handler() => RouteMatch::MethodNotAllowed {
                    allow: node.methods.allow_header(),
                },
                None => RouteMatch::NotFound { fallback },
            },
            None => RouteMatch::NotFound { fallback },
        }
    }

    /// Rebuilds the structural path of a node by following parent links.
    pub(crate) fn full_path(&self, id: NodeId) -> String {
        let mut parts = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = &self.nodes[node_id.0];
            parts.push(node.prefix.as_str());
            current = node.parent;
        }
        parts.reverse();
        parts.concat()
    }

    /// Renders the tree, one node per line, children indented under their parent.
    pub(crate) fn dump(&self) -> String {
        let mut out = String::new();
        if !self.is_empty() {
            self.dump_node(ROOT, 0, &mut out);
        }
        out
    }

    fn dump_node(&self, id: NodeId, depth: usize, out: &mut String) {
        let node = &self.nodes[id.0];
        let _ = write!(out, "{:indent$}{} ({})", "", node.prefix, node.kind, indent = depth * 2);
        if node.is_handler() {
            let methods: Vec<&str> = node.methods.methods().map(Method::as_str).collect();
            let _ = write!(out, " [{}] {}", methods.join(", "), node.original_path);
        }
        if node.not_found.is_some() {
            out.push_str(" <not found>");
        }
        out.push('\n');
        for child in node.children() {
            self.dump_node(child, depth + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(patterns: &[&'static str]) -> RadixTree<&'static str> {
        let mut tree = RadixTree::new();
        for pattern in patterns {
            let parsed = Pattern::parse(pattern).unwrap();
            let entry = MethodEntry::new(*pattern, parsed.path.clone(), parsed.param_names.clone());
            tree.insert_route(&parsed, Method::GET, entry).unwrap();
        }
        tree
    }

    fn matched<'p>(tree: &RadixTree<&'static str>, path: &'p str) -> Option<(&'static str, Vec<&'p str>)> {
        let mut stash = Stash::default();
        match tree.find(&Method::GET, path, &mut stash) {
            RouteMatch::Matched(entry) => Some((*entry.handler(), stash.values().to_vec())),
            _ => None,
        }
    }

    fn assert_parent_links(tree: &RadixTree<&'static str>) {
        for (index, node) in tree.nodes.iter().enumerate() {
            for child in node.children() {
                assert_eq!(tree.node(child).parent, Some(NodeId(index)));
            }
            assert_eq!(node.is_leaf, node.children().next().is_none());
        }
    }

    #[test]
    fn test_first_insert_adopts_root() {
        let tree = tree_with(&["/users"]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.node(ROOT).prefix, "/users");
        assert_eq!(tree.node(ROOT).label, '/');
    }

    #[test]
    fn test_split_keeps_both_handlers() {
        let tree = tree_with(&["/teams", "/team"]);
        assert_eq!(tree.node(ROOT).prefix, "/team");
        assert_eq!(matched(&tree, "/team").unwrap().0, "/team");
        assert_eq!(matched(&tree, "/teams").unwrap().0, "/teams");
        assert_parent_links(&tree);
    }

    #[test]
    fn test_split_with_new_sibling() {
        let tree = tree_with(&["/search", "/support", "/"]);
        assert_eq!(tree.node(ROOT).prefix, "/");
        assert_eq!(matched(&tree, "/search").unwrap().0, "/search");
        assert_eq!(matched(&tree, "/support").unwrap().0, "/support");
        assert_eq!(matched(&tree, "/").unwrap().0, "/");
        assert!(matched(&tree, "/s").is_none());
        assert_parent_links(&tree);
    }

    #[test]
    fn test_split_reparents_dynamic_children() {
        let tree = tree_with(&["/users/:id", "/users/:id/files/*path", "/u"]);
        assert_parent_links(&tree);
        assert_eq!(matched(&tree, "/users/7"), Some(("/users/:id", vec!["7"])));
        assert_eq!(
            matched(&tree, "/users/7/files/a/b"),
            Some(("/users/:id/files/*path", vec!["7", "a/b"]))
        );
        assert_eq!(matched(&tree, "/u").unwrap().0, "/u");
    }

    #[test]
    fn test_param_does_not_capture_empty_segment() {
        let tree = tree_with(&["/users/:id"]);
        assert!(matched(&tree, "/users/").is_none());
        assert!(matched(&tree, "/users//x").is_none());
        assert!(matched(&tree, "/users/1/extra").is_none());
    }

    #[test]
    fn test_wildcard_matches_empty_remainder() {
        let tree = tree_with(&["/files/*rest"]);
        assert_eq!(matched(&tree, "/files/"), Some(("/files/*rest", vec![""])));
        assert!(matched(&tree, "/files").is_none());
    }

    #[test]
    fn test_static_beats_param_without_backtracking() {
        let tree = tree_with(&["/a/:id/x", "/a/static/y", "/a/static/z"]);
        assert_eq!(matched(&tree, "/a/static/y").unwrap().0, "/a/static/y");
        assert_eq!(matched(&tree, "/a/other/x"), Some(("/a/:id/x", vec!["other"])));
        // The static branch is taken and fails; the param branch is not retried.
        assert!(matched(&tree, "/a/static/x").is_none());
    }

    #[test]
    fn test_partial_static_label_falls_through_to_param() {
        let tree = tree_with(&["/a/:id", "/a/static"]);
        assert_eq!(matched(&tree, "/a/stuff"), Some(("/a/:id", vec!["stuff"])));
    }

    #[test]
    fn test_conflicting_wildcard_rejected() {
        let mut tree: RadixTree<&str> = RadixTree::new();
        tree.insert(&Pattern::parse("/a/:id").unwrap()).unwrap();
        let result = tree.insert(&Pattern::parse("/a/*rest").unwrap());
        assert_eq!(result, Err(Error::ConflictingWildcard("/a/*rest".to_string())));
    }

    #[test]
    fn test_different_param_names_share_node() {
        let tree = tree_with(&["/users/:id", "/users/:name/posts"]);
        assert!(tree.node(ROOT).param_child.is_some());
        assert_eq!(tree.len(), 3);
        assert_eq!(matched(&tree, "/users/bob/posts"), Some(("/users/:name/posts", vec!["bob"])));
    }

    #[test]
    fn test_split_on_multibyte_char_boundary() {
        let tree = tree_with(&["/café", "/cafè", "/caf"]);
        assert_parent_links(&tree);
        assert_eq!(tree.node(ROOT).prefix, "/caf");
        let labels: Vec<char> = tree
            .node(ROOT)
            .static_children
            .iter()
            .map(|child| tree.node(*child).label)
            .collect();
        assert_eq!(labels, vec!['é', 'è']);
        assert_eq!(matched(&tree, "/café").unwrap().0, "/café");
        assert_eq!(matched(&tree, "/cafè").unwrap().0, "/cafè");
        assert_eq!(matched(&tree, "/caf").unwrap().0, "/caf");
        assert!(matched(&tree, "/cafê").is_none());
    }

    #[test]
    fn test_dump_lists_nodes() {
        let tree = tree_with(&["/team", "/teams"]);
        let dump = tree.dump();
        assert!(dump.starts_with("/team (static) [GET] /team\n"));
        assert!(dump.contains("  s (static) [GET] /teams\n"));
    }
}
