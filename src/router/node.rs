//! Tree nodes stored in the radix tree arena.

use std::fmt;

use crate::router::method_table::MethodTable;

/// Index of a node in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// What a node matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    /// Literal prefix text.
    Static,
    /// One segment, captured as a parameter value.
    Param,
    /// The remainder of the path, captured as a parameter value.
    Wildcard,
}

impl NodeKind {
    /// The prefix of a dynamic node, which doubles as its label.
    pub(crate) fn marker(self) -> Option<&'static str> {
        match self {
            NodeKind::Static => None,
            NodeKind::Param => Some(":"),
            NodeKind::Wildcard => Some("*"),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Static => write!(f, "static"),
            NodeKind::Param => write!(f, "param"),
            NodeKind::Wildcard => write!(f, "wildcard"),
        }
    }
}

/// A vertex of the compressed tree.
#[derive(Debug)]
pub(crate) struct Node<H> {
    pub(crate) kind: NodeKind,
    pub(crate) prefix: String,
    pub(crate) label: char,
    /// Structural parent, rewritten during splits and read for diagnostics.
    pub(crate) parent: Option<NodeId>,
    pub(crate) static_children: Vec<NodeId>,
    pub(crate) param_child: Option<NodeId>,
    pub(crate) any_child: Option<NodeId>,
    pub(crate) methods: MethodTable<H>,
    pub(crate) not_found: Option<H>,
    pub(crate) original_path: String,
    pub(crate) is_leaf: bool,
}

impl<H> Node<H> {
    pub(crate) fn new(kind: NodeKind, prefix: String, parent: Option<NodeId>) -> Self {
        let label = prefix.chars().next().unwrap_or_default();
        Self {
            kind,
            prefix,
            label,
            parent,
            static_children: Vec::new(),
            param_child: None,
            any_child: None,
            methods: MethodTable::default(),
            not_found: None,
            original_path: String::new(),
            is_leaf: true,
        }
    }

    /// An empty root, adopted by the first insertion.
    pub(crate) fn root() -> Self {
        Self::new(NodeKind::Static, String::new(), None)
    }

    pub(crate) fn set_prefix(&mut self, prefix: String) {
        self.label = prefix.chars().next().unwrap_or_default();
        self.prefix = prefix;
    }

    /// True when any method has a handler here.
    pub(crate) fn is_handler(&self) -> bool {
        self.methods.is_handler()
    }

    pub(crate) fn update_is_leaf(&mut self) {
        self.is_leaf =
            self.static_children.is_empty() && self.param_child.is_none() && self.any_child.is_none();
    }

    /// Iterates every child handle, static children first.
    pub(crate) fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.static_children
            .iter()
            .copied()
            .chain(self.param_child)
            .chain(self.any_child)
    }
}
