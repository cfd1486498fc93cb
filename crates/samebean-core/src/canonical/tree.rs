//! Canonical Tree: arena-backed, order-normalized representation of a value.

use std::fmt;

use super::json;
use crate::model::Scalar;

/// Index of a node within its [`CanonicalTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonId(pub(crate) usize);

impl CanonId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One mapping entry. `label` is the key's deterministic rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub label: String,
    pub key: CanonId,
    pub value: CanonId,
}

/// A canonical node.
///
/// Nodes reference their children by [`CanonId`], so neither comparison nor
/// drop recurses through the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonNode {
    Null,
    Scalar(Scalar),
    /// Output of a type adapter, compared as a whole
    Opaque(serde_json::Value),
    /// Back-reference to an ancestor; carries no address
    Cycle,
    /// Fields sorted by name
    Composite {
        type_name: String,
        fields: Vec<(String, CanonId)>,
    },
    /// Items in original order
    Sequence { items: Vec<CanonId> },
    /// Entries sorted by label, ties broken by rendered value
    Mapping { entries: Vec<Entry> },
}

impl CanonNode {
    /// Short shape name used in kind-mismatch reports.
    pub fn kind_name(&self) -> &'static str {
        match self {
            CanonNode::Null => "null",
            CanonNode::Scalar(_) => "scalar",
            CanonNode::Opaque(_) => "custom",
            CanonNode::Cycle => "circular reference",
            CanonNode::Composite { .. } => "object",
            CanonNode::Sequence { .. } => "sequence",
            CanonNode::Mapping { .. } => "mapping",
        }
    }
}

/// Immutable canonical form of one value.
#[derive(Debug, Clone)]
pub struct CanonicalTree {
    nodes: Vec<CanonNode>,
    root: CanonId,
}

impl CanonicalTree {
    pub(crate) fn from_parts(nodes: Vec<CanonNode>, root: CanonId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> CanonId {
        self.root
    }

    pub fn node(&self, id: CanonId) -> &CanonNode {
        &self.nodes[id.0]
    }

    pub fn root_node(&self) -> &CanonNode {
        self.node(self.root)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Render the subtree at `id` as JSON.
    pub fn to_json(&self, id: CanonId) -> serde_json::Value {
        json::render(&self.nodes, id)
    }

    /// Render the whole tree as JSON.
    pub fn to_json_root(&self) -> serde_json::Value {
        self.to_json(self.root)
    }

    /// Pretty JSON prefixed with the root's type name when the root is a
    /// composite, e.g. `One {..}`. Used for assertion messages, where two
    /// trees of different types would otherwise render identically.
    pub fn render_labelled(&self) -> String {
        match self.root_node() {
            CanonNode::Composite { type_name, .. } => format!("{} {}", type_name, self),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for CanonicalTree {
    /// Pretty-printed JSON of the whole tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.to_json_root())
    }
}
