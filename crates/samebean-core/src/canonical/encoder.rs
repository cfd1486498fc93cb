//! Canonical Encoder: builds a [`CanonicalTree`] from a walk.
//!
//! Ordering rules:
//! - composite fields sort by name (byte order);
//! - mapping entries sort by key label, ties by the typed key and then the
//!   typed value (type tags and type names included);
//! - sequences keep their order.

use super::json::{key_label, signature};
use super::tree::{CanonId, CanonNode, CanonicalTree, Entry};
use crate::config::Configuration;
use crate::model::{Scalar, Value};
use crate::traversal::{TraversalStats, Traverser, Visitor};

enum Frame {
    Composite {
        type_name: String,
        fields: Vec<(String, CanonId)>,
        pending_field: Option<String>,
    },
    Sequence {
        items: Vec<CanonId>,
    },
    Mapping {
        entries: Vec<(CanonId, CanonId)>,
        pending_key: Option<CanonId>,
    },
}

/// [`Visitor`] that assembles canonical nodes bottom-up.
#[derive(Default)]
pub struct Encoder {
    nodes: Vec<CanonNode>,
    frames: Vec<Frame>,
    root: Option<CanonId>,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish encoding. An encoder that saw no value yields a null tree.
    pub fn finish(mut self) -> CanonicalTree {
        let root = match self.root {
            Some(root) => root,
            None => self.alloc(CanonNode::Null),
        };
        CanonicalTree::from_parts(self.nodes, root)
    }

    fn alloc(&mut self, node: CanonNode) -> CanonId {
        let id = CanonId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn emit(&mut self, node: CanonNode) {
        let id = self.alloc(node);
        self.attach(id);
    }

    fn attach(&mut self, id: CanonId) {
        match self.frames.last_mut() {
            None => self.root = Some(id),
            Some(Frame::Composite {
                fields,
                pending_field,
                ..
            }) => fields.push((pending_field.take().unwrap_or_default(), id)),
            Some(Frame::Sequence { items }) => items.push(id),
            Some(Frame::Mapping {
                entries,
                pending_key,
            }) => match pending_key.take() {
                None => *pending_key = Some(id),
                Some(key) => entries.push((key, id)),
            },
        }
    }

    fn sort_entries(&self, raw: Vec<(CanonId, CanonId)>) -> Vec<Entry> {
        let mut entries: Vec<Entry> = raw
            .into_iter()
            .map(|(key, value)| Entry {
                label: key_label(&self.nodes, key),
                key,
                value,
            })
            .collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));

        // Distinct keys can share a label ("1" and 1, One{} and Two{}).
        // Within a run of equal labels order by the typed key, then the typed
        // value, so insertion order never leaks.
        let mut start = 0;
        while start < entries.len() {
            let mut end = start + 1;
            while end < entries.len() && entries[end].label == entries[start].label {
                end += 1;
            }
            if end - start > 1 {
                entries[start..end].sort_by_cached_key(|e| {
                    (
                        signature(&self.nodes, e.key),
                        signature(&self.nodes, e.value),
                    )
                });
            }
            start = end;
        }
        entries
    }
}

impl Visitor for Encoder {
    fn null(&mut self) {
        self.emit(CanonNode::Null);
    }

    fn scalar(&mut self, scalar: &Scalar) {
        self.emit(CanonNode::Scalar(scalar.clone()));
    }

    fn opaque(&mut self, json: serde_json::Value) {
        self.emit(CanonNode::Opaque(json));
    }

    fn cycle(&mut self) {
        self.emit(CanonNode::Cycle);
    }

    fn begin_composite(&mut self, type_name: &str, len: usize) {
        self.frames.push(Frame::Composite {
            type_name: type_name.to_string(),
            fields: Vec::with_capacity(len),
            pending_field: None,
        });
    }

    fn begin_sequence(&mut self, _type_name: &str, len: usize) {
        self.frames.push(Frame::Sequence {
            items: Vec::with_capacity(len),
        });
    }

    fn begin_mapping(&mut self, _type_name: &str, len: usize) {
        self.frames.push(Frame::Mapping {
            entries: Vec::with_capacity(len),
            pending_key: None,
        });
    }

    fn field(&mut self, name: &str) {
        if let Some(Frame::Composite { pending_field, .. }) = self.frames.last_mut() {
            *pending_field = Some(name.to_string());
        }
    }

    fn end(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        let node = match frame {
            Frame::Composite {
                type_name,
                mut fields,
                ..
            } => {
                fields.sort_by(|a, b| a.0.cmp(&b.0));
                CanonNode::Composite { type_name, fields }
            }
            Frame::Sequence { items } => CanonNode::Sequence { items },
            Frame::Mapping { entries, .. } => CanonNode::Mapping {
                entries: self.sort_entries(entries),
            },
        };
        self.emit(node);
    }
}

/// Canonicalize `value` under `config`.
pub fn encode(value: &Value, config: &Configuration) -> CanonicalTree {
    encode_with_stats(value, config).0
}

/// Canonicalize `value`, also returning the walk's counters.
pub fn encode_with_stats(value: &Value, config: &Configuration) -> (CanonicalTree, TraversalStats) {
    let mut encoder = Encoder::new();
    let stats = Traverser::new(config).walk(value, &mut encoder);
    tracing::debug!(
        nodes = stats.nodes,
        cycles = stats.cycles,
        adapted = stats.adapted,
        untracked = stats.untracked,
        max_depth = stats.max_depth,
        "encoded canonical tree"
    );
    (encoder.finish(), stats)
}
