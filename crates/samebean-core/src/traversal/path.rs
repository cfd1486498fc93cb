//! Traversal Path: the active ancestor chain of one walk.

use std::collections::HashSet;
use std::fmt;

use crate::model::{Identity, Obj};

/// How a node was reached from its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Root,
    Field(String),
    Index(usize),
    /// Key of the n-th mapping entry (insertion order)
    EntryKey(usize),
    /// Value of the n-th mapping entry (insertion order)
    EntryValue(usize),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Root => f.write_str("$"),
            Step::Field(name) => write!(f, ".{}", name),
            Step::Index(i) => write!(f, "[{}]", i),
            Step::EntryKey(i) => write!(f, "<key {}>", i),
            Step::EntryValue(i) => write!(f, "<value {}>", i),
        }
    }
}

struct Frame {
    // Held so the identity stays valid while the frame is active.
    node: Obj,
    step: Step,
}

/// Stack of in-progress ancestors, keyed by identity.
///
/// Invariant: an identity appears at most once among the active frames.
#[derive(Default)]
pub struct TraversalPath {
    frames: Vec<Frame>,
    active: HashSet<Identity>,
}

impl TraversalPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identity: Identity) -> bool {
        self.active.contains(&identity)
    }

    /// Push an ancestor. Returns `false` without pushing if the node is
    /// already on the path.
    pub fn push(&mut self, node: Obj, step: Step) -> bool {
        if !self.active.insert(node.identity()) {
            return false;
        }
        self.frames.push(Frame { node, step });
        true
    }

    /// Pop the innermost ancestor.
    pub fn pop(&mut self) -> Option<Obj> {
        let frame = self.frames.pop()?;
        self.active.remove(&frame.node.identity());
        Some(frame.node)
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Steps of the tracked ancestors, e.g. `$.parent.children[0]`.
    ///
    /// Skipped nodes are not on the path and do not appear.
    pub fn render(&self) -> String {
        self.frames.iter().map(|f| f.step.to_string()).collect()
    }
}

impl fmt::Debug for TraversalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraversalPath")
            .field("path", &self.render())
            .finish()
    }
}
