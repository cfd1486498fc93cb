//! Skip-Predicate Set: exemptions from cycle tracking.
//!
//! A node matched by any predicate is still traversed, but it is never pushed
//! onto the traversal path, so a cycle running back through it is not caught
//! at that node. It must be caught at another ancestor, or be cut short by a
//! type adapter.
//!
//! # Contract
//!
//! This is a trust boundary. Skipping a node that sits on a cycle with no
//! other tracked ancestor and no adapter makes the walk unbounded; keeping
//! that from happening is the caller's responsibility.

use std::fmt;
use std::sync::Arc;

use crate::model::Value;

/// A caller-supplied classification function.
pub type SkipPredicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Ordered collection of skip predicates.
#[derive(Clone, Default)]
pub struct SkipPredicates {
    predicates: Vec<SkipPredicate>,
}

impl SkipPredicates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate.
    pub fn add<F>(&mut self, predicate: F)
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.predicates.push(Arc::new(predicate));
    }

    pub(crate) fn add_shared(&mut self, predicate: SkipPredicate) {
        self.predicates.push(predicate);
    }

    /// True when any predicate matches. Evaluated in insertion order,
    /// stopping at the first match.
    pub fn matches(&self, value: &Value) -> bool {
        self.predicates.iter().any(|p| p(value))
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl fmt::Debug for SkipPredicates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipPredicates")
            .field("len", &self.predicates.len())
            .finish()
    }
}
