//! Graph Traverser.
//!
//! Walks one value with an explicit work stack, so graph depth never turns
//! into native call depth. Each object node is handled in this order:
//!
//! 1. a registered type adapter short-circuits the node (opaque leaf);
//! 2. a node already on the active path is a back-edge (cycle marker);
//! 3. a node matched by a skip predicate is walked without being tracked;
//! 4. anything else is pushed on the path, walked, then popped.
//!
//! Identity is only ever checked against ancestors of the same walk.

use super::path::{Step, TraversalPath};
use crate::config::Configuration;
use crate::model::{Body, Obj, Scalar, Value};

/// Receiver of a depth-first walk.
///
/// Calls are properly nested: every `begin_*` is matched by one `end`. Inside a
/// composite, each child is preceded by `field`. Inside a mapping, children
/// alternate key, value.
pub trait Visitor {
    fn null(&mut self);
    fn scalar(&mut self, scalar: &Scalar);
    /// Output of a type adapter.
    fn opaque(&mut self, json: serde_json::Value);
    /// Back-reference to an ancestor of the current node.
    fn cycle(&mut self);
    fn begin_composite(&mut self, type_name: &str, len: usize);
    fn begin_sequence(&mut self, type_name: &str, len: usize);
    fn begin_mapping(&mut self, type_name: &str, len: usize);
    fn field(&mut self, name: &str);
    fn end(&mut self);
}

/// Counters for one walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Values visited, scalars and nulls included
    pub nodes: usize,
    /// Cycle markers emitted
    pub cycles: usize,
    /// Objects handed to a type adapter
    pub adapted: usize,
    /// Objects walked without cycle tracking
    pub untracked: usize,
    /// Deepest active path
    pub max_depth: usize,
}

enum Work {
    Visit { value: Value, step: Step },
    Leave { tracked: bool },
}

/// Walks values under one configuration.
pub struct Traverser<'c> {
    config: &'c Configuration,
}

impl<'c> Traverser<'c> {
    pub fn new(config: &'c Configuration) -> Self {
        Self { config }
    }

    /// Walk `root`, reporting its structure to `visitor`.
    pub fn walk<V: Visitor>(&self, root: &Value, visitor: &mut V) -> TraversalStats {
        let mut stats = TraversalStats::default();
        let mut path = TraversalPath::new();
        let mut stack = vec![Work::Visit {
            value: root.clone(),
            step: Step::Root,
        }];

        while let Some(work) = stack.pop() {
            match work {
                Work::Visit { value, step } => {
                    stats.nodes += 1;
                    if let Step::Field(name) = &step {
                        visitor.field(name);
                    }
                    match value {
                        Value::Null => visitor.null(),
                        Value::Scalar(scalar) => visitor.scalar(&scalar),
                        Value::Object(obj) => {
                            self.enter(obj, step, &mut path, &mut stack, &mut stats, visitor)
                        }
                    }
                }
                Work::Leave { tracked } => {
                    visitor.end();
                    if tracked {
                        path.pop();
                    }
                }
            }
        }

        stats
    }

    fn enter<V: Visitor>(
        &self,
        obj: Obj,
        step: Step,
        path: &mut TraversalPath,
        stack: &mut Vec<Work>,
        stats: &mut TraversalStats,
        visitor: &mut V,
    ) {
        let value = Value::Object(obj.clone());

        if let Some(adapter) = self.config.registry().resolve(&obj) {
            stats.adapted += 1;
            visitor.opaque(adapter.serialize(&value));
            return;
        }

        if path.contains(obj.identity()) {
            stats.cycles += 1;
            tracing::trace!(
                path = %path.render(),
                step = %step,
                "circular reference replaced by marker"
            );
            visitor.cycle();
            return;
        }

        let tracked = !self.config.skips().matches(&value);
        if tracked {
            path.push(obj.clone(), step);
            stats.max_depth = stats.max_depth.max(path.depth());
        } else {
            stats.untracked += 1;
        }

        let type_name = obj.type_name();
        match obj.snapshot() {
            Body::Composite(fields) => {
                visitor.begin_composite(&type_name, fields.len());
                stack.push(Work::Leave { tracked });
                for (name, child) in fields.into_iter().rev() {
                    stack.push(Work::Visit {
                        value: child,
                        step: Step::Field(name),
                    });
                }
            }
            Body::Sequence(items) => {
                visitor.begin_sequence(&type_name, items.len());
                stack.push(Work::Leave { tracked });
                for (i, child) in items.into_iter().enumerate().rev() {
                    stack.push(Work::Visit {
                        value: child,
                        step: Step::Index(i),
                    });
                }
            }
            Body::Mapping(entries) => {
                visitor.begin_mapping(&type_name, entries.len());
                stack.push(Work::Leave { tracked });
                for (i, (key, child)) in entries.into_iter().enumerate().rev() {
                    stack.push(Work::Visit {
                        value: child,
                        step: Step::EntryValue(i),
                    });
                    stack.push(Work::Visit {
                        value: key,
                        step: Step::EntryKey(i),
                    });
                }
            }
        }
    }
}
