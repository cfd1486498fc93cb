//! Cycle-safe graph traversal.

pub mod path;
pub mod walker;

pub use path::{Step, TraversalPath};
pub use walker::{TraversalStats, Traverser, Visitor};
