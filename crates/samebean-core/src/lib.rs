//! SameBean Core - cycle-safe structural equality for object graphs
//!
//! This crate compares two arbitrary value graphs for deep structural
//! equivalence and reports every point of disagreement, including:
//! - A dynamic value model with shared, possibly cyclic references
//! - Path-based cycle detection that still compares shared (diamond) nodes
//! - Per-type adapters and skip predicates resolved at traversal time
//! - An order-normalized canonical tree and its JSON rendering
//! - A structured diff with paths and JSON fragments for both sides
//!
//! Traversal, encoding and comparison are infallible and use explicit work
//! stacks, so no input graph can exhaust the call stack.

pub mod canonical;
pub mod config;
pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod matcher;
pub mod model;
pub mod traversal;

pub use samebean_core_types as core_types;

// Re-export commonly used types
pub use config::{Configuration, ConfigurationBuilder};
pub use diff::{DiffResult, Divergence, DivergenceKind};
pub use errors::{ComparisonFailure, ExError, ExErrorKind, Result, SameBeanError};
pub use matcher::{assert_that, compare_for_test, same_bean_as, SameBeanMatcher};
pub use model::{Obj, Scalar, ToValue, Value};
