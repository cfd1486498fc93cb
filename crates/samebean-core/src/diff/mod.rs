//! Comparator / Diff Builder.
//!
//! Compares two canonical trees and produces a structured, deterministic
//! diff suitable for assertion messages.
//!
//! ## Entry point
//!
//! ```
//! use samebean_core::canonical::encode;
//! use samebean_core::config::Configuration;
//! use samebean_core::diff::{compare, render_human_summary};
//! use samebean_core::model::Value;
//!
//! let config = Configuration::default();
//! let result = compare(
//!     &encode(&Value::from(1), &config),
//!     &encode(&Value::from(2), &config),
//!     config.max_divergences(),
//! );
//! assert!(render_human_summary(&result).contains("values differ"));
//! ```
//!
//! ## Guarantees
//!
//! - **Termination**: canonical trees are finite, and comparison uses an
//!   explicit stack.
//! - **Cycle shape, not identity**: any two cycle markers are equal.
//! - **No identity leakage**: fragments are rendered from canonical nodes,
//!   which hold no addresses.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::compare;
pub use human_summary::{render_divergence, render_human_summary};
pub use model::{DiffPath, DiffResult, Divergence, DivergenceKind, PathSegment};
