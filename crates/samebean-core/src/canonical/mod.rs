//! Canonical Encoder and Canonical Tree.
//!
//! A canonical tree is deterministic for a given graph and configuration:
//! field and key order are normalized, cycles are collapsed into identity-free
//! markers, and adapter output is stored as opaque JSON.

pub mod encoder;
pub mod json;
pub mod tree;

pub use encoder::{encode, encode_with_stats, Encoder};
pub use json::{CYCLE_MARKER, RENDER_DEPTH_LIMIT, TRUNCATED_MARKER};
pub use tree::{CanonId, CanonNode, CanonicalTree, Entry};
