//! Caller-owned comparison settings: type adapters and skip predicates.
//!
//! Built once with [`ConfigurationBuilder`], then passed explicitly into every
//! comparison. Nothing here is process-global.

pub mod configuration;
pub mod registry;
pub mod skip;

pub use configuration::{Configuration, ConfigurationBuilder, DEFAULT_MAX_DIVERGENCES};
pub use registry::{FnAdapter, TypeAdapter, TypeRegistry};
pub use skip::{SkipPredicate, SkipPredicates};
