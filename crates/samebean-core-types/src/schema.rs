//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Traversal counters
pub const FIELD_NODES: &str = "nodes";
pub const FIELD_CYCLES: &str = "cycles";
pub const FIELD_ADAPTED: &str = "adapted";
pub const FIELD_UNTRACKED: &str = "untracked";
pub const FIELD_MAX_DEPTH: &str = "max_depth";

// Comparison outcome
pub const FIELD_EQUAL: &str = "equal";
pub const FIELD_DIVERGENCES: &str = "divergences";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
