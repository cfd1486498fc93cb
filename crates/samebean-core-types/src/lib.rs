//! Core types shared across samebean facilities
//!
//! This crate provides foundational constants used by both the error
//! handling and logging facilities:
//!
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
