//! Domain logic for the Rackledger server inventory.
//!
//! This crate has zero external side effects (no DB, no async, no I/O).
//! It provides:
//!
//! - The canonical [`record::ServerRecord`] shape, option sets, and defaults
//! - Total normalization functions for cell values ([`normalize`])
//! - Spreadsheet header aliasing ([`headers`])
//! - Cross-field row validation ([`validate`])
//! - Raw-row to canonical-record mapping ([`mapper`])
//! - The batch reconciliation engine ([`reconcile`])

pub mod error;
pub mod headers;
pub mod mapper;
pub mod normalize;
pub mod record;
pub mod reconcile;
pub mod validate;
