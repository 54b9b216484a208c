//! HTTP handlers.

pub mod import;
pub mod servers;
