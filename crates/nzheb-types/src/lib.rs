//! Shared type definitions for the NZ Health Event Bus live feed.
//!
//! # Modules
//!
//! - [`ids`] -- UUID wrapper for event identifiers
//! - [`enums`] -- Severity, benefit category, audit action and status
//! - [`structs`] -- Event templates, event instances, audit records

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{AuditAction, AuditStatus, Benefit, Severity};
pub use ids::EventId;
pub use structs::{AuditRecord, EventInstance, EventTemplate};
