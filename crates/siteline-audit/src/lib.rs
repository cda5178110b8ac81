//! # Siteline Audit - Immutable Action Trail
//!
//! **Purpose**: Record every privileged view/mutate/approve/reject/
//! upload event as an immutable entry, with bounded in-memory retention
//! and a smaller durable window, plus filtered retrieval and export.
//!
//! Entries are append-only: once logged they are never mutated or
//! reordered, and the only erase path is [`AuditLog::clear`]. The
//! in-memory log keeps the most recent 1000 entries and the durable
//! window keeps 100; callers that need deeper history must drain to an
//! external sink.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Entry types: actions, resources, tagged details
pub mod entry;

/// The bounded audit log
pub mod log;

pub use entry::{Actor, AuditAction, AuditDetails, AuditDraft, AuditEntry, ResourceKind};
pub use log::{AuditLog, AuditQuery, ExportFormat};
