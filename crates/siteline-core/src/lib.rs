//! # Siteline Core - Foundation Crate
//!
//! **Purpose**: Shared domain types for the Siteline access and audit layer.
//!
//! This crate defines the typed identifiers, timestamps, and record types
//! that the store, access, audit, and metrics crates build on, plus the
//! `Durable` persistence port.
//!
//! ## What's NOT in this crate
//!
//! - Collection management and ID generation (`siteline-store`)
//! - Visibility and capability decisions (`siteline-access`)
//! - Audit trail mechanics (`siteline-audit`)
//! - Derived metrics (`siteline-metrics`)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Typed string identifiers for every record family
pub mod identifiers;

/// Timestamps and epoch helpers
pub mod time;

/// Domain record types and their status enums
pub mod records;

/// The durable key/value persistence port
pub mod durable;

pub use durable::{Durable, WriteError};
pub use identifiers::{
    AssetId, AttendanceId, ChecklistId, CostEntryId, DocumentId, ProductivityId, UserId,
    VariationId, WorkOrderId,
};
pub use records::{
    Asset, AssetStatus, AttendanceMark, AttendanceRecord, AttendanceStatus, CostEntry, Delta,
    DeltaInput, Document, NewAsset, NewCostEntry, NewDocument, NewVariation, NewWorkOrder,
    Priority, ProductivityMark, ProductivityRecord, Variation, VariationStatus, WorkOrder,
    WorkOrderPatch, WorkOrderStatus,
};
pub use time::Timestamp;
