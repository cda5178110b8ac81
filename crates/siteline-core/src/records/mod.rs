//! Domain record types
//!
//! Records are created through the Record Store's factory operations,
//! never default-constructed; the `New*` input types carry the
//! caller-supplied fields and the store fills in IDs and timestamps.

mod asset;
mod cost;
mod document;
mod variation;
mod work_order;
mod workforce;

pub use asset::{Asset, AssetStatus, NewAsset};
pub use cost::{CostEntry, NewCostEntry};
pub use document::{Document, NewDocument};
pub use variation::{Delta, DeltaInput, NewVariation, Variation, VariationStatus};
pub use work_order::{NewWorkOrder, Priority, WorkOrder, WorkOrderPatch, WorkOrderStatus};
pub use workforce::{
    AttendanceMark, AttendanceRecord, AttendanceStatus, ProductivityMark, ProductivityRecord,
};
