//! Contract variations against work orders

use crate::identifiers::{UserId, VariationId, WorkOrderId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Approval status of a variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariationStatus {
    /// Awaiting an approval decision.
    Pending,
    /// Approved; deltas take effect.
    Approved,
    /// Rejected.
    Rejected,
}

/// An original/delta/total triple for cost or duration.
///
/// `total` is always `original + delta`; it is computed at construction
/// and never patched independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delta {
    /// Value before the variation.
    pub original: f64,
    /// Signed change requested by the variation.
    pub delta: f64,
    /// Value after the variation (`original + delta`).
    pub total: f64,
}

impl Delta {
    /// Build a triple, deriving the total.
    pub fn new(original: f64, delta: f64) -> Self {
        Self {
            original,
            delta,
            total: original + delta,
        }
    }
}

/// Caller-supplied original/delta pair; the store derives the total.
#[derive(Debug, Clone, Copy)]
pub struct DeltaInput {
    /// Value before the variation.
    pub original: f64,
    /// Signed change.
    pub delta: f64,
}

impl From<DeltaInput> for Delta {
    fn from(input: DeltaInput) -> Self {
        Delta::new(input.original, input.delta)
    }
}

/// A variation raised against a work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    /// Generated identifier (`VAR` + three digits).
    pub id: VariationId,
    /// Work order the variation applies to.
    pub job_id: WorkOrderId,
    /// Version, monotonic per work order, starting at 1.
    pub version: u32,
    /// Short title.
    pub title: String,
    /// Principal who raised the variation.
    pub requested_by: UserId,
    /// Approval status.
    pub status: VariationStatus,
    /// Cost impact.
    pub cost: Delta,
    /// Duration impact in days.
    pub duration_days: Delta,
    /// Approver, stamped by the status-update operation.
    pub approved_by: Option<UserId>,
    /// Approval (or rejection) time, stamped with `approved_by`.
    pub approval_date: Option<Timestamp>,
    /// Creation time.
    pub created_at: Timestamp,
}

/// Caller-supplied fields for raising a variation.
#[derive(Debug, Clone)]
pub struct NewVariation {
    /// Work order the variation applies to.
    pub job_id: WorkOrderId,
    /// Short title.
    pub title: String,
    /// Requesting principal.
    pub requested_by: UserId,
    /// Cost impact.
    pub cost: DeltaInput,
    /// Duration impact in days.
    pub duration_days: DeltaInput,
}
