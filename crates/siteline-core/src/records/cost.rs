//! Cost entries referencing work orders

use crate::identifiers::{CostEntryId, WorkOrderId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A cost line booked against a work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEntry {
    /// Generated identifier (`CST` + three digits).
    pub id: CostEntryId,
    /// Work order the cost belongs to.
    pub job_id: WorkOrderId,
    /// What the cost covers.
    pub description: String,
    /// Estimated cost at planning time.
    pub estimated_cost: f64,
    /// Actual cost once known.
    pub actual_cost: f64,
    /// Creation time.
    pub created_at: Timestamp,
}

/// Caller-supplied fields for booking a cost entry.
#[derive(Debug, Clone)]
pub struct NewCostEntry {
    /// Work order the cost belongs to.
    pub job_id: WorkOrderId,
    /// What the cost covers.
    pub description: String,
    /// Estimated cost.
    pub estimated_cost: f64,
    /// Actual cost.
    pub actual_cost: f64,
}
