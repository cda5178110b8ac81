//! Work orders (jobs)

use crate::identifiers::{ChecklistId, DocumentId, UserId, WorkOrderId};
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a work order.
///
/// Transitions are driven by the workflow layer and gated by the
/// capability gate; the store only records the current value. Serialized
/// spellings match the dashboard's display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkOrderStatus {
    /// Created, not yet started.
    Pending,
    /// Work underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Submitted and waiting on an approver.
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    /// Approved and closed out.
    Complete,
    /// Rejected by an approver.
    Rejected,
}

/// Scheduling priority of a work order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    /// Routine work.
    Low,
    /// Default priority.
    Medium,
    /// Needs prompt attention.
    High,
    /// Safety or outage impact.
    Critical,
}

/// A maintenance work order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// Generated identifier (`WO` + four digits).
    pub id: WorkOrderId,
    /// Short title shown in listings.
    pub title: String,
    /// Free-form description of the work.
    pub description: String,
    /// Current lifecycle status.
    pub status: WorkOrderStatus,
    /// Scheduling priority.
    pub priority: Priority,
    /// Principal the work is assigned to.
    pub assigned_to: UserId,
    /// Principal who created the order.
    pub created_by: UserId,
    /// Optional checklist attached at creation.
    pub checklist_id: Option<ChecklistId>,
    /// Documents attached to this order.
    pub attachments: Vec<DocumentId>,
    /// Creation time.
    pub created_at: Timestamp,
    /// Last mutation time.
    pub updated_at: Timestamp,
}

impl WorkOrder {
    /// Whether the order has reached a terminal status.
    pub fn is_closed(&self) -> bool {
        matches!(
            self.status,
            WorkOrderStatus::Complete | WorkOrderStatus::Rejected
        )
    }
}

/// Caller-supplied fields for creating a work order.
#[derive(Debug, Clone)]
pub struct NewWorkOrder {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Scheduling priority.
    pub priority: Priority,
    /// Assignee.
    pub assigned_to: UserId,
    /// Creator.
    pub created_by: UserId,
    /// Optional checklist.
    pub checklist_id: Option<ChecklistId>,
}

/// Partial update to a work order's editable fields.
///
/// `None` fields are left untouched; status has its own operation.
#[derive(Debug, Clone, Default)]
pub struct WorkOrderPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement priority.
    pub priority: Option<Priority>,
    /// Reassignment target.
    pub assigned_to: Option<UserId>,
    /// Checklist change (outer `None` = untouched, inner = new value).
    pub checklist_id: Option<Option<ChecklistId>>,
}

impl WorkOrderPatch {
    /// Whether the patch changes anything at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.assigned_to.is_none()
            && self.checklist_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_to_dashboard_spelling() {
        let json = serde_json::to_string(&WorkOrderStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let json = serde_json::to_string(&WorkOrderStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"Pending Approval\"");
        let back: WorkOrderStatus = serde_json::from_str("\"Pending Approval\"").unwrap();
        assert_eq!(back, WorkOrderStatus::PendingApproval);
    }

    #[test]
    fn test_empty_patch() {
        assert!(WorkOrderPatch::default().is_empty());
        let patch = WorkOrderPatch {
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
