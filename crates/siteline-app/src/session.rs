//! Per-principal sessions
//!
//! A session pairs a resolved profile with the application instance.
//! Reads come back scoped by the filter engine; mutations consult the
//! capability gate, touch the store, then append the matching audit
//! entry. A refused gate check appends `access_denied` and mutates
//! nothing.

use crate::error::AccessError;
use crate::App;
use siteline_access::{scope, AccessProfile, DataAccessTier};
use siteline_audit::{
    Actor, AuditAction, AuditDetails, AuditDraft, AuditEntry, AuditQuery, ExportFormat,
    ResourceKind,
};
use siteline_core::{
    Asset, AttendanceMark, AttendanceRecord, Document, NewDocument, NewVariation, NewWorkOrder,
    ProductivityMark, ProductivityRecord, UserId, Variation, VariationId, VariationStatus,
    WorkOrder, WorkOrderId, WorkOrderPatch, WorkOrderStatus,
};
use siteline_metrics::{payment, PaymentBreakdown, Period};
use siteline_store::{DashboardStats, StoreError};
use std::collections::BTreeMap;
use tracing::warn;

fn status_label(status: WorkOrderStatus) -> &'static str {
    match status {
        WorkOrderStatus::Pending => "Pending",
        WorkOrderStatus::InProgress => "In Progress",
        WorkOrderStatus::PendingApproval => "Pending Approval",
        WorkOrderStatus::Complete => "Complete",
        WorkOrderStatus::Rejected => "Rejected",
    }
}

/// An authenticated principal's view of the application.
pub struct Session<'a> {
    app: &'a App,
    profile: AccessProfile,
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("profile", &self.profile)
            .finish_non_exhaustive()
    }
}

impl<'a> Session<'a> {
    pub(crate) fn new(app: &'a App, profile: AccessProfile) -> Self {
        Self { app, profile }
    }

    /// The profile this session acts under.
    pub fn profile(&self) -> &AccessProfile {
        &self.profile
    }

    fn actor(&self) -> Actor {
        Actor::new(
            self.profile.user_id.clone(),
            self.profile.email.clone(),
            self.profile.name.clone(),
        )
    }

    fn record(&self, draft: AuditDraft) {
        self.app.audit.lock().log(draft);
    }

    /// Log an `access_denied` entry and build the matching error.
    fn deny(&self, action: &str, resource: ResourceKind, id: Option<String>) -> AccessError {
        warn!(
            user = %self.profile.user_id,
            action,
            resource = %resource,
            "capability gate refused action"
        );
        let target = id.clone().unwrap_or_else(|| resource.to_string());
        let mut draft = AuditDraft::new(self.actor(), AuditAction::AccessDenied, resource)
            .with_details(AuditDetails::AccessDenied {
                attempted: action.to_string(),
            });
        if let Some(id) = id {
            draft = draft.on(id);
        }
        self.record(draft);
        AccessError::Denied {
            action: action.to_string(),
            resource: target,
        }
    }

    // --- scoped reads ---

    /// Work orders this principal may see, original order preserved.
    pub fn work_orders(&self) -> Vec<WorkOrder> {
        let store = self.app.store.lock();
        scope(Some(&self.profile), store.work_orders())
    }

    /// Assets this principal may see.
    pub fn assets(&self) -> Vec<Asset> {
        let store = self.app.store.lock();
        scope(Some(&self.profile), store.assets())
    }

    /// Documents this principal may see.
    pub fn documents(&self) -> Vec<Document> {
        let store = self.app.store.lock();
        scope(Some(&self.profile), store.documents())
    }

    /// Variations this principal may see.
    pub fn variations(&self) -> Vec<Variation> {
        let store = self.app.store.lock();
        scope(Some(&self.profile), store.variations())
    }

    /// Aggregate dashboard statistics.
    pub fn dashboard_stats(&self) -> DashboardStats {
        self.app.store.lock().dashboard_stats()
    }

    // --- gated mutations ---

    /// Create a work order. Read-only principals cannot create.
    pub fn create_work_order(&self, input: NewWorkOrder) -> Result<WorkOrder, AccessError> {
        if self.profile.tier == DataAccessTier::ReadOnly {
            return Err(self.deny("create_work_order", ResourceKind::WorkOrder, None));
        }
        let created = self.app.store.lock().create_work_order(input);
        self.record(
            AuditDraft::new(self.actor(), AuditAction::Create, ResourceKind::WorkOrder)
                .on(created.id.to_string()),
        );
        Ok(created)
    }

    /// Apply a partial update to a work order.
    pub fn update_work_order(
        &self,
        id: &WorkOrderId,
        patch: WorkOrderPatch,
    ) -> Result<WorkOrder, AccessError> {
        if !self.profile.can_edit_work_order(id) {
            return Err(self.deny(
                "update_work_order",
                ResourceKind::WorkOrder,
                Some(id.to_string()),
            ));
        }

        let mut changes = BTreeMap::new();
        if let Some(title) = &patch.title {
            changes.insert("title".to_string(), serde_json::json!(title));
        }
        if let Some(description) = &patch.description {
            changes.insert("description".to_string(), serde_json::json!(description));
        }
        if let Some(priority) = &patch.priority {
            changes.insert(
                "priority".to_string(),
                serde_json::to_value(priority).unwrap_or(serde_json::Value::Null),
            );
        }
        if let Some(assigned_to) = &patch.assigned_to {
            changes.insert(
                "assigned_to".to_string(),
                serde_json::json!(assigned_to.as_str()),
            );
        }
        if let Some(checklist_id) = &patch.checklist_id {
            changes.insert(
                "checklist_id".to_string(),
                serde_json::to_value(checklist_id).unwrap_or(serde_json::Value::Null),
            );
        }

        let updated = self.app.store.lock().update_work_order(id, patch)?;
        self.record(
            AuditDraft::new(self.actor(), AuditAction::Update, ResourceKind::WorkOrder)
                .on(updated.id.to_string())
                .with_details(AuditDetails::Update { changes }),
        );
        Ok(updated)
    }

    /// Submit a work order for approval.
    ///
    /// Requires the submit capability and edit access to the order.
    pub fn submit_for_approval(&self, id: &WorkOrderId) -> Result<WorkOrder, AccessError> {
        if !self.profile.can_submit_for_approval() || !self.profile.can_edit_work_order(id) {
            return Err(self.deny(
                "submit_for_approval",
                ResourceKind::WorkOrder,
                Some(id.to_string()),
            ));
        }
        self.transition_work_order(id, WorkOrderStatus::PendingApproval, AuditAction::Submit, None)
    }

    /// Approve a work order, closing it out.
    pub fn approve_work_order(&self, id: &WorkOrderId) -> Result<WorkOrder, AccessError> {
        if !self.profile.can_approve_work_order(id) {
            return Err(self.deny(
                "approve_work_order",
                ResourceKind::WorkOrder,
                Some(id.to_string()),
            ));
        }
        self.transition_work_order(id, WorkOrderStatus::Complete, AuditAction::Approve, None)
    }

    /// Reject a work order with a reviewer reason.
    pub fn reject_work_order(
        &self,
        id: &WorkOrderId,
        reason: impl Into<String>,
    ) -> Result<WorkOrder, AccessError> {
        if !self.profile.can_approve_work_order(id) {
            return Err(self.deny(
                "reject_work_order",
                ResourceKind::WorkOrder,
                Some(id.to_string()),
            ));
        }
        self.transition_work_order(
            id,
            WorkOrderStatus::Rejected,
            AuditAction::Reject,
            Some(reason.into()),
        )
    }

    fn transition_work_order(
        &self,
        id: &WorkOrderId,
        to: WorkOrderStatus,
        action: AuditAction,
        reject_reason: Option<String>,
    ) -> Result<WorkOrder, AccessError> {
        let (from, updated) = {
            let mut store = self.app.store.lock();
            let from = store
                .work_order(id)
                .map(|w| w.status)
                .ok_or_else(|| StoreError::WorkOrderNotFound(id.clone()))?;
            let updated = store.set_work_order_status(id, to)?;
            (from, updated)
        };

        let details = match reject_reason {
            Some(reason) => AuditDetails::Reject { reason },
            None => AuditDetails::StatusChange {
                from: status_label(from).to_string(),
                to: status_label(to).to_string(),
            },
        };
        self.record(
            AuditDraft::new(self.actor(), action, ResourceKind::WorkOrder)
                .on(updated.id.to_string())
                .with_details(details),
        );
        Ok(updated)
    }

    /// Upload a document, attaching it to its work order when one is
    /// given.
    pub fn upload_document(&self, input: NewDocument) -> Result<Document, AccessError> {
        if !self.profile.can_upload_documents() {
            return Err(self.deny("upload_document", ResourceKind::Document, None));
        }

        let created = {
            let mut store = self.app.store.lock();
            if let Some(job) = &input.job_id {
                if store.work_order(job).is_none() {
                    return Err(StoreError::WorkOrderNotFound(job.clone()).into());
                }
            }
            let created = store.create_document(input);
            if let Some(job) = created.job_id.clone() {
                store.attach_document(&job, created.id.clone())?;
            }
            created
        };

        self.record(
            AuditDraft::new(self.actor(), AuditAction::Upload, ResourceKind::Document)
                .on(created.id.to_string())
                .with_details(AuditDetails::Upload {
                    file_name: created.name.clone(),
                }),
        );
        Ok(created)
    }

    /// Raise a variation against a work order this principal may edit.
    pub fn create_variation(&self, input: NewVariation) -> Result<Variation, AccessError> {
        if !self.profile.can_edit_work_order(&input.job_id) {
            return Err(self.deny(
                "create_variation",
                ResourceKind::Variation,
                Some(input.job_id.to_string()),
            ));
        }
        let created = {
            let mut store = self.app.store.lock();
            if store.work_order(&input.job_id).is_none() {
                return Err(StoreError::WorkOrderNotFound(input.job_id.clone()).into());
            }
            store.create_variation(input)
        };
        self.record(
            AuditDraft::new(self.actor(), AuditAction::Create, ResourceKind::Variation)
                .on(created.id.to_string()),
        );
        Ok(created)
    }

    /// Approve a variation.
    pub fn approve_variation(&self, id: &VariationId) -> Result<Variation, AccessError> {
        self.decide_variation(id, VariationStatus::Approved, None)
    }

    /// Reject a variation with a reviewer reason.
    pub fn reject_variation(
        &self,
        id: &VariationId,
        reason: impl Into<String>,
    ) -> Result<Variation, AccessError> {
        self.decide_variation(id, VariationStatus::Rejected, Some(reason.into()))
    }

    fn decide_variation(
        &self,
        id: &VariationId,
        status: VariationStatus,
        reject_reason: Option<String>,
    ) -> Result<Variation, AccessError> {
        let decided = {
            let mut store = self.app.store.lock();
            let job_id = store
                .variation(id)
                .map(|v| v.job_id.clone())
                .ok_or_else(|| StoreError::VariationNotFound(id.clone()))?;
            if !self.profile.can_approve_work_order(&job_id) {
                drop(store);
                let action = match status {
                    VariationStatus::Rejected => "reject_variation",
                    _ => "approve_variation",
                };
                return Err(self.deny(action, ResourceKind::Variation, Some(id.to_string())));
            }
            store.set_variation_status(id, status, self.profile.user_id.clone())?
        };

        let (action, details) = match reject_reason {
            Some(reason) => (AuditAction::Reject, AuditDetails::Reject { reason }),
            None => (AuditAction::Approve, AuditDetails::None),
        };
        self.record(
            AuditDraft::new(self.actor(), action, ResourceKind::Variation)
                .on(decided.id.to_string())
                .with_details(details),
        );
        Ok(decided)
    }

    // --- workforce management ---

    /// Mark an employee-day's attendance. Requires user management.
    pub fn mark_attendance(&self, mark: AttendanceMark) -> Result<AttendanceRecord, AccessError> {
        if !self.profile.can_manage_users {
            return Err(self.deny("mark_attendance", ResourceKind::Attendance, None));
        }
        let record = self.app.store.lock().mark_attendance(mark);
        self.record(
            AuditDraft::new(self.actor(), AuditAction::Update, ResourceKind::Attendance)
                .on(record.id.to_string()),
        );
        Ok(record)
    }

    /// Mark an employee-day's productivity. Requires user management.
    pub fn mark_productivity(
        &self,
        mark: ProductivityMark,
    ) -> Result<ProductivityRecord, AccessError> {
        if !self.profile.can_manage_users {
            return Err(self.deny("mark_productivity", ResourceKind::Productivity, None));
        }
        let record = self.app.store.lock().mark_productivity(mark);
        self.record(
            AuditDraft::new(self.actor(), AuditAction::Update, ResourceKind::Productivity)
                .on(record.id.to_string()),
        );
        Ok(record)
    }

    /// Compute an employee's payment for a period. Requires user
    /// management; the view is audited.
    pub fn payment(
        &self,
        employee: &UserId,
        period: &Period,
        base_pay: f64,
    ) -> Result<PaymentBreakdown, AccessError> {
        if !self.profile.can_manage_users {
            return Err(self.deny(
                "payment",
                ResourceKind::User,
                Some(employee.to_string()),
            ));
        }
        let breakdown = {
            let store = self.app.store.lock();
            payment(
                store.attendance(),
                store.productivity(),
                employee,
                period,
                base_pay,
                &self.app.policy,
            )
        };
        self.record(
            AuditDraft::new(self.actor(), AuditAction::View, ResourceKind::User)
                .on(employee.to_string())
                .with_details(AuditDetails::note("payment calculation")),
        );
        Ok(breakdown)
    }

    // --- audit trail ---

    /// Query the audit trail. Requires user management; the view is
    /// itself audited.
    pub fn audit_trail(&self, query: &AuditQuery) -> Result<Vec<AuditEntry>, AccessError> {
        if !self.profile.can_manage_users {
            return Err(self.deny("audit_trail", ResourceKind::AuditLog, None));
        }
        let entries = self.app.audit.lock().query(query);
        self.record(AuditDraft::new(
            self.actor(),
            AuditAction::View,
            ResourceKind::AuditLog,
        ));
        Ok(entries)
    }

    /// Export the audit trail. Requires user management.
    pub fn export_audit(&self, format: ExportFormat) -> Result<String, AccessError> {
        if !self.profile.can_manage_users {
            return Err(self.deny("export_audit", ResourceKind::AuditLog, None));
        }
        let rendered = self.app.audit.lock().export(format);
        let label = match format {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        };
        self.record(
            AuditDraft::new(self.actor(), AuditAction::Download, ResourceKind::AuditLog)
                .with_details(AuditDetails::Export {
                    format: label.to_string(),
                }),
        );
        Ok(rendered)
    }

    /// Close the session, logging `logout`.
    pub fn sign_out(self) {
        self.record(AuditDraft::new(
            self.actor(),
            AuditAction::Logout,
            ResourceKind::Session,
        ));
    }
}
