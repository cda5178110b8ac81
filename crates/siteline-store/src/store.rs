//! The record store
//!
//! Holds every typed collection in memory and writes through to the
//! durable port after each mutation. There is exactly one writer at a
//! time by construction; callers that need shared ownership wrap the
//! store in a mutex (see `siteline-app`).

use crate::{ids, keys, seed};
use serde::de::DeserializeOwned;
use serde::Serialize;
use siteline_core::time;
use siteline_core::{
    Asset, AssetId, AttendanceMark, AttendanceRecord, CostEntry, Document, DocumentId, Durable,
    NewAsset, NewCostEntry, NewDocument, NewVariation, NewWorkOrder, ProductivityMark,
    ProductivityRecord, UserId, Variation, VariationId, VariationStatus, WorkOrder, WorkOrderId,
    WorkOrderPatch, WorkOrderStatus, WriteError,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

/// Errors from record store mutations.
///
/// Read paths return `Option`/empty instead; only mutations addressing a
/// specific record can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No work order with the given ID.
    #[error("work order {0} not found")]
    WorkOrderNotFound(WorkOrderId),

    /// No variation with the given ID.
    #[error("variation {0} not found")]
    VariationNotFound(VariationId),
}

/// Typed collections with write-through best-effort persistence.
pub struct RecordStore {
    durable: Arc<dyn Durable>,
    work_orders: Vec<WorkOrder>,
    assets: Vec<Asset>,
    documents: Vec<Document>,
    variations: Vec<Variation>,
    attendance: Vec<AttendanceRecord>,
    productivity: Vec<ProductivityRecord>,
    cost_entries: Vec<CostEntry>,
    last_write_error: Option<WriteError>,
}

fn load<T: DeserializeOwned>(durable: &dyn Durable, key: &str) -> Option<Vec<T>> {
    let raw = durable.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(items) => Some(items),
        Err(err) => {
            warn!(key, error = %err, "malformed durable state, falling back to seed");
            None
        }
    }
}

fn persist<T: Serialize>(durable: &dyn Durable, key: &str, items: &[T]) -> Result<(), WriteError> {
    let json =
        serde_json::to_string(items).map_err(|err| WriteError::serialize(key, err))?;
    durable.put(key, &json)
}

macro_rules! persist_collection {
    ($(#[$doc:meta])* $fn_name:ident, $field:ident, $key:expr) => {
        $(#[$doc])*
        fn $fn_name(&mut self) {
            if let Err(err) = persist(self.durable.as_ref(), $key, &self.$field) {
                warn!(key = $key, error = %err, "durable write failed; in-memory state remains authoritative");
                self.last_write_error = Some(err);
            }
        }
    };
}

impl RecordStore {
    /// Open the store against a durable backend.
    ///
    /// Each collection loads from its stable key; a missing or
    /// unreadable value falls back to the compiled-in seed, which is
    /// persisted immediately so subsequent reads are stable.
    pub fn open(durable: Arc<dyn Durable>) -> Self {
        let mut store = Self {
            durable,
            work_orders: Vec::new(),
            assets: Vec::new(),
            documents: Vec::new(),
            variations: Vec::new(),
            attendance: Vec::new(),
            productivity: Vec::new(),
            cost_entries: Vec::new(),
            last_write_error: None,
        };

        match load(store.durable.as_ref(), keys::WORK_ORDERS) {
            Some(items) => store.work_orders = items,
            None => {
                store.work_orders = seed::work_orders();
                store.persist_work_orders();
            }
        }
        match load(store.durable.as_ref(), keys::ASSETS) {
            Some(items) => store.assets = items,
            None => {
                store.assets = seed::assets();
                store.persist_assets();
            }
        }
        match load(store.durable.as_ref(), keys::DOCUMENTS) {
            Some(items) => store.documents = items,
            None => {
                store.documents = seed::documents();
                store.persist_documents();
            }
        }
        match load(store.durable.as_ref(), keys::VARIATIONS) {
            Some(items) => store.variations = items,
            None => {
                store.variations = seed::variations();
                store.persist_variations();
            }
        }
        match load(store.durable.as_ref(), keys::ATTENDANCE) {
            Some(items) => store.attendance = items,
            None => {
                store.attendance = seed::attendance();
                store.persist_attendance();
            }
        }
        match load(store.durable.as_ref(), keys::PRODUCTIVITY) {
            Some(items) => store.productivity = items,
            None => {
                store.productivity = seed::productivity();
                store.persist_productivity();
            }
        }
        match load(store.durable.as_ref(), keys::COST_ENTRIES) {
            Some(items) => store.cost_entries = items,
            None => {
                store.cost_entries = seed::cost_entries();
                store.persist_cost_entries();
            }
        }

        store
    }

    persist_collection!(persist_work_orders, work_orders, keys::WORK_ORDERS);
    persist_collection!(persist_assets, assets, keys::ASSETS);
    persist_collection!(persist_documents, documents, keys::DOCUMENTS);
    persist_collection!(persist_variations, variations, keys::VARIATIONS);
    persist_collection!(persist_attendance, attendance, keys::ATTENDANCE);
    persist_collection!(persist_productivity, productivity, keys::PRODUCTIVITY);
    persist_collection!(persist_cost_entries, cost_entries, keys::COST_ENTRIES);

    /// Re-persist every collection. Used by shutdown for a final
    /// best-effort flush.
    pub fn flush(&mut self) {
        self.persist_work_orders();
        self.persist_assets();
        self.persist_documents();
        self.persist_variations();
        self.persist_attendance();
        self.persist_productivity();
        self.persist_cost_entries();
    }

    /// Most recent durable write failure, if any.
    ///
    /// The worst-case failure mode of this layer is silent loss of
    /// durability; this makes it observable to operators.
    pub fn last_write_error(&self) -> Option<&WriteError> {
        self.last_write_error.as_ref()
    }

    // --- work orders ---

    /// All work orders in insertion order.
    pub fn work_orders(&self) -> &[WorkOrder] {
        &self.work_orders
    }

    /// Look up a work order by ID.
    pub fn work_order(&self, id: &WorkOrderId) -> Option<&WorkOrder> {
        self.work_orders.iter().find(|w| &w.id == id)
    }

    /// Work orders with the given status.
    pub fn work_orders_by_status(&self, status: WorkOrderStatus) -> Vec<&WorkOrder> {
        self.work_orders
            .iter()
            .filter(|w| w.status == status)
            .collect()
    }

    /// Work orders assigned to the given principal.
    pub fn work_orders_by_assignee(&self, user: &UserId) -> Vec<&WorkOrder> {
        self.work_orders
            .iter()
            .filter(|w| &w.assigned_to == user)
            .collect()
    }

    /// Create a work order with a generated ID and `Pending` status.
    pub fn create_work_order(&mut self, input: NewWorkOrder) -> WorkOrder {
        let id = ids::WORK_ORDER.next_free(self.work_orders.len(), |candidate| {
            self.work_orders.iter().any(|w| w.id.as_str() == candidate)
        });
        let now = time::now();
        let record = WorkOrder {
            id: WorkOrderId::new(id),
            title: input.title,
            description: input.description,
            status: WorkOrderStatus::Pending,
            priority: input.priority,
            assigned_to: input.assigned_to,
            created_by: input.created_by,
            checklist_id: input.checklist_id,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.work_orders.push(record.clone());
        self.persist_work_orders();
        record
    }

    /// Apply a partial update to a work order's editable fields.
    pub fn update_work_order(
        &mut self,
        id: &WorkOrderId,
        patch: WorkOrderPatch,
    ) -> Result<WorkOrder, StoreError> {
        let order = self
            .work_orders
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| StoreError::WorkOrderNotFound(id.clone()))?;

        if let Some(title) = patch.title {
            order.title = title;
        }
        if let Some(description) = patch.description {
            order.description = description;
        }
        if let Some(priority) = patch.priority {
            order.priority = priority;
        }
        if let Some(assigned_to) = patch.assigned_to {
            order.assigned_to = assigned_to;
        }
        if let Some(checklist_id) = patch.checklist_id {
            order.checklist_id = checklist_id;
        }
        order.updated_at = time::now();
        let updated = order.clone();
        self.persist_work_orders();
        Ok(updated)
    }

    /// Set a work order's status.
    ///
    /// Which transitions are legal is the workflow layer's concern; the
    /// store records the outcome and bumps `updated_at`.
    pub fn set_work_order_status(
        &mut self,
        id: &WorkOrderId,
        status: WorkOrderStatus,
    ) -> Result<WorkOrder, StoreError> {
        let order = self
            .work_orders
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| StoreError::WorkOrderNotFound(id.clone()))?;
        order.status = status;
        order.updated_at = time::now();
        let updated = order.clone();
        self.persist_work_orders();
        Ok(updated)
    }

    /// Attach a document to a work order. Attaching the same document
    /// twice is a no-op.
    pub fn attach_document(
        &mut self,
        id: &WorkOrderId,
        document: DocumentId,
    ) -> Result<WorkOrder, StoreError> {
        let order = self
            .work_orders
            .iter_mut()
            .find(|w| &w.id == id)
            .ok_or_else(|| StoreError::WorkOrderNotFound(id.clone()))?;
        if !order.attachments.contains(&document) {
            order.attachments.push(document);
            order.updated_at = time::now();
        }
        let updated = order.clone();
        self.persist_work_orders();
        Ok(updated)
    }

    // --- assets ---

    /// All assets in insertion order.
    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Look up an asset by ID.
    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.iter().find(|a| &a.id == id)
    }

    /// Assets at the given site.
    pub fn assets_by_site(&self, site: &str) -> Vec<&Asset> {
        self.assets.iter().filter(|a| a.site == site).collect()
    }

    /// Register an asset with a generated ID.
    pub fn create_asset(&mut self, input: NewAsset) -> Asset {
        let id = ids::ASSET.next_free(self.assets.len(), |candidate| {
            self.assets.iter().any(|a| a.id.as_str() == candidate)
        });
        let record = Asset {
            id: id.into(),
            name: input.name,
            site: input.site,
            category: input.category,
            status: input.status,
            created_at: time::now(),
        };
        self.assets.push(record.clone());
        self.persist_assets();
        record
    }

    // --- documents ---

    /// All documents in insertion order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Look up a document by ID.
    pub fn document(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| &d.id == id)
    }

    /// Documents related to the given work order.
    pub fn documents_by_job(&self, job: &WorkOrderId) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|d| d.job_id.as_ref() == Some(job))
            .collect()
    }

    /// Store an uploaded document with a generated ID.
    pub fn create_document(&mut self, input: NewDocument) -> Document {
        let id = ids::DOCUMENT.next_free(self.documents.len(), |candidate| {
            self.documents.iter().any(|d| d.id.as_str() == candidate)
        });
        let record = Document {
            id: id.into(),
            name: input.name,
            job_id: input.job_id,
            asset_id: input.asset_id,
            uploaded_by: input.uploaded_by,
            uploaded_at: time::now(),
        };
        self.documents.push(record.clone());
        self.persist_documents();
        record
    }

    // --- variations ---

    /// All variations in insertion order.
    pub fn variations(&self) -> &[Variation] {
        &self.variations
    }

    /// Look up a variation by ID.
    pub fn variation(&self, id: &VariationId) -> Option<&Variation> {
        self.variations.iter().find(|v| &v.id == id)
    }

    /// Variations raised against the given work order.
    pub fn variations_by_job(&self, job: &WorkOrderId) -> Vec<&Variation> {
        self.variations
            .iter()
            .filter(|v| &v.job_id == job)
            .collect()
    }

    /// Raise a variation.
    ///
    /// The version is one past the highest existing version for the same
    /// work order (starting at 1), and both delta totals are derived
    /// here; they are never patched afterwards except through
    /// [`RecordStore::set_variation_status`].
    pub fn create_variation(&mut self, input: NewVariation) -> Variation {
        let id = ids::VARIATION.next_free(self.variations.len(), |candidate| {
            self.variations.iter().any(|v| v.id.as_str() == candidate)
        });
        let version = self
            .variations
            .iter()
            .filter(|v| v.job_id == input.job_id)
            .map(|v| v.version)
            .max()
            .unwrap_or(0)
            + 1;
        let record = Variation {
            id: id.into(),
            job_id: input.job_id,
            version,
            title: input.title,
            requested_by: input.requested_by,
            status: VariationStatus::Pending,
            cost: input.cost.into(),
            duration_days: input.duration_days.into(),
            approved_by: None,
            approval_date: None,
            created_at: time::now(),
        };
        self.variations.push(record.clone());
        self.persist_variations();
        record
    }

    /// Decide a variation, stamping approver and decision time.
    ///
    /// This is the only mutation a variation sees after creation.
    pub fn set_variation_status(
        &mut self,
        id: &VariationId,
        status: VariationStatus,
        decided_by: UserId,
    ) -> Result<Variation, StoreError> {
        let variation = self
            .variations
            .iter_mut()
            .find(|v| &v.id == id)
            .ok_or_else(|| StoreError::VariationNotFound(id.clone()))?;
        variation.status = status;
        variation.approved_by = Some(decided_by);
        variation.approval_date = Some(time::now());
        let updated = variation.clone();
        self.persist_variations();
        Ok(updated)
    }

    // --- attendance ---

    /// All attendance records in insertion order.
    pub fn attendance(&self) -> &[AttendanceRecord] {
        &self.attendance
    }

    /// Attendance records for one employee.
    pub fn attendance_for(&self, employee: &UserId) -> Vec<&AttendanceRecord> {
        self.attendance
            .iter()
            .filter(|r| &r.employee_id == employee)
            .collect()
    }

    /// Mark an employee-day. Idempotent per `(employee, date)`: a
    /// re-mark overwrites status and notes but keeps the original ID and
    /// creation time.
    pub fn mark_attendance(&mut self, mark: AttendanceMark) -> AttendanceRecord {
        let record = match self
            .attendance
            .iter_mut()
            .find(|r| r.employee_id == mark.employee_id && r.date == mark.date)
        {
            Some(existing) => {
                existing.status = mark.status;
                existing.notes = mark.notes;
                existing.marked_by = mark.marked_by;
                existing.clone()
            }
            None => {
                let id = ids::ATTENDANCE.next_free(self.attendance.len(), |candidate| {
                    self.attendance.iter().any(|r| r.id.as_str() == candidate)
                });
                let record = AttendanceRecord {
                    id: id.into(),
                    employee_id: mark.employee_id,
                    date: mark.date,
                    status: mark.status,
                    notes: mark.notes,
                    marked_by: mark.marked_by,
                    created_at: time::now(),
                };
                self.attendance.push(record.clone());
                record
            }
        };
        self.persist_attendance();
        record
    }

    // --- productivity ---

    /// All productivity records in insertion order.
    pub fn productivity(&self) -> &[ProductivityRecord] {
        &self.productivity
    }

    /// Productivity records for one employee.
    pub fn productivity_for(&self, employee: &UserId) -> Vec<&ProductivityRecord> {
        self.productivity
            .iter()
            .filter(|r| &r.employee_id == employee)
            .collect()
    }

    /// Mark an employee-day's productivity. Idempotent per
    /// `(employee, date)` with the same ID-preserving rule as
    /// [`RecordStore::mark_attendance`].
    pub fn mark_productivity(&mut self, mark: ProductivityMark) -> ProductivityRecord {
        let record = match self
            .productivity
            .iter_mut()
            .find(|r| r.employee_id == mark.employee_id && r.date == mark.date)
        {
            Some(existing) => {
                existing.hours_worked = mark.hours_worked;
                existing.quality_score = mark.quality_score;
                existing.efficiency = mark.efficiency;
                existing.notes = mark.notes;
                existing.clone()
            }
            None => {
                let id = ids::PRODUCTIVITY.next_free(self.productivity.len(), |candidate| {
                    self.productivity.iter().any(|r| r.id.as_str() == candidate)
                });
                let record = ProductivityRecord {
                    id: id.into(),
                    employee_id: mark.employee_id,
                    date: mark.date,
                    hours_worked: mark.hours_worked,
                    quality_score: mark.quality_score,
                    efficiency: mark.efficiency,
                    notes: mark.notes,
                    created_at: time::now(),
                };
                self.productivity.push(record.clone());
                record
            }
        };
        self.persist_productivity();
        record
    }

    // --- cost entries ---

    /// All cost entries in insertion order.
    pub fn cost_entries(&self) -> &[CostEntry] {
        &self.cost_entries
    }

    /// Cost entries booked against the given work order.
    pub fn cost_entries_by_job(&self, job: &WorkOrderId) -> Vec<&CostEntry> {
        self.cost_entries
            .iter()
            .filter(|c| &c.job_id == job)
            .collect()
    }

    /// Book a cost entry with a generated ID.
    pub fn create_cost_entry(&mut self, input: NewCostEntry) -> CostEntry {
        let id = ids::COST_ENTRY.next_free(self.cost_entries.len(), |candidate| {
            self.cost_entries.iter().any(|c| c.id.as_str() == candidate)
        });
        let record = CostEntry {
            id: id.into(),
            job_id: input.job_id,
            description: input.description,
            estimated_cost: input.estimated_cost,
            actual_cost: input.actual_cost,
            created_at: time::now(),
        };
        self.cost_entries.push(record.clone());
        self.persist_cost_entries();
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use chrono::NaiveDate;
    use siteline_core::{AttendanceStatus, DeltaInput, Priority};

    fn open_store() -> RecordStore {
        RecordStore::open(Arc::new(MemoryBackend::new()))
    }

    fn new_work_order(title: &str) -> NewWorkOrder {
        NewWorkOrder {
            title: title.to_string(),
            description: String::new(),
            priority: Priority::Medium,
            assigned_to: "U2".into(),
            created_by: "U1".into(),
            checklist_id: None,
        }
    }

    #[test]
    fn test_cold_start_seeds_collections() {
        let store = open_store();
        assert_eq!(store.work_orders().len(), 3);
        assert!(store.work_order(&"WO0001".into()).is_some());
        assert_eq!(store.assets().len(), 2);
        assert!(store.last_write_error().is_none());
    }

    #[test]
    fn test_create_work_order_generates_next_id() {
        let mut store = open_store();
        let created = store.create_work_order(new_work_order("New job"));
        assert_eq!(created.id.as_str(), "WO0004");
        assert_eq!(created.status, WorkOrderStatus::Pending);
        assert_eq!(store.work_orders().len(), 4);
    }

    #[test]
    fn test_variation_versions_are_monotonic_per_job() {
        let mut store = open_store();
        let input = |job: &str| NewVariation {
            job_id: job.into(),
            title: "Extra work".to_string(),
            requested_by: "U9".into(),
            cost: DeltaInput {
                original: 100.0,
                delta: 10.0,
            },
            duration_days: DeltaInput {
                original: 1.0,
                delta: 0.0,
            },
        };

        // WO0001 already has VAR001 at version 1 from the seed.
        let v2 = store.create_variation(input("WO0001"));
        let other = store.create_variation(input("WO0002"));
        let v3 = store.create_variation(input("WO0001"));

        assert_eq!(v2.version, 2);
        assert_eq!(other.version, 1);
        assert_eq!(v3.version, 3);
    }

    #[test]
    fn test_variation_totals_derived_and_decision_stamped() {
        let mut store = open_store();
        let created = store.create_variation(NewVariation {
            job_id: "WO0002".into(),
            title: "Scope change".to_string(),
            requested_by: "U2".into(),
            cost: DeltaInput {
                original: 500.0,
                delta: -50.0,
            },
            duration_days: DeltaInput {
                original: 3.0,
                delta: 1.0,
            },
        });
        assert_eq!(created.cost.total, 450.0);
        assert_eq!(created.duration_days.total, 4.0);
        assert!(created.approved_by.is_none());

        let decided = store
            .set_variation_status(&created.id, VariationStatus::Approved, "U1".into())
            .unwrap();
        assert_eq!(decided.status, VariationStatus::Approved);
        assert_eq!(decided.approved_by, Some("U1".into()));
        assert!(decided.approval_date.is_some());
    }

    #[test]
    fn test_mark_attendance_is_idempotent_per_day() {
        let mut store = open_store();
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let first = store.mark_attendance(AttendanceMark {
            employee_id: "U9".into(),
            date,
            status: AttendanceStatus::Present,
            notes: None,
            marked_by: "U5".into(),
        });
        let count_after_first = store.attendance().len();

        let second = store.mark_attendance(AttendanceMark {
            employee_id: "U9".into(),
            date,
            status: AttendanceStatus::HalfDay,
            notes: Some("Left early".to_string()),
            marked_by: "U5".into(),
        });

        assert_eq!(second.id, first.id);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(second.status, AttendanceStatus::HalfDay);
        assert_eq!(store.attendance().len(), count_after_first);
    }

    #[test]
    fn test_mutations_against_missing_records() {
        let mut store = open_store();
        let missing: WorkOrderId = "WO9999".into();
        assert_eq!(
            store.set_work_order_status(&missing, WorkOrderStatus::Complete),
            Err(StoreError::WorkOrderNotFound(missing.clone()))
        );
        assert!(store.work_order(&missing).is_none());
    }
}
