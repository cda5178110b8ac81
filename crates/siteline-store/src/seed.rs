//! Compiled-in seed dataset
//!
//! Used on cold start and whenever a persisted collection is absent or
//! unreadable. Timestamps are fixed so seeded state is identical across
//! processes.

use chrono::NaiveDate;
use siteline_core::time::{from_epoch_secs, Timestamp};
use siteline_core::{
    Asset, AssetStatus, AttendanceRecord, AttendanceStatus, CostEntry, Delta, Document, Priority,
    ProductivityRecord, Variation, VariationStatus, WorkOrder, WorkOrderStatus,
};

fn ts(secs: i64) -> Timestamp {
    from_epoch_secs(secs)
}

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub(crate) fn work_orders() -> Vec<WorkOrder> {
    vec![
        WorkOrder {
            id: "WO0001".into(),
            title: "Replace conveyor drive belt".to_string(),
            description: "Drive belt on the north line shows cracking; replace and re-tension."
                .to_string(),
            status: WorkOrderStatus::InProgress,
            priority: Priority::High,
            assigned_to: "U9".into(),
            created_by: "U5".into(),
            checklist_id: Some("CHK001".into()),
            attachments: vec!["DOC001".into()],
            created_at: ts(1_709_280_000),
            updated_at: ts(1_709_366_400),
        },
        WorkOrder {
            id: "WO0002".into(),
            title: "Quarterly pump inspection".to_string(),
            description: "Inspect seals and impeller wear on the south plant pump set.".to_string(),
            status: WorkOrderStatus::Pending,
            priority: Priority::Medium,
            assigned_to: "U2".into(),
            created_by: "U2".into(),
            checklist_id: None,
            attachments: Vec::new(),
            created_at: ts(1_709_366_400),
            updated_at: ts(1_709_366_400),
        },
        WorkOrder {
            id: "WO0003".into(),
            title: "HVAC filter change".to_string(),
            description: "Scheduled filter change for the workshop air handlers.".to_string(),
            status: WorkOrderStatus::Complete,
            priority: Priority::Low,
            assigned_to: "U9".into(),
            created_by: "U1".into(),
            checklist_id: None,
            attachments: Vec::new(),
            created_at: ts(1_708_070_400),
            updated_at: ts(1_708_761_600),
        },
    ]
}

pub(crate) fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: "AST001".into(),
            name: "North line conveyor".to_string(),
            site: "North Plant".to_string(),
            category: "Conveyor".to_string(),
            status: AssetStatus::UnderMaintenance,
            created_at: ts(1_706_745_600),
        },
        Asset {
            id: "AST002".into(),
            name: "South plant pump set".to_string(),
            site: "South Plant".to_string(),
            category: "Pump".to_string(),
            status: AssetStatus::Operational,
            created_at: ts(1_706_745_600),
        },
    ]
}

pub(crate) fn documents() -> Vec<Document> {
    vec![
        Document {
            id: "DOC001".into(),
            name: "belt-spec-sheet.pdf".to_string(),
            job_id: Some("WO0001".into()),
            asset_id: Some("AST001".into()),
            uploaded_by: "U5".into(),
            uploaded_at: ts(1_709_283_600),
        },
        Document {
            id: "DOC002".into(),
            name: "pump-maintenance-manual.pdf".to_string(),
            job_id: None,
            asset_id: Some("AST002".into()),
            uploaded_by: "U1".into(),
            uploaded_at: ts(1_706_832_000),
        },
    ]
}

pub(crate) fn variations() -> Vec<Variation> {
    vec![Variation {
        id: "VAR001".into(),
        job_id: "WO0001".into(),
        version: 1,
        title: "Additional bearing replacement".to_string(),
        requested_by: "U9".into(),
        status: VariationStatus::Pending,
        cost: Delta::new(1800.0, 420.0),
        duration_days: Delta::new(2.0, 1.0),
        approved_by: None,
        approval_date: None,
        created_at: ts(1_709_370_000),
    }]
}

pub(crate) fn attendance() -> Vec<AttendanceRecord> {
    vec![
        AttendanceRecord {
            id: "ATT001".into(),
            employee_id: "U9".into(),
            date: day(2024, 3, 4),
            status: AttendanceStatus::Present,
            notes: None,
            marked_by: "U5".into(),
            created_at: ts(1_709_539_200),
        },
        AttendanceRecord {
            id: "ATT002".into(),
            employee_id: "U9".into(),
            date: day(2024, 3, 5),
            status: AttendanceStatus::Present,
            notes: None,
            marked_by: "U5".into(),
            created_at: ts(1_709_625_600),
        },
        AttendanceRecord {
            id: "ATT003".into(),
            employee_id: "U9".into(),
            date: day(2024, 3, 6),
            status: AttendanceStatus::Absent,
            notes: Some("Sick day".to_string()),
            marked_by: "U5".into(),
            created_at: ts(1_709_712_000),
        },
    ]
}

pub(crate) fn productivity() -> Vec<ProductivityRecord> {
    vec![
        ProductivityRecord {
            id: "PRD001".into(),
            employee_id: "U9".into(),
            date: day(2024, 3, 4),
            hours_worked: 8.0,
            quality_score: 8.5,
            efficiency: 85.0,
            notes: None,
            created_at: ts(1_709_568_000),
        },
        ProductivityRecord {
            id: "PRD002".into(),
            employee_id: "U9".into(),
            date: day(2024, 3, 5),
            hours_worked: 7.5,
            quality_score: 9.0,
            efficiency: 90.0,
            notes: None,
            created_at: ts(1_709_654_400),
        },
    ]
}

pub(crate) fn cost_entries() -> Vec<CostEntry> {
    vec![
        CostEntry {
            id: "CST001".into(),
            job_id: "WO0001".into(),
            description: "Drive belt and tensioner kit".to_string(),
            estimated_cost: 1200.0,
            actual_cost: 1350.0,
            created_at: ts(1_709_283_600),
        },
        CostEntry {
            id: "CST002".into(),
            job_id: "WO0001".into(),
            description: "Contract fitter, two days".to_string(),
            estimated_cost: 600.0,
            actual_cost: 600.0,
            created_at: ts(1_709_283_600),
        },
    ]
}
