//! Attendance and productivity records
//!
//! Both families are marked per `(employee, date)`; a re-mark for the
//! same key overwrites the measures but keeps the original record ID.

use crate::identifiers::{AttendanceId, ProductivityId, UserId};
use crate::time::Timestamp;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attendance status for one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Present for the full day.
    Present,
    /// Absent without leave.
    Absent,
    /// Present for part of the day.
    #[serde(rename = "Half Day")]
    HalfDay,
    /// Approved leave.
    Leave,
}

/// One employee-day attendance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Generated identifier (`ATT` + three digits).
    pub id: AttendanceId,
    /// Employee the record belongs to.
    pub employee_id: UserId,
    /// Calendar day being marked.
    pub date: NaiveDate,
    /// Status for the day.
    pub status: AttendanceStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Principal who marked the day.
    pub marked_by: UserId,
    /// Creation time of the original mark.
    pub created_at: Timestamp,
}

/// Input for marking (or re-marking) an attendance day.
#[derive(Debug, Clone)]
pub struct AttendanceMark {
    /// Employee being marked.
    pub employee_id: UserId,
    /// Day being marked.
    pub date: NaiveDate,
    /// Status for the day.
    pub status: AttendanceStatus,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Principal doing the marking.
    pub marked_by: UserId,
}

/// One employee-day productivity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductivityRecord {
    /// Generated identifier (`PRD` + three digits).
    pub id: ProductivityId,
    /// Employee the record belongs to.
    pub employee_id: UserId,
    /// Calendar day being measured.
    pub date: NaiveDate,
    /// Hours worked that day.
    pub hours_worked: f64,
    /// Quality score on a 0-10 scale.
    pub quality_score: f64,
    /// Efficiency on a 0-100 scale.
    pub efficiency: f64,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creation time of the original mark.
    pub created_at: Timestamp,
}

/// Input for marking (or re-marking) a productivity day.
#[derive(Debug, Clone)]
pub struct ProductivityMark {
    /// Employee being measured.
    pub employee_id: UserId,
    /// Day being measured.
    pub date: NaiveDate,
    /// Hours worked.
    pub hours_worked: f64,
    /// Quality score, 0-10.
    pub quality_score: f64,
    /// Efficiency, 0-100.
    pub efficiency: f64,
    /// Free-form notes.
    pub notes: Option<String>,
}
