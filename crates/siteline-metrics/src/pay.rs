//! Payment computation
//!
//! Pay is `base + attendance bonus + productivity bonus + quality
//! bonus`, each bonus a step function of its metric against base pay and
//! rounded to the nearest integer independently before summing. The
//! steps are configuration candidates; the defaults reproduce the
//! dashboard's original thresholds exactly and are treated as
//! authoritative.

use crate::period::Period;
use crate::scores::{attendance_percentage, average_quality, productivity_score};
use serde::{Deserialize, Serialize};
use siteline_core::{AttendanceRecord, ProductivityRecord, UserId};

/// One step of a rate schedule: applies when the metric is at least
/// `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Inclusive lower bound on the metric.
    pub min: f64,
    /// Rate applied at or above the bound.
    pub rate: f64,
}

impl Step {
    /// Build a step.
    pub const fn new(min: f64, rate: f64) -> Self {
        Self { min, rate }
    }
}

/// Rate for a metric value against a schedule ordered highest bound
/// first; 0 when no step matches.
fn rate_for(value: f64, steps: &[Step]) -> f64 {
    steps
        .iter()
        .find(|step| value >= step.min)
        .map(|step| step.rate)
        .unwrap_or(0.0)
}

/// Bonus and multiplier schedules.
///
/// Each schedule is ordered highest bound first. Overrides load from
/// configuration; omitted schedules keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusPolicy {
    /// Attendance-percentage bonus schedule.
    pub attendance: Vec<Step>,
    /// Productivity-score bonus schedule.
    pub productivity: Vec<Step>,
    /// Average-quality bonus schedule.
    pub quality: Vec<Step>,
    /// Productivity-score payment multiplier schedule.
    pub multiplier: Vec<Step>,
}

impl Default for BonusPolicy {
    fn default() -> Self {
        Self {
            attendance: vec![Step::new(95.0, 0.10), Step::new(90.0, 0.05)],
            productivity: vec![
                Step::new(90.0, 0.15),
                Step::new(80.0, 0.10),
                Step::new(70.0, 0.05),
            ],
            quality: vec![Step::new(9.0, 0.10), Step::new(8.0, 0.05)],
            multiplier: vec![
                Step::new(90.0, 1.2),
                Step::new(80.0, 1.1),
                Step::new(70.0, 1.0),
                Step::new(60.0, 0.95),
                Step::new(0.0, 0.8),
            ],
        }
    }
}

/// Payment multiplier for a productivity score.
pub fn payment_multiplier(score: u32, policy: &BonusPolicy) -> f64 {
    rate_for(f64::from(score), &policy.multiplier)
}

/// A computed payment and the metrics that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentBreakdown {
    /// Base pay the bonuses apply to.
    pub base_pay: f64,
    /// Attendance percentage over the period.
    pub attendance_percentage: u32,
    /// Productivity score over the period.
    pub productivity_score: u32,
    /// Average quality score over the period.
    pub average_quality: f64,
    /// Attendance bonus, rounded to the nearest integer.
    pub attendance_bonus: f64,
    /// Productivity bonus, rounded to the nearest integer.
    pub productivity_bonus: f64,
    /// Quality bonus, rounded to the nearest integer.
    pub quality_bonus: f64,
    /// Base pay plus all bonuses.
    pub total: f64,
}

/// Compute one employee's payment for a period.
///
/// Pure over its inputs: identical records, period, base pay, and policy
/// always produce an identical breakdown.
pub fn payment(
    attendance_records: &[AttendanceRecord],
    productivity_records: &[ProductivityRecord],
    employee: &UserId,
    period: &Period,
    base_pay: f64,
    policy: &BonusPolicy,
) -> PaymentBreakdown {
    let attendance = attendance_percentage(attendance_records, employee, period);
    let score = productivity_score(productivity_records, employee, period);
    let quality = average_quality(productivity_records, employee, period);

    let attendance_bonus = (base_pay * rate_for(f64::from(attendance), &policy.attendance)).round();
    let productivity_bonus = (base_pay * rate_for(f64::from(score), &policy.productivity)).round();
    let quality_bonus = (base_pay * rate_for(quality, &policy.quality)).round();

    PaymentBreakdown {
        base_pay,
        attendance_percentage: attendance,
        productivity_score: score,
        average_quality: quality,
        attendance_bonus,
        productivity_bonus,
        quality_bonus,
        total: base_pay + attendance_bonus + productivity_bonus + quality_bonus,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use siteline_core::time::from_epoch_secs;
    use siteline_core::AttendanceStatus;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn present(day: u32) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("ATT{day:03}").into(),
            employee_id: "E1".into(),
            date: date(day),
            status: AttendanceStatus::Present,
            notes: None,
            marked_by: "U5".into(),
            created_at: from_epoch_secs(1_709_500_000),
        }
    }

    fn productivity(day: u32, hours: f64, quality: f64, efficiency: f64) -> ProductivityRecord {
        ProductivityRecord {
            id: format!("PRD{day:03}").into(),
            employee_id: "E1".into(),
            date: date(day),
            hours_worked: hours,
            quality_score: quality,
            efficiency,
            notes: None,
            created_at: from_epoch_secs(1_709_500_000),
        }
    }

    #[test]
    fn test_multiplier_steps() {
        let policy = BonusPolicy::default();
        assert_eq!(payment_multiplier(95, &policy), 1.2);
        assert_eq!(payment_multiplier(90, &policy), 1.2);
        assert_eq!(payment_multiplier(89, &policy), 1.1);
        assert_eq!(payment_multiplier(75, &policy), 1.0);
        assert_eq!(payment_multiplier(60, &policy), 0.95);
        assert_eq!(payment_multiplier(59, &policy), 0.8);
        assert_eq!(payment_multiplier(0, &policy), 0.8);
    }

    #[test]
    fn test_payment_bonus_thresholds() {
        // 30 of 31 days present: 97% -> 10% attendance bonus.
        let attendance: Vec<AttendanceRecord> = (1..=30).map(present).collect();
        // Score: 8h, quality 8.5, efficiency 85 ->
        // 0.30 + 0.34 + 0.255 = 0.895 -> 90 -> 15% productivity bonus;
        // quality 8.5 -> 5% quality bonus.
        let productivity = vec![productivity(1, 8.0, 8.5, 85.0)];
        let march = Period::month(2024, 3).unwrap();

        let breakdown = payment(
            &attendance,
            &productivity,
            &"E1".into(),
            &march,
            1000.0,
            &BonusPolicy::default(),
        );
        assert_eq!(breakdown.attendance_percentage, 97);
        assert_eq!(breakdown.productivity_score, 90);
        assert_eq!(breakdown.attendance_bonus, 100.0);
        assert_eq!(breakdown.productivity_bonus, 150.0);
        assert_eq!(breakdown.quality_bonus, 50.0);
        assert_eq!(breakdown.total, 1300.0);
    }

    #[test]
    fn test_bonuses_round_independently() {
        // Base 333: 5% = 16.65 -> 17, 10% = 33.3 -> 33.
        let attendance: Vec<AttendanceRecord> = (1..=29).map(present).collect(); // 94%
        let productivity = vec![productivity(1, 8.0, 8.0, 80.0)]; // score 86, quality 8
        let march = Period::month(2024, 3).unwrap();

        let breakdown = payment(
            &attendance,
            &productivity,
            &"E1".into(),
            &march,
            333.0,
            &BonusPolicy::default(),
        );
        assert_eq!(breakdown.attendance_percentage, 94);
        assert_eq!(breakdown.attendance_bonus, 17.0); // 333 * 0.05
        assert_eq!(breakdown.productivity_bonus, 33.0); // 333 * 0.10
        assert_eq!(breakdown.quality_bonus, 17.0); // 333 * 0.05
        assert_eq!(breakdown.total, 333.0 + 17.0 + 33.0 + 17.0);
    }

    #[test]
    fn test_payment_is_pure() {
        let attendance: Vec<AttendanceRecord> = (1..=20).map(present).collect();
        let productivity = vec![productivity(1, 7.5, 9.0, 90.0)];
        let march = Period::month(2024, 3).unwrap();
        let policy = BonusPolicy::default();

        let first = payment(&attendance, &productivity, &"E1".into(), &march, 1450.0, &policy);
        let second = payment(&attendance, &productivity, &"E1".into(), &march, 1450.0, &policy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_records_means_base_pay_only() {
        let march = Period::month(2024, 3).unwrap();
        let breakdown = payment(&[], &[], &"E1".into(), &march, 900.0, &BonusPolicy::default());
        assert_eq!(breakdown.total, 900.0);
        assert_eq!(breakdown.productivity_score, 0);
    }
}
