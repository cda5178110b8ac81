//! Attendance and productivity aggregation

use crate::period::Period;
use siteline_core::{AttendanceRecord, AttendanceStatus, ProductivityRecord, UserId};

fn average(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / f64::from(count)
    }
}

/// Attendance percentage for one employee over a period.
///
/// Counts `Present` days against the period's calendar length: unmarked
/// days count as neither present nor absent but still divide into the
/// denominator.
pub fn attendance_percentage(
    records: &[AttendanceRecord],
    employee: &UserId,
    period: &Period,
) -> u32 {
    let present = records
        .iter()
        .filter(|r| {
            &r.employee_id == employee
                && period.contains(r.date)
                && r.status == AttendanceStatus::Present
        })
        .count();
    (present as f64 / f64::from(period.days()) * 100.0).round() as u32
}

/// Productivity score (0-100) for one employee over a period.
///
/// Weighted blend of hours against an 8-hour day (30%), quality on a
/// 0-10 scale (40%), and efficiency on a 0-100 scale (30%). A period
/// with no records scores 0 for every factor.
pub fn productivity_score(
    records: &[ProductivityRecord],
    employee: &UserId,
    period: &Period,
) -> u32 {
    let in_period = || {
        records
            .iter()
            .filter(|r| &r.employee_id == employee && period.contains(r.date))
    };
    let avg_hours = average(in_period().map(|r| r.hours_worked));
    let avg_quality = average(in_period().map(|r| r.quality_score));
    let avg_efficiency = average(in_period().map(|r| r.efficiency));

    let blended =
        avg_hours / 8.0 * 0.30 + avg_quality / 10.0 * 0.40 + avg_efficiency / 100.0 * 0.30;
    (blended * 100.0).round() as u32
}

/// Average quality score for one employee over a period; 0 with no
/// records. Feeds the quality bonus.
pub fn average_quality(
    records: &[ProductivityRecord],
    employee: &UserId,
    period: &Period,
) -> f64 {
    average(
        records
            .iter()
            .filter(|r| &r.employee_id == employee && period.contains(r.date))
            .map(|r| r.quality_score),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use siteline_core::time::from_epoch_secs;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn attendance(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: format!("ATT{day:03}").into(),
            employee_id: "E1".into(),
            date: date(day),
            status,
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
    fn test_attendance_divides_by_calendar_length() {
        // Twenty present days in a 31-day month: round(20/31*100) = 65.
        let records: Vec<AttendanceRecord> = (1..=20)
            .map(|d| attendance(d, AttendanceStatus::Present))
            .collect();
        let march = Period::month(2024, 3).unwrap();
        assert_eq!(attendance_percentage(&records, &"E1".into(), &march), 65);
    }

    #[test]
    fn test_attendance_counts_present_only() {
        let records = vec![
            attendance(1, AttendanceStatus::Present),
            attendance(2, AttendanceStatus::Absent),
            attendance(3, AttendanceStatus::HalfDay),
            attendance(4, AttendanceStatus::Leave),
        ];
        let march = Period::month(2024, 3).unwrap();
        // 1/31 rounds to 3.
        assert_eq!(attendance_percentage(&records, &"E1".into(), &march), 3);
    }

    #[test]
    fn test_attendance_ignores_other_employees_and_periods() {
        let mut records = vec![attendance(1, AttendanceStatus::Present)];
        records.push(AttendanceRecord {
            employee_id: "E2".into(),
            ..attendance(2, AttendanceStatus::Present)
        });
        let april = Period::month(2024, 4).unwrap();
        assert_eq!(attendance_percentage(&records, &"E1".into(), &april), 0);
    }

    #[test]
    fn test_productivity_score_blend() {
        // avg hours 8 (factor 0.30), avg quality 10 (0.40), avg
        // efficiency 100 (0.30): a perfect 100.
        let records = vec![productivity(1, 8.0, 10.0, 100.0)];
        let march = Period::month(2024, 3).unwrap();
        assert_eq!(productivity_score(&records, &"E1".into(), &march), 100);

        // avg hours 6, quality 8, efficiency 75:
        // 0.75*0.30 + 0.8*0.40 + 0.75*0.30 = 0.77 -> 77.
        let records = vec![productivity(2, 6.0, 8.0, 75.0)];
        assert_eq!(productivity_score(&records, &"E1".into(), &march), 77);
    }

    #[test]
    fn test_empty_period_scores_zero() {
        let march = Period::month(2024, 3).unwrap();
        assert_eq!(productivity_score(&[], &"E1".into(), &march), 0);
        assert_eq!(average_quality(&[], &"E1".into(), &march), 0.0);
    }
}
