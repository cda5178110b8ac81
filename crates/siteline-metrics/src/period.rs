//! Calendar periods
//!
//! Attendance denominators are calendar lengths: the full month length
//! for a monthly period (unmarked days still divide into it) and a fixed
//! seven days for a weekly one.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// A period metrics are computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    /// One calendar month.
    Month {
        /// Calendar year.
        year: i32,
        /// Month number, 1-12.
        month: u32,
    },
    /// Seven days starting at `start`.
    Week {
        /// First day of the week.
        start: NaiveDate,
    },
}

impl Period {
    /// A month period, `None` for an out-of-range month number.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self::Month { year, month })
    }

    /// A week period starting at the given day.
    pub fn week(start: NaiveDate) -> Self {
        Self::Week { start }
    }

    /// Calendar length of the period in days.
    pub fn days(&self) -> u32 {
        match *self {
            Self::Month { year, month } => {
                let first = NaiveDate::from_ymd_opt(year, month, 1);
                let next = if month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(year, month + 1, 1)
                };
                match (first, next) {
                    (Some(first), Some(next)) => {
                        next.signed_duration_since(first).num_days() as u32
                    }
                    // Unreachable for periods built via `Period::month`.
                    _ => 30,
                }
            }
            Self::Week { .. } => 7,
        }
    }

    /// Whether the given day falls inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::Month { year, month } => date.year() == year && date.month() == month,
            Self::Week { start } => {
                date >= start
                    && start
                        .checked_add_days(Days::new(7))
                        .is_some_and(|end| date < end)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_lengths() {
        assert_eq!(Period::month(2024, 3).unwrap().days(), 31);
        assert_eq!(Period::month(2024, 2).unwrap().days(), 29); // leap year
        assert_eq!(Period::month(2023, 2).unwrap().days(), 28);
        assert_eq!(Period::month(2024, 12).unwrap().days(), 31);
        assert!(Period::month(2024, 13).is_none());
    }

    #[test]
    fn test_week_is_fixed_seven_days() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let week = Period::week(start);
        assert_eq!(week.days(), 7);
        assert!(week.contains(start));
        assert!(week.contains(start + chrono::Duration::days(6)));
        assert!(!week.contains(start + chrono::Duration::days(7)));
        assert!(!week.contains(start - chrono::Duration::days(1)));
    }

    #[test]
    fn test_month_containment() {
        let march = Period::month(2024, 3).unwrap();
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(march.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!march.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }
}
