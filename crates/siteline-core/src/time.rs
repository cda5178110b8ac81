//! Timestamps
//!
//! All record timestamps are UTC wall-clock values serialized in RFC 3339.

use chrono::{DateTime, Utc};

/// UTC timestamp attached to records and audit entries.
pub type Timestamp = DateTime<Utc>;

/// Current wall-clock time.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Milliseconds since the Unix epoch for a timestamp.
pub fn epoch_ms(ts: &Timestamp) -> i64 {
    ts.timestamp_millis()
}

/// Build a timestamp from whole seconds since the Unix epoch.
///
/// Out-of-range inputs clamp to the epoch; fixture data stays within
/// range by construction.
pub fn from_epoch_secs(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_ms_roundtrip() {
        let ts = from_epoch_secs(1_700_000_000);
        assert_eq!(epoch_ms(&ts), 1_700_000_000_000);
    }
}
