// ABOUTME: Defines AttendanceRecord, the immutable snapshot written on every successful scan.
// ABOUTME: Also owns the second-precision timestamp format shared by storage, display, and export.

use chrono::{NaiveDateTime, ParseResult, Timelike};
use serde::{Deserialize, Serialize};

/// Wall-clock format used for `attendance.date_time` and everywhere a scan time is shown.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn parse_timestamp(s: &str) -> ParseResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
}

/// Drop sub-second precision so a stored and re-read timestamp compare equal.
pub fn truncate_to_second(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_nanosecond(0).unwrap_or(ts)
}

/// One attendance event. Name and role are copied from the member at scan
/// time and never follow later changes to the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub role: String,
    #[serde(with = "timestamp_serde")]
    pub timestamp: NaiveDateTime,
}

impl AttendanceRecord {
    /// Log line as shown in the attendance view.
    pub fn display_line(&self) -> String {
        format!(
            "{} - {} ({})",
            format_timestamp(&self.timestamp),
            self.name,
            self.role
        )
    }
}

/// What a successful scan reports back to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReceipt {
    pub record_id: i64,
    pub name: String,
    pub role: String,
    pub timestamp: NaiveDateTime,
}

impl ScanReceipt {
    pub fn message(&self) -> String {
        format!(
            "{} ({}) marked present at {}",
            self.name,
            self.role,
            format_timestamp(&self.timestamp)
        )
    }
}

mod timestamp_serde {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_timestamp(ts))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn timestamp_format_is_second_precision() {
        assert_eq!(format_timestamp(&at(9, 5, 7)), "2026-03-14 09:05:07");
        assert_eq!(parse_timestamp("2026-03-14 09:05:07").unwrap(), at(9, 5, 7));
        assert!(parse_timestamp("2026-03-14T09:05:07Z").is_err());
    }

    #[test]
    fn truncate_drops_nanoseconds() {
        let precise = at(9, 5, 7).with_nanosecond(123_456_789).unwrap();
        assert_eq!(truncate_to_second(precise), at(9, 5, 7));
    }

    #[test]
    fn display_line_matches_log_view() {
        let record = AttendanceRecord {
            id: 1,
            barcode: "A1".to_string(),
            name: "Alice".to_string(),
            role: "Delegate".to_string(),
            timestamp: at(10, 0, 0),
        };
        assert_eq!(record.display_line(), "2026-03-14 10:00:00 - Alice (Delegate)");
    }

    #[test]
    fn receipt_message_names_member_and_time() {
        let receipt = ScanReceipt {
            record_id: 3,
            name: "Bob".to_string(),
            role: "Chair".to_string(),
            timestamp: at(13, 30, 0),
        };
        assert_eq!(receipt.message(), "Bob (Chair) marked present at 2026-03-14 13:30:00");
    }

    #[test]
    fn record_serializes_timestamp_as_text() {
        let record = AttendanceRecord {
            id: 2,
            barcode: "A1".to_string(),
            name: "Alice".to_string(),
            role: "Delegate".to_string(),
            timestamp: at(8, 0, 1),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp"], "2026-03-14 08:00:01");

        let back: AttendanceRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
