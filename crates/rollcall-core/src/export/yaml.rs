// ABOUTME: Exports the attendance log as a YAML sequence of records.
// ABOUTME: Uses serde_yaml; timestamps serialize in the same text form as the database.

use crate::attendance::AttendanceRecord;

/// Export attendance records as YAML, preserving the given order.
pub fn export_yaml(records: &[AttendanceRecord]) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(records)
}
