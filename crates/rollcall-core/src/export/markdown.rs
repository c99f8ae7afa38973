// ABOUTME: Exports the attendance log as a Markdown report with one table row per scan.
// ABOUTME: Rows follow the order given by the caller, which is newest first from the store.

use std::fmt::Write;

use crate::attendance::{AttendanceRecord, format_timestamp};

/// Render attendance records as a Markdown document.
pub fn export_markdown(title: &str, records: &[AttendanceRecord]) -> String {
    let mut out = String::new();

    writeln!(out, "# {}", title).unwrap();
    writeln!(out).unwrap();

    if records.is_empty() {
        writeln!(out, "No attendance records found.").unwrap();
        return out;
    }

    writeln!(out, "{} attendance record(s).", records.len()).unwrap();
    writeln!(out).unwrap();
    writeln!(out, "| Date/Time | Name | Role | Barcode |").unwrap();
    writeln!(out, "|-----------|------|------|---------|").unwrap();
    for record in records {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            format_timestamp(&record.timestamp),
            escape_cell(&record.name),
            escape_cell(&record.role),
            escape_cell(&record.barcode)
        )
        .unwrap();
    }

    out
}

// Pipes would split the cell.
fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(id: i64, name: &str, role: &str, minute: u32) -> AttendanceRecord {
        AttendanceRecord {
            id,
            barcode: format!("C{}", id),
            name: name.to_string(),
            role: role.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2026, 5, 2)
                .unwrap()
                .and_hms_opt(9, minute, 0)
                .unwrap(),
        }
    }

    #[test]
    fn markdown_export_renders_table() {
        let records = vec![record(2, "Bob", "Chair", 5), record(1, "Alice", "Delegate", 1)];
        let md = export_markdown("Conference Day 1", &records);

        assert!(md.starts_with("# Conference Day 1\n"));
        assert!(md.contains("2 attendance record(s)."));
        assert!(md.contains("| 2026-05-02 09:05:00 | Bob | Chair | C2 |"));
        assert!(md.find("Bob").unwrap() < md.find("Alice").unwrap());
    }

    #[test]
    fn markdown_export_of_empty_log() {
        let md = export_markdown("Empty", &[]);
        assert!(md.contains("No attendance records found."));
        assert!(!md.contains("| Date/Time"));
    }

    #[test]
    fn markdown_export_escapes_pipes() {
        let md = export_markdown("Log", &[record(1, "A|B", "Press", 0)]);
        assert!(md.contains("| A\\|B | Press |"));
    }
}
