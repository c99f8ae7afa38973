// ABOUTME: SQLite-backed store for the member registry and the attendance log.
// ABOUTME: Provides register, scan, list, remove, and reset operations, each a single atomic unit.

use std::path::Path;

use chrono::{Local, NaiveDateTime};
use rollcall_core::attendance::truncate_to_second;
use rollcall_core::{
    AttendanceRecord, Member, NewMember, ScanReceipt, format_timestamp, parse_timestamp,
};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row, params};
use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("barcode already exists in the system: {0}")]
    DuplicateBarcode(String),

    #[error("barcode is not registered: {0}")]
    UnknownBarcode(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Owns the single process-wide connection to the attendance database.
/// Constructed once at startup and handed to whichever component needs it.
pub struct AttendanceStore {
    conn: Connection,
}

impl AttendanceStore {
    /// Open or create the attendance database at the given path.
    /// Creates the tables if they do not exist yet.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        let store = Self { conn };
        store.init_schema()?;
        tracing::debug!("opened attendance store at {}", path.display());
        Ok(store)
    }

    /// Open a throwaway in-memory store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS members (
                barcode TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                role TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS attendance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                barcode TEXT,
                name TEXT,
                role TEXT,
                date_time TEXT
            );

            CREATE INDEX IF NOT EXISTS idx_attendance_date_time ON attendance(date_time DESC);",
        )?;
        Ok(())
    }

    /// Register a new member. Fails with `DuplicateBarcode` if the barcode is
    /// taken, leaving the existing member untouched.
    pub fn register_member(&self, new: &NewMember) -> Result<Member, StoreError> {
        let result = self.conn.execute(
            "INSERT INTO members (barcode, name, role) VALUES (?1, ?2, ?3)",
            params![new.barcode(), new.name(), new.role()],
        );

        match result {
            Ok(_) => {
                tracing::info!("registered member {} ({})", new.barcode(), new.name());
                Ok(new.clone().into_member())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                tracing::warn!("rejected duplicate barcode {}", new.barcode());
                Err(StoreError::DuplicateBarcode(new.barcode().to_string()))
            }
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    /// Look up a member by barcode.
    pub fn get_member(&self, barcode: &str) -> Result<Option<Member>, StoreError> {
        let member = self
            .conn
            .query_row(
                "SELECT barcode, name, role FROM members WHERE barcode = ?1",
                params![barcode],
                member_from_row,
            )
            .optional()?;
        Ok(member)
    }

    /// Record a scan at the current local time.
    pub fn record_attendance(&self, barcode: &str) -> Result<ScanReceipt, StoreError> {
        self.record_attendance_at(barcode, Local::now().naive_local())
    }

    /// Record a scan at an explicit time. The member lookup and the insert run
    /// in one transaction; an unknown barcode writes nothing.
    pub fn record_attendance_at(
        &self,
        barcode: &str,
        at: NaiveDateTime,
    ) -> Result<ScanReceipt, StoreError> {
        let timestamp = truncate_to_second(at);
        let tx = self.conn.unchecked_transaction()?;

        let member = tx
            .query_row(
                "SELECT barcode, name, role FROM members WHERE barcode = ?1",
                params![barcode],
                member_from_row,
            )
            .optional()?;

        let Some(member) = member else {
            tracing::warn!("scan of unregistered barcode {}", barcode);
            return Err(StoreError::UnknownBarcode(barcode.to_string()));
        };

        tx.execute(
            "INSERT INTO attendance (barcode, name, role, date_time) VALUES (?1, ?2, ?3, ?4)",
            params![
                member.barcode,
                member.name,
                member.role,
                format_timestamp(&timestamp)
            ],
        )?;
        let record_id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::info!("recorded attendance {} for {}", record_id, member.barcode);
        Ok(ScanReceipt {
            record_id,
            name: member.name,
            role: member.role,
            timestamp,
        })
    }

    /// All attendance records, newest first. Records sharing a second are
    /// ordered by id so the most recent insert still comes first.
    pub fn list_attendance(&self) -> Result<Vec<AttendanceRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, barcode, name, role, date_time
             FROM attendance ORDER BY date_time DESC, id DESC",
        )?;

        let records = stmt
            .query_map([], record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("listed {} attendance records", records.len());
        Ok(records)
    }

    /// Number of attendance records currently stored.
    pub fn count_attendance(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM attendance", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// All members in storage order.
    pub fn list_members(&self) -> Result<Vec<Member>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT barcode, name, role FROM members ORDER BY rowid")?;

        let members = stmt
            .query_map([], member_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }

    /// Remove a member. Removing an unknown barcode is not an error; the
    /// return value says whether a row was deleted. Attendance history is kept.
    pub fn remove_member(&self, barcode: &str) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM members WHERE barcode = ?1", params![barcode])?;

        if deleted > 0 {
            tracing::info!("removed member {}", barcode);
        } else {
            tracing::debug!("remove of absent member {} was a no-op", barcode);
        }
        Ok(deleted > 0)
    }

    /// Delete every attendance record. Members are not affected.
    pub fn reset_attendance(&self) -> Result<usize, StoreError> {
        let deleted = self.conn.execute("DELETE FROM attendance", [])?;
        tracing::info!("reset attendance log, {} records deleted", deleted);
        Ok(deleted)
    }
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    Ok(Member {
        barcode: row.get(0)?,
        name: row.get(1)?,
        role: row.get(2)?,
    })
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<AttendanceRecord> {
    let raw: String = row.get(4)?;
    let timestamp = parse_timestamp(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(AttendanceRecord {
        id: row.get(0)?,
        barcode: row.get(1)?,
        name: row.get(2)?,
        role: row.get(3)?,
        timestamp,
    })
}
