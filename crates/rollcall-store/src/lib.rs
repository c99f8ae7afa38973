// ABOUTME: Persistence layer for rollcall, owning the member registry and attendance log.
// ABOUTME: Provides the SQLite-backed AttendanceStore and the on-disk DataDir layout.

pub mod manager;
pub mod sqlite;

pub use manager::{DEFAULT_DB_FILE, DataDir, DataDirError, ExportPaths};
pub use sqlite::{AttendanceStore, StoreError};
