// ABOUTME: Manages the rollcall home directory: database location and export output.
// ABOUTME: Handles directory creation and writing the Markdown and YAML attendance exports.

use std::fs;
use std::path::{Path, PathBuf};

use rollcall_core::AttendanceRecord;
use rollcall_core::export::{export_markdown, export_yaml};
use thiserror::Error;

/// File name of the database inside the home directory when not overridden.
pub const DEFAULT_DB_FILE: &str = "attendance.db";

/// Errors that can occur while managing the data directory.
#[derive(Debug, Error)]
pub enum DataDirError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml export error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Paths of the files written by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub markdown: PathBuf,
    pub yaml: PathBuf,
}

/// The rollcall home directory layout.
#[derive(Debug, Clone)]
pub struct DataDir {
    home: PathBuf,
    db_path: PathBuf,
}

impl DataDir {
    /// Create a DataDir rooted at `home`. The database lives at `db_path` when
    /// given, otherwise at `<home>/attendance.db`. Creates the home directory
    /// and the database's parent directory if missing.
    pub fn new(home: PathBuf, db_path: Option<PathBuf>) -> Result<Self, DataDirError> {
        fs::create_dir_all(&home)?;
        let db_path = db_path.unwrap_or_else(|| home.join(DEFAULT_DB_FILE));
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { home, db_path })
    }

    /// Return the home directory path.
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Return the database file path.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Default export directory, `<home>/exports`.
    pub fn exports_dir(&self) -> PathBuf {
        self.home.join("exports")
    }

    /// Write `attendance.md` and `attendance.yaml` into `out_dir`.
    pub fn write_exports(
        out_dir: &Path,
        title: &str,
        records: &[AttendanceRecord],
    ) -> Result<ExportPaths, DataDirError> {
        fs::create_dir_all(out_dir)?;

        let markdown = out_dir.join("attendance.md");
        fs::write(&markdown, export_markdown(title, records))?;

        let yaml = out_dir.join("attendance.yaml");
        fs::write(&yaml, export_yaml(records)?)?;

        tracing::info!(
            "exported {} attendance records to {}",
            records.len(),
            out_dir.display()
        );
        Ok(ExportPaths { markdown, yaml })
    }
}
