// ABOUTME: Configuration loading and validation for rollcall.
// ABOUTME: Reads ROLLCALL_* environment variables, including the operator credential for resets.

use std::path::PathBuf;

use rollcall_core::OperatorCredential;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("operator user and password must be set together; only {set} is set")]
    PartialCredential { set: &'static str },
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RollcallConfig {
    pub home: PathBuf,
    pub db_path: Option<PathBuf>,
    pub title: String,
    pub operator: Option<OperatorCredential>,
}

pub const DEFAULT_TITLE: &str = "Attendance System";

impl RollcallConfig {
    /// Load configuration from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - ROLLCALL_HOME: data directory (default: ~/.rollcall)
    /// - ROLLCALL_DB: database file (default: $ROLLCALL_HOME/attendance.db)
    /// - ROLLCALL_TITLE: heading shown by the shell and in exports
    /// - ROLLCALL_OPERATOR_USER / ROLLCALL_OPERATOR_PASSWORD: reset credential;
    ///   when both are unset the reset command is disabled
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let home = get("ROLLCALL_HOME").map(PathBuf::from).unwrap_or_else(|| {
            get("HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rollcall")
        });

        let db_path = get("ROLLCALL_DB").map(PathBuf::from);

        let title = get("ROLLCALL_TITLE").unwrap_or_else(|| DEFAULT_TITLE.to_string());

        let operator = match (get("ROLLCALL_OPERATOR_USER"), get("ROLLCALL_OPERATOR_PASSWORD")) {
            (Some(user), Some(password)) => Some(OperatorCredential::new(user, password)),
            (None, None) => None,
            (Some(_), None) => {
                return Err(ConfigError::PartialCredential {
                    set: "ROLLCALL_OPERATOR_USER",
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::PartialCredential {
                    set: "ROLLCALL_OPERATOR_PASSWORD",
                });
            }
        };

        Ok(Self {
            home,
            db_path,
            title,
            operator,
        })
    }
}
