// ABOUTME: Defines the Member record and the validated NewMember registration input.
// ABOUTME: NewMember trims and rejects empty fields so the store only sees complete input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while validating registration input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemberError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
}

/// A registered person, keyed by the barcode printed on their badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub barcode: String,
    pub name: String,
    pub role: String,
}

/// Registration input collected by the shell. Every field is trimmed and
/// guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    barcode: String,
    name: String,
    role: String,
}

impl NewMember {
    /// Validate the three registration fields.
    pub fn new(
        barcode: impl AsRef<str>,
        name: impl AsRef<str>,
        role: impl AsRef<str>,
    ) -> Result<Self, MemberError> {
        Ok(Self {
            barcode: non_empty("barcode", barcode.as_ref())?,
            name: non_empty("name", name.as_ref())?,
            role: non_empty("role", role.as_ref())?,
        })
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    /// The member this input will become once stored.
    pub fn into_member(self) -> Member {
        Member {
            barcode: self.barcode,
            name: self.name,
            role: self.role,
        }
    }
}

fn non_empty(field: &'static str, value: &str) -> Result<String, MemberError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(MemberError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
