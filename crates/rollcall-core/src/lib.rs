// ABOUTME: Core library for rollcall, containing member and attendance domain types.
// ABOUTME: This crate defines the shared data model used by the store and the shell.

pub mod attendance;
pub mod credential;
pub mod export;
pub mod member;

pub use attendance::{
    AttendanceRecord, ScanReceipt, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp,
};
pub use credential::OperatorCredential;
pub use member::{Member, MemberError, NewMember};
