// ABOUTME: The interaction shell: reads entries and runs one store operation per action.
// ABOUTME: All prompt input is validated before the store is touched; errors never end the loop.

use std::io;
use std::path::PathBuf;

use rollcall_core::{MemberError, NewMember, OperatorCredential, ScanReceipt};
use rollcall_store::{AttendanceStore, DataDir, DataDirError, StoreError};
use thiserror::Error;

use crate::command::{Command, HELP};
use crate::config::RollcallConfig;
use crate::console::Console;

/// Errors surfaced to the operator. Everything except `Io` is recoverable.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("reset is disabled: no operator credential is configured")]
    ResetDisabled,

    #[error("unknown command ':{0}', type :help for a list")]
    UnknownCommand(String),

    #[error(transparent)]
    Member(#[from] MemberError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    DataDir(#[from] DataDirError),

    #[error("console error: {0}")]
    Io(#[from] io::Error),
}

impl ShellError {
    /// Dialog title and operator-facing message for this error.
    fn notice(&self) -> (&'static str, String) {
        match self {
            ShellError::Store(StoreError::DuplicateBarcode(_)) => {
                ("Error", "Barcode already exists in the system.".to_string())
            }
            ShellError::Store(StoreError::UnknownBarcode(_)) => (
                "Unknown Barcode",
                "The scanned barcode is not registered.".to_string(),
            ),
            ShellError::InvalidCredentials => {
                ("Error", "Invalid username or password.".to_string())
            }
            other => ("Error", other.to_string()),
        }
    }
}

/// Settings the shell needs besides the store.
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub title: String,
    pub operator: Option<OperatorCredential>,
    pub exports_dir: PathBuf,
}

impl ShellOptions {
    pub fn from_config(config: &RollcallConfig, data: &DataDir) -> Self {
        Self {
            title: config.title.clone(),
            operator: config.operator.clone(),
            exports_dir: data.exports_dir(),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Drives a Console against an owned AttendanceStore.
pub struct Shell<C> {
    console: C,
    store: AttendanceStore,
    options: ShellOptions,
}

impl<C: Console> Shell<C> {
    pub fn new(console: C, store: AttendanceStore, options: ShellOptions) -> Self {
        Self {
            console,
            store,
            options,
        }
    }

    pub fn store(&self) -> &AttendanceStore {
        &self.store
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    /// Read entries until `:quit` or end of input. Only a failing console
    /// ends the loop with an error.
    pub fn run(&mut self) -> Result<(), ShellError> {
        let banner = format!("{} (type :help for commands)", self.options.title);
        self.console.append(&banner)?;

        while let Some(line) = self.console.entry("Scan Barcode Below")? {
            let Some(command) = Command::parse(&line) else {
                continue;
            };

            match self.dispatch(command) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(ShellError::Io(e)) => return Err(ShellError::Io(e)),
                Err(e) => self.report(&e)?,
            }
        }

        tracing::debug!("shell loop finished");
        Ok(())
    }

    fn dispatch(&mut self, command: Command) -> Result<Flow, ShellError> {
        match command {
            Command::Scan(barcode) => {
                let receipt = self.scan(&barcode)?;
                self.console.info("Attendance Marked", &receipt.message())?;
            }
            Command::AddMember => self.add_member()?,
            Command::ViewLog => self.view_attendance_log()?,
            Command::ListMembers => self.member_list()?,
            Command::RemoveMember => self.remove_member()?,
            Command::ResetLogs => self.reset_logs()?,
            Command::Export => self.export()?,
            Command::Help => {
                for line in HELP {
                    self.console.append(line)?;
                }
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Unknown(word) => return Err(ShellError::UnknownCommand(word)),
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &ShellError) -> Result<(), ShellError> {
        let (title, message) = err.notice();
        self.console.error(title, &message)?;
        Ok(())
    }

    /// Mark attendance for a scanned barcode.
    pub fn scan(&mut self, barcode: &str) -> Result<ScanReceipt, ShellError> {
        Ok(self.store.record_attendance(barcode.trim())?)
    }

    /// Prompt for barcode, name, and role, then register the member.
    /// Cancelling or leaving any prompt blank aborts without a store call.
    pub fn add_member(&mut self) -> Result<(), ShellError> {
        let Some(barcode) = self.ask_required("Scan Barcode", "Please scan or enter the barcode:")?
        else {
            return Ok(());
        };
        let Some(name) = self.ask_required("Member Name", "Enter the member's name:")? else {
            return Ok(());
        };
        let Some(role) = self.ask_required("Member Role", "Enter the member's role:")? else {
            return Ok(());
        };

        let new = NewMember::new(barcode, name, role)?;
        let member = self.store.register_member(&new)?;
        self.console.info(
            "Success",
            &format!("Member '{}' added successfully!", member.name),
        )?;
        Ok(())
    }

    /// Show the attendance log, newest first.
    pub fn view_attendance_log(&mut self) -> Result<(), ShellError> {
        let records = self.store.list_attendance()?;

        self.console.append("Attendance Log")?;
        if records.is_empty() {
            self.console.append("No attendance records found.")?;
        }
        for record in &records {
            self.console.append(&record.display_line())?;
        }
        Ok(())
    }

    /// Show every registered member.
    pub fn member_list(&mut self) -> Result<(), ShellError> {
        let members = self.store.list_members()?;

        self.console.append("Member List")?;
        if members.is_empty() {
            self.console.append("No members found.")?;
        }
        for m in &members {
            self.console.append(&format!(
                "Barcode: {} | Name: {} | Role: {}",
                m.barcode, m.name, m.role
            ))?;
        }
        Ok(())
    }

    /// Prompt for a barcode, remove that member, then refresh the member list.
    pub fn remove_member(&mut self) -> Result<(), ShellError> {
        let Some(barcode) = self.ask_required(
            "Remove Member",
            "Enter the barcode of the member to remove:",
        )?
        else {
            return Ok(());
        };

        if self.store.remove_member(&barcode)? {
            self.console.info("Success", "Member removed successfully!")?;
        } else {
            self.console.info(
                "Remove Member",
                &format!("No member with barcode '{}'; nothing to remove.", barcode),
            )?;
        }
        self.member_list()
    }

    /// Operator login, confirmation, then delete every attendance record.
    pub fn reset_logs(&mut self) -> Result<(), ShellError> {
        let Some(operator) = self.options.operator.clone() else {
            return Err(ShellError::ResetDisabled);
        };

        let username = self
            .console
            .ask("Login", "Enter your username:")?
            .unwrap_or_default();
        let password = self
            .console
            .ask_secret("Login", "Enter your password:")?
            .unwrap_or_default();

        if !operator.verify(username.trim(), &password) {
            tracing::warn!("reset refused: bad operator credentials");
            return Err(ShellError::InvalidCredentials);
        }

        if !self.console.confirm(
            "Confirm Reset",
            "Are you sure you want to reset all attendance logs?",
        )? {
            tracing::debug!("reset cancelled at confirmation");
            return Ok(());
        }

        tracing::info!("attendance reset by operator {}", operator.username());
        self.store.reset_attendance()?;
        self.console
            .info("Success", "Attendance logs have been reset.")?;
        Ok(())
    }

    /// Write the attendance log as Markdown and YAML into the exports directory.
    pub fn export(&mut self) -> Result<(), ShellError> {
        let records = self.store.list_attendance()?;
        let paths =
            DataDir::write_exports(&self.options.exports_dir, &self.options.title, &records)?;
        self.console.info(
            "Export",
            &format!(
                "Wrote {} and {}",
                paths.markdown.display(),
                paths.yaml.display()
            ),
        )?;
        Ok(())
    }

    fn ask_required(&mut self, title: &str, message: &str) -> Result<Option<String>, ShellError> {
        let answer = self.console.ask(title, message)?;
        Ok(answer
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::TerminalConsole;
    use crate::testing::{Reply, ScriptedConsole};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn shell(replies: Vec<Reply>, operator: Option<OperatorCredential>) -> Shell<ScriptedConsole> {
        let store = AttendanceStore::open_in_memory().unwrap();
        let options = ShellOptions {
            title: "Test Event".to_string(),
            operator,
            exports_dir: std::env::temp_dir().join("rollcall-shell-test-exports"),
        };
        Shell::new(ScriptedConsole::new(replies), store, options)
    }

    fn operator() -> Option<OperatorCredential> {
        Some(OperatorCredential::new("operator", "3487"))
    }

    fn register(shell: &Shell<ScriptedConsole>, barcode: &str, name: &str, role: &str) {
        shell
            .store()
            .register_member(&NewMember::new(barcode, name, role).unwrap())
            .unwrap();
    }

    #[test]
    fn add_member_prompts_in_order_and_registers() {
        let mut sh = shell(
            vec![Reply::text("A1"), Reply::text("Alice"), Reply::text("Delegate")],
            None,
        );

        sh.add_member().unwrap();

        let member = sh.store().get_member("A1").unwrap().unwrap();
        assert_eq!(member.name, "Alice");
        assert_eq!(member.role, "Delegate");

        let console = sh.console();
        assert_eq!(
            console.asked(),
            vec!["Scan Barcode", "Member Name", "Member Role"]
        );
        assert!(console.transcript().contains("Member 'Alice' added successfully!"));
    }

    #[test]
    fn add_member_aborts_on_blank_or_cancel() {
        let mut sh = shell(vec![Reply::text("A1"), Reply::text("   ")], None);
        sh.add_member().unwrap();
        assert!(sh.store().list_members().unwrap().is_empty());
        assert_eq!(sh.console().asked(), vec!["Scan Barcode", "Member Name"]);

        let mut sh = shell(vec![Reply::Cancel], None);
        sh.add_member().unwrap();
        assert!(sh.store().list_members().unwrap().is_empty());
    }

    #[test]
    fn add_member_reports_duplicate() {
        let mut sh = shell(
            vec![Reply::text("A1"), Reply::text("Mallory"), Reply::text("Press")],
            None,
        );
        register(&sh, "A1", "Alice", "Delegate");

        let err = sh.add_member().unwrap_err();
        assert!(matches!(err, ShellError::Store(StoreError::DuplicateBarcode(_))));
        assert_eq!(err.notice().1, "Barcode already exists in the system.");
        assert_eq!(sh.store().get_member("A1").unwrap().unwrap().name, "Alice");
    }

    #[test]
    fn scan_trims_and_returns_receipt() {
        let mut sh = shell(vec![], None);
        register(&sh, "A1", "Alice", "Delegate");

        let receipt = sh.scan("  A1 ").unwrap();
        assert_eq!(receipt.name, "Alice");
        assert_eq!(sh.store().count_attendance().unwrap(), 1);

        let err = sh.scan("ZZ").unwrap_err();
        assert_eq!(err.notice().0, "Unknown Barcode");
    }

    #[test]
    fn reset_requires_credentials_then_confirmation() {
        let mut sh = shell(
            vec![
                Reply::text("operator"),
                Reply::text("wrong"),
                Reply::text("operator"),
                Reply::text("3487"),
                Reply::No,
                Reply::text("operator"),
                Reply::text("3487"),
                Reply::Yes,
            ],
            operator(),
        );
        register(&sh, "A1", "Alice", "Delegate");
        sh.scan("A1").unwrap();

        let err = sh.reset_logs().unwrap_err();
        assert!(matches!(err, ShellError::InvalidCredentials));
        assert_eq!(sh.store().count_attendance().unwrap(), 1);

        sh.reset_logs().unwrap();
        assert_eq!(sh.store().count_attendance().unwrap(), 1, "declined confirmation keeps logs");

        sh.reset_logs().unwrap();
        assert_eq!(sh.store().count_attendance().unwrap(), 0);
        assert_eq!(sh.store().list_members().unwrap().len(), 1);
        assert!(sh.console().transcript().contains("Attendance logs have been reset."));
    }

    #[test]
    fn reset_is_disabled_without_operator() {
        let mut sh = shell(vec![], None);
        let err = sh.reset_logs().unwrap_err();
        assert!(matches!(err, ShellError::ResetDisabled));
        assert!(sh.console().asked().is_empty());
    }

    #[test]
    fn remove_member_refreshes_list() {
        let mut sh = shell(vec![Reply::text("A1"), Reply::text("A1")], None);
        register(&sh, "A1", "Alice", "Delegate");
        register(&sh, "B7", "Bob", "Chair");

        sh.remove_member().unwrap();
        let out = sh.console().transcript();
        assert!(out.contains("Member removed successfully!"));
        assert!(out.contains("Barcode: B7 | Name: Bob | Role: Chair"));
        assert!(!out.contains("Barcode: A1"));

        sh.remove_member().unwrap();
        assert!(sh.console().transcript().contains("nothing to remove"));
    }

    #[test]
    fn views_show_placeholders_when_empty() {
        let mut sh = shell(vec![], None);
        sh.view_attendance_log().unwrap();
        sh.member_list().unwrap();

        let out = sh.console().transcript();
        assert!(out.contains("No attendance records found."));
        assert!(out.contains("No members found."));
    }

    #[test]
    fn run_reports_errors_and_keeps_going() {
        let mut sh = shell(
            vec![
                Reply::text("unknown-code"),
                Reply::text(":bogus"),
                Reply::text("A1"),
                Reply::text(":log"),
            ],
            None,
        );
        register(&sh, "A1", "Alice", "Delegate");

        sh.run().unwrap();

        let out = sh.console().transcript();
        assert!(out.contains("The scanned barcode is not registered."));
        assert!(out.contains("unknown command ':bogus'"));
        assert!(out.contains("Alice (Delegate) marked present at"));
        assert!(out.contains(" - Alice (Delegate)"));
        assert_eq!(sh.store().count_attendance().unwrap(), 1);
    }

    #[test]
    fn run_scans_colon_barcode_through_escape() {
        let mut sh = shell(
            vec![
                Reply::text(":add"),
                Reply::text(":VIP1"),
                Reply::text("Alice"),
                Reply::text("Delegate"),
                Reply::text("::VIP1"),
            ],
            None,
        );

        sh.run().unwrap();

        assert!(sh.store().get_member(":VIP1").unwrap().is_some());
        assert_eq!(sh.store().count_attendance().unwrap(), 1);
        assert_eq!(sh.store().list_attendance().unwrap()[0].barcode, ":VIP1");
    }

    #[test]
    fn run_survives_invalid_utf8_from_terminal() {
        let store = AttendanceStore::open_in_memory().unwrap();
        store
            .register_member(&NewMember::new("A1", "Alice", "Delegate").unwrap())
            .unwrap();
        let options = ShellOptions {
            title: "Test Event".to_string(),
            operator: None,
            exports_dir: std::env::temp_dir().join("rollcall-shell-test-exports"),
        };
        let input = Cursor::new(b"\xff\xfe\nA1\n".to_vec());
        let mut sh = Shell::new(TerminalConsole::new(input, Vec::new()), store, options);

        sh.run().unwrap();

        assert_eq!(sh.store().count_attendance().unwrap(), 1);
    }

    #[test]
    fn run_stops_at_quit() {
        let mut sh = shell(vec![Reply::text(":quit"), Reply::text("A1")], None);
        register(&sh, "A1", "Alice", "Delegate");

        sh.run().unwrap();
        assert_eq!(sh.store().count_attendance().unwrap(), 0);
    }

    #[test]
    fn export_writes_into_exports_dir() {
        let dir = TempDir::new().unwrap();
        let store = AttendanceStore::open_in_memory().unwrap();
        let options = ShellOptions {
            title: "Export Event".to_string(),
            operator: None,
            exports_dir: dir.path().join("exports"),
        };
        let mut sh = Shell::new(ScriptedConsole::new(vec![]), store, options);
        register(&sh, "A1", "Alice", "Delegate");
        sh.scan("A1").unwrap();

        sh.export().unwrap();

        let md = std::fs::read_to_string(dir.path().join("exports/attendance.md")).unwrap();
        assert!(md.contains("# Export Event"));
        assert!(md.contains("| Alice | Delegate | A1 |"));
        assert!(dir.path().join("exports/attendance.yaml").exists());
    }
}
