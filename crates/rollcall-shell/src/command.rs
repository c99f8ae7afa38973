// ABOUTME: Parses a line from the main entry field into a shell Command.
// ABOUTME: Plain text is a barcode scan; a leading colon selects an operator action.

/// One operator action, as typed at the main entry field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Scan(String),
    AddMember,
    ViewLog,
    ListMembers,
    RemoveMember,
    ResetLogs,
    Export,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    /// Parse an entry line. Blank input yields `None` and is ignored.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        // A doubled colon escapes a barcode that itself starts with ':'.
        if let Some(literal) = line.strip_prefix("::") {
            return Some(Command::Scan(format!(":{}", literal)));
        }

        let Some(word) = line.strip_prefix(':') else {
            return Some(Command::Scan(line.to_string()));
        };

        let cmd = match word.trim().to_ascii_lowercase().as_str() {
            "add" => Command::AddMember,
            "log" => Command::ViewLog,
            "members" => Command::ListMembers,
            "remove" => Command::RemoveMember,
            "reset" => Command::ResetLogs,
            "export" => Command::Export,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(word.trim().to_string()),
        };
        Some(cmd)
    }
}

/// Usage text shown by `:help`.
pub const HELP: &[&str] = &[
    "Scan or type a barcode and press Enter to mark attendance.",
    ":add      register a new member",
    ":log      view the attendance log, newest first",
    ":members  list registered members",
    ":remove   remove a member by barcode",
    ":reset    reset all attendance logs (operator login required)",
    ":export   write the attendance log as Markdown and YAML",
    ":quit     leave",
    "::CODE    scan a barcode that itself starts with ':'",
];
