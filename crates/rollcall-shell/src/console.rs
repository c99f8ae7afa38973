// ABOUTME: The Console trait the shell talks through, and a line-oriented terminal implementation.
// ABOUTME: Covers text prompts, confirmation, notices, and the append-only display surface.

use std::io::{self, BufRead, Write};

/// Everything the shell needs from a presentation layer.
///
/// Prompts return `Ok(None)` when the operator cancels or input ends.
pub trait Console {
    /// Read the next entry from the main input field (a barcode or a command).
    fn entry(&mut self, label: &str) -> io::Result<Option<String>>;

    /// Single-line text prompt.
    fn ask(&mut self, title: &str, message: &str) -> io::Result<Option<String>>;

    /// Single-line prompt for a secret. Implementations may mask input.
    fn ask_secret(&mut self, title: &str, message: &str) -> io::Result<Option<String>>;

    /// Modal yes/no question.
    fn confirm(&mut self, title: &str, message: &str) -> io::Result<bool>;

    fn info(&mut self, title: &str, message: &str) -> io::Result<()>;

    fn error(&mut self, title: &str, message: &str) -> io::Result<()>;

    /// Append one line to the display surface.
    fn append(&mut self, line: &str) -> io::Result<()>;
}

/// A Console over any line reader and writer, usually stdin and stdout.
pub struct TerminalConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> TerminalConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Consume the console and return the writer, mostly for inspecting output in tests.
    pub fn into_writer(self) -> W {
        self.writer
    }

    // Scanners on the wrong code page can send bytes that are not UTF-8;
    // decode lossily so one bad line cannot end the session.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{} ", text)?;
        self.writer.flush()?;
        self.read_line()
    }
}

impl TerminalConsole<io::StdinLock<'static>, io::Stdout> {
    /// Console bound to the process's standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for TerminalConsole<R, W> {
    fn entry(&mut self, label: &str) -> io::Result<Option<String>> {
        self.prompt(&format!("{}>", label))
    }

    fn ask(&mut self, title: &str, message: &str) -> io::Result<Option<String>> {
        self.prompt(&format!("[{}] {}", title, message))
    }

    // No echo suppression on a plain line reader; the prompt is marked instead.
    fn ask_secret(&mut self, title: &str, message: &str) -> io::Result<Option<String>> {
        self.prompt(&format!("[{}] {} (input visible)", title, message))
    }

    fn confirm(&mut self, title: &str, message: &str) -> io::Result<bool> {
        let answer = self.prompt(&format!("[{}] {} [y/N]", title, message))?;
        Ok(matches!(
            answer.as_deref().map(str::trim),
            Some("y" | "Y" | "yes" | "Yes" | "YES")
        ))
    }

    fn info(&mut self, title: &str, message: &str) -> io::Result<()> {
        writeln!(self.writer, "[{}] {}", title, message)
    }

    fn error(&mut self, title: &str, message: &str) -> io::Result<()> {
        writeln!(self.writer, "[{}] error: {}", title, message)
    }

    fn append(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", line)
    }
}
