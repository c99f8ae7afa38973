// ABOUTME: Test utilities for rollcall-shell, including a scripted Console.
// ABOUTME: Used in tests to drive the shell with canned operator input and capture its output.

use std::collections::VecDeque;
use std::io;

use crate::console::Console;

/// One canned operator response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Cancel,
    Yes,
    No,
}

impl Reply {
    pub fn text(s: &str) -> Self {
        Reply::Text(s.to_owned())
    }
}

/// A Console that answers entries, prompts, and confirmations from a queue
/// and records everything it was asked and shown.
///
/// An exhausted queue behaves like closed input: entries and prompts return
/// `None`, confirmations return `false`.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    replies: VecDeque<Reply>,
    asked: Vec<String>,
    output: Vec<String>,
}

impl ScriptedConsole {
    pub fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: replies.into(),
            ..Self::default()
        }
    }

    /// Titles of every prompt shown, in order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.clone()
    }

    /// Everything written to the display and notices, one line per entry.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    fn next_text(&mut self) -> Option<String> {
        match self.replies.pop_front() {
            Some(Reply::Text(s)) => Some(s),
            Some(Reply::Yes) => Some("y".to_owned()),
            Some(Reply::No) => Some("n".to_owned()),
            Some(Reply::Cancel) | None => None,
        }
    }
}

impl Console for ScriptedConsole {
    fn entry(&mut self, _label: &str) -> io::Result<Option<String>> {
        Ok(self.next_text())
    }

    fn ask(&mut self, title: &str, _message: &str) -> io::Result<Option<String>> {
        self.asked.push(title.to_owned());
        Ok(self.next_text())
    }

    fn ask_secret(&mut self, title: &str, _message: &str) -> io::Result<Option<String>> {
        self.asked.push(title.to_owned());
        Ok(self.next_text())
    }

    fn confirm(&mut self, title: &str, _message: &str) -> io::Result<bool> {
        self.asked.push(title.to_owned());
        Ok(matches!(self.replies.pop_front(), Some(Reply::Yes)))
    }

    fn info(&mut self, title: &str, message: &str) -> io::Result<()> {
        self.output.push(format!("[{}] {}", title, message));
        Ok(())
    }

    fn error(&mut self, title: &str, message: &str) -> io::Result<()> {
        self.output.push(format!("[{}] error: {}", title, message));
        Ok(())
    }

    fn append(&mut self, line: &str) -> io::Result<()> {
        self.output.push(line.to_owned());
        Ok(())
    }
}
