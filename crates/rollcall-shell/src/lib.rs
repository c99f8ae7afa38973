// ABOUTME: Interaction shell for rollcall, turning operator input into store operations.
// ABOUTME: Defines the Console contract, a terminal console, the command dispatcher, and config.

pub mod command;
pub mod config;
pub mod console;
pub mod shell;
pub mod testing;

pub use command::Command;
pub use config::{ConfigError, RollcallConfig};
pub use console::{Console, TerminalConsole};
pub use shell::{Shell, ShellError, ShellOptions};
