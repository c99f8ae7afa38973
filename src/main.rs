// ABOUTME: Entry point for the rollcall binary.
// ABOUTME: Parses CLI arguments, initializes tracing, opens the store once, and runs the shell.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rollcall_shell::{RollcallConfig, Shell, ShellOptions, TerminalConsole};
use rollcall_store::{AttendanceStore, DataDir};

#[derive(Debug, Parser)]
#[command(name = "rollcall", version, about = "Barcode attendance tracker")]
struct Cli {
    /// Data directory (overrides ROLLCALL_HOME)
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Database file (overrides ROLLCALL_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the interactive scanning shell (default)
    Run,
    /// Write the attendance log as Markdown and YAML, then exit
    Export {
        /// Output directory (default: <home>/exports)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("rollcall=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = RollcallConfig::from_env().context("invalid configuration")?;
    if let Some(home) = cli.home {
        config.home = home;
    }
    if let Some(db) = cli.db {
        config.db_path = Some(db);
    }

    let data = DataDir::new(config.home.clone(), config.db_path.clone())
        .with_context(|| format!("cannot prepare data directory {}", config.home.display()))?;
    let store = AttendanceStore::open(data.db_path())
        .with_context(|| format!("cannot open database {}", data.db_path().display()))?;
    tracing::info!("rollcall starting with database {}", data.db_path().display());

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            if config.operator.is_none() {
                tracing::warn!("no operator credential configured; :reset is disabled");
            }
            let options = ShellOptions::from_config(&config, &data);
            let mut shell = Shell::new(TerminalConsole::stdio(), store, options);
            shell.run()?;
        }
        Commands::Export { out } => {
            let out = out.unwrap_or_else(|| data.exports_dir());
            let records = store.list_attendance()?;
            let paths = DataDir::write_exports(&out, &config.title, &records)?;
            println!("{}", paths.markdown.display());
            println!("{}", paths.yaml.display());
        }
    }

    Ok(())
}
