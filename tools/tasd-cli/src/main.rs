//! tasd - command line front end for TASD files
//!
//! # Commands
//!
//! - `tasd dump` - print every packet, as text or JSON
//! - `tasd compact` - merge input chunks into one chunk per port
//! - `tasd touch` - refresh the dump-last-modified stamp
//!
//! Logging goes to stderr and follows `RUST_LOG`; `-v` raises the default
//! level from `warn` to `debug`, `-vv` to `trace`.

mod compact;
mod dump;
mod touch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tasd::Tasd;
use tracing_subscriber::EnvFilter;

/// Inspect and rewrite TASD tool-assisted speedrun dumps
#[derive(Parser)]
#[command(name = "tasd")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the header and every packet
    Dump(dump::DumpArgs),

    /// Merge input chunks into one chunk per port
    Compact(compact::CompactArgs),

    /// Re-serialize with a fresh dump-last-modified stamp
    Touch(touch::TouchArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Dump(args) => dump::execute(args),
        Commands::Compact(args) => compact::execute(args),
        Commands::Touch(args) => touch::execute(args),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads and parses a TASD file.
pub(crate) fn load(path: &Path) -> Result<Tasd> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    Tasd::parse_file(&bytes)
        .with_context(|| format!("{} is not a valid TASD file", path.display()))
}

/// Serializes `tasd` and writes it to `output`, or back over `input`.
pub(crate) fn save(tasd: &mut Tasd, input: &Path, output: Option<&PathBuf>) -> Result<()> {
    let target = output.map(PathBuf::as_path).unwrap_or(input);
    let bytes = tasd
        .to_buffer()
        .with_context(|| format!("Failed to serialize {}", input.display()))?;
    std::fs::write(target, &bytes)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::info!(path = %target.display(), bytes = bytes.len(), "wrote TASD file");
    Ok(())
}
