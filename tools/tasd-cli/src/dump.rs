//! Print a TASD file

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Arguments for dumping a file
#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Path to the TASD file
    pub file: PathBuf,

    /// Emit JSON instead of the text listing
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: DumpArgs) -> Result<()> {
    let tasd = crate::load(&args.file)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasd)?);
    } else {
        print!("{tasd}");
    }
    Ok(())
}
