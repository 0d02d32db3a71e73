//! Refresh the modification stamp

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

/// Arguments for restamping a file
#[derive(Debug, Args)]
pub struct TouchArgs {
    /// Path to the TASD file
    pub file: PathBuf,

    /// Where to write the result (defaults to overwriting FILE)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: TouchArgs) -> Result<()> {
    let mut tasd = crate::load(&args.file)?;
    tasd.mark_dirty();
    crate::save(&mut tasd, &args.file, args.output.as_ref())
}
