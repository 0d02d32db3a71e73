//! Merge input chunks

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tasd::PacketKey;

/// Arguments for compacting a file
#[derive(Debug, Args)]
pub struct CompactArgs {
    /// Path to the TASD file
    pub file: PathBuf,

    /// Where to write the result (defaults to overwriting FILE)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn execute(args: CompactArgs) -> Result<()> {
    let mut tasd = crate::load(&args.file)?;
    let before = tasd.packets().to_vec();
    tasd.compact_inputs();
    let changed = tasd.packets() != before.as_slice();

    // An unchanged file is only rewritten when it goes somewhere else.
    if changed || args.output.is_some() {
        crate::save(&mut tasd, &args.file, args.output.as_ref())?;
    }

    if changed {
        let chunks = |packets: &[tasd::Packet]| {
            packets.iter().filter(|p| p.is(PacketKey::InputChunk)).count()
        };
        println!(
            "{}: {} input chunks -> {}",
            args.file.display(),
            chunks(&before),
            chunks(tasd.packets())
        );
    } else {
        println!("{}: nothing to compact", args.file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasd::{FixedClock, InputChunkPacket, Packet, Tasd};

    fn write_file(path: &std::path::Path, chunks: &[&[u8]]) -> Vec<u8> {
        let mut tasd = Tasd::new();
        for inputs in chunks {
            tasd.push(Packet::InputChunk(InputChunkPacket::new(1, inputs.to_vec())));
        }
        let bytes = tasd.to_buffer_with(&FixedClock(0)).unwrap();
        std::fs::write(path, &bytes).unwrap();
        bytes
    }

    #[test]
    fn test_output_written_when_nothing_changes() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tasd");
        let output = dir.path().join("out.tasd");
        let bytes = write_file(&input, &[&[0xAA, 0xBB]]);

        execute(CompactArgs {
            file: input.clone(),
            output: Some(output.clone()),
        })
        .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), bytes);
        assert_eq!(std::fs::read(&input).unwrap(), bytes);
    }

    #[test]
    fn test_in_place_merge() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tasd");
        write_file(&input, &[&[0xAA], &[0xBB]]);

        execute(CompactArgs {
            file: input.clone(),
            output: None,
        })
        .unwrap();

        let tasd = Tasd::parse_file(&std::fs::read(&input).unwrap()).unwrap();
        let chunks: Vec<&Packet> = tasd.iter_key(PacketKey::InputChunk).collect();
        assert_eq!(
            chunks,
            vec![&Packet::InputChunk(InputChunkPacket::new(1, vec![0xAA, 0xBB]))]
        );
    }

    #[test]
    fn test_already_compact_file_is_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.tasd");
        let bytes = write_file(&input, &[&[0xAA, 0xBB]]);

        execute(CompactArgs {
            file: input.clone(),
            output: None,
        })
        .unwrap();

        assert_eq!(std::fs::read(&input).unwrap(), bytes);
    }
}
