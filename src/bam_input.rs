// bam_input.rs is used only by the binary (BAM I/O path).
#![allow(dead_code)]
use anyhow::{Context, Result};
use rust_htslib::bam;
use rust_htslib::bam::Read as HtsRead;

/// BAM record source plus the reference names from its header.
pub struct BamInput {
    pub reader: bam::Reader,
    pub target_names: Vec<String>,
}

/// Open a BAM from `path`, or from standard input when `path` is `-`.
/// `threads` is the BGZF decompression-parallelism hint.
pub fn open_bam(path: &str, threads: usize) -> Result<BamInput> {
    let mut reader = if path == "-" {
        bam::Reader::from_stdin().context("could not open BAM stream on stdin")?
    } else {
        bam::Reader::from_path(path)
            .with_context(|| format!("could not open input file {path}"))?
    };
    if threads > 1 {
        reader
            .set_threads(threads)
            .context("could not enable multi-threaded BAM decompression")?;
    }
    let target_names = reader
        .header()
        .target_names()
        .iter()
        .map(|n| String::from_utf8_lossy(n).into_owned())
        .collect();
    Ok(BamInput {
        reader,
        target_names,
    })
}
