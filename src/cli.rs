// cli.rs is used only by the binary.
#![allow(dead_code)]
use crate::strand::StrandPolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "spliced-bam2gff-rs",
    about = "Convert spliced BAM alignments into per-read GFF2 gene models",
    version
)]
pub struct Args {
    /// Input BAM with spliced alignments ("-" reads from standard input)
    pub in_bam: String,

    /// Input is from minimap2 (ts strand tag, read-relative convention)
    #[arg(short = 'M', long = "minimap2")]
    pub minimap: bool,

    /// Use the read strand from the BAM flags as feature orientation
    #[arg(short = 's', long = "read-strand", conflicts_with = "tag_read_strand")]
    pub read_strand: bool,

    /// Use the strand tag, falling back to the read strand when missing
    #[arg(short = 'g', long = "tag-read-strand")]
    pub tag_read_strand: bool,

    /// Do NOT discard secondary and supplementary alignments
    #[arg(short = 'S', long = "keep-secondary")]
    pub keep_secondary: bool,

    /// Classify deletions at least this long as introns
    #[arg(short = 'd', long = "max-del", value_name = "LEN", default_value_t = 8)]
    pub max_del: u32,

    /// Write output partitioned into locus bundles under this directory
    /// instead of streaming GFF to stdout
    #[arg(short = 'L', long = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Bundle together loci in batches of at least this many transcripts
    #[arg(short = 'b', long = "min-bundle", value_name = "N", requires = "out_dir")]
    pub min_bundle: Option<u64>,

    /// Number of BGZF decompression threads
    #[arg(short = 't', long = "threads", default_value_t = 1)]
    pub threads: usize,

    /// Suppress progress output and set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

impl Args {
    /// Strand policy selected by the mutually exclusive -s / -g flags;
    /// tag-only is the default.
    pub fn strand_policy(&self) -> StrandPolicy {
        if self.read_strand {
            StrandPolicy::Read
        } else if self.tag_read_strand {
            StrandPolicy::TagThenRead
        } else {
            StrandPolicy::Tag
        }
    }
}
