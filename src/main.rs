mod bam_input;
mod bundle;
mod cli;
mod exons;
mod gff;
mod locus;
mod pipeline;
mod strand;
mod transcript;

use anyhow::Result;
use clap::Parser;
use mimalloc::MiMalloc;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Logging goes to stderr; stdout carries GFF in stream mode.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.quiet {
            EnvFilter::new("warn")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut bam = bam_input::open_bam(&args.in_bam, args.threads)?;
    let stats = pipeline::run(&args, &mut bam)?;

    if args.out_dir.is_some() {
        tracing::info!(
            transcripts = stats.transcripts,
            loci = stats.loci,
            bundles = stats.bundles,
            total_reads = stats.total_reads,
            skipped_reads = stats.skipped_reads,
            zero_len_exons = stats.zero_len_exons,
            "spliced-bam2gff-rs: processing complete"
        );
    } else {
        tracing::info!(
            transcripts = stats.transcripts,
            total_reads = stats.total_reads,
            skipped_reads = stats.skipped_reads,
            zero_len_exons = stats.zero_len_exons,
            "spliced-bam2gff-rs: processing complete"
        );
    }
    Ok(())
}
