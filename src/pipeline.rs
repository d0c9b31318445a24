// pipeline.rs is used only by the binary.
#![allow(dead_code)]
use crate::bam_input::BamInput;
use crate::bundle::BundleWriter;
use crate::cli::Args;
use crate::gff::{GffWriter, GFF_SOURCE};
use crate::locus::{Locus, LocusAggregator};
use crate::transcript::{self, ConvertConfig, ReadAln, TranscriptBuilder};
use anyhow::{anyhow, Result};
use crossfire::mpmc;
use rust_htslib::bam::Read as HtsRead;
use std::io::BufWriter;
use std::path::Path;
use std::thread;

/// Capacity of the locus hand-off queue between the reader and the writer.
const LOCUS_QUEUE_CAP: usize = 100;

#[derive(Debug, Default)]
pub struct Stats {
    pub transcripts: u64,
    pub loci: u64,
    pub bundles: u64,
    pub total_reads: u64,
    pub skipped_reads: u64,
    pub zero_len_exons: u64,
}

pub fn run(args: &Args, bam: &mut BamInput) -> Result<Stats> {
    let cfg = ConvertConfig {
        minimap: args.minimap,
        strand_policy: args.strand_policy(),
        max_del: args.max_del,
        keep_secondary: args.keep_secondary,
    };
    match &args.out_dir {
        None => run_stream(cfg, bam),
        Some(dir) => run_partitioned(cfg, bam, dir, args.min_bundle.unwrap_or(0)),
    }
}

/// Unbundled mode: features go straight to stdout as each alignment is
/// converted; no locus grouping.
fn run_stream(cfg: ConvertConfig, bam: &mut BamInput) -> Result<Stats> {
    let BamInput {
        reader,
        target_names,
    } = bam;
    let stdout = std::io::stdout();
    let mut writer = GffWriter::new(BufWriter::new(stdout.lock()));
    let mut builder = TranscriptBuilder::new(cfg);
    let mut stats = Stats::default();

    for result in reader.records() {
        let record = result?;
        stats.total_reads += 1;
        if !transcript::keep_record(&record, cfg.keep_secondary) {
            stats.skipped_reads += 1;
            continue;
        }
        let chrom = chrom_name(target_names, record.tid())?;
        let aln = ReadAln::from_record(&record, chrom, cfg.minimap)?;
        let tx = builder.build(&aln)?;
        writer.write_all(&tx.to_features(GFF_SOURCE))?;
        stats.transcripts += 1;
    }

    writer.flush()?;
    stats.zero_len_exons = builder.zero_len_dropped();
    Ok(stats)
}

/// Partitioned mode: one thread reads, filters and groups alignments into
/// loci; the calling thread bundles and writes them. The bounded queue gives
/// backpressure in both directions, and a locus is owned by exactly one side
/// at a time.
fn run_partitioned(
    cfg: ConvertConfig,
    bam: &mut BamInput,
    out_dir: &Path,
    min_bundle: u64,
) -> Result<Stats> {
    let mut bundles = BundleWriter::new(out_dir, min_bundle)?;
    let BamInput {
        reader,
        target_names,
    } = bam;

    crossfire::detect_backoff_cfg();
    let (tx, rx) = mpmc::bounded_blocking::<Locus>(LOCUS_QUEUE_CAP);

    let mut stats = Stats::default();
    thread::scope(|scope| -> Result<()> {
        let producer = scope.spawn(move || -> Result<(u64, u64, u64)> {
            let mut agg = LocusAggregator::new(cfg);
            let mut total = 0u64;
            let mut skipped = 0u64;
            for result in reader.records() {
                let record = result?;
                total += 1;
                if !transcript::keep_record(&record, cfg.keep_secondary) {
                    skipped += 1;
                    continue;
                }
                let chrom = chrom_name(target_names, record.tid())?;
                let aln = ReadAln::from_record(&record, chrom, cfg.minimap)?;
                if let Some(locus) = agg.push(aln)? {
                    tx.send(locus)
                        .map_err(|_| anyhow!("locus consumer hung up"))?;
                }
            }
            if let Some(locus) = agg.finish()? {
                tx.send(locus)
                    .map_err(|_| anyhow!("locus consumer hung up"))?;
            }
            Ok((total, skipped, agg.zero_len_dropped()))
        });

        let consumed = (|| -> Result<()> {
            while let Ok(locus) = rx.recv() {
                bundles.push(locus)?;
            }
            Ok(())
        })();
        // Unblocks the producer if the consumer bailed out early.
        drop(rx);

        let produced = producer
            .join()
            .map_err(|_| anyhow!("BAM reader thread panicked"))?;
        consumed?;
        let (total, skipped, zero_len) = produced?;
        stats.total_reads = total;
        stats.skipped_reads = skipped;
        stats.zero_len_exons = zero_len;
        Ok(())
    })?;

    let done = bundles.finish()?;
    stats.transcripts = done.transcripts;
    stats.loci = done.loci;
    stats.bundles = done.bundles;
    Ok(stats)
}

fn chrom_name(names: &[String], tid: i32) -> Result<&str> {
    usize::try_from(tid)
        .ok()
        .and_then(|i| names.get(i))
        .map(String::as_str)
        .ok_or_else(|| anyhow!("record references unknown target id {tid}"))
}
