use crate::gff::GffWriter;
use crate::locus::Locus;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Final counts reported after the partitioned run.
#[derive(Debug, Default)]
pub struct BundleStats {
    pub transcripts: u64,
    pub loci: u64,
    pub bundles: u64,
}

/// Accumulates consecutive loci and flushes them as size-bounded bundles,
/// one uniquely named GFF file per bundle under `out_dir`.
///
/// A bundle flushes when the cached transcript count would exceed
/// `min_bundle`, or immediately when a single locus alone exceeds it; a
/// trailing partial bundle is flushed at end of stream. With `min_bundle`
/// of zero every locus becomes its own bundle.
pub struct BundleWriter {
    out_dir: PathBuf,
    min_bundle: u64,
    cache: Vec<Locus>,
    pending: u64,
    bundle_count: u64,
    transcripts: u64,
    loci: u64,
}

impl BundleWriter {
    pub fn new(out_dir: &Path, min_bundle: u64) -> Result<Self> {
        std::fs::create_dir_all(out_dir).with_context(|| {
            format!(
                "could not create GFF output directory {}",
                out_dir.display()
            )
        })?;
        Ok(Self {
            out_dir: out_dir.to_path_buf(),
            min_bundle,
            cache: Vec::new(),
            pending: 0,
            bundle_count: 0,
            transcripts: 0,
            loci: 0,
        })
    }

    pub fn push(&mut self, locus: Locus) -> Result<()> {
        self.transcripts += locus.size;
        self.loci += 1;

        if locus.size > self.min_bundle {
            self.cache.push(locus);
            return self.flush();
        }
        if self.pending + locus.size > self.min_bundle {
            self.flush()?;
        }
        self.pending += locus.size;
        self.cache.push(locus);
        Ok(())
    }

    /// Write any trailing partial bundle and return the final counts.
    pub fn finish(mut self) -> Result<BundleStats> {
        self.flush()?;
        Ok(BundleStats {
            transcripts: self.transcripts,
            loci: self.loci,
            bundles: self.bundle_count,
        })
    }

    fn flush(&mut self) -> Result<()> {
        let (Some(first), Some(last)) = (self.cache.first(), self.cache.last()) else {
            return Ok(());
        };
        // Zero-padded index keeps directory listings in emission order.
        let name = format!(
            "{:09}_{}:{}:{}_bundle.gff",
            self.bundle_count, last.chrom, first.start, last.end
        );
        let path = self.out_dir.join(name);
        let file = File::create(&path)
            .with_context(|| format!("could not create GFF output file {}", path.display()))?;
        let mut writer = GffWriter::new(BufWriter::new(file));
        for locus in &self.cache {
            writer.write_all(&locus.feats)?;
        }
        writer.flush()?;

        self.cache.clear();
        self.pending = 0;
        self.bundle_count += 1;
        Ok(())
    }
}
