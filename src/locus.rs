use crate::gff::{Feature, GFF_SOURCE};
use crate::transcript::{ConvertConfig, ReadAln, TranscriptBuilder};
use anyhow::{bail, Result};

/// A maximal run of overlapping alignments on one chromosome, already
/// converted to output features. Immutable once emitted.
#[derive(Debug)]
pub struct Locus {
    pub chrom: String,
    pub start: i64,
    /// Max alignment end over the contained reads.
    pub end: i64,
    pub feats: Vec<Feature>,
    /// Emission index, strictly increasing across the run.
    pub order: u64,
    /// Number of transcripts in the locus.
    pub size: u64,
}

struct OpenLocus {
    chrom: String,
    start: i64,
    end: i64,
    order: u64,
    cache: Vec<ReadAln>,
}

/// Streaming grouper: consumes position-sorted alignments and emits loci.
///
/// Alignment-to-feature conversion is deferred to locus close, so the cost
/// is paid once per group alongside the boundary decision.
pub struct LocusAggregator {
    builder: TranscriptBuilder,
    open: Option<OpenLocus>,
    next_order: u64,
    current_chrom: Option<String>,
}

impl LocusAggregator {
    pub fn new(cfg: ConvertConfig) -> Self {
        Self {
            builder: TranscriptBuilder::new(cfg),
            open: None,
            next_order: 0,
            current_chrom: None,
        }
    }

    /// Feed the next sorted alignment. Returns the closed locus when `aln`
    /// starts a new group; unsorted input within a group is fatal.
    pub fn push(&mut self, aln: ReadAln) -> Result<Option<Locus>> {
        let Some(open) = self.open.as_mut() else {
            self.seed(aln);
            return Ok(None);
        };

        if aln.chrom == open.chrom && aln.start <= open.end {
            let last = open
                .cache
                .last()
                .expect("open locus holds at least one alignment");
            if aln.start < last.start {
                bail!(
                    "input BAM is not sorted: {}:{} follows {}:{}",
                    aln.chrom,
                    aln.start,
                    last.chrom,
                    last.start
                );
            }
            open.end = open.end.max(aln.end);
            open.cache.push(aln);
            return Ok(None);
        }

        let closed = self.close_open()?;
        self.seed(aln);
        Ok(closed)
    }

    /// End of input: close and emit the final locus, if any.
    pub fn finish(&mut self) -> Result<Option<Locus>> {
        self.close_open()
    }

    /// Zero-length exon blocks dropped during conversion so far.
    pub fn zero_len_dropped(&self) -> u64 {
        self.builder.zero_len_dropped()
    }

    fn seed(&mut self, aln: ReadAln) {
        if self.current_chrom.as_deref() != Some(aln.chrom.as_str()) {
            tracing::info!(chrom = %aln.chrom, "processing chromosome");
            self.current_chrom = Some(aln.chrom.clone());
        }
        let order = self.next_order;
        self.next_order += 1;
        self.open = Some(OpenLocus {
            chrom: aln.chrom.clone(),
            start: aln.start,
            end: aln.end,
            order,
            cache: vec![aln],
        });
    }

    fn close_open(&mut self) -> Result<Option<Locus>> {
        let Some(open) = self.open.take() else {
            return Ok(None);
        };
        let mut feats = Vec::with_capacity(open.cache.len() * 2);
        for aln in &open.cache {
            let tx = self.builder.build(aln)?;
            feats.extend(tx.to_features(GFF_SOURCE));
        }
        Ok(Some(Locus {
            chrom: open.chrom,
            start: open.start,
            end: open.end,
            feats,
            order: open.order,
            size: open.cache.len() as u64,
        }))
    }
}
