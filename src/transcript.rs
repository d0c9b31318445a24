use crate::exons;
use crate::gff::{Feature, FeatureKind};
use crate::strand::{self, Orientation, StrandPolicy};
use anyhow::Result;
use rust_htslib::bam::ext::BamRecordExtensions;
use rust_htslib::bam::record::{Cigar, Record};

/// Settings for turning one alignment into a transcript model.
#[derive(Debug, Clone, Copy)]
pub struct ConvertConfig {
    /// Input is from minimap2: `ts` strand tag, read-relative convention.
    pub minimap: bool,
    pub strand_policy: StrandPolicy,
    /// Deletions at least this long are classified as introns.
    pub max_del: u32,
    /// Keep secondary/supplementary alignments and split reads.
    pub keep_secondary: bool,
}

/// One exon within a transcript; `start` is relative to the transcript offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exon {
    pub start: i64,
    pub len: i64,
    pub id: String,
}

impl Exon {
    pub fn end(&self) -> i64 {
        self.start + self.len
    }
}

/// A per-read gene model derived from a single spliced alignment.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub chrom: String,
    /// Genomic offset of the alignment start, 0-based.
    pub offset: i64,
    pub strand: Orientation,
    pub exons: Vec<Exon>,
}

impl Transcript {
    pub fn start(&self) -> i64 {
        self.offset
    }

    pub fn end(&self) -> i64 {
        self.offset + self.exons.last().map_or(0, Exon::end)
    }

    /// One mRNA feature spanning the transcript plus one feature per exon,
    /// all sharing the read name as `transcript_id`.
    pub fn to_features(&self, source: &'static str) -> Vec<Feature> {
        let mut feats = Vec::with_capacity(self.exons.len() + 1);
        feats.push(Feature {
            seqname: self.chrom.clone(),
            source,
            kind: FeatureKind::Mrna,
            start: self.start(),
            end: self.end(),
            strand: self.strand,
            attributes: vec![
                ("gene_id", self.id.clone()),
                ("transcript_id", self.id.clone()),
            ],
        });
        for exon in &self.exons {
            feats.push(Feature {
                seqname: self.chrom.clone(),
                source,
                kind: FeatureKind::Exon,
                start: self.offset + exon.start,
                end: self.offset + exon.end(),
                strand: self.strand,
                attributes: vec![("transcript_id", self.id.clone())],
            });
        }
        feats
    }
}

/// Alignment fields needed downstream, copied out of the BAM record so the
/// record buffer can be reused while loci are still buffered.
#[derive(Debug, Clone)]
pub struct ReadAln {
    pub name: String,
    pub chrom: String,
    /// 0-based alignment start on the reference.
    pub start: i64,
    /// 0-based exclusive alignment end on the reference.
    pub end: i64,
    pub read_strand: Orientation,
    pub tag_strand: Orientation,
    pub cigar: Vec<Cigar>,
}

impl ReadAln {
    pub fn from_record(record: &Record, chrom: &str, minimap: bool) -> Result<Self> {
        Ok(ReadAln {
            name: String::from_utf8_lossy(record.qname()).into_owned(),
            chrom: chrom.to_string(),
            start: record.pos(),
            end: record.reference_end(),
            read_strand: strand::read_strand(record),
            tag_strand: strand::tag_strand(record, minimap)?,
            cigar: record.cigar().iter().cloned().collect(),
        })
    }
}

/// Mapped-record filter: unmapped records are always dropped; secondary,
/// supplementary and `SA`-tagged (split) alignments are dropped unless
/// `keep_secondary` is set.
pub fn keep_record(record: &Record, keep_secondary: bool) -> bool {
    if record.is_unmapped() {
        return false;
    }
    if !keep_secondary
        && (record.is_secondary() || record.is_supplementary() || record.aux(b"SA").is_ok())
    {
        return false;
    }
    true
}

/// Builds one transcript model per retained alignment, resolving orientation
/// and recovering exon structure from the CIGAR.
pub struct TranscriptBuilder {
    cfg: ConvertConfig,
    zero_len_dropped: u64,
}

impl TranscriptBuilder {
    pub fn new(cfg: ConvertConfig) -> Self {
        Self {
            cfg,
            zero_len_dropped: 0,
        }
    }

    /// Zero-length exon blocks dropped so far; adjacent splice gaps produce
    /// them, so the count is kept for diagnosis.
    pub fn zero_len_dropped(&self) -> u64 {
        self.zero_len_dropped
    }

    pub fn build(&mut self, aln: &ReadAln) -> Result<Transcript> {
        let strand = strand::resolve_strand(
            aln.read_strand,
            aln.tag_strand,
            self.cfg.minimap,
            self.cfg.strand_policy,
        );
        let chain = exons::cigar_to_exons(&aln.cigar, aln.start, self.cfg.max_del)?;
        self.zero_len_dropped += chain.zero_len_dropped;
        Ok(Transcript {
            id: aln.name.clone(),
            chrom: aln.chrom.clone(),
            offset: aln.start,
            strand,
            exons: chain.exons,
        })
    }
}
