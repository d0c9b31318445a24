//! spliced-bam2gff-rs: convert spliced BAM alignments into GFF2 gene models.
//!
//! Each mapped read becomes one mRNA feature plus one feature per exon, with
//! exon/intron structure recovered from the alignment CIGAR (splice gaps and
//! long deletions split exons) and orientation resolved from the read strand
//! and the aligner's transcript strand tag.
//!
//! # Library usage
//!
//! ```no_run
//! use spliced_bam2gff_rs::{ConvertConfig, LocusAggregator, StrandPolicy};
//!
//! let cfg = ConvertConfig {
//!     minimap: false,
//!     strand_policy: StrandPolicy::Tag,
//!     max_del: 8,
//!     keep_secondary: false,
//! };
//! let mut agg = LocusAggregator::new(cfg);
//! // Feed position-sorted alignments (e.g. from rust-htslib) as
//! // `transcript::ReadAln` values:
//! // if let Some(locus) = agg.push(aln)? { /* write locus.feats */ }
//! ```

// Internal modules — not part of the public API.
pub(crate) mod bam_input;
pub(crate) mod cli;
pub(crate) mod pipeline;

// Public modules — stable API surface.
pub mod bundle;
pub mod exons;
pub mod gff;
pub mod locus;
pub mod strand;
pub mod transcript;

// Flat re-exports for the most commonly used public types.
pub use bundle::{BundleStats, BundleWriter};
pub use gff::{Feature, FeatureKind, GffWriter};
pub use locus::{Locus, LocusAggregator};
pub use strand::{Orientation, StrandPolicy};
pub use transcript::{ConvertConfig, ReadAln, Transcript, TranscriptBuilder};
