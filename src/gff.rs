use crate::strand::Orientation;
use anyhow::Result;
use std::io::Write;

/// Source label written into column 2 of every feature line.
pub const GFF_SOURCE: &str = "spliced_bam2gff";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Mrna,
    Exon,
}

impl FeatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FeatureKind::Mrna => "mRNA",
            FeatureKind::Exon => "exon",
        }
    }
}

/// One GFF2 annotation line.
///
/// Intervals are 0-based half-open internally and serialized 1-based
/// inclusive. Score and frame are always absent for alignment-derived
/// features and serialize as `.`.
#[derive(Debug, Clone)]
pub struct Feature {
    pub seqname: String,
    pub source: &'static str,
    pub kind: FeatureKind,
    pub start: i64,
    pub end: i64,
    pub strand: Orientation,
    pub attributes: Vec<(&'static str, String)>,
}

/// Line-oriented GFF2 writer: accepts typed features, emits one formatted
/// line per feature. A `##gff-version 2` header precedes the first record.
pub struct GffWriter<W: Write> {
    inner: W,
    header_written: bool,
}

impl<W: Write> GffWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            header_written: false,
        }
    }

    pub fn write_feature(&mut self, feat: &Feature) -> Result<()> {
        if !self.header_written {
            writeln!(self.inner, "##gff-version 2")?;
            self.header_written = true;
        }
        let attrs = feat
            .attributes
            .iter()
            .map(|(tag, value)| format!("{tag} \"{value}\";"))
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(
            self.inner,
            "{}\t{}\t{}\t{}\t{}\t.\t{}\t.\t{}",
            feat.seqname,
            feat.source,
            feat.kind.as_str(),
            feat.start + 1,
            feat.end,
            feat.strand.gff_char(),
            attrs
        )?;
        Ok(())
    }

    pub fn write_all(&mut self, feats: &[Feature]) -> Result<()> {
        for feat in feats {
            self.write_feature(feat)?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
