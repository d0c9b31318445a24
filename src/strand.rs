use anyhow::{bail, Result};
use rust_htslib::bam::record::{Aux, Record};

/// Feature orientation as written to the GFF strand column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Forward,
    Reverse,
    Unoriented,
}

impl Orientation {
    pub fn flip(self) -> Self {
        match self {
            Orientation::Forward => Orientation::Reverse,
            Orientation::Reverse => Orientation::Forward,
            Orientation::Unoriented => Orientation::Unoriented,
        }
    }

    pub fn gff_char(self) -> char {
        match self {
            Orientation::Forward => '+',
            Orientation::Reverse => '-',
            Orientation::Unoriented => '.',
        }
    }
}

/// How the feature strand is derived for each alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrandPolicy {
    /// Use the transcript strand tag; unoriented when the tag is missing.
    Tag,
    /// Use the read orientation from the BAM flags; the tag is ignored.
    Read,
    /// Use the tag, falling back to read orientation when the tag is missing.
    TagThenRead,
}

/// Orientation of the read itself, from the reverse-complement flag.
pub fn read_strand(record: &Record) -> Orientation {
    if record.is_reverse() {
        Orientation::Reverse
    } else {
        Orientation::Forward
    }
}

/// Look up the transcript strand tag: `ts` for minimap2 input, `XS` otherwise.
///
/// A missing tag maps to `Unoriented`; an unrecognized tag value is fatal.
pub fn tag_strand(record: &Record, minimap: bool) -> Result<Orientation> {
    let tag: &[u8] = if minimap { b"ts" } else { b"XS" };
    let aux = match record.aux(tag) {
        Ok(aux) => aux,
        Err(_) => return Ok(Orientation::Unoriented),
    };
    let value = match aux {
        Aux::Char(c) => c as char,
        Aux::String(s) => match s.chars().next() {
            Some(c) => c,
            None => bail!(
                "empty {} strand tag in record {}",
                String::from_utf8_lossy(tag),
                String::from_utf8_lossy(record.qname())
            ),
        },
        other => bail!(
            "unexpected {} strand tag type: {:?}",
            String::from_utf8_lossy(tag),
            other
        ),
    };
    match value {
        '+' => Ok(Orientation::Forward),
        '-' => Ok(Orientation::Reverse),
        '?' => Ok(Orientation::Unoriented),
        other => bail!(
            "unknown orientation {:?} in {} tag of record {}",
            other,
            String::from_utf8_lossy(tag),
            String::from_utf8_lossy(record.qname())
        ),
    }
}

/// Decide the feature strand from the read orientation and the strand tag.
///
/// The minimap2 `ts` tag is relative to the read: a Reverse value flips the
/// read orientation. For other aligners the `XS` tag already names the
/// transcript strand and is used as-is. An Unoriented tag counts as missing.
pub fn resolve_strand(
    read_strand: Orientation,
    tag: Orientation,
    minimap: bool,
    policy: StrandPolicy,
) -> Orientation {
    if policy == StrandPolicy::Read {
        return read_strand;
    }

    if tag == Orientation::Unoriented {
        return match policy {
            StrandPolicy::Tag => Orientation::Unoriented,
            StrandPolicy::TagThenRead => read_strand,
            StrandPolicy::Read => unreachable!("handled above"),
        };
    }

    if minimap {
        if tag == Orientation::Reverse {
            read_strand.flip()
        } else {
            read_strand
        }
    } else {
        tag
    }
}
