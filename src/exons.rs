use crate::transcript::Exon;
use anyhow::{bail, Result};
use rust_htslib::bam::record::Cigar;

/// Exon blocks recovered from one alignment, plus a count of zero-length
/// blocks that were dropped (adjacent splice gaps can produce them).
#[derive(Debug, Default)]
pub struct ExonChain {
    pub exons: Vec<Exon>,
    pub zero_len_dropped: u64,
}

/// Split a CIGAR into exon blocks, returned relative to `ref_start`.
///
/// `N` always closes the current exon. Deletions shorter than `max_del` are
/// treated as alignment noise and stay inside the exon; deletions of at least
/// `max_del` bases are classified as introns and split. Insertions and clips
/// do not consume reference and are skipped.
pub fn cigar_to_exons(cigar: &[Cigar], ref_start: i64, max_del: u32) -> Result<ExonChain> {
    let mut chain = ExonChain::default();
    let mut block_start = ref_start;
    let mut block_len: i64 = 0;
    let mut exon_nr = 0usize;

    for op in cigar {
        match op {
            // Soft clip, hard clip, or insertion: no reference consumed.
            Cigar::SoftClip(_) | Cigar::HardClip(_) | Cigar::Ins(_) => {}
            Cigar::Match(n) | Cigar::Equal(n) | Cigar::Diff(n) => {
                block_len += i64::from(*n);
            }
            Cigar::Del(n) => {
                if *n < max_del {
                    block_len += i64::from(*n);
                } else {
                    close_block(&mut chain, ref_start, block_start, block_len, exon_nr);
                    block_start += block_len + i64::from(*n);
                    block_len = 0;
                    exon_nr += 1;
                }
            }
            Cigar::RefSkip(n) => {
                close_block(&mut chain, ref_start, block_start, block_len, exon_nr);
                block_start += block_len + i64::from(*n);
                block_len = 0;
                exon_nr += 1;
            }
            other => bail!("unsupported CIGAR operation: {}", other),
        }
    }

    close_block(&mut chain, ref_start, block_start, block_len, exon_nr);
    Ok(chain)
}

fn close_block(chain: &mut ExonChain, ref_start: i64, block_start: i64, block_len: i64, nr: usize) {
    if block_len <= 0 {
        chain.zero_len_dropped += 1;
        return;
    }
    chain.exons.push(Exon {
        start: block_start - ref_start,
        len: block_len,
        id: format!("exon_{nr}"),
    });
}
