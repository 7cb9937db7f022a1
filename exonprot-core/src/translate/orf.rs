//! Open reading frame search within a single exon.

use crate::seq::nucleotide::NucleotideSeq;
use crate::translate::codon::CodonTable;
use log::debug;
use memchr::memmem;
use std::borrow::Cow;
use std::ops::Range;

/// Shortest sequence that can hold a start codon followed by a stop codon.
const MIN_ORF_SEQ_LEN: usize = 6;

/// An ORF from a start codon up to, not including, its in-frame stop codon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Orf {
    pub start: usize,
    pub stop: usize,
    pub len: usize,
}

impl Orf {
    pub fn span(&self) -> Range<usize> {
        self.start..self.stop
    }
}

/// Finds the longest ORF in `seq`; equal lengths go to the leftmost start.
pub fn find_orf(seq: &NucleotideSeq) -> Option<Orf> {
    find_orf_bytes(seq.as_bytes())
}

pub(crate) fn find_orf_bytes(seq: &[u8]) -> Option<Orf> {
    if seq.len() < MIN_ORF_SEQ_LEN {
        return None;
    }

    let best = orf_candidates(seq).fold(None, |best: Option<Orf>, orf| match best {
        Some(b) if b.len >= orf.len => Some(b),
        _ => Some(orf),
    });
    if let Some(orf) = best {
        debug!("selected orf {}..{} ({} nt)", orf.start, orf.stop, orf.len);
    }
    best
}

/// Every start codon that reaches an in-frame stop codon, by ascending start.
pub(crate) fn orf_candidates(seq: &[u8]) -> impl Iterator<Item = Orf> + '_ {
    let table = CodonTable::standard();
    start_positions(seq).into_iter().filter_map(move |start| {
        seq[start..]
            .chunks_exact(3)
            .position(|codon| table.decode(codon).is_stop())
            .map(|k| start + 3 * k)
            .filter(|&stop| stop > start)
            .map(|stop| Orf {
                start,
                stop,
                len: stop - start,
            })
    })
}

fn start_positions(seq: &[u8]) -> Vec<usize> {
    let upper: Cow<'_, [u8]> = if seq.iter().any(u8::is_ascii_lowercase) {
        Cow::Owned(seq.to_ascii_uppercase())
    } else {
        Cow::Borrowed(seq)
    };
    let mut starts: Vec<usize> = memmem::find_iter(&upper, b"ATG")
        .chain(memmem::find_iter(&upper, b"AUG"))
        .collect();
    starts.sort_unstable();
    starts
}
