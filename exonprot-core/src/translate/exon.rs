//! Phase-aware translation of a single exon.

use crate::error::{ExonError, ExonResult};
use crate::seq::exon::{Exon, Phase};
use crate::seq::nucleotide::NucleotideSeq;
use crate::translate::codon::{CodonTable, Symbol};
use crate::translate::orf::find_orf_bytes;

/// Protein translated from one exon.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExonFragment {
    pub protein: String,
    /// A stop codon was decoded inside this exon.
    pub terminated: bool,
}

impl ExonFragment {
    fn terminated(protein: String) -> Self {
        Self {
            protein,
            terminated: true,
        }
    }
}

/// Translates one exon from its own phases.
///
/// - phased 5' end: skip the bases that finish the previous exon's codon and
///   read forward to the first stop codon;
/// - unphased 5' end, phased 3' end: read backward from the 3' codon boundary
///   to the nearest start codon;
/// - no phases: translate the longest ORF.
pub fn translate_exon(seq: &NucleotideSeq, start_phase: Phase, end_phase: Phase) -> ExonFragment {
    let bytes = seq.as_bytes();
    match (start_phase, end_phase) {
        (Phase::Offset(p), _) => translate_forward(bytes.get(leading_trim(p)..).unwrap_or(&[])),
        (Phase::None, Phase::Offset(e)) => translate_backward(bytes, e),
        (Phase::None, Phase::None) => translate_orf(bytes),
    }
}

/// Translates `next`, which continues the reading frame of `prev`.
///
/// With a start phase of `p > 0`, the first codon is the last `p` bases of
/// `prev` followed by the first `3 - p` bases of `next`.
pub fn translate_continuation(prev: &Exon, next: &Exon) -> ExonResult<ExonFragment> {
    let bytes = next.sequence().as_bytes();
    let p = match next.start_phase() {
        Phase::Offset(0) => return Ok(translate_forward(bytes)),
        Phase::Offset(p) => p,
        Phase::None => return Ok(ExonFragment::default()),
    };

    let boundary = stitch_codon(prev.sequence(), next.sequence(), p)?;
    if boundary.is_stop() {
        return Ok(ExonFragment::terminated(String::new()));
    }
    let mut fragment = translate_forward(&bytes[leading_trim(p)..]);
    fragment.protein.insert(0, boundary.as_char());
    Ok(fragment)
}

/// Decodes the codon split across `prev` and `next` at start phase `phase`.
pub fn stitch_codon(prev: &NucleotideSeq, next: &NucleotideSeq, phase: u8) -> ExonResult<Symbol> {
    let split = phase as usize;
    let head = prev.suffix(split);
    let tail = next.as_bytes().get(..3usize.saturating_sub(split));
    match (head, tail) {
        (Some(head), Some(tail)) if split < 3 => {
            let codon = [head, tail].concat();
            CodonTable::standard().lookup(&codon)
        }
        _ => Err(ExonError::MalformedCodon {
            codon: format!(
                "{}|{}",
                String::from_utf8_lossy(prev.as_bytes()),
                String::from_utf8_lossy(next.as_bytes())
            ),
        }),
    }
}

#[inline]
fn leading_trim(phase: u8) -> usize {
    (3 - phase as usize % 3) % 3
}

/// Reads whole codons until a stop codon, which is not emitted. A trailing
/// partial codon is dropped.
fn translate_forward(bytes: &[u8]) -> ExonFragment {
    let table = CodonTable::standard();
    let mut protein = String::with_capacity(bytes.len() / 3);
    for codon in bytes.chunks_exact(3) {
        match table.decode(codon) {
            Symbol::Stop => return ExonFragment::terminated(protein),
            symbol => protein.push(symbol.as_char()),
        }
    }
    ExonFragment {
        protein,
        terminated: false,
    }
}

/// Reads codons right to left from the 3' boundary until a start codon.
/// Anything that does not begin with `M` yields an empty fragment.
fn translate_backward(bytes: &[u8], end_phase: u8) -> ExonFragment {
    let table = CodonTable::standard();
    let end = bytes.len().saturating_sub(end_phase as usize);
    let mut reversed: Vec<u8> = Vec::with_capacity(end / 3);
    for codon in bytes[..end].rchunks_exact(3) {
        let symbol = table.decode(codon);
        if symbol.is_stop() {
            break;
        }
        reversed.push(symbol.as_byte());
        if symbol.is_start() {
            return ExonFragment {
                protein: reversed.iter().rev().map(|&b| b as char).collect(),
                terminated: false,
            };
        }
    }
    ExonFragment::default()
}

fn translate_orf(bytes: &[u8]) -> ExonFragment {
    match find_orf_bytes(bytes) {
        Some(orf) => {
            let fragment = translate_forward(&bytes[orf.span()]);
            ExonFragment::terminated(fragment.protein)
        }
        None => ExonFragment::default(),
    }
}
