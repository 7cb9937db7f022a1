//! Exon-to-protein translation pipeline.
//!
//! [`translate_transcript`] resolves the start exon, then translates each
//! exon from there on, stitching codons split across exon boundaries.

pub mod assembler;
pub mod codon;
pub mod exon;
pub mod orf;
pub mod resolver;

pub use assembler::{
    translate_all, translate_transcript, AssemblyState, ExonProtein, Outcome, StopReason,
    TranscriptTranslation,
};
pub use codon::{CodonTable, Symbol};
pub use exon::{stitch_codon, translate_continuation, translate_exon, ExonFragment};
pub use orf::{find_orf, Orf};
pub use resolver::{resolve_start_exon, StartExon, StartRule};

#[cfg(test)]
mod tests;
