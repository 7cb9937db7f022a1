pub mod exon;
pub mod nucleotide;

pub use exon::{Exon, Phase, Transcript};
pub use nucleotide::NucleotideSeq;
