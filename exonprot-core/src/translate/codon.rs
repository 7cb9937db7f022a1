//! Standard genetic code with `N` wildcards.

use crate::alphabets::nucleotide::{base_index, WILDCARD_INDEX};
use crate::error::{ExonError, ExonResult};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Decoded codon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbol {
    Amino(u8),
    Stop,
    Ambiguous,
}

impl Symbol {
    pub const START: Symbol = Symbol::Amino(b'M');
    pub const STOP_CHAR: u8 = b'*';
    pub const AMBIGUOUS_CHAR: u8 = b'Z';

    pub fn as_byte(self) -> u8 {
        match self {
            Symbol::Amino(aa) => aa,
            Symbol::Stop => Self::STOP_CHAR,
            Symbol::Ambiguous => Self::AMBIGUOUS_CHAR,
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        self.as_byte() as char
    }

    #[inline]
    pub fn is_start(self) -> bool {
        self == Self::START
    }

    #[inline]
    pub fn is_stop(self) -> bool {
        self == Symbol::Stop
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[rustfmt::skip]
const STANDARD_RNA: [(&[u8; 3], u8); 64] = [
    (b"UUU", b'F'), (b"UUC", b'F'), (b"UUA", b'L'), (b"UUG", b'L'),
    (b"UCU", b'S'), (b"UCC", b'S'), (b"UCA", b'S'), (b"UCG", b'S'),
    (b"UAU", b'Y'), (b"UAC", b'Y'), (b"UAA", b'*'), (b"UAG", b'*'),
    (b"UGU", b'C'), (b"UGC", b'C'), (b"UGA", b'*'), (b"UGG", b'W'),
    (b"CUU", b'L'), (b"CUC", b'L'), (b"CUA", b'L'), (b"CUG", b'L'),
    (b"CCU", b'P'), (b"CCC", b'P'), (b"CCA", b'P'), (b"CCG", b'P'),
    (b"CAU", b'H'), (b"CAC", b'H'), (b"CAA", b'Q'), (b"CAG", b'Q'),
    (b"CGU", b'R'), (b"CGC", b'R'), (b"CGA", b'R'), (b"CGG", b'R'),
    (b"AUU", b'I'), (b"AUC", b'I'), (b"AUA", b'I'), (b"AUG", b'M'),
    (b"ACU", b'T'), (b"ACC", b'T'), (b"ACA", b'T'), (b"ACG", b'T'),
    (b"AAU", b'N'), (b"AAC", b'N'), (b"AAA", b'K'), (b"AAG", b'K'),
    (b"AGU", b'S'), (b"AGC", b'S'), (b"AGA", b'R'), (b"AGG", b'R'),
    (b"GUU", b'V'), (b"GUC", b'V'), (b"GUA", b'V'), (b"GUG", b'V'),
    (b"GCU", b'A'), (b"GCC", b'A'), (b"GCA", b'A'), (b"GCG", b'A'),
    (b"GAU", b'D'), (b"GAC", b'D'), (b"GAA", b'E'), (b"GAG", b'E'),
    (b"GGU", b'G'), (b"GGC", b'G'), (b"GGA", b'G'), (b"GGG", b'G'),
];

const BASES: usize = WILDCARD_INDEX + 1;
const TABLE_LEN: usize = BASES * BASES * BASES;

static STANDARD: LazyLock<CodonTable> = LazyLock::new(CodonTable::build);

/// Immutable codon lookup table.
///
/// Indexed by base rank (A=0, C=1, G=2, T/U=3, N=4), so T and U forms and
/// upper and lower case share entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodonTable {
    table: [Symbol; TABLE_LEN],
}

impl CodonTable {
    /// The process-wide standard table.
    pub fn standard() -> &'static CodonTable {
        &STANDARD
    }

    fn build() -> Self {
        let mut entries: BTreeMap<[u8; 3], Symbol> = BTreeMap::new();
        for (codon, aa) in STANDARD_RNA {
            let symbol = match aa {
                b'*' => Symbol::Stop,
                aa => Symbol::Amino(aa),
            };
            entries.insert(*codon, symbol);
            entries.insert(codon.map(|b| if b == b'U' { b'T' } else { b }), symbol);
        }

        let definite: Vec<[u8; 3]> = entries.keys().copied().collect();
        for codon in definite {
            // every non-empty subset of positions
            for mask in 1u8..8 {
                let mut variant = codon;
                for (pos, base) in variant.iter_mut().enumerate() {
                    if mask & (1 << pos) != 0 {
                        *base = b'N';
                    }
                }
                entries.entry(variant).or_insert(Symbol::Ambiguous);
            }
        }

        let mut table = [Symbol::Ambiguous; TABLE_LEN];
        for (codon, symbol) in entries {
            if let Some(idx) = codon_index(&codon) {
                table[idx] = symbol;
            }
        }
        Self { table }
    }

    /// Decodes one codon, failing on anything that is not exactly three
    /// bases from `ACGTUN`.
    pub fn lookup(&self, codon: &[u8]) -> ExonResult<Symbol> {
        codon_index(codon)
            .map(|idx| self.table[idx])
            .ok_or_else(|| ExonError::MalformedCodon {
                codon: String::from_utf8_lossy(codon).into_owned(),
            })
    }

    /// Decodes a codon taken from an already validated sequence.
    #[inline]
    pub(crate) fn decode(&self, codon: &[u8]) -> Symbol {
        debug_assert!(codon_index(codon).is_some());
        codon_index(codon).map_or(Symbol::Ambiguous, |idx| self.table[idx])
    }
}

#[inline]
fn codon_index(codon: &[u8]) -> Option<usize> {
    match codon {
        &[a, b, c] => Some(
            (base_index(a)? * BASES + base_index(b)?) * BASES + base_index(c)?,
        ),
        _ => None,
    }
}
