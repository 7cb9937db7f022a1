//! Nucleotide alphabet shared by DNA and RNA exon sequences.
//!
//! T and U are interchangeable everywhere in this crate, and `N` is the only
//! wildcard accepted.

use crate::alphabets::Alphabet;
use std::sync::LazyLock;

/// Rank of the wildcard base in [`base_index`].
pub const WILDCARD_INDEX: usize = 4;

static ALPHABET: LazyLock<Alphabet> = LazyLock::new(|| Alphabet::new(b"ACGTUNacgtun"));

pub fn alphabet() -> &'static Alphabet {
    &ALPHABET
}

static BASE_INDEX: LazyLock<[u8; 256]> = LazyLock::new(|| {
    let mut map = [u8::MAX; 256];
    for (rank, bases) in [&b"Aa"[..], b"Cc", b"Gg", b"TtUu", b"Nn"].iter().enumerate() {
        for &b in bases.iter() {
            map[b as usize] = rank as u8;
        }
    }
    map
});

/// A=0, C=1, G=2, T/U=3, N=4, case-insensitive.
#[inline]
pub fn base_index(b: u8) -> Option<usize> {
    match BASE_INDEX[b as usize] {
        u8::MAX => None,
        rank => Some(rank as usize),
    }
}
