pub mod nucleotide;

use bit_set::BitSet;
use std::borrow::Borrow;

#[derive(Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Alphabet {
    pub symbols: BitSet,
}

impl Alphabet {
    pub fn new<C, T>(symbols: T) -> Self
    where
        C: Borrow<u8>,
        T: IntoIterator<Item = C>,
    {
        let mut s = BitSet::new();
        s.extend(symbols.into_iter().map(|c| *c.borrow() as usize));

        Alphabet { symbols: s }
    }

    #[inline]
    pub fn contains(&self, a: u8) -> bool {
        self.symbols.contains(a as usize)
    }

    /// Position and byte of the first symbol not in the alphabet.
    pub fn first_invalid(&self, text: &[u8]) -> Option<(usize, u8)> {
        text.iter()
            .enumerate()
            .find(|(_, &b)| !self.contains(b))
            .map(|(pos, &b)| (pos, b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_eq() {
        assert_eq!(Alphabet::new(b"ACGTUN"), Alphabet::new(b"NUTGCA"));
        assert_ne!(Alphabet::new(b"ACGT"), Alphabet::new(b"ACGU"));
    }

    #[test]
    fn first_invalid_reports_position() {
        let alphabet = Alphabet::new(b"ACGT");
        assert_eq!(alphabet.first_invalid(b"ACGT"), None);
        assert_eq!(alphabet.first_invalid(b"ACXT"), Some((2, b'X')));
    }
}
