use crate::alphabets::nucleotide;
use crate::error::{ExonError, ExonResult};
use std::fmt;
use std::str::FromStr;

/// Validated nucleotide sequence over `ACGTUN` (either case).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NucleotideSeq {
    bytes: Vec<u8>,
}

impl NucleotideSeq {
    pub fn new(bytes: Vec<u8>) -> ExonResult<Self> {
        if let Some((pos, b)) = nucleotide::alphabet().first_invalid(&bytes) {
            return Err(ExonError::InvalidChar { ch: b as char, pos });
        }
        Ok(Self { bytes })
    }

    #[inline]
    pub(crate) fn from_bytes_unchecked(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The last `n` bases, or `None` when the sequence is shorter than `n`.
    pub fn suffix(&self, n: usize) -> Option<&[u8]> {
        self.bytes
            .len()
            .checked_sub(n)
            .map(|start| &self.bytes[start..])
    }

    pub fn subseq(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.bytes.len());
        let start = start.min(end);
        Self::from_bytes_unchecked(self.bytes[start..end].to_vec())
    }
}

impl FromStr for NucleotideSeq {
    type Err = ExonError;

    fn from_str(s: &str) -> ExonResult<Self> {
        Self::new(s.as_bytes().to_vec())
    }
}

impl fmt::Display for NucleotideSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // validated bytes are ASCII
        for &b in &self.bytes {
            fmt::Write::write_char(f, b as char)?;
        }
        Ok(())
    }
}
