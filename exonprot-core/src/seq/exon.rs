use crate::error::{ExonError, ExonResult};
use crate::seq::nucleotide::NucleotideSeq;
use log::warn;
use std::fmt;

/// Reading-frame phase at one end of an exon.
///
/// `Offset(n)` is the number of bases of the boundary codon that lie on the
/// previous exon; `None` is the `-1` of exon tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    None,
    Offset(u8),
}

impl Phase {
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            -1 => Some(Phase::None),
            0..=2 => Some(Phase::Offset(value as u8)),
            _ => None,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            Phase::None => -1,
            Phase::Offset(n) => n as i8,
        }
    }

    #[inline]
    pub fn is_none(self) -> bool {
        matches!(self, Phase::None)
    }

    #[inline]
    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exon {
    rank: u32,
    sequence: NucleotideSeq,
    start_phase: Phase,
    end_phase: Phase,
}

impl Exon {
    pub fn new(rank: u32, sequence: NucleotideSeq, start_phase: Phase, end_phase: Phase) -> Self {
        Self {
            rank,
            sequence,
            start_phase,
            end_phase,
        }
    }

    /// Builds an exon from the raw fields of an exon table row.
    pub fn from_parts(rank: u32, sequence: &str, start_phase: i64, end_phase: i64) -> ExonResult<Self> {
        let phase = |value: i64| {
            Phase::from_i64(value).ok_or(ExonError::InvalidPhase { rank, phase: value })
        };
        Ok(Self::new(
            rank,
            sequence.parse()?,
            phase(start_phase)?,
            phase(end_phase)?,
        ))
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn sequence(&self) -> &NucleotideSeq {
        &self.sequence
    }

    pub fn start_phase(&self) -> Phase {
        self.start_phase
    }

    pub fn end_phase(&self) -> Phase {
        self.end_phase
    }
}

/// Exons of one transcript, ordered by rank.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transcript {
    id: Box<str>,
    exons: Vec<Exon>,
}

impl Transcript {
    pub fn new(id: impl Into<Box<str>>, mut exons: Vec<Exon>) -> ExonResult<Self> {
        let id = id.into();
        exons.sort_by_key(Exon::rank);
        if let Some(pair) = exons.windows(2).find(|w| w[0].rank == w[1].rank) {
            return Err(ExonError::DuplicateRank {
                transcript: id.to_string(),
                rank: pair[0].rank,
            });
        }
        Ok(Self { id, exons })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    pub fn len(&self) -> usize {
        self.exons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exons.is_empty()
    }

    /// Checks that each exon's start phase agrees in sign with the previous
    /// exon's end phase. Equal signs with different offsets are only logged.
    pub fn check_phases(&self) -> ExonResult<()> {
        for pair in self.exons.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if prev.end_phase.is_some() != next.start_phase.is_some() {
                return Err(ExonError::InconsistentPhase {
                    transcript: self.id.to_string(),
                    prev_rank: prev.rank,
                    end_phase: prev.end_phase.as_i8(),
                    rank: next.rank,
                    start_phase: next.start_phase.as_i8(),
                });
            }
            if prev.end_phase != next.start_phase {
                warn!(
                    "transcript {}: exon {} ends with phase {} but exon {} starts with phase {}",
                    self.id, prev.rank, prev.end_phase, next.rank, next.start_phase
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exon(rank: u32, seq: &str, start: i64, end: i64) -> Exon {
        Exon::from_parts(rank, seq, start, end).unwrap()
    }

    #[test]
    fn phase_from_table_values() {
        assert_eq!(Phase::from_i64(-1), Some(Phase::None));
        assert_eq!(Phase::from_i64(2), Some(Phase::Offset(2)));
        assert_eq!(Phase::from_i64(3), None);
        assert_eq!(Phase::from_i64(-2), None);
        assert_eq!(Phase::Offset(1).to_string(), "1");
        assert_eq!(Phase::None.to_string(), "-1");
    }

    #[test]
    fn from_parts_rejects_bad_phase() {
        let err = Exon::from_parts(4, "ACGT", 0, 5).unwrap_err();
        match err {
            ExonError::InvalidPhase { rank, phase } => {
                assert_eq!(rank, 4);
                assert_eq!(phase, 5);
            }
            other => panic!("expected invalid phase, got {other:?}"),
        }
    }

    #[test]
    fn transcript_sorts_by_rank() {
        let t = Transcript::new(
            "T1",
            vec![exon(3, "AAA", 0, -1), exon(1, "ATG", -1, 0), exon(2, "CCC", 0, 0)],
        )
        .unwrap();
        let ranks: Vec<u32> = t.exons().iter().map(Exon::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(t.id(), "T1");
    }

    #[test]
    fn transcript_rejects_duplicate_rank() {
        let err = Transcript::new("T1", vec![exon(1, "ATG", -1, 0), exon(1, "CCC", 0, 0)])
            .unwrap_err();
        assert!(matches!(err, ExonError::DuplicateRank { rank: 1, .. }));
    }

    #[test]
    fn check_phases_flags_sign_disagreement() {
        let t = Transcript::new("T1", vec![exon(1, "ATGCC", -1, 2), exon(2, "CCC", -1, -1)])
            .unwrap();
        match t.check_phases().unwrap_err() {
            ExonError::InconsistentPhase {
                prev_rank,
                end_phase,
                rank,
                start_phase,
                ..
            } => {
                assert_eq!((prev_rank, end_phase, rank, start_phase), (1, 2, 2, -1));
            }
            other => panic!("expected inconsistent phase, got {other:?}"),
        }
    }

    #[test]
    fn check_phases_tolerates_offset_mismatch() {
        let t = Transcript::new("T1", vec![exon(1, "ATGCC", -1, 2), exon(2, "CCC", 1, -1)])
            .unwrap();
        assert!(t.check_phases().is_ok());
    }
}
