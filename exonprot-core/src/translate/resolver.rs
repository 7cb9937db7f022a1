//! Locating the exon that holds the translation start.

use crate::seq::exon::Exon;
use crate::translate::orf::{find_orf, Orf};

/// Which rule picked the start exon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StartRule {
    /// The first exon already starts in frame.
    InFrame,
    /// No phase information anywhere; the exon with the longest ORF.
    LongestOrf(Orf),
    /// First exon whose 3' end is phased but whose 5' end is not.
    PhaseBoundary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StartExon {
    pub index: usize,
    pub rank: u32,
    pub rule: StartRule,
}

/// True when at least one exon carries a phase at either end.
pub fn has_phase_information(exons: &[Exon]) -> bool {
    exons
        .iter()
        .any(|e| e.start_phase().is_some() || e.end_phase().is_some())
}

/// Picks the start exon of rank-ordered `exons`; the first matching rule wins.
pub fn resolve_start_exon(exons: &[Exon]) -> Option<StartExon> {
    let first = exons.first()?;
    if first.start_phase().is_some() {
        return Some(StartExon {
            index: 0,
            rank: first.rank(),
            rule: StartRule::InFrame,
        });
    }

    if !has_phase_information(exons) {
        return longest_orf_exon(exons);
    }

    exons
        .iter()
        .position(|e| e.start_phase().is_none() && e.end_phase().is_some())
        .map(|index| StartExon {
            index,
            rank: exons[index].rank(),
            rule: StartRule::PhaseBoundary,
        })
}

fn longest_orf_exon(exons: &[Exon]) -> Option<StartExon> {
    let mut best: Option<StartExon> = None;
    for (index, exon) in exons.iter().enumerate() {
        let Some(orf) = find_orf(exon.sequence()) else {
            continue;
        };
        let longer = match best.map(|b| b.rule) {
            Some(StartRule::LongestOrf(current)) => orf.len > current.len,
            _ => true,
        };
        if longer {
            best = Some(StartExon {
                index,
                rank: exon.rank(),
                rule: StartRule::LongestOrf(orf),
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exon(rank: u32, seq: &str, start: i64, end: i64) -> Exon {
        Exon::from_parts(rank, seq, start, end).unwrap()
    }

    #[test]
    fn empty_has_no_start() {
        assert_eq!(resolve_start_exon(&[]), None);
    }

    #[test]
    fn in_frame_first_exon() {
        let exons = [exon(1, "ATGCCC", 0, 0), exon(2, "GGGTAA", 0, -1)];
        let start = resolve_start_exon(&exons).unwrap();
        assert_eq!(start.rank, 1);
        assert_eq!(start.rule, StartRule::InFrame);
    }

    #[test]
    fn phase_boundary_after_utr() {
        let exons = [
            exon(1, "CCCC", -1, -1),
            exon(2, "GATGCC", -1, 0),
            exon(3, "GGGTAA", 0, -1),
        ];
        let start = resolve_start_exon(&exons).unwrap();
        assert_eq!((start.index, start.rank), (1, 2));
        assert_eq!(start.rule, StartRule::PhaseBoundary);
    }

    #[test]
    fn phase_boundary_missing() {
        // phased only at the 5' end of a later exon, never a -1/>=0 exon
        let exons = [exon(1, "CCCC", -1, -1), exon(2, "GGG", -1, -1), exon(3, "AAA", 0, -1)];
        assert_eq!(resolve_start_exon(&exons), None);
    }

    #[test]
    fn longest_orf_across_unphased_exons() {
        let exons = [
            exon(1, "ATGTAA", -1, -1),
            exon(2, "CCATGCCCCCCTAGCC", -1, -1),
            exon(3, "ATGCCCCCCTGA", -1, -1),
        ];
        let start = resolve_start_exon(&exons).unwrap();
        // exons 2 and 3 tie at 9 nt, the lower rank wins
        assert_eq!(start.rank, 2);
        match start.rule {
            StartRule::LongestOrf(orf) => assert_eq!(orf.span(), 2..11),
            other => panic!("expected longest orf, got {other:?}"),
        }
    }

    #[test]
    fn unphased_without_orf() {
        let exons = [exon(1, "CCCCCC", -1, -1), exon(2, "ATGCCC", -1, -1)];
        assert_eq!(resolve_start_exon(&exons), None);
        assert!(!has_phase_information(&exons));
    }
}
