use super::*;
use crate::error::ExonError;
use crate::seq::exon::{Exon, Transcript};
use proptest::prelude::*;

fn exon(rank: u32, seq: &str, start: i64, end: i64) -> Exon {
    Exon::from_parts(rank, seq, start, end).unwrap()
}

fn transcript(exons: Vec<Exon>) -> Transcript {
    Transcript::new("ENST0001", exons).unwrap()
}

fn proteins(t: &TranscriptTranslation) -> Vec<&str> {
    t.fragments.iter().map(|f| f.protein.as_str()).collect()
}

fn states(t: &TranscriptTranslation) -> Vec<AssemblyState> {
    t.fragments.iter().map(|f| f.state).collect()
}

#[test]
fn utr_start_internal_and_stop_exons() {
    let t = transcript(vec![
        exon(1, "GGGCCC", -1, -1),
        exon(2, "ATGAAAGC", -1, 2),
        exon(3, "TGGCG", 2, 1),
        exon(4, "CAAAATAAGG", 1, -1),
        exon(5, "ATGCCCTGA", -1, -1),
    ]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(proteins(&tr), vec!["", "MK", "AG", "AK", ""]);
    assert_eq!(tr.protein(), "MKAGAK");
    assert_eq!(
        states(&tr),
        vec![
            AssemblyState::NotStarted,
            AssemblyState::Translating,
            AssemblyState::Translating,
            AssemblyState::Translating,
            AssemblyState::Stopped,
        ]
    );
    assert_eq!(
        tr.outcome,
        Outcome::Translated {
            start_rank: 2,
            stop: StopReason::StopCodon
        }
    );
    assert_eq!(tr.start.map(|s| s.rule), Some(StartRule::PhaseBoundary));
    assert_eq!(tr.fragment(4), Some("AK"));
}

#[test]
fn first_exon_in_frame() {
    let t = transcript(vec![exon(1, "ATGCCCG", 0, 1), exon(2, "CTTAA", 1, -1)]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(proteins(&tr), vec!["MP", "A"]);
    assert_eq!(tr.start.map(|s| s.rule), Some(StartRule::InFrame));
}

#[test]
fn unphased_end_stops_translation() {
    let t = transcript(vec![exon(1, "ATGCCC", 0, -1), exon(2, "GGGTAA", -1, -1)]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(proteins(&tr), vec!["MP", ""]);
    assert_eq!(
        tr.outcome,
        Outcome::Translated {
            start_rank: 1,
            stop: StopReason::PhaseBreak
        }
    );
}

#[test]
fn runs_out_of_exons_in_frame() {
    let t = transcript(vec![exon(1, "ATGCCC", 0, 0), exon(2, "GGG", 0, 0)]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(tr.protein(), "MPG");
    assert_eq!(
        tr.outcome,
        Outcome::Translated {
            start_rank: 1,
            stop: StopReason::Exhausted
        }
    );
}

#[test]
fn mismatched_phase_values_stitch_with_next_start_phase() {
    // exon 1 claims two bases carry over, exon 2 says one: "C" + "CT" = CCT
    let t = transcript(vec![exon(1, "ATGGC", 0, 2), exon(2, "CTTAA", 1, -1)]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(proteins(&tr), vec!["M", "P"]);
    assert_eq!(
        tr.outcome,
        Outcome::Translated {
            start_rank: 1,
            stop: StopReason::StopCodon
        }
    );
}

#[test]
fn ambiguous_codons_render_as_wildcard() {
    let t = transcript(vec![exon(1, "ATGNNNGCCTAA", 0, -1)]);
    assert_eq!(translate_transcript(&t).unwrap().protein(), "MZA");
}

#[test]
fn input_order_does_not_matter() {
    let t = transcript(vec![exon(2, "CTTAA", 1, -1), exon(1, "ATGCCCG", 0, 1)]);
    assert_eq!(translate_transcript(&t).unwrap().protein(), "MPA");
}

#[test]
fn longest_orf_exon_is_translated() {
    let t = transcript(vec![
        exon(1, "CCCCCC", -1, -1),
        exon(2, "CCATGCCCCCCTAGCC", -1, -1),
        exon(3, "ATGAAATAA", -1, -1),
    ]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(proteins(&tr), vec!["", "MPP", ""]);
    assert_eq!(states(&tr)[2], AssemblyState::Stopped);
    assert_eq!(
        tr.outcome,
        Outcome::Translated {
            start_rank: 2,
            stop: StopReason::StopCodon
        }
    );
}

#[test]
fn no_orf_anywhere_is_reported_not_raised() {
    let t = transcript(vec![exon(1, "CCCCCCCC", -1, -1), exon(2, "ATGCCCCC", -1, -1)]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(tr.outcome, Outcome::NoOrfFound);
    assert!(tr.fragments.iter().all(|f| f.protein.is_empty()));
    assert_eq!(tr.protein(), "");
    assert!(!tr.is_translated());
    assert_eq!(tr.start, None);
}

#[test]
fn start_exon_without_start_codon_keeps_frame() {
    let t = transcript(vec![exon(1, "CCCAAA", -1, 0), exon(2, "GGGGCCTAA", 0, -1)]);
    let tr = translate_transcript(&t).unwrap();
    assert_eq!(proteins(&tr), vec!["", "GA"]);
    assert_eq!(
        states(&tr),
        vec![AssemblyState::Translating, AssemblyState::Translating]
    );
    assert_eq!(
        tr.outcome,
        Outcome::Translated {
            start_rank: 1,
            stop: StopReason::StopCodon
        }
    );
}

#[test]
fn empty_transcript() {
    let tr = translate_transcript(&transcript(Vec::new())).unwrap();
    assert_eq!(tr.outcome, Outcome::NoStartFound);
    assert!(tr.fragments.is_empty());
}

#[test]
fn inconsistent_phase_is_an_error() {
    let t = transcript(vec![exon(1, "ATGCC", -1, 2), exon(2, "CTTAA", -1, -1)]);
    let err = translate_transcript(&t).unwrap_err();
    assert!(matches!(err, ExonError::InconsistentPhase { prev_rank: 1, rank: 2, .. }));
}

#[test]
fn unstitchable_boundary_is_an_error() {
    let t = transcript(vec![exon(1, "ATGGC", 0, 2), exon(2, "", 2, -1)]);
    let err = translate_transcript(&t).unwrap_err();
    assert!(matches!(err, ExonError::MalformedCodon { .. }));
}

#[test]
fn batch_failures_stay_scoped() {
    let good = transcript(vec![exon(1, "ATGCCCTAA", 0, -1)]);
    let bad = transcript(vec![exon(1, "ATGCC", -1, 2), exon(2, "CTTAA", -1, -1)]);
    let results = translate_all(&[good.clone(), bad, good]);
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().protein(), "MP");
    assert!(results[1].is_err());
    assert_eq!(results[2].as_ref().unwrap().protein(), "MP");
}

fn exon_seq() -> impl Strategy<Value = String> {
    prop::collection::vec(prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')], 0..24)
        .prop_map(|v| v.into_iter().collect())
}

fn phase() -> impl Strategy<Value = i64> {
    -1i64..3
}

/// Transcripts whose adjacent phases always agree.
fn consistent_transcript() -> impl Strategy<Value = Transcript> {
    (phase(), prop::collection::vec((exon_seq(), phase()), 1..6)).prop_map(|(first, parts)| {
        let mut start = first;
        let mut exons = Vec::with_capacity(parts.len());
        for (i, (seq, end)) in parts.into_iter().enumerate() {
            exons.push(exon(i as u32 + 1, &seq, start, end));
            start = end;
        }
        transcript(exons)
    })
}

proptest! {
    #[test]
    fn translation_is_deterministic(t in consistent_transcript()) {
        let first = translate_transcript(&t).ok();
        let second = translate_transcript(&t).ok();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn fragments_cover_every_exon_without_stops(t in consistent_transcript()) {
        if let Ok(tr) = translate_transcript(&t) {
            prop_assert_eq!(tr.fragments.len(), t.len());
            let joined: String = tr.fragments.iter().map(|f| f.protein.clone()).collect();
            prop_assert_eq!(joined, tr.protein());
            prop_assert!(!tr.protein().contains('*'));
        }
    }

    #[test]
    fn nothing_follows_a_stop(t in consistent_transcript()) {
        if let Ok(tr) = translate_transcript(&t) {
            let stopped = tr.fragments.iter().skip_while(|f| f.state != AssemblyState::Stopped);
            for f in stopped {
                prop_assert!(f.protein.is_empty());
            }
        }
    }
}
