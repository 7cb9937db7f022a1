//! Drives exon translation across a whole transcript.

use crate::error::ExonResult;
use crate::seq::exon::Transcript;
use crate::translate::exon::{translate_continuation, translate_exon, ExonFragment};
use crate::translate::resolver::{has_phase_information, resolve_start_exon, StartExon};
use log::debug;

/// Translation state of the transcript when an exon was visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssemblyState {
    NotStarted,
    Translating,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// A stop codon was decoded.
    StopCodon,
    /// An exon ended without a phased 3' boundary.
    PhaseBreak,
    /// The last exon was reached while still in frame.
    Exhausted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    Translated { start_rank: u32, stop: StopReason },
    NoStartFound,
    NoOrfFound,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExonProtein {
    pub rank: u32,
    pub protein: String,
    pub state: AssemblyState,
}

/// Per-exon protein fragments of one transcript, in rank order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptTranslation {
    pub transcript_id: Box<str>,
    pub fragments: Vec<ExonProtein>,
    pub start: Option<StartExon>,
    pub outcome: Outcome,
}

impl TranscriptTranslation {
    /// The full protein: every fragment concatenated in rank order.
    pub fn protein(&self) -> String {
        self.fragments.iter().map(|f| f.protein.as_str()).collect()
    }

    pub fn fragment(&self, rank: u32) -> Option<&str> {
        self.fragments
            .iter()
            .find(|f| f.rank == rank)
            .map(|f| f.protein.as_str())
    }

    pub fn is_translated(&self) -> bool {
        matches!(self.outcome, Outcome::Translated { .. })
    }

    fn untranslated(transcript: &Transcript, outcome: Outcome) -> Self {
        Self {
            transcript_id: transcript.id().into(),
            fragments: transcript
                .exons()
                .iter()
                .map(|e| ExonProtein {
                    rank: e.rank(),
                    protein: String::new(),
                    state: AssemblyState::NotStarted,
                })
                .collect(),
            start: None,
            outcome,
        }
    }
}

/// Translates every exon of `transcript`.
///
/// Fails only on inconsistent phases or an unstitchable boundary codon; a
/// transcript without a start exon or ORF comes back with empty fragments.
/// A start exon whose own fragment is empty still opens the reading frame
/// for the exons after it.
pub fn translate_transcript(transcript: &Transcript) -> ExonResult<TranscriptTranslation> {
    transcript.check_phases()?;
    let exons = transcript.exons();

    let Some(start) = resolve_start_exon(exons) else {
        let outcome = if exons.is_empty() || has_phase_information(exons) {
            Outcome::NoStartFound
        } else {
            Outcome::NoOrfFound
        };
        debug!("transcript {}: {:?}", transcript.id(), outcome);
        return Ok(TranscriptTranslation::untranslated(transcript, outcome));
    };
    debug!(
        "transcript {}: start exon {} ({:?})",
        transcript.id(),
        start.rank,
        start.rule
    );

    let mut state = AssemblyState::NotStarted;
    let mut stop = StopReason::Exhausted;
    let mut fragments = Vec::with_capacity(exons.len());

    for (idx, exon) in exons.iter().enumerate() {
        let fragment = match state {
            AssemblyState::NotStarted if idx < start.index => ExonFragment::default(),
            AssemblyState::NotStarted => {
                let fragment = translate_exon(exon.sequence(), exon.start_phase(), exon.end_phase());
                if fragment.protein.is_empty() {
                    debug!(
                        "transcript {}: no start codon in exon {}",
                        transcript.id(),
                        exon.rank()
                    );
                }
                state = AssemblyState::Translating;
                fragment
            }
            AssemblyState::Translating => {
                let prev = &exons[idx - 1];
                if prev.end_phase().is_none() {
                    state = AssemblyState::Stopped;
                    stop = StopReason::PhaseBreak;
                    ExonFragment::default()
                } else {
                    translate_continuation(prev, exon)?
                }
            }
            AssemblyState::Stopped => ExonFragment::default(),
        };

        fragments.push(ExonProtein {
            rank: exon.rank(),
            protein: fragment.protein,
            state,
        });
        if fragment.terminated {
            state = AssemblyState::Stopped;
            stop = StopReason::StopCodon;
        }
    }

    Ok(TranscriptTranslation {
        transcript_id: transcript.id().into(),
        fragments,
        start: Some(start),
        outcome: Outcome::Translated {
            start_rank: start.rank,
            stop,
        },
    })
}

/// Translates independent transcripts, in parallel with the `parallel`
/// feature. Results keep the input order.
pub fn translate_all(transcripts: &[Transcript]) -> Vec<ExonResult<TranscriptTranslation>> {
    par_map!(transcripts, translate_transcript)
}
