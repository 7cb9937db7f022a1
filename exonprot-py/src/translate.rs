use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::utils::{extract_nucleotide, extract_seq_bytes, map_exon_err, parse_phase};
use exonprot_core::seq::{Exon, Transcript};
use exonprot_core::translate::{self, CodonTable, Outcome, StopReason};

#[pyclass(frozen)]
pub struct TranscriptTranslation {
    transcript_id: String,
    fragments: Vec<(u32, String)>,
    protein: String,
    start_rank: Option<u32>,
    outcome: &'static str,
}

#[pymethods]
impl TranscriptTranslation {
    #[getter]
    fn transcript_id(&self) -> &str {
        &self.transcript_id
    }

    /// `(rank, protein)` pairs in rank order.
    #[getter]
    fn fragments(&self) -> Vec<(u32, String)> {
        self.fragments.clone()
    }

    #[getter]
    fn protein(&self) -> &str {
        &self.protein
    }

    #[getter]
    fn start_rank(&self) -> Option<u32> {
        self.start_rank
    }

    /// One of `stop_codon`, `phase_break`, `exhausted`, `no_start_found`,
    /// `no_orf_found`.
    #[getter]
    fn outcome(&self) -> &str {
        self.outcome
    }

    fn __len__(&self) -> usize {
        self.fragments.len()
    }

    fn __repr__(&self) -> PyResult<String> {
        Ok(format!(
            "TranscriptTranslation(transcript_id={:?}, protein={:?}, outcome={:?})",
            self.transcript_id, self.protein, self.outcome
        ))
    }
}

impl From<translate::TranscriptTranslation> for TranscriptTranslation {
    fn from(value: translate::TranscriptTranslation) -> Self {
        let outcome = match value.outcome {
            Outcome::Translated { stop, .. } => match stop {
                StopReason::StopCodon => "stop_codon",
                StopReason::PhaseBreak => "phase_break",
                StopReason::Exhausted => "exhausted",
            },
            Outcome::NoStartFound => "no_start_found",
            Outcome::NoOrfFound => "no_orf_found",
        };
        Self {
            protein: value.protein(),
            transcript_id: value.transcript_id.into_string(),
            start_rank: value.start.map(|s| s.rank),
            fragments: value
                .fragments
                .into_iter()
                .map(|f| (f.rank, f.protein))
                .collect(),
            outcome,
        }
    }
}

#[pyfunction]
fn lookup_codon(codon: &Bound<'_, PyAny>) -> PyResult<char> {
    let bytes = extract_seq_bytes(codon)?;
    let symbol = CodonTable::standard()
        .lookup(&bytes)
        .map_err(map_exon_err)?;
    Ok(symbol.as_char())
}

/// Returns `(start, stop, length)` of the longest ORF, or `None`.
#[pyfunction]
fn find_orf(seq: &Bound<'_, PyAny>) -> PyResult<Option<(usize, usize, usize)>> {
    let seq = extract_nucleotide(seq)?;
    Ok(translate::find_orf(&seq).map(|orf| (orf.start, orf.stop, orf.len)))
}

#[pyfunction]
fn translate_exon(seq: &Bound<'_, PyAny>, start_phase: i64, end_phase: i64) -> PyResult<String> {
    let seq = extract_nucleotide(seq)?;
    let fragment =
        translate::translate_exon(&seq, parse_phase(start_phase)?, parse_phase(end_phase)?);
    Ok(fragment.protein)
}

/// Translates a transcript given as `(rank, sequence, start_phase, end_phase)`
/// tuples in any order.
#[pyfunction]
#[pyo3(signature = (exons, transcript_id=""))]
fn translate_transcript(
    py: Python<'_>,
    exons: Vec<(u32, String, i64, i64)>,
    transcript_id: &str,
) -> PyResult<TranscriptTranslation> {
    let exons = exons
        .into_iter()
        .map(|(rank, seq, start, end)| Exon::from_parts(rank, &seq, start, end))
        .collect::<Result<Vec<_>, _>>()
        .map_err(map_exon_err)?;
    let transcript = Transcript::new(transcript_id, exons).map_err(map_exon_err)?;
    let translation = py
        .allow_threads(|| translate::translate_transcript(&transcript))
        .map_err(map_exon_err)?;
    Ok(TranscriptTranslation::from(translation))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<TranscriptTranslation>()?;
    m.add_function(wrap_pyfunction!(lookup_codon, m)?)?;
    m.add_function(wrap_pyfunction!(find_orf, m)?)?;
    m.add_function(wrap_pyfunction!(translate_exon, m)?)?;
    m.add_function(wrap_pyfunction!(translate_transcript, m)?)?;
    Ok(())
}
