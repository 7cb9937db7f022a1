use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::report::BatchReport;
use crate::utils::{map_exon_err, parse_on_error};
use exonprot_core::io::csv::{self, ExonColumns};

#[allow(clippy::too_many_arguments)]
#[pyfunction]
#[pyo3(signature = (
    input,
    output,
    *,
    on_error="raise",
    transcript_id_col="transcript_id",
    rank_col="rank",
    start_phase_col="startPhase",
    end_phase_col="endPhase",
    sequence_col="sequence",
    protein_col="protein",
    delimiter=";",
))]
fn translate_csv(
    py: Python<'_>,
    input: &str,
    output: &str,
    on_error: &str,
    transcript_id_col: &str,
    rank_col: &str,
    start_phase_col: &str,
    end_phase_col: &str,
    sequence_col: &str,
    protein_col: &str,
    delimiter: &str,
) -> PyResult<BatchReport> {
    let on_error = parse_on_error(on_error)?;
    let mut chars = delimiter.chars();
    let transcript_delimiter = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => return Err(PyValueError::new_err("delimiter must be a single character")),
    };
    let columns = ExonColumns {
        transcript_id: transcript_id_col.to_string(),
        rank: rank_col.to_string(),
        start_phase: start_phase_col.to_string(),
        end_phase: end_phase_col.to_string(),
        sequence: sequence_col.to_string(),
        protein: protein_col.to_string(),
        transcript_delimiter,
    };

    let report = py
        .allow_threads(|| csv::translate_csv(input, output, &columns, on_error))
        .map_err(map_exon_err)?;
    Ok(BatchReport::from(report))
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(translate_csv, m)?)?;
    Ok(())
}
