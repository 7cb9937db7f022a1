use pyo3::prelude::*;
use pyo3::types::PyModule;

use exonprot_core::io::csv::{BatchReport as CoreBatchReport, FailedTranscript};
use exonprot_core::io::SkippedRecord as CoreSkippedRecord;

#[pyclass(frozen)]
#[derive(Clone)]
pub struct SkippedRecord {
    pub(crate) row: usize,
    pub(crate) id: Option<String>,
    pub(crate) column: String,
    pub(crate) message: String,
}

#[pymethods]
impl SkippedRecord {
    #[getter]
    fn row(&self) -> usize {
        self.row
    }

    #[getter]
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[getter]
    fn column(&self) -> &str {
        &self.column
    }

    #[getter]
    fn message(&self) -> &str {
        &self.message
    }

    fn __repr__(&self) -> PyResult<String> {
        Ok(format!(
            "SkippedRecord(row={}, id={:?}, column={:?}, message={:?})",
            self.row, self.id, self.column, self.message
        ))
    }
}

impl From<CoreSkippedRecord> for SkippedRecord {
    fn from(value: CoreSkippedRecord) -> Self {
        Self {
            row: value.row,
            id: value.id.map(|s| s.to_string()),
            column: value.column.to_string(),
            message: value.message.to_string(),
        }
    }
}

/// Summary of one `translate_csv` run.
#[pyclass(frozen)]
pub struct BatchReport {
    translated: usize,
    unresolved: usize,
    failed: Vec<(String, String)>,
    skipped: Vec<SkippedRecord>,
}

#[pymethods]
impl BatchReport {
    #[getter]
    fn translated(&self) -> usize {
        self.translated
    }

    #[getter]
    fn unresolved(&self) -> usize {
        self.unresolved
    }

    /// `(transcript_id, message)` pairs for transcripts left out of the output.
    #[getter]
    fn failed(&self) -> Vec<(String, String)> {
        self.failed.clone()
    }

    #[getter]
    fn skipped(&self) -> Vec<SkippedRecord> {
        self.skipped.clone()
    }

    fn __repr__(&self) -> PyResult<String> {
        Ok(format!(
            "BatchReport(translated={}, unresolved={}, failed={}, skipped={})",
            self.translated,
            self.unresolved,
            self.failed.len(),
            self.skipped.len()
        ))
    }
}

impl From<CoreBatchReport> for BatchReport {
    fn from(value: CoreBatchReport) -> Self {
        Self {
            translated: value.translated,
            unresolved: value.unresolved,
            failed: value
                .failed
                .into_iter()
                .map(|FailedTranscript { transcript_id, message }| {
                    (transcript_id.into_string(), message.into_string())
                })
                .collect(),
            skipped: value.skipped.into_iter().map(SkippedRecord::from).collect(),
        }
    }
}

pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<SkippedRecord>()?;
    m.add_class::<BatchReport>()?;
    Ok(())
}
