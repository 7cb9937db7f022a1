use pyo3::exceptions::{PyIOError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyString;

use exonprot_core::error::ExonError;
use exonprot_core::io::OnError;
use exonprot_core::seq::{NucleotideSeq, Phase};

pub fn extract_seq_bytes(obj: &Bound<'_, PyAny>) -> PyResult<Vec<u8>> {
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(s.to_str()?.as_bytes().to_vec());
    }

    obj.extract::<Vec<u8>>()
        .map_err(|_| PyTypeError::new_err("expected str or bytes-like object"))
}

pub fn extract_nucleotide(obj: &Bound<'_, PyAny>) -> PyResult<NucleotideSeq> {
    NucleotideSeq::new(extract_seq_bytes(obj)?).map_err(map_exon_err)
}

pub fn parse_phase(value: i64) -> PyResult<Phase> {
    Phase::from_i64(value).ok_or_else(|| {
        PyValueError::new_err(format!("invalid phase {value} (must be -1, 0, 1, or 2)"))
    })
}

pub fn parse_on_error(value: &str) -> PyResult<OnError> {
    match value.to_ascii_lowercase().as_str() {
        "raise" => Ok(OnError::Raise),
        "skip" => Ok(OnError::Skip),
        _ => Err(PyTypeError::new_err("on_error must be 'raise' or 'skip'")),
    }
}

pub fn map_exon_err(err: ExonError) -> PyErr {
    match err {
        ExonError::CsvParse { ref source, .. } | ExonError::CsvWrite { ref source, .. }
            if source.is_io_error() =>
        {
            PyIOError::new_err(err.to_string())
        }
        ExonError::Io(_) => PyIOError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}
