use pyo3::prelude::*;

mod csv;
mod report;
mod translate;
mod utils;

#[pymodule]
fn _native(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    translate::register(m)?;
    csv::register(m)?;
    report::register(m)?;
    Ok(())
}
