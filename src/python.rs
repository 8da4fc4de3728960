use crate::comma_policy::CommaHandling;
use crate::pipeline::{self, ConvertOptions};
use crate::record_builder::COLUMN_NAMES;
use pyo3::prelude::*;

#[pymodule]
fn ise_importer(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert_spreadsheet, m)?)?;
    m.add_function(wrap_pyfunction!(get_column_names, m)?)?;
    m.add("OUTPUT_FILE_NAME", pipeline::OUTPUT_FILE_NAME)?;
    m.add("OUTPUT_MIME", pipeline::output_mime().essence_str())?;
    Ok(())
}

/// Convert spreadsheet bytes into ISE import CSV text
#[pyfunction]
#[pyo3(signature = (content, filename, include_description = true, comma_handling = "escape"))]
fn convert_spreadsheet(
    content: &[u8],
    filename: &str,
    include_description: bool,
    comma_handling: &str,
) -> PyResult<String> {
    let mode: CommaHandling = comma_handling
        .parse()
        .map_err(|e: crate::ImportError| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
        })?;

    let options = ConvertOptions {
        include_description,
        comma_handling: mode,
        ..ConvertOptions::default()
    };

    match pipeline::convert(content, filename, &options) {
        Ok(report) => Ok(report.csv),
        Err(e) if e.is_input_error() => {
            Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))
        }
        Err(e) => Err(PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
            "Conversion failed: {}",
            e
        ))),
    }
}

/// Header of the generated CSV
#[pyfunction]
fn get_column_names() -> PyResult<Vec<String>> {
    Ok(COLUMN_NAMES.iter().map(|s| s.to_string()).collect())
}
