use depthcode_core::{AlgorithmId, BitWidthConfig, ColorSample};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

/// Convert a `DepthcodeError` into a Python `ValueError`.
fn to_py_err(e: depthcode_core::DepthcodeError) -> PyErr {
    PyValueError::new_err(e.to_string())
}

/// Parse an algorithm name and resolve its bit widths, filling in the
/// algorithm's defaults for anything not given.
fn resolve(
    algorithm: &str,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> PyResult<(AlgorithmId, BitWidthConfig)> {
    let algo: AlgorithmId = algorithm.parse().map_err(to_py_err)?;
    let defaults = BitWidthConfig::for_algorithm(algo);
    let cfg = BitWidthConfig::new(
        quantization.unwrap_or(defaults.quantization()),
        algo_bits.unwrap_or(defaults.algo_bits()),
    )
    .map_err(to_py_err)?;
    Ok((algo, cfg))
}

/// Decode one color sample into a 16-bit depth value.
///
/// Args:
///     algorithm: One of the names returned by `algorithms()`.
///     r, g, b: Channel values (0-255).
///     quantization: Depth precision in bits (default 16).
///     algo_bits: Per-axis bit width (default 5 for hilbert, 8 otherwise).
///
/// Returns:
///     The decoded depth (0-65535).
#[pyfunction]
#[pyo3(signature = (algorithm, r, g, b, quantization = None, algo_bits = None))]
fn decode(
    algorithm: &str,
    r: u8,
    g: u8,
    b: u8,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> PyResult<u16> {
    let (algo, cfg) = resolve(algorithm, quantization, algo_bits)?;
    depthcode_core::decode(algo, ColorSample::new(r, g, b), cfg).map_err(to_py_err)
}

/// Build the full decoding table for an algorithm.
///
/// The GIL is released while the table is built.
///
/// Returns:
///     A bytes object of 255 * 255 * 255 * 3 bytes: per cell the depth high
///     byte, low byte and a zero pad, with R as the outer axis.
#[pyfunction]
#[pyo3(signature = (algorithm, quantization = None, algo_bits = None))]
fn build_table(
    py: Python<'_>,
    algorithm: &str,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> PyResult<Py<PyBytes>> {
    let (algo, cfg) = resolve(algorithm, quantization, algo_bits)?;
    let table = py
        .allow_threads(|| depthcode_core::build_table(algo, cfg))
        .map_err(to_py_err)?;
    Ok(PyBytes::new(py, table.as_bytes()).into())
}

/// Decode an interleaved RGB or RGBA buffer into a list of depth values.
///
/// Args:
///     data: Raw pixel bytes, `channels` bytes per pixel.
///     algorithm: One of the names returned by `algorithms()`.
///     channels: 3 or 4 (default 3).
///     quantization: Depth precision in bits (default 16).
///     algo_bits: Per-axis bit width (default 5 for hilbert, 8 otherwise).
#[pyfunction]
#[pyo3(signature = (data, algorithm, channels = 3, quantization = None, algo_bits = None))]
fn decode_pixels(
    py: Python<'_>,
    data: &[u8],
    algorithm: &str,
    channels: usize,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> PyResult<Vec<u16>> {
    let (algo, cfg) = resolve(algorithm, quantization, algo_bits)?;
    py.allow_threads(|| depthcode_core::decode_pixels(data, channels, algo, cfg))
        .map_err(to_py_err)
}

/// Names of every supported algorithm.
#[pyfunction]
fn algorithms() -> Vec<&'static str> {
    AlgorithmId::ALL.iter().map(|a| a.as_str()).collect()
}

/// Depth-from-color decoders and lookup-table builder (Rust-powered).
#[pymodule]
fn depthcode(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(build_table, m)?)?;
    m.add_function(wrap_pyfunction!(decode_pixels, m)?)?;
    m.add_function(wrap_pyfunction!(algorithms, m)?)?;
    Ok(())
}
