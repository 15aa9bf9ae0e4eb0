use depthcode_core::{AlgorithmId, BitWidthConfig, ColorSample};
use napi::bindgen_prelude::*;
use napi::Task;
use napi_derive::napi;

fn to_napi_err(e: depthcode_core::DepthcodeError) -> Error {
    Error::from_reason(e.to_string())
}

/// Parse an algorithm name and resolve its bit widths, filling in the
/// algorithm's defaults for anything not given.
fn resolve(
    algorithm: &str,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> Result<(AlgorithmId, BitWidthConfig)> {
    let algo: AlgorithmId = algorithm.parse().map_err(to_napi_err)?;
    let defaults = BitWidthConfig::for_algorithm(algo);
    let cfg = BitWidthConfig::new(
        quantization.unwrap_or(defaults.quantization()),
        algo_bits.unwrap_or(defaults.algo_bits()),
    )
    .map_err(to_napi_err)?;
    Ok((algo, cfg))
}

/// Decode one color sample into a 16-bit depth value.
///
/// @param algorithm - One of the names returned by `algorithms()`.
/// @param r - Red channel (0-255).
/// @param g - Green channel (0-255).
/// @param b - Blue channel (0-255).
/// @param quantization - Depth precision in bits (default 16).
/// @param algo_bits - Per-axis bit width (default 5 for hilbert, 8 otherwise).
/// @returns The decoded depth (0-65535).
#[napi]
pub fn decode(
    algorithm: String,
    r: u8,
    g: u8,
    b: u8,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> Result<u16> {
    let (algo, cfg) = resolve(&algorithm, quantization, algo_bits)?;
    depthcode_core::decode(algo, ColorSample::new(r, g, b), cfg).map_err(to_napi_err)
}

/// Build the full decoding table for an algorithm.
///
/// @param algorithm - One of the names returned by `algorithms()`.
/// @param quantization - Depth precision in bits (default 16).
/// @param algo_bits - Per-axis bit width (default 5 for hilbert, 8 otherwise).
/// @returns A Buffer of 255 * 255 * 255 * 3 bytes, ready for a 3D texture upload.
#[napi]
pub fn build_table(
    algorithm: String,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> Result<Buffer> {
    let (algo, cfg) = resolve(&algorithm, quantization, algo_bits)?;
    let table = depthcode_core::build_table(algo, cfg).map_err(to_napi_err)?;
    Ok(Buffer::from(table.into_bytes()))
}

/// Decode an interleaved RGB or RGBA buffer into depth values.
///
/// @param data - Raw pixel bytes, `channels` bytes per pixel.
/// @param algorithm - One of the names returned by `algorithms()`.
/// @param channels - 3 or 4 (default 4, matching canvas ImageData).
/// @param quantization - Depth precision in bits (default 16).
/// @param algo_bits - Per-axis bit width (default 5 for hilbert, 8 otherwise).
/// @returns A Uint16Array with one depth value per pixel.
#[napi]
pub fn decode_pixels(
    data: Uint8Array,
    algorithm: String,
    channels: Option<u32>,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> Result<Uint16Array> {
    let (algo, cfg) = resolve(&algorithm, quantization, algo_bits)?;
    let channels = channels.unwrap_or(4) as usize;
    let depth =
        depthcode_core::decode_pixels(data.as_ref(), channels, algo, cfg).map_err(to_napi_err)?;
    Ok(Uint16Array::new(depth))
}

/// Names of every supported algorithm.
#[napi]
pub fn algorithms() -> Vec<String> {
    AlgorithmId::ALL.iter().map(|a| a.to_string()).collect()
}

// --- Async versions (run on libuv thread pool) ---

pub struct BuildTableTask {
    algorithm: AlgorithmId,
    config: BitWidthConfig,
}

impl Task for BuildTableTask {
    type Output = Vec<u8>;
    type JsValue = Buffer;

    fn compute(&mut self) -> Result<Self::Output> {
        depthcode_core::build_table(self.algorithm, self.config)
            .map(|table| table.into_bytes())
            .map_err(to_napi_err)
    }

    fn resolve(&mut self, _env: Env, output: Self::Output) -> Result<Self::JsValue> {
        Ok(Buffer::from(output))
    }
}

/// Async version of buildTable that runs on the libuv thread pool.
/// Returns a Promise<Buffer>.
///
/// Arguments are validated up front, so a bad name or bit width throws
/// synchronously instead of rejecting the promise.
///
/// @param algorithm - One of the names returned by `algorithms()`.
/// @param quantization - Depth precision in bits (default 16).
/// @param algo_bits - Per-axis bit width (default 5 for hilbert, 8 otherwise).
/// @returns A Promise resolving to the table Buffer.
#[napi]
pub fn build_table_async(
    algorithm: String,
    quantization: Option<u32>,
    algo_bits: Option<u32>,
) -> Result<AsyncTask<BuildTableTask>> {
    let (algo, cfg) = resolve(&algorithm, quantization, algo_bits)?;
    let config = cfg.validate_for(algo).map_err(to_napi_err)?;
    Ok(AsyncTask::new(BuildTableTask {
        algorithm: algo,
        config,
    }))
}
