//! Dense decoding tables for the renderer.
//!
//! A table holds the decoded depth of every color in `[0, 255)^3`, laid out
//! for upload as a 255x255x255 two-channel volume texture: R is the outer
//! axis, B the inner one, and each cell is `[depth >> 8, depth & 0xFF, 0]`.
//!
//! Construction is split into R slabs of 255x255 cells. Slabs are independent,
//! so with the `parallel` feature they are spread over the rayon pool; either
//! way a cancel flag is checked before each slab starts.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::atomic::AtomicUsize;

use tracing::{debug, trace};

use crate::algorithm::AlgorithmId;
use crate::color::ColorSample;
use crate::config::BitWidthConfig;
use crate::decode_impl::Decoder;
use crate::error::DepthcodeError;

/// Cells along each axis of the table.
pub const TABLE_SIDE: usize = 255;

/// Bytes per cell: depth high byte, depth low byte, padding.
pub const CELL_BYTES: usize = 3;

/// Bytes in one R slab.
pub const SLAB_BYTES: usize = TABLE_SIDE * TABLE_SIDE * CELL_BYTES;

/// Bytes in a whole table.
pub const TABLE_BYTES: usize = TABLE_SIDE * SLAB_BYTES;

/// A precomputed color-to-depth volume for one algorithm and configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodingTable {
    algorithm: AlgorithmId,
    config: BitWidthConfig,
    bytes: Vec<u8>,
}

impl DecodingTable {
    /// The algorithm the table was built for.
    #[inline]
    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// The configuration the table was built with.
    #[inline]
    pub fn config(&self) -> BitWidthConfig {
        self.config
    }

    /// The raw volume, ready for texture upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the raw volume.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Length of the raw volume in bytes (always [`TABLE_BYTES`]).
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the volume holds no cells. Built tables cover the whole color
    /// cube, so this is false for every table this crate hands out.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Byte offset of the cell for `(r, g, b)`.
    ///
    /// Channels are clamped to the last cell, matching clamp-to-edge sampling
    /// of the uploaded texture.
    #[inline]
    pub fn cell_offset(color: ColorSample) -> usize {
        let [r, g, b] = color.channels().map(|c| (c as usize).min(TABLE_SIDE - 1));
        CELL_BYTES * ((r * TABLE_SIDE + g) * TABLE_SIDE + b)
    }

    /// Look up the depth stored for a color.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use depthcode_core::{build_table, AlgorithmId, BitWidthConfig, ColorSample};
    /// let table = build_table(AlgorithmId::Packed, BitWidthConfig::default()).unwrap();
    /// assert_eq!(table.depth_at(ColorSample::new(1, 2, 3)), 258);
    /// ```
    #[inline]
    pub fn depth_at(&self, color: ColorSample) -> u16 {
        let offset = Self::cell_offset(color);
        u16::from_be_bytes([self.bytes[offset], self.bytes[offset + 1]])
    }
}

impl AsRef<[u8]> for DecodingTable {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for DecodingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodingTable")
            .field("algorithm", &self.algorithm)
            .field("config", &self.config)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Build the decoding table for an algorithm.
///
/// The output is a pure function of `(algorithm, config)`: identical
/// arguments always give byte-identical tables.
///
/// # Errors
///
/// Returns [`DepthcodeError::InvalidConfiguration`] before any work is done if
/// `config` cannot be used with `algorithm`.
pub fn build_table(
    algorithm: AlgorithmId,
    config: BitWidthConfig,
) -> Result<DecodingTable, DepthcodeError> {
    build_table_cancellable(algorithm, config, &AtomicBool::new(false))
}

/// Build the decoding table, stopping early once `cancel` is raised.
///
/// The flag is read before each R slab, so a cancel takes effect within one
/// slab's worth of work.
///
/// # Errors
///
/// Returns [`DepthcodeError::InvalidConfiguration`] for an unusable
/// configuration, or [`DepthcodeError::Cancelled`] if the flag was observed.
pub fn build_table_cancellable(
    algorithm: AlgorithmId,
    config: BitWidthConfig,
    cancel: &AtomicBool,
) -> Result<DecodingTable, DepthcodeError> {
    let decoder = Decoder::new(algorithm, config)?;
    debug!(
        %algorithm,
        quantization = config.quantization(),
        algo_bits = config.algo_bits(),
        "building decoding table"
    );
    let started = Instant::now();

    let mut bytes = vec![0u8; TABLE_BYTES];
    let stop = |_: usize| cancel.load(Ordering::Relaxed);
    fill_slabs(&decoder, &mut bytes, stop).map_err(|completed_slabs| {
        debug!(%algorithm, completed_slabs, "decoding table build cancelled");
        DepthcodeError::Cancelled { completed_slabs }
    })?;

    debug!(
        %algorithm,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "decoding table ready"
    );
    Ok(DecodingTable {
        algorithm,
        config,
        bytes,
    })
}

/// Fill every slab, returning the number finished if `stop` asks to halt.
///
/// `stop` is called with the index of each slab before it starts.
#[cfg(not(feature = "parallel"))]
fn fill_slabs<F>(decoder: &Decoder, bytes: &mut [u8], stop: F) -> Result<(), usize>
where
    F: Fn(usize) -> bool + Sync,
{
    for (r, slab) in bytes.chunks_exact_mut(SLAB_BYTES).enumerate() {
        if stop(r) {
            return Err(r);
        }
        fill_slab(decoder, r as u8, slab);
    }
    Ok(())
}

/// Fill every slab, returning the number finished if `stop` asks to halt.
///
/// `stop` is called with the index of each slab before it starts.
#[cfg(feature = "parallel")]
fn fill_slabs<F>(decoder: &Decoder, bytes: &mut [u8], stop: F) -> Result<(), usize>
where
    F: Fn(usize) -> bool + Sync,
{
    let completed = AtomicUsize::new(0);
    bytes
        .par_chunks_exact_mut(SLAB_BYTES)
        .enumerate()
        .try_for_each(|(r, slab)| {
            if stop(r) {
                return Err(());
            }
            fill_slab(decoder, r as u8, slab);
            completed.fetch_add(1, Ordering::Relaxed);
            Ok(())
        })
        .map_err(|()| completed.load(Ordering::Relaxed))
}

/// Decode every `(r, g, b)` of one slab into `slab`.
fn fill_slab(decoder: &Decoder, r: u8, slab: &mut [u8]) {
    let side = TABLE_SIDE as u8;
    let cells = (0..side).flat_map(|g| (0..side).map(move |b| (g, b)));
    for (cell, (g, b)) in slab.chunks_exact_mut(CELL_BYTES).zip(cells) {
        let [high, low] = decoder.decode(ColorSample::new(r, g, b)).to_be_bytes();
        cell[0] = high;
        cell[1] = low;
        cell[2] = 0;
    }
}

/// Tables built on first use and kept until explicitly invalidated.
///
/// A cached table is only reused when it was built with exactly the requested
/// configuration; asking for a different configuration rebuilds it. Nothing
/// else invalidates an entry, so callers that change bit widths out of band
/// must call [`TableCache::invalidate`] themselves.
#[derive(Debug, Default)]
pub struct TableCache {
    tables: HashMap<AlgorithmId, DecodingTable>,
}

impl TableCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the table for `algorithm`, building it if it is missing or was
    /// built with a different configuration.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`build_table`]. A failed rebuild leaves the
    /// previous entry in place.
    pub fn get_or_build(
        &mut self,
        algorithm: AlgorithmId,
        config: BitWidthConfig,
    ) -> Result<&DecodingTable, DepthcodeError> {
        match self.tables.entry(algorithm) {
            Entry::Occupied(mut entry) => {
                if entry.get().config() == config {
                    trace!(%algorithm, "decoding table cache hit");
                } else {
                    debug!(%algorithm, "decoding table config changed, rebuilding");
                    entry.insert(build_table(algorithm, config)?);
                }
                Ok(entry.into_mut())
            }
            Entry::Vacant(entry) => {
                trace!(%algorithm, "decoding table cache miss");
                Ok(entry.insert(build_table(algorithm, config)?))
            }
        }
    }

    /// The cached table for `algorithm`, if any.
    pub fn get(&self, algorithm: AlgorithmId) -> Option<&DecodingTable> {
        self.tables.get(&algorithm)
    }

    /// Drop the cached table for `algorithm`, returning it.
    pub fn invalidate(&mut self, algorithm: AlgorithmId) -> Option<DecodingTable> {
        let removed = self.tables.remove(&algorithm);
        if removed.is_some() {
            debug!(%algorithm, "decoding table invalidated");
        }
        removed
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        self.tables.clear();
    }

    /// Number of cached tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the cache holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
