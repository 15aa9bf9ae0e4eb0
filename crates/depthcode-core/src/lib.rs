//! # depthcode-core
//!
//! Decode depth values that were packed into 8-bit RGB color, and build the
//! dense lookup volumes a renderer samples to do the same on the GPU.
//!
//! Seven schemes are supported, each identified by an [`AlgorithmId`]:
//! a 3D Hilbert curve walk, a direct Morton code, triangle waves, phase
//! shifting, hue angle, and two 2-channel packings (`packed` and the
//! serpentine `split`). Precision is controlled by a [`BitWidthConfig`].
//!
//! ## Quick Start
//!
//! ```
//! use depthcode_core::{decode, decode_pixels, AlgorithmId, BitWidthConfig, ColorSample};
//!
//! // One sample.
//! let cfg = BitWidthConfig::for_algorithm(AlgorithmId::Packed);
//! let depth = decode(AlgorithmId::Packed, ColorSample::new(0x12, 0x34, 0), cfg).unwrap();
//! assert_eq!(depth, 0x1234);
//!
//! // A whole RGB image.
//! let pixels = [0u8, 0, 0, 1, 0, 0];
//! let depth = decode_pixels(&pixels, 3, AlgorithmId::Packed, cfg).unwrap();
//! assert_eq!(depth, vec![0, 256]);
//! ```
//!
//! Tables are built with [`build_table`] (or through a [`TableCache`]) and
//! hold `255^3` cells of `[depth >> 8, depth & 0xFF, 0]`.
//!
//! ## Features
//!
//! - `parallel`: build tables and decode pixel buffers on the rayon pool.
//! - `serde`: derive `Serialize`/`Deserialize` for the public value types.

pub mod algorithm;
pub mod color;
pub mod config;
pub mod error;
pub mod hilbert;
pub mod morton;
pub mod planar;
pub mod postprocess;
pub mod table;

mod decode_impl;

// Re-export primary types and functions at crate root.
pub use algorithm::AlgorithmId;
pub use color::ColorSample;
pub use config::{BitWidthConfig, DEFAULT_ALGO_BITS, DEFAULT_QUANTIZATION, HILBERT_ALGO_BITS};
pub use decode_impl::{decode, decode_pixels, Decoder};
pub use error::DepthcodeError;
pub use postprocess::denoise_median;
pub use table::{
    build_table, build_table_cancellable, DecodingTable, TableCache, CELL_BYTES, TABLE_BYTES,
    TABLE_SIDE,
};
