//! Depth decoding demo - decode a few samples with every algorithm
//!
//! Run with: cargo run --example demo

use depthcode_core::{decode, decode_pixels, denoise_median, AlgorithmId, BitWidthConfig, ColorSample};

fn main() {
    println!("=== Depth Decoding Demo ===\n");

    let samples = [
        ColorSample::new(0, 0, 0),
        ColorSample::new(255, 0, 0),
        ColorSample::new(18, 52, 86),
        ColorSample::new(200, 120, 40),
    ];

    println!("1. Single samples, default configuration per algorithm\n");
    for algo in AlgorithmId::ALL {
        let cfg = BitWidthConfig::for_algorithm(algo);
        let depths: Vec<u16> = samples
            .iter()
            .map(|&s| decode(algo, s, cfg).expect("default config is valid"))
            .collect();
        println!(
            "   {:<8} (q={}, a={}): {:?}",
            algo,
            cfg.quantization(),
            cfg.algo_bits(),
            depths
        );
    }

    // A small packed-depth image with one corrupt pixel.
    let width = 5;
    let height = 5;
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let depth = 1000 + 40 * (x + y) as u16;
            pixels.extend_from_slice(&[(depth >> 8) as u8, depth as u8, 0]);
        }
    }
    pixels[3 * 12] = 0xF0;

    let depth = decode_pixels(&pixels, 3, AlgorithmId::Packed, BitWidthConfig::default())
        .expect("Failed to decode");
    println!("\n2. Decoded {}x{} packed image", width, height);
    println!("   Centre before denoise: {}", depth[12]);

    let clean = denoise_median(&depth, width, height, 500, 1).expect("Failed to denoise");
    println!("   Centre after denoise:  {}", clean[12]);

    println!("\n=== Demo Complete ===");
}
