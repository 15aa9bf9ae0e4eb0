//! Build a decoding table and write it to disk as a raw volume
//!
//! Run with: cargo run --release --example build_table -- hilbert table.bin

use std::time::Instant;

use depthcode_core::{build_table, AlgorithmId, BitWidthConfig, ColorSample, TABLE_SIDE};

fn main() {
    let mut args = std::env::args().skip(1);
    let algo: AlgorithmId = args
        .next()
        .unwrap_or_else(|| "hilbert".to_owned())
        .parse()
        .unwrap_or_else(|e| {
            eprintln!("{e}");
            std::process::exit(2);
        });
    let out = args.next();

    let cfg = BitWidthConfig::for_algorithm(algo);
    let start = Instant::now();
    let table = build_table(algo, cfg).expect("Failed to build table");
    println!(
        "Built {} table ({}^3 cells, {} bytes) in {:.2?}",
        algo,
        TABLE_SIDE,
        table.len(),
        start.elapsed()
    );

    for color in [ColorSample::new(0, 0, 0), ColorSample::new(64, 128, 192)] {
        println!("   {:?} -> {}", color.channels(), table.depth_at(color));
    }

    if let Some(path) = out {
        std::fs::write(&path, table.as_bytes()).expect("Failed to write table");
        println!("Wrote {path}");
    }
}
