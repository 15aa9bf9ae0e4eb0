use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use depthcode_core::{decode_pixels, AlgorithmId, BitWidthConfig, ColorSample, Decoder};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gradient_image(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f64 / width as f64) * 255.0) as u8;
            let g = ((y as f64 / height as f64) * 255.0) as u8;
            let b = ((x + y) % 256) as u8;
            pixels.push(r);
            pixels.push(g);
            pixels.push(b);
        }
    }
    pixels
}

// ---------------------------------------------------------------------------
// Single-sample decode
// ---------------------------------------------------------------------------

fn bench_decode_sample(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_sample");

    let samples: Vec<ColorSample> = (0..256u32)
        .map(|i| ColorSample::new(i as u8, (i * 7) as u8, (i * 31) as u8))
        .collect();

    for algo in AlgorithmId::ALL {
        let decoder = Decoder::with_default_config(algo);
        group.throughput(Throughput::Elements(samples.len() as u64));
        group.bench_with_input(BenchmarkId::new("256", algo), &samples, |b, samples| {
            b.iter(|| {
                let mut sum = 0u32;
                for &s in samples {
                    sum = sum.wrapping_add(decoder.decode(black_box(s)) as u32);
                }
                sum
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Table slab: one R value, all 255x255 (G, B) pairs
// ---------------------------------------------------------------------------

fn bench_table_slab(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_slab");
    group.sample_size(20);
    group.throughput(Throughput::Elements(255 * 255));

    for algo in AlgorithmId::ALL {
        let decoder = Decoder::with_default_config(algo);
        group.bench_function(BenchmarkId::from_parameter(algo), |b| {
            let mut slab = vec![0u8; 255 * 255 * 3];
            b.iter(|| {
                let mut cells = slab.chunks_exact_mut(3);
                for g in 0..255u8 {
                    for bl in 0..255u8 {
                        let depth = decoder.decode(ColorSample::new(black_box(128), g, bl));
                        if let Some(cell) = cells.next() {
                            cell[0] = (depth >> 8) as u8;
                            cell[1] = depth as u8;
                        }
                    }
                }
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Pixel buffers
// ---------------------------------------------------------------------------

fn bench_decode_pixels(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_pixels");

    for &(w, h) in &[(64usize, 64usize), (256, 256), (640, 480)] {
        let img = gradient_image(w, h);
        let label = format!("{w}x{h}");
        group.throughput(Throughput::Elements((w * h) as u64));
        for algo in [AlgorithmId::Hilbert, AlgorithmId::Packed, AlgorithmId::Phase] {
            let cfg = BitWidthConfig::for_algorithm(algo);
            group.bench_with_input(BenchmarkId::new(algo.as_str(), &label), &img, |b, img| {
                b.iter(|| decode_pixels(img, 3, algo, cfg).unwrap());
            });
        }
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Criterion harness
// ---------------------------------------------------------------------------

criterion_group!(
    benches,
    bench_decode_sample,
    bench_table_slab,
    bench_decode_pixels,
);
criterion_main!(benches);
