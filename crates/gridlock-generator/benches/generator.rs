//! Benchmarks for puzzle generation.
//!
//! Measures the complete generation pipeline (random fill plus uniqueness-
//! guarded minimization) from three fixed seeds, so the numbers stay
//! comparable across runs while still covering different puzzles.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench generator
//! ```

use std::{hint, str::FromStr as _};

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridlock_generator::{Seed, generate_with_seed};

const SEEDS: [&str; 3] = [
    "6f1f3b3a2e4d5c6b7a8998a7b6c5d4e3f2a1b0c9d8e7f6a5b4c3d2e1f0a9b8c7",
    "00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff",
    "deadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeefdeadbeef",
];

fn bench_generate(c: &mut Criterion) {
    for (i, seed) in SEEDS.into_iter().enumerate() {
        let seed = Seed::from_str(seed).unwrap();
        c.bench_with_input(
            BenchmarkId::new("generate", format!("seed_{i}")),
            &seed,
            |b, seed| {
                b.iter_batched(
                    || hint::black_box(*seed),
                    generate_with_seed,
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
