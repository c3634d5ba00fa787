//! Criterion benchmarks for the chorus engine
//!
//! Run with: cargo bench -p chorale-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use chorale_core::{ChorusEngine, DelayLine, Interpolation, Lfo};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("ChorusEngine");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("stereo", block_size),
            &block_size,
            |b, &size| {
                let mut engine = ChorusEngine::new();
                engine
                    .prepare(f64::from(SAMPLE_RATE), size, 2)
                    .expect("valid config");
                engine.set_depth(0.5);
                engine.set_centre_delay(15.0);
                engine.set_feedback(0.3);
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    engine.process(&mut [left.as_mut_slice(), right.as_mut_slice()]);
                    black_box(&left);
                });
            },
        );
    }

    group.bench_function("prepare_48k_stereo", |b| {
        b.iter(|| {
            let mut engine = ChorusEngine::new();
            engine.prepare(48000.0, 512, 2).expect("valid config");
            black_box(engine);
        });
    });

    group.finish();
}

fn bench_delay_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("DelayLine");
    let input = generate_test_signal(1024);

    for (name, interp) in [("linear", Interpolation::Linear), ("cubic", Interpolation::Cubic)] {
        group.bench_function(name, |b| {
            let mut delay = DelayLine::new(16384);
            delay.set_interpolation(interp);
            let mut lfo = Lfo::new(SAMPLE_RATE, 1.0);
            b.iter(|| {
                for &sample in &input {
                    let d = 480.0 + 240.0 * lfo.next_value();
                    black_box(delay.tick(black_box(sample), d, 0.3));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_delay_line);

criterion_main!(benches);
