//! Property-based tests for the chorus engine and its building blocks.
//!
//! Tests parameter clamping, bypass exactness, feedback stability, and delay
//! line integrity using proptest for randomized input generation.

use chorale_core::params::DESCRIPTORS;
use chorale_core::{ChorusEngine, ChorusParams, DelayLine, Lfo, ParameterInfo};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Any finite or infinite assignment lands inside the declared range and
    /// in-range assignments are stored unchanged.
    #[test]
    fn setters_always_clamp(
        index in 0usize..5,
        value in prop::num::f32::ANY,
    ) {
        let params = ChorusParams::new();
        let before = params.get_param(index);
        params.set_param(index, value);
        let desc = DESCRIPTORS[index];
        let stored = params.get_param(index);

        if value.is_nan() {
            prop_assert_eq!(stored.to_bits(), before.to_bits());
        } else {
            prop_assert!(
                stored >= desc.min && stored <= desc.max,
                "{} stored {} outside [{}, {}]",
                desc.string_id, stored, desc.min, desc.max
            );
            if desc.contains(value) {
                prop_assert_eq!(stored, value);
            }
        }
    }

    /// With mix at 0 the output is the input, whatever else is set.
    #[test]
    fn mix_zero_bypass(
        rate in 0.1f32..=100.0,
        depth in 0.0f32..=1.0,
        centre in 1.0f32..=100.0,
        feedback in -1.0f32..=1.0,
        input in prop::collection::vec(-1.0f32..=1.0, 1..=512),
    ) {
        let mut engine = ChorusEngine::new();
        engine.prepare(44100.0, 512, 1).unwrap();
        engine.set_rate(rate);
        engine.set_depth(depth);
        engine.set_centre_delay(centre);
        engine.set_feedback(feedback);
        engine.set_mix(0.0);

        let mut buf = input.clone();
        engine.process(&mut [&mut buf[..]]);
        prop_assert_eq!(buf, input);
    }

    /// For |feedback| < 1 a unit impulse never produces a wet sample larger
    /// than the impulse itself.
    #[test]
    fn impulse_response_bounded(
        rate in 0.1f32..=20.0,
        depth in 0.0f32..=1.0,
        centre in 1.0f32..=100.0,
        feedback in -0.999f32..=0.999,
    ) {
        let mut engine = ChorusEngine::new();
        engine.prepare(48000.0, 2048, 1).unwrap();
        engine.set_rate(rate);
        engine.set_depth(depth);
        engine.set_centre_delay(centre);
        engine.set_feedback(feedback);
        engine.set_mix(1.0);

        let mut buf = vec![0.0f32; 2048];
        buf[0] = 1.0;
        for _ in 0..16 {
            engine.process(&mut [&mut buf[..]]);
            for &s in &buf {
                prop_assert!(s.is_finite());
                prop_assert!(s.abs() <= 1.0 + 1e-4, "sample {} exceeds unit bound", s);
            }
            buf.fill(0.0);
        }
    }

    /// Write N random samples, then read them back at integer delays: they
    /// must match exactly.
    #[test]
    fn delay_line_integrity(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 1..=64),
    ) {
        let n = samples.len();
        let mut delay = DelayLine::new((n + 2).max(4));

        for &s in &samples {
            delay.write(s);
        }

        // delay=1 is the last written sample, delay=2 the one before, ...
        for (i, &expected) in samples.iter().rev().enumerate() {
            let got = delay.read((i + 1) as f32);
            prop_assert_eq!(got, expected, "delay={}", i + 1);
        }
    }

    /// Fractional reads never leave the range of the samples stored.
    #[test]
    fn linear_read_is_convex(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 8..=64),
        delay_samples in 1.0f32..7.0,
    ) {
        let mut delay = DelayLine::new(samples.len() + 2);
        for &s in &samples {
            delay.write(s);
        }
        let lo = samples.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = samples.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let got = delay.read(delay_samples);
        prop_assert!(got >= lo - 1e-6 && got <= hi + 1e-6);
    }

    /// The oscillator stays in [-1, 1] and its phase in [0, 1) for any rate.
    #[test]
    fn lfo_output_bounded(
        freq in 0.0f32..=100.0,
        sample_rate in 8000.0f32..=192000.0,
        start in 0.0f32..1.0,
    ) {
        let mut lfo = Lfo::with_phase_offset(sample_rate, freq, start);
        for _ in 0..4096 {
            let v = lfo.next_value();
            prop_assert!((-1.0..=1.0).contains(&v));
            prop_assert!((0.0..1.0).contains(&lfo.phase()));
        }
    }
}
