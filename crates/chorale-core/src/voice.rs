//! Per-channel chorus voice: one delay line driven by one LFO.
//!
//! The voice runs the per-sample pipeline:
//!
//! 1. `d = (centre + depth * centre * lfo) * sr / 1000`
//! 2. `w = delay.read(d)`
//! 3. `delay.write(x + feedback * w)`
//! 4. advance the LFO
//! 5. `y = (1 - mix) * x + mix * w`

use crate::delay::{DelayLine, Interpolation};
use crate::lfo::{Lfo, LfoWaveform};
use crate::math::wet_dry_mix;
use crate::params::ParamSnapshot;

/// Parameter values resolved against the sample rate, fixed for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParams {
    /// Centre delay in ms.
    pub centre_delay_ms: f32,
    /// Modulation depth, fraction of the centre delay.
    pub depth: f32,
    /// Samples per millisecond.
    pub samples_per_ms: f32,
    /// LFO frequency in Hz.
    pub rate_hz: f32,
    /// Feedback amount.
    pub feedback: f32,
    /// Wet/dry mix.
    pub mix: f32,
}

impl BlockParams {
    /// Resolve a snapshot at `sample_rate`.
    pub fn new(snapshot: &ParamSnapshot, sample_rate: f32) -> Self {
        Self {
            centre_delay_ms: snapshot.centre_delay,
            depth: snapshot.depth,
            samples_per_ms: sample_rate / 1000.0,
            rate_hz: snapshot.rate,
            feedback: snapshot.feedback,
            mix: snapshot.mix,
        }
    }

    /// Delay in samples for a modulation value in `[-1, 1]`.
    #[inline]
    pub fn delay_samples(&self, modulation: f32) -> f32 {
        let centre = self.centre_delay_ms;
        (centre + self.depth * centre * modulation) * self.samples_per_ms
    }
}

/// One channel's delay line and oscillator.
#[derive(Debug, Clone)]
pub struct ChorusVoice {
    delay: DelayLine,
    lfo: Lfo,
}

impl ChorusVoice {
    /// Voice for `channel` with a delay line of at least `capacity` samples.
    ///
    /// The LFO phase starts at the channel's fixed quadrature offset.
    pub fn new(sample_rate: f32, capacity: usize, channel: usize) -> Self {
        Self {
            delay: DelayLine::new(capacity),
            lfo: Lfo::with_phase_offset(
                sample_rate,
                0.0,
                crate::lfo::channel_phase_offset(channel),
            ),
        }
    }

    /// Set the delay-line interpolation.
    pub fn set_interpolation(&mut self, interp: Interpolation) {
        self.delay.set_interpolation(interp);
    }

    /// Set the LFO waveform.
    pub fn set_waveform(&mut self, waveform: LfoWaveform) {
        self.lfo.set_waveform(waveform);
    }

    /// The voice's delay line.
    pub fn delay(&self) -> &DelayLine {
        &self.delay
    }

    /// The voice's oscillator.
    pub fn lfo(&self) -> &Lfo {
        &self.lfo
    }

    /// Clear delay contents and rewind the oscillator to its start phase.
    pub fn reset(&mut self) {
        self.delay.clear();
        self.lfo.reset();
    }

    /// Process one sample.
    #[inline]
    pub fn tick(&mut self, input: f32, params: &BlockParams) -> f32 {
        let delay = params.delay_samples(self.lfo.value());
        let wet = self.delay.tick(input, delay, params.feedback);
        self.lfo.advance();
        wet_dry_mix(input, wet, params.mix)
    }

    /// Process a block in place.
    pub fn process_block(&mut self, samples: &mut [f32], params: &BlockParams) {
        self.lfo.set_frequency(params.rate_hz);
        for sample in samples.iter_mut() {
            *sample = self.tick(*sample, params);
        }
    }

    /// Process `input` into `output` (equal lengths).
    pub fn process_block_into(&mut self, input: &[f32], output: &mut [f32], params: &BlockParams) {
        debug_assert_eq!(
            input.len(),
            output.len(),
            "Input and output buffers must have same length"
        );
        self.lfo.set_frequency(params.rate_hz);
        for (inp, out) in input.iter().zip(output.iter_mut()) {
            *out = self.tick(*inp, params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(depth: f32, centre: f32, feedback: f32, mix: f32) -> BlockParams {
        let snap = ParamSnapshot {
            rate: 1.0,
            depth,
            centre_delay: centre,
            feedback,
            mix,
        };
        BlockParams::new(&snap, 48000.0)
    }

    #[test]
    fn delay_samples_follows_modulation() {
        let p = params(0.5, 10.0, 0.0, 1.0);
        assert_eq!(p.delay_samples(0.0), 480.0);
        assert_eq!(p.delay_samples(1.0), 720.0);
        assert_eq!(p.delay_samples(-1.0), 240.0);
    }

    #[test]
    fn wet_only_voice_delays_impulse() {
        let mut voice = ChorusVoice::new(48000.0, 1024, 0);
        let p = params(0.0, 2.0, 0.0, 1.0); // 96 samples
        let mut block = vec![0.0f32; 200];
        block[0] = 1.0;
        voice.process_block(&mut block, &p);
        for (i, &s) in block.iter().enumerate() {
            let expected = if i == 96 { 1.0 } else { 0.0 };
            assert_eq!(s, expected, "sample {i}");
        }
    }

    #[test]
    fn feedback_repeats_at_delay_period() {
        let mut voice = ChorusVoice::new(48000.0, 1024, 0);
        let p = params(0.0, 1.0, 0.5, 1.0); // 48 samples
        let mut block = vec![0.0f32; 200];
        block[0] = 1.0;
        voice.process_block(&mut block, &p);
        assert_eq!(block[48], 1.0);
        assert_eq!(block[96], 0.5);
        assert_eq!(block[144], 0.25);
    }

    #[test]
    fn dry_only_voice_is_identity() {
        let mut voice = ChorusVoice::new(48000.0, 1024, 1);
        let p = params(0.8, 5.0, 0.9, 0.0);
        let input: Vec<f32> = (0..300).map(|i| libm::sinf(i as f32 * 0.05)).collect();
        let mut output = vec![0.0f32; input.len()];
        voice.process_block_into(&input, &mut output, &p);
        assert_eq!(input, output);
    }

    #[test]
    fn reset_restores_start_phase() {
        let mut voice = ChorusVoice::new(48000.0, 1024, 1);
        let p = params(0.5, 5.0, 0.0, 0.5);
        let mut block = vec![0.3f32; 64];
        voice.process_block(&mut block, &p);
        assert_ne!(voice.lfo().phase(), 0.25);
        voice.reset();
        assert_eq!(voice.lfo().phase(), 0.25);
        assert_eq!(voice.delay().write_position(), 0);
    }
}
