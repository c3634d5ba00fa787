//! Block-processing chorus engine.
//!
//! [`ChorusEngine`] owns one [`ChorusVoice`] per channel and a shared
//! [`ChorusParams`] store. It has two states:
//!
//! - **Unprepared**: no buffers. [`process`](ChorusEngine::process) panics.
//! - **Prepared**: buffers sized for a known sample rate and channel count.
//!
//! [`prepare`](ChorusEngine::prepare) moves Unprepared → Prepared, or
//! reallocates a Prepared engine whose sample rate or channel count changed.
//! [`reset`](ChorusEngine::reset) zeroes buffers and rewinds oscillators
//! without reallocating.
//!
//! # Real-time contract
//!
//! `process` reads the parameter snapshot once, then runs the whole block
//! without allocating, locking, or logging.
//!
//! # Example
//!
//! ```rust
//! use chorale_core::ChorusEngine;
//!
//! let mut engine = ChorusEngine::new();
//! engine.prepare(48000.0, 512, 2).unwrap();
//! engine.set_depth(0.3);
//! engine.set_centre_delay(15.0);
//! engine.set_feedback(0.2);
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! left[0] = 1.0;
//! right[0] = 1.0;
//! engine.process(&mut [&mut left[..], &mut right[..]]);
//! ```

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use libm::ceil;

use crate::delay::Interpolation;
use crate::lfo::LfoWaveform;
use crate::params::{ChorusParams, MAX_MODULATED_DELAY_MS, ParamSnapshot};
use crate::voice::{BlockParams, ChorusVoice};

/// Extra samples beyond the longest modulated delay.
pub const DELAY_SAFETY_MARGIN: usize = 4;

/// Highest sample rate [`ChorusEngine::prepare`] accepts (8 × 192 kHz).
pub const MAX_SAMPLE_RATE: f64 = 1_536_000.0;

/// Delay-line length needed at `sample_rate`, before power-of-two rounding.
///
/// Only meaningful for rates in `(0, MAX_SAMPLE_RATE]`.
///
/// ```rust
/// use chorale_core::engine::required_delay_capacity;
///
/// // 200 ms at 48 kHz plus the safety margin
/// assert_eq!(required_delay_capacity(48000.0), 9604);
/// ```
pub fn required_delay_capacity(sample_rate: f64) -> usize {
    ceil(f64::from(MAX_MODULATED_DELAY_MS) * sample_rate / 1000.0) as usize + DELAY_SAFETY_MARGIN
}

/// Configuration fixed by [`ChorusEngine::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    /// Sample rate in Hz.
    pub sample_rate: f64,
    /// Largest block the host will pass to `process`.
    pub max_block_size: usize,
    /// Number of channels.
    pub num_channels: usize,
}

/// Invalid configuration passed to [`ChorusEngine::prepare`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrepareError {
    /// Sample rate not finite, not positive, or above [`MAX_SAMPLE_RATE`].
    InvalidSampleRate(f64),
    /// Zero channels requested.
    NoChannels,
    /// Zero maximum block size requested.
    ZeroBlockSize,
}

impl fmt::Display for PrepareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrepareError::InvalidSampleRate(sr) => {
                write!(
                    f,
                    "invalid sample rate: {sr} (must be > 0 and <= {MAX_SAMPLE_RATE})"
                )
            }
            PrepareError::NoChannels => write!(f, "channel count must be at least 1"),
            PrepareError::ZeroBlockSize => write!(f, "maximum block size must be at least 1"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PrepareError {}

#[derive(Debug)]
struct Prepared {
    spec: ProcessSpec,
    voices: Vec<ChorusVoice>,
}

/// Multi-channel modulated-delay chorus.
#[derive(Debug)]
pub struct ChorusEngine {
    params: Arc<ChorusParams>,
    state: Option<Prepared>,
    interpolation: Interpolation,
    waveform: LfoWaveform,
}

impl Default for ChorusEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChorusEngine {
    /// Unprepared engine with default parameters.
    pub fn new() -> Self {
        Self::with_params(Arc::new(ChorusParams::new()))
    }

    /// Unprepared engine reading from an existing parameter store.
    pub fn with_params(params: Arc<ChorusParams>) -> Self {
        Self {
            params,
            state: None,
            interpolation: Interpolation::Linear,
            waveform: LfoWaveform::Sine,
        }
    }

    /// Handle to the parameter store for a control thread.
    pub fn params(&self) -> Arc<ChorusParams> {
        Arc::clone(&self.params)
    }

    /// Borrow the parameter store.
    pub fn params_ref(&self) -> &ChorusParams {
        &self.params
    }

    /// Allocate (or re-allocate) state for a stream.
    ///
    /// Reallocates when the sample rate or channel count differs from the
    /// last successful call; otherwise keeps the buffers and resets them.
    /// On error the engine keeps whatever state it had.
    pub fn prepare(
        &mut self,
        sample_rate: f64,
        max_block_size: usize,
        num_channels: usize,
    ) -> Result<(), PrepareError> {
        if sample_rate.is_nan() || sample_rate <= 0.0 || sample_rate > MAX_SAMPLE_RATE {
            return Err(PrepareError::InvalidSampleRate(sample_rate));
        }
        if num_channels == 0 {
            return Err(PrepareError::NoChannels);
        }
        if max_block_size == 0 {
            return Err(PrepareError::ZeroBlockSize);
        }

        let spec = ProcessSpec {
            sample_rate,
            max_block_size,
            num_channels,
        };

        if let Some(prepared) = self.state.as_mut()
            && prepared.spec.sample_rate == sample_rate
            && prepared.spec.num_channels == num_channels
        {
            prepared.spec = spec;
            for voice in &mut prepared.voices {
                voice.reset();
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                sample_rate,
                max_block_size,
                num_channels,
                "chorus: re-prepare, buffers kept"
            );

            return Ok(());
        }

        let capacity = required_delay_capacity(sample_rate);
        let voices = (0..num_channels)
            .map(|channel| {
                let mut voice = ChorusVoice::new(sample_rate as f32, capacity, channel);
                voice.set_interpolation(self.interpolation);
                voice.set_waveform(self.waveform);
                voice
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            num_channels,
            capacity = capacity.next_power_of_two(),
            "chorus: prepared"
        );

        self.state = Some(Prepared { spec, voices });
        Ok(())
    }

    /// Zero delay buffers and rewind oscillators. No-op while unprepared.
    pub fn reset(&mut self) {
        if let Some(prepared) = self.state.as_mut() {
            for voice in &mut prepared.voices {
                voice.reset();
            }

            #[cfg(feature = "tracing")]
            tracing::debug!("chorus: reset");
        }
    }

    /// Returns `true` once [`prepare`](Self::prepare) has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.state.is_some()
    }

    /// The active configuration, if prepared.
    pub fn spec(&self) -> Option<ProcessSpec> {
        self.state.as_ref().map(|p| p.spec)
    }

    /// Delay-line length per channel, if prepared.
    pub fn delay_capacity(&self) -> Option<usize> {
        self.state
            .as_ref()
            .and_then(|p| p.voices.first())
            .map(|v| v.delay().capacity())
    }

    /// Set the delay-line interpolation for all channels.
    pub fn set_interpolation(&mut self, interp: Interpolation) {
        self.interpolation = interp;
        if let Some(prepared) = self.state.as_mut() {
            for voice in &mut prepared.voices {
                voice.set_interpolation(interp);
            }
        }
    }

    /// Set the LFO waveform for all channels.
    pub fn set_waveform(&mut self, waveform: LfoWaveform) {
        self.waveform = waveform;
        if let Some(prepared) = self.state.as_mut() {
            for voice in &mut prepared.voices {
                voice.set_waveform(waveform);
            }
        }
    }

    /// Set modulation rate in Hz (clamped to 0.1–100).
    pub fn set_rate(&self, value: f32) {
        self.params.set_rate(value);
    }

    /// Set modulation depth (clamped to 0–1).
    pub fn set_depth(&self, value: f32) {
        self.params.set_depth(value);
    }

    /// Set centre delay in ms (clamped to 1–100).
    pub fn set_centre_delay(&self, value: f32) {
        self.params.set_centre_delay(value);
    }

    /// Set feedback (clamped to −1–1).
    pub fn set_feedback(&self, value: f32) {
        self.params.set_feedback(value);
    }

    /// Set wet/dry mix (clamped to 0–1).
    pub fn set_mix(&self, value: f32) {
        self.params.set_mix(value);
    }

    /// Process a channel-major block in place.
    ///
    /// Channels beyond the prepared count are left untouched.
    ///
    /// # Panics
    ///
    /// Panics if the engine is not prepared.
    pub fn process<C: AsMut<[f32]>>(&mut self, channels: &mut [C]) {
        let snapshot = self.params.snapshot();
        let prepared = self.prepared_mut();
        let block = BlockParams::new(&snapshot, prepared.spec.sample_rate as f32);

        debug_assert!(channels.len() <= prepared.voices.len());
        for (voice, channel) in prepared.voices.iter_mut().zip(channels.iter_mut()) {
            let samples = channel.as_mut();
            debug_assert!(samples.len() <= prepared.spec.max_block_size);
            voice.process_block(samples, &block);
        }
    }

    /// Process channel-major `input` into `output`.
    ///
    /// Channel pairs are processed up to the shorter of the two slices and
    /// the prepared channel count.
    ///
    /// # Panics
    ///
    /// Panics if the engine is not prepared.
    pub fn process_to<I: AsRef<[f32]>, O: AsMut<[f32]>>(&mut self, input: &[I], output: &mut [O]) {
        let snapshot = self.params.snapshot();
        let prepared = self.prepared_mut();
        let block = BlockParams::new(&snapshot, prepared.spec.sample_rate as f32);

        for ((voice, inp), out) in prepared
            .voices
            .iter_mut()
            .zip(input.iter())
            .zip(output.iter_mut())
        {
            voice.process_block_into(inp.as_ref(), out.as_mut(), &block);
        }
    }

    /// Process with an explicit snapshot instead of the shared store.
    ///
    /// The snapshot is clamped first. Used by offline hosts that sequence
    /// parameter changes per block.
    pub fn process_with<C: AsMut<[f32]>>(&mut self, snapshot: ParamSnapshot, channels: &mut [C]) {
        let snapshot = snapshot.clamped();
        let prepared = self.prepared_mut();
        let block = BlockParams::new(&snapshot, prepared.spec.sample_rate as f32);
        for (voice, channel) in prepared.voices.iter_mut().zip(channels.iter_mut()) {
            voice.process_block(channel.as_mut(), &block);
        }
    }

    fn prepared_mut(&mut self) -> &mut Prepared {
        match self.state.as_mut() {
            Some(prepared) => prepared,
            None => panic!("ChorusEngine::process called before prepare"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_rejects_bad_config() {
        let mut engine = ChorusEngine::new();
        assert_eq!(
            engine.prepare(0.0, 512, 2),
            Err(PrepareError::InvalidSampleRate(0.0))
        );
        assert_eq!(
            engine.prepare(-44100.0, 512, 2),
            Err(PrepareError::InvalidSampleRate(-44100.0))
        );
        assert!(matches!(
            engine.prepare(f64::NAN, 512, 2),
            Err(PrepareError::InvalidSampleRate(_))
        ));
        assert!(matches!(
            engine.prepare(f64::INFINITY, 512, 2),
            Err(PrepareError::InvalidSampleRate(_))
        ));
        assert_eq!(engine.prepare(48000.0, 512, 0), Err(PrepareError::NoChannels));
        assert_eq!(engine.prepare(48000.0, 0, 2), Err(PrepareError::ZeroBlockSize));
        assert!(!engine.is_prepared());
    }

    #[test]
    fn failed_prepare_keeps_previous_state() {
        let mut engine = ChorusEngine::new();
        engine.prepare(44100.0, 256, 2).unwrap();
        assert!(engine.prepare(-1.0, 256, 2).is_err());
        let spec = engine.spec().unwrap();
        assert_eq!(spec.sample_rate, 44100.0);
        assert_eq!(spec.num_channels, 2);
    }

    #[test]
    fn prepare_rejects_huge_sample_rates() {
        let mut engine = ChorusEngine::new();
        assert_eq!(
            engine.prepare(f64::MAX, 64, 1),
            Err(PrepareError::InvalidSampleRate(f64::MAX))
        );
        assert_eq!(
            engine.prepare(1e12, 64, 1),
            Err(PrepareError::InvalidSampleRate(1e12))
        );
        assert!(!engine.is_prepared());

        engine.prepare(MAX_SAMPLE_RATE, 64, 1).unwrap();
        assert!(engine.is_prepared());
        assert!(engine.prepare(MAX_SAMPLE_RATE * 2.0, 64, 1).is_err());
        assert_eq!(engine.spec().unwrap().sample_rate, MAX_SAMPLE_RATE);
    }

    #[test]
    fn capacity_covers_longest_modulated_delay() {
        let mut engine = ChorusEngine::new();
        engine.prepare(48000.0, 64, 1).unwrap();
        assert_eq!(engine.delay_capacity(), Some(16384));

        engine.prepare(192000.0, 64, 1).unwrap();
        let capacity = engine.delay_capacity().unwrap();
        assert!(capacity > 38400);
        assert!(capacity.is_power_of_two());
    }

    #[test]
    fn re_prepare_with_new_channel_count_reallocates() {
        let mut engine = ChorusEngine::new();
        engine.prepare(48000.0, 64, 1).unwrap();
        engine.prepare(48000.0, 64, 3).unwrap();
        assert_eq!(engine.spec().unwrap().num_channels, 3);
    }

    #[test]
    fn re_prepare_same_config_updates_block_size() {
        let mut engine = ChorusEngine::new();
        engine.prepare(48000.0, 64, 2).unwrap();
        engine.prepare(48000.0, 1024, 2).unwrap();
        assert_eq!(engine.spec().unwrap().max_block_size, 1024);
    }

    #[test]
    #[should_panic(expected = "before prepare")]
    fn process_before_prepare_panics() {
        let mut engine = ChorusEngine::new();
        let mut block = [[0.0f32; 8]];
        engine.process(&mut block);
    }

    #[test]
    fn reset_while_unprepared_is_noop() {
        let mut engine = ChorusEngine::new();
        engine.reset();
        assert!(!engine.is_prepared());
    }

    #[test]
    fn setters_route_to_shared_params() {
        let engine = ChorusEngine::new();
        let handle = engine.params();
        engine.set_rate(3.0);
        engine.set_mix(7.0);
        assert_eq!(handle.rate(), 3.0);
        assert_eq!(handle.mix(), 1.0);
    }

    #[test]
    fn extra_channels_left_untouched() {
        let mut engine = ChorusEngine::new();
        engine.prepare(48000.0, 16, 1).unwrap();
        engine.set_mix(1.0);
        let mut block = [[0.5f32; 16], [0.5f32; 16]];
        engine.process(&mut block[..1]);
        assert_eq!(block[1], [0.5f32; 16]);
    }

    #[test]
    fn error_display() {
        let msg = PrepareError::InvalidSampleRate(-1.0).to_string();
        assert!(msg.contains("invalid sample rate"), "got: {msg}");
        assert_eq!(
            PrepareError::NoChannels.to_string(),
            "channel count must be at least 1"
        );
    }
}
