//! Low-frequency oscillator driving the modulated delay time.
//!
//! One [`Lfo`] runs per channel. Successive channels start a quarter cycle
//! apart (see [`channel_phase_offset`]) so a stereo pair sweeps in quadrature.

use core::f32::consts::TAU;
use libm::{floorf, sinf};

/// Phase step between successive channels: 0.25 of a cycle (90°).
pub const CHANNEL_PHASE_STEP: f32 = 0.25;

/// Starting phase for `channel`, in cycles.
///
/// ```rust
/// use chorale_core::lfo::channel_phase_offset;
///
/// assert_eq!(channel_phase_offset(0), 0.0);
/// assert_eq!(channel_phase_offset(1), 0.25);
/// assert_eq!(channel_phase_offset(4), 0.0);
/// ```
#[inline]
pub fn channel_phase_offset(channel: usize) -> f32 {
    (channel % 4) as f32 * CHANNEL_PHASE_STEP
}

/// LFO waveform type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LfoWaveform {
    /// `sin(2π·phase)`
    #[default]
    Sine,
    /// Symmetric triangle, same zero crossings and peaks as the sine
    Triangle,
}

/// Phase-accumulating low-frequency oscillator.
///
/// The phase lives in `[0, 1)` and is wrapped by dropping its integer part
/// every step, so it never grows and stays valid even when the increment
/// exceeds a full cycle.
///
/// # Example
///
/// ```rust
/// use chorale_core::Lfo;
///
/// let mut lfo = Lfo::new(48000.0, 2.0);
/// let first = lfo.value();
/// lfo.advance();
/// assert_eq!(first, 0.0);
/// assert!(lfo.value() > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase position [0.0, 1.0)
    phase: f32,
    /// Phase at construction / reset
    start_phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    sample_rate: f32,
    waveform: LfoWaveform,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 1.0)
    }
}

impl Lfo {
    /// Create a new LFO with the given sample rate and frequency.
    pub fn new(sample_rate: f32, freq_hz: f32) -> Self {
        let mut lfo = Self {
            phase: 0.0,
            start_phase: 0.0,
            phase_inc: 0.0,
            sample_rate,
            waveform: LfoWaveform::Sine,
        };
        lfo.set_frequency(freq_hz);
        lfo
    }

    /// Create an LFO whose phase starts (and resets) at `phase` cycles.
    pub fn with_phase_offset(sample_rate: f32, freq_hz: f32, phase: f32) -> Self {
        let mut lfo = Self::new(sample_rate, freq_hz);
        lfo.start_phase = wrap_phase(phase);
        lfo.phase = lfo.start_phase;
        lfo
    }

    /// Set frequency in Hz. Non-positive sample rates freeze the phase.
    pub fn set_frequency(&mut self, freq_hz: f32) {
        self.phase_inc = if self.sample_rate > 0.0 {
            freq_hz / self.sample_rate
        } else {
            0.0
        };
    }

    /// Frequency in Hz as implied by the current increment.
    pub fn frequency(&self) -> f32 {
        self.phase_inc * self.sample_rate
    }

    /// Update the sample rate, keeping the frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        let freq = self.frequency();
        self.sample_rate = sample_rate;
        self.set_frequency(freq);
    }

    /// Set waveform.
    pub fn set_waveform(&mut self, waveform: LfoWaveform) {
        self.waveform = waveform;
    }

    /// Current waveform.
    pub fn waveform(&self) -> LfoWaveform {
        self.waveform
    }

    /// Current phase in `[0, 1)`.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Return to the starting phase.
    pub fn reset(&mut self) {
        self.phase = self.start_phase;
    }

    /// Output at the current phase, in `[-1, 1]`. Does not advance.
    #[inline]
    pub fn value(&self) -> f32 {
        match self.waveform {
            LfoWaveform::Sine => sinf(TAU * self.phase),
            LfoWaveform::Triangle => {
                // Quarter-cycle shifted so it tracks the sine: 0 → +1 → 0 → -1
                let p = wrap_phase(self.phase + 0.25);
                if p < 0.5 { 4.0 * p - 1.0 } else { 3.0 - 4.0 * p }
            }
        }
    }

    /// Step the phase forward by one sample.
    #[inline]
    pub fn advance(&mut self) {
        self.phase = wrap_phase(self.phase + self.phase_inc);
    }

    /// Output at the current phase, then advance.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        let out = self.value();
        self.advance();
        out
    }
}

#[inline]
fn wrap_phase(phase: f32) -> f32 {
    let wrapped = phase - floorf(phase);
    // floorf can leave exactly 1.0 for tiny negative inputs
    if wrapped >= 1.0 { 0.0 } else { wrapped }
}
