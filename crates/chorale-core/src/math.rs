//! Small numeric helpers shared by the engine and its hosts.
//!
//! All functions are allocation-free and `no_std`.

use libm::{expf, fabsf, logf};

/// Convert milliseconds to samples.
///
/// # Example
/// ```rust
/// use chorale_core::ms_to_samples;
///
/// assert_eq!(ms_to_samples(10.0, 48000.0), 480.0);
/// ```
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Convert samples to milliseconds.
#[inline]
pub fn samples_to_ms(samples: f32, sample_rate: f32) -> f32 {
    samples * 1000.0 / sample_rate
}

/// Flush values too small to matter to exactly zero.
///
/// Keeps decaying feedback tails out of the subnormal range, where some
/// CPUs slow down by orders of magnitude.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if fabsf(x) < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals: `(1 - mix) * dry + mix * wet`.
///
/// Both endpoints are bit-exact for finite inputs: `mix = 0` returns `dry`
/// and `mix = 1` returns `wet`.
///
/// ```rust
/// use chorale_core::wet_dry_mix;
///
/// assert_eq!(wet_dry_mix(0.3, 0.9, 0.0), 0.3);
/// assert_eq!(wet_dry_mix(0.3, 0.9, 1.0), 0.9);
/// ```
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    (1.0 - mix) * dry + mix * wet
}

/// Convert decibels to linear gain.
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels. Silence floors at -200 dB.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}
