//! Chorale Core - modulated delay-line chorus engine
//!
//! This crate provides a real-time chorus: each channel's input is mixed with
//! a copy of itself read from a delay line whose length is swept by a
//! low-frequency oscillator. With short delays and high feedback the same
//! engine becomes a flanger; with mix at 1 it becomes a vibrato.
//!
//! # Building Blocks
//!
//! - [`DelayLine`] - Power-of-two circular buffer with fractional reads
//! - [`Lfo`] - Phase-accumulator oscillator (sine or triangle)
//! - [`ChorusVoice`] - One delay line driven by one LFO
//! - [`ChorusEngine`] - Per-channel voices, prepare/process/reset lifecycle
//!
//! ## Parameters
//!
//! - [`ChorusParams`] - Lock-free parameter store shared with a control thread
//! - [`ParameterInfo`] - Index/ID-based introspection for hosts
//!
//! | Parameter    | ID            | Range       | Default |
//! |--------------|---------------|-------------|---------|
//! | Rate         | `rate`        | 0.1–100 Hz  | 1       |
//! | Depth        | `depth`       | 0–1         | 0       |
//! | Centre delay | `centreDelay` | 1–100 ms    | 1       |
//! | Feedback     | `feedback`    | −1–1        | 1       |
//! | Mix          | `mix`         | 0–1         | 0.5     |
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! chorale-core = { version = "0.1", default-features = false }
//! ```
//!
//! Enable the `tracing` feature to get `debug!` events from `prepare` and
//! `reset`. Nothing is logged from the audio path.
//!
//! # Example
//!
//! ```rust
//! use chorale_core::ChorusEngine;
//!
//! let mut engine = ChorusEngine::new();
//! engine.prepare(48000.0, 256, 2).unwrap();
//!
//! let params = engine.params(); // hand this to the UI thread
//! params.set_depth(0.25);
//! params.set_centre_delay(12.0);
//! params.set_feedback(0.0);
//!
//! let mut left = vec![0.1f32; 256];
//! let mut right = vec![0.1f32; 256];
//! engine.process(&mut [left.as_mut_slice(), right.as_mut_slice()]);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: No allocations, locks, or I/O in `process`
//! - **No dependencies on std**: `libm` for math, `alloc` for buffers
//! - **Block-rate parameters**: One snapshot per block, no smoothing

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod delay;
pub mod engine;
pub mod lfo;
pub mod math;
pub mod param_info;
pub mod params;
pub mod voice;

// Re-export main types at crate root
pub use delay::{DelayLine, Interpolation};
pub use engine::{ChorusEngine, MAX_SAMPLE_RATE, PrepareError, ProcessSpec};
pub use lfo::{Lfo, LfoWaveform};
pub use math::{
    db_to_linear, flush_denormal, linear_to_db, ms_to_samples, samples_to_ms, wet_dry_mix,
};
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};
pub use params::{ChorusParams, MAX_MODULATED_DELAY_MS, ParamSnapshot};
pub use voice::{BlockParams, ChorusVoice};
