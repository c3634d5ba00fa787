//! Lock-free parameter store shared between the control and audio threads.
//!
//! Each of the five chorus parameters is an `AtomicU32` holding the `f32`
//! bit pattern. The control thread writes through the clamping setters; the
//! audio thread takes one [`ParamSnapshot`] per block. Neither side locks or
//! waits.
//!
//! Changing a parameter never touches delay-line or oscillator state, and
//! values are applied once per block without smoothing.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::thread;
//! use chorale_core::ChorusParams;
//!
//! let params = Arc::new(ChorusParams::new());
//! let control = Arc::clone(&params);
//! thread::spawn(move || control.set_depth(0.4)).join().unwrap();
//!
//! let snap = params.snapshot();
//! assert_eq!(snap.depth, 0.4);
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use crate::param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo};

/// Modulation rate, 0.1–100 Hz.
pub const RATE: ParamDescriptor = ParamDescriptor {
    name: "Rate",
    short_name: "Rate",
    string_id: "rate",
    id: ParamId(100),
    unit: ParamUnit::Hertz,
    min: 0.1,
    max: 100.0,
    default: 1.0,
    step: 0.1,
};

/// Modulation depth as a fraction of the centre delay.
pub const DEPTH: ParamDescriptor = ParamDescriptor {
    name: "Depth",
    short_name: "Depth",
    string_id: "depth",
    id: ParamId(101),
    unit: ParamUnit::Ratio,
    min: 0.0,
    max: 1.0,
    default: 0.0,
    step: 0.01,
};

/// Unmodulated delay time, 1–100 ms.
pub const CENTRE_DELAY: ParamDescriptor = ParamDescriptor {
    name: "Center Delay",
    short_name: "Delay",
    string_id: "centreDelay",
    id: ParamId(102),
    unit: ParamUnit::Milliseconds,
    min: 1.0,
    max: 100.0,
    default: 1.0,
    step: 0.1,
};

/// Fraction of the delayed signal fed back into the line.
pub const FEEDBACK: ParamDescriptor = ParamDescriptor {
    name: "Feedback",
    short_name: "Fdbk",
    string_id: "feedback",
    id: ParamId(103),
    unit: ParamUnit::Ratio,
    min: -1.0,
    max: 1.0,
    default: 1.0,
    step: 0.01,
};

/// Wet/dry blend (0 dry, 1 wet).
pub const MIX: ParamDescriptor = ParamDescriptor {
    name: "Mix",
    short_name: "Mix",
    string_id: "mix",
    id: ParamId(104),
    unit: ParamUnit::Ratio,
    min: 0.0,
    max: 1.0,
    default: 0.5,
    step: 0.01,
};

/// All descriptors in index order.
pub const DESCRIPTORS: [ParamDescriptor; 5] = [RATE, DEPTH, CENTRE_DELAY, FEEDBACK, MIX];

/// Longest delay the engine can ever request, in milliseconds: maximum
/// centre delay plus a full-depth excursion.
pub const MAX_MODULATED_DELAY_MS: f32 = CENTRE_DELAY.max + CENTRE_DELAY.max * DEPTH.max;

/// Plain copy of all five values, taken once per block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSnapshot {
    /// Modulation rate in Hz.
    pub rate: f32,
    /// Modulation depth, 0–1.
    pub depth: f32,
    /// Centre delay in ms.
    pub centre_delay: f32,
    /// Feedback, −1–1.
    pub feedback: f32,
    /// Wet/dry mix, 0–1.
    pub mix: f32,
}

impl Default for ParamSnapshot {
    fn default() -> Self {
        Self {
            rate: RATE.default,
            depth: DEPTH.default,
            centre_delay: CENTRE_DELAY.default,
            feedback: FEEDBACK.default,
            mix: MIX.default,
        }
    }
}

impl ParamSnapshot {
    /// Copy with every field clamped into its range. NaN fields fall back to
    /// the parameter default.
    pub fn clamped(self) -> Self {
        let fix = |desc: &ParamDescriptor, v: f32| desc.clamp(v).unwrap_or(desc.default);
        Self {
            rate: fix(&RATE, self.rate),
            depth: fix(&DEPTH, self.depth),
            centre_delay: fix(&CENTRE_DELAY, self.centre_delay),
            feedback: fix(&FEEDBACK, self.feedback),
            mix: fix(&MIX, self.mix),
        }
    }
}

#[derive(Debug)]
struct AtomicParam(AtomicU32);

impl AtomicParam {
    const fn new(value: f32) -> Self {
        Self(AtomicU32::new(value.to_bits()))
    }

    #[inline]
    fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    #[inline]
    fn store(&self, value: f32) {
        self.0.store(value.to_bits(), Ordering::Relaxed);
    }
}

/// Shared, lock-free store for the five chorus parameters.
///
/// Setters clamp to the documented range; NaN is rejected and leaves the
/// stored value unchanged. Usually shared as `Arc<ChorusParams>` between a
/// control thread and the engine.
#[derive(Debug)]
pub struct ChorusParams {
    rate: AtomicParam,
    depth: AtomicParam,
    centre_delay: AtomicParam,
    feedback: AtomicParam,
    mix: AtomicParam,
}

impl Default for ChorusParams {
    fn default() -> Self {
        Self::new()
    }
}

impl ChorusParams {
    /// Store initialised to the parameter defaults.
    pub const fn new() -> Self {
        Self {
            rate: AtomicParam::new(RATE.default),
            depth: AtomicParam::new(DEPTH.default),
            centre_delay: AtomicParam::new(CENTRE_DELAY.default),
            feedback: AtomicParam::new(FEEDBACK.default),
            mix: AtomicParam::new(MIX.default),
        }
    }

    /// Store initialised from a snapshot (clamped).
    pub fn from_snapshot(snapshot: ParamSnapshot) -> Self {
        let params = Self::new();
        params.apply(&snapshot);
        params
    }

    /// Set modulation rate in Hz (0.1–100).
    pub fn set_rate(&self, value: f32) {
        store_clamped(&self.rate, &RATE, value);
    }

    /// Set modulation depth (0–1).
    pub fn set_depth(&self, value: f32) {
        store_clamped(&self.depth, &DEPTH, value);
    }

    /// Set centre delay in ms (1–100).
    pub fn set_centre_delay(&self, value: f32) {
        store_clamped(&self.centre_delay, &CENTRE_DELAY, value);
    }

    /// Set feedback (−1–1).
    pub fn set_feedback(&self, value: f32) {
        store_clamped(&self.feedback, &FEEDBACK, value);
    }

    /// Set wet/dry mix (0–1).
    pub fn set_mix(&self, value: f32) {
        store_clamped(&self.mix, &MIX, value);
    }

    /// Modulation rate in Hz.
    pub fn rate(&self) -> f32 {
        self.rate.load()
    }

    /// Modulation depth.
    pub fn depth(&self) -> f32 {
        self.depth.load()
    }

    /// Centre delay in ms.
    pub fn centre_delay(&self) -> f32 {
        self.centre_delay.load()
    }

    /// Feedback amount.
    pub fn feedback(&self) -> f32 {
        self.feedback.load()
    }

    /// Wet/dry mix.
    pub fn mix(&self) -> f32 {
        self.mix.load()
    }

    /// Capture all five values.
    ///
    /// Each field is read atomically; a writer racing the snapshot may land
    /// in this block or the next, never half-written.
    #[inline]
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            rate: self.rate(),
            depth: self.depth(),
            centre_delay: self.centre_delay(),
            feedback: self.feedback(),
            mix: self.mix(),
        }
    }

    /// Write all five values from a snapshot through the clamping setters.
    pub fn apply(&self, snapshot: &ParamSnapshot) {
        self.set_rate(snapshot.rate);
        self.set_depth(snapshot.depth);
        self.set_centre_delay(snapshot.centre_delay);
        self.set_feedback(snapshot.feedback);
        self.set_mix(snapshot.mix);
    }

    /// Restore every parameter to its default.
    pub fn reset_to_defaults(&self) {
        self.apply(&ParamSnapshot::default());
    }

    /// Set a parameter by its string ID (`"rate"`, `"centreDelay"`, ...).
    ///
    /// Returns `false` if the ID is unknown.
    pub fn set_by_id(&self, string_id: &str, value: f32) -> bool {
        match self.param_index_by_string_id(string_id) {
            Some(index) => {
                self.set_param(index, value);
                true
            }
            None => false,
        }
    }

    /// Read a parameter by its string ID.
    pub fn get_by_id(&self, string_id: &str) -> Option<f32> {
        self.param_index_by_string_id(string_id)
            .map(|index| self.get_param(index))
    }
}

#[inline]
fn store_clamped(slot: &AtomicParam, desc: &ParamDescriptor, value: f32) {
    if let Some(v) = desc.clamp(value) {
        slot.store(v);
    }
}

impl ParameterInfo for ChorusParams {
    fn param_count(&self) -> usize {
        DESCRIPTORS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.rate(),
            1 => self.depth(),
            2 => self.centre_delay(),
            3 => self.feedback(),
            4 => self.mix(),
            _ => 0.0,
        }
    }

    fn set_param(&self, index: usize, value: f32) {
        match index {
            0 => self.set_rate(value),
            1 => self.set_depth(value),
            2 => self.set_centre_delay(value),
            3 => self.set_feedback(value),
            4 => self.set_mix(value),
            _ => {}
        }
    }
}
