//! Parameter introspection for hosts.
//!
//! [`ParameterInfo`] lets a host (CLI, preset loader, plugin wrapper) discover
//! and drive the chorus parameters by index, display name, or stable string
//! ID without hard-coding the five setters.
//!
//! # Example
//!
//! ```rust
//! use chorale_core::{ChorusParams, ParameterInfo};
//!
//! let params = ChorusParams::new();
//! for i in 0..params.param_count() {
//!     let desc = params.param_info(i).unwrap();
//!     println!("{} = {}{}", desc.name, params.get_param(i), desc.unit.suffix());
//! }
//!
//! let idx = params.param_index_by_string_id("centreDelay").unwrap();
//! params.set_param(idx, 12.5);
//! assert_eq!(params.centre_delay(), 12.5);
//! ```

/// Unit of a parameter value, used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Frequency in Hz.
    Hertz,
    /// Time in milliseconds.
    Milliseconds,
    /// Dimensionless ratio or fraction.
    #[default]
    Ratio,
}

impl ParamUnit {
    /// Display suffix including the leading space, empty for ratios.
    pub const fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Ratio => "",
        }
    }
}

/// Stable numeric parameter identifier.
///
/// Once assigned a `ParamId` never changes for a given parameter; hosts use
/// it for automation lanes and saved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Metadata for one parameter: display names, identifiers, range, default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full name for display (e.g. "Center Delay").
    pub name: &'static str,
    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,
    /// Stable string ID used in presets and automation (e.g. `"centreDelay"`).
    pub string_id: &'static str,
    /// Stable numeric ID.
    pub id: ParamId,
    /// Display unit.
    pub unit: ParamUnit,
    /// Minimum value (inclusive).
    pub min: f32,
    /// Maximum value (inclusive).
    pub max: f32,
    /// Value at construction.
    pub default: f32,
    /// Recommended increment for encoder-style control.
    pub step: f32,
}

impl ParamDescriptor {
    /// Clamp `value` into `[min, max]`. NaN maps to `None`.
    ///
    /// ```rust
    /// use chorale_core::params::MIX;
    ///
    /// assert_eq!(MIX.clamp(2.0), Some(1.0));
    /// assert_eq!(MIX.clamp(f32::NAN), None);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> Option<f32> {
        if value.is_nan() {
            None
        } else {
            Some(value.clamp(self.min, self.max))
        }
    }

    /// Returns `true` if `value` lies inside the range.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Map a plain value to `[0, 1]` (linear).
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / range).clamp(0.0, 1.0)
    }

    /// Map a normalized `[0, 1]` value back to the plain range (linear).
    pub fn denormalize(&self, normalized: f32) -> f32 {
        self.min + normalized.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// Index-based access to a parameter set.
///
/// Parameters are addressed by zero-based index; indices are stable for the
/// lifetime of the implementor. `set_param` takes `&self` because the chorus
/// parameters live in atomics and are written from a control thread.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for `index`, `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value for `index`. Out-of-range indices return `0.0`.
    fn get_param(&self, index: usize) -> f32;

    /// Set the value for `index`, clamped to its range. Out-of-range indices
    /// are ignored.
    fn set_param(&self, index: usize, value: f32);

    /// Find a parameter by display or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                d.name.eq_ignore_ascii_case(name) || d.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Find a parameter by its stable string ID (exact match).
    fn param_index_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count())
            .find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }

    /// Find a parameter by its stable [`ParamId`].
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}
