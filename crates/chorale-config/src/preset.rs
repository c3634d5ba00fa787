//! Preset file format and operations.

use chorale_core::params::{CENTRE_DELAY, DEPTH, DESCRIPTORS, FEEDBACK, MIX, RATE};
use chorale_core::{ChorusParams, ParamSnapshot};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

/// A named set of chorus parameters.
///
/// Missing fields fall back to the parameter defaults, so a preset file only
/// needs the values it changes. Values are stored as written; they are
/// clamped when [applied](Preset::apply), and
/// [`validate_preset`](crate::validate_preset) reports any that are out of
/// range.
///
/// # TOML Format
///
/// ```toml
/// name = "Classic"
/// description = "Subtle doubling"
/// rate = 0.8
/// depth = 0.25
/// centreDelay = 12.0
/// feedback = 0.0
/// mix = 0.5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Modulation rate in Hz.
    #[serde(default = "default_rate")]
    pub rate: f64,

    /// Modulation depth, 0–1.
    #[serde(default = "default_depth")]
    pub depth: f64,

    /// Centre delay in ms.
    #[serde(default = "default_centre_delay")]
    pub centre_delay: f64,

    /// Feedback, −1–1.
    #[serde(default = "default_feedback")]
    pub feedback: f64,

    /// Wet/dry mix, 0–1.
    #[serde(default = "default_mix")]
    pub mix: f64,
}

fn default_rate() -> f64 {
    f64::from(RATE.default)
}

fn default_depth() -> f64 {
    f64::from(DEPTH.default)
}

fn default_centre_delay() -> f64 {
    f64::from(CENTRE_DELAY.default)
}

fn default_feedback() -> f64 {
    f64::from(FEEDBACK.default)
}

fn default_mix() -> f64 {
    f64::from(MIX.default)
}

fn descriptor_index(string_id: &str) -> Option<usize> {
    DESCRIPTORS.iter().position(|d| d.string_id == string_id)
}

/// Widen an `f32` through its shortest decimal form, so `0.1f32` is stored
/// as `0.1` rather than `0.10000000149011612`.
pub(crate) fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

impl Preset {
    /// Create a preset with default parameter values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            rate: default_rate(),
            depth: default_depth(),
            centre_delay: default_centre_delay(),
            feedback: default_feedback(),
            mix: default_mix(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the modulation rate.
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Set the modulation depth.
    pub fn with_depth(mut self, depth: f64) -> Self {
        self.depth = depth;
        self
    }

    /// Set the centre delay.
    pub fn with_centre_delay(mut self, centre_delay: f64) -> Self {
        self.centre_delay = centre_delay;
        self
    }

    /// Set the feedback.
    pub fn with_feedback(mut self, feedback: f64) -> Self {
        self.feedback = feedback;
        self
    }

    /// Set the wet/dry mix.
    pub fn with_mix(mut self, mix: f64) -> Self {
        self.mix = mix;
        self
    }

    /// Build a preset from a parameter snapshot.
    pub fn from_snapshot(name: impl Into<String>, snapshot: &ParamSnapshot) -> Self {
        Self {
            name: name.into(),
            description: None,
            rate: widen(snapshot.rate),
            depth: widen(snapshot.depth),
            centre_delay: widen(snapshot.centre_delay),
            feedback: widen(snapshot.feedback),
            mix: widen(snapshot.mix),
        }
    }

    /// Capture the current values of a parameter store.
    pub fn capture(name: impl Into<String>, params: &ChorusParams) -> Self {
        Self::from_snapshot(name, &params.snapshot())
    }

    /// The stored values as an (unclamped) snapshot.
    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            rate: self.rate as f32,
            depth: self.depth as f32,
            centre_delay: self.centre_delay as f32,
            feedback: self.feedback as f32,
            mix: self.mix as f32,
        }
    }

    /// Write every value into `params` through its clamping setter.
    pub fn apply(&self, params: &ChorusParams) {
        params.apply(&self.snapshot());
    }

    /// Set a value by parameter string ID (`"rate"`, `"centreDelay"`, ...).
    pub fn set_by_id(&mut self, string_id: &str, value: f64) -> Result<(), ConfigError> {
        let index = descriptor_index(string_id)
            .ok_or_else(|| ConfigError::UnknownParameter(string_id.to_string()))?;
        *self.values_mut()[index] = value;
        Ok(())
    }

    /// Read a value by parameter string ID.
    pub fn get_by_id(&self, string_id: &str) -> Option<f64> {
        descriptor_index(string_id).map(|index| self.values()[index])
    }

    /// Values in [`DESCRIPTORS`] order.
    fn values(&self) -> [f64; DESCRIPTORS.len()] {
        [
            self.rate,
            self.depth,
            self.centre_delay,
            self.feedback,
            self.mix,
        ]
    }

    fn values_mut(&mut self) -> [&mut f64; DESCRIPTORS.len()] {
        [
            &mut self.rate,
            &mut self.depth,
            &mut self.centre_delay,
            &mut self.feedback,
            &mut self.mix,
        ]
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
