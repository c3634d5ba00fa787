//! Preset storage and validation for the Chorale chorus engine.
//!
//! A preset is a named set of the five chorus parameters stored as TOML.
//!
//! # Features
//!
//! - **Preset System**: Load and save presets from TOML files
//! - **Validation**: Report out-of-range or non-finite values without clamping
//! - **Paths**: Platform-specific preset directories
//! - **Factory Presets**: Built-in presets for common chorus, flanger, and vibrato sounds
//!
//! # Example
//!
//! ```rust,no_run
//! use chorale_config::{Preset, user_presets_dir, validate_preset};
//! use chorale_core::ChorusParams;
//!
//! let preset = Preset::new("Slow Shimmer")
//!     .with_description("Gentle wide chorus")
//!     .with_rate(0.4)
//!     .with_depth(0.3)
//!     .with_centre_delay(18.0)
//!     .with_feedback(0.1)
//!     .with_mix(0.5);
//! validate_preset(&preset).unwrap();
//!
//! // Drive an engine's parameter store
//! let params = ChorusParams::new();
//! preset.apply(&params);
//!
//! // Save to user presets directory
//! let path = user_presets_dir().join("slow_shimmer.toml");
//! preset.save(&path).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
#[cfg(feature = "std")]
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
#[cfg(feature = "std")]
pub use paths::{
    ensure_user_presets_dir, find_preset, list_all_presets, list_system_presets,
    list_user_presets, preset_file_name, preset_name_from_path, system_presets_dir, user_config_dir,
    user_presets_dir,
};
pub use preset::Preset;
pub use validation::{ValidationError, ValidationResult, validate_param, validate_preset};
