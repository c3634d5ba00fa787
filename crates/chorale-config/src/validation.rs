//! Preset validation.
//!
//! Checks each stored value against the engine's parameter ranges and
//! reports every problem at once. Validation never modifies the preset;
//! [`Preset::apply`](crate::Preset::apply) clamps regardless.
//!
//! # Example
//!
//! ```rust
//! use chorale_config::{Preset, ValidationError, validate_preset};
//!
//! let preset = Preset::new("Too Fast").with_rate(500.0);
//! match validate_preset(&preset) {
//!     Err(ValidationError::OutOfRange { param, .. }) => assert_eq!(param, "rate"),
//!     other => panic!("unexpected: {other:?}"),
//! }
//! ```

use chorale_core::params::DESCRIPTORS;
use thiserror::Error;

use crate::Preset;
use crate::preset::widen;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter ID.
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Parameter string ID.
        param: String,
        /// The value that was out of range.
        value: f64,
        /// Minimum allowed value.
        min: f64,
        /// Maximum allowed value.
        max: f64,
    },

    /// Parameter value is NaN or infinite.
    #[error("parameter '{param}' is not a finite number")]
    NotFinite {
        /// Parameter string ID.
        param: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", join_errors(.0))]
    Multiple(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate one value against the range of the parameter `string_id`.
///
/// ```rust
/// use chorale_config::validate_param;
///
/// assert!(validate_param("mix", 0.5).is_ok());
/// assert!(validate_param("mix", 1.5).is_err());
/// assert!(validate_param("speed", 0.5).is_err());
/// ```
pub fn validate_param(string_id: &str, value: f64) -> ValidationResult<()> {
    let desc = DESCRIPTORS
        .iter()
        .find(|d| d.string_id == string_id)
        .ok_or_else(|| ValidationError::UnknownParameter(string_id.to_string()))?;

    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            param: string_id.to_string(),
        });
    }

    // Compare at engine precision so `0.1` is not below the f32 minimum
    let narrowed = value as f32;
    if narrowed < desc.min || narrowed > desc.max {
        return Err(ValidationError::OutOfRange {
            param: string_id.to_string(),
            value,
            min: widen(desc.min),
            max: widen(desc.max),
        });
    }
    Ok(())
}

/// Validate all five values of a preset.
///
/// Returns the single error if only one value is bad, or
/// [`ValidationError::Multiple`] listing each one.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = DESCRIPTORS
        .iter()
        .filter_map(|desc| {
            let value = preset.get_by_id(desc.string_id)?;
            validate_param(desc.string_id, value).err()
        })
        .collect();

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_preset(&Preset::default()).is_ok());
    }

    #[test]
    fn test_range_edges_are_valid() {
        let low = Preset::new("low")
            .with_rate(0.1)
            .with_depth(0.0)
            .with_centre_delay(1.0)
            .with_feedback(-1.0)
            .with_mix(0.0);
        let high = Preset::new("high")
            .with_rate(100.0)
            .with_depth(1.0)
            .with_centre_delay(100.0)
            .with_feedback(1.0)
            .with_mix(1.0);
        assert!(validate_preset(&low).is_ok());
        assert!(validate_preset(&high).is_ok());
    }

    #[test]
    fn test_single_error() {
        let preset = Preset::new("x").with_feedback(1.5);
        let err = validate_preset(&preset).unwrap_err();
        assert_eq!(
            err,
            ValidationError::OutOfRange {
                param: "feedback".to_string(),
                value: 1.5,
                min: -1.0,
                max: 1.0,
            }
        );
    }

    #[test]
    fn test_multiple_errors_reported_in_parameter_order() {
        let preset = Preset::new("x")
            .with_rate(0.0)
            .with_centre_delay(f64::NAN)
            .with_mix(-0.1);
        let ValidationError::Multiple(errors) = validate_preset(&preset).unwrap_err() else {
            panic!("expected Multiple");
        };
        assert_eq!(errors.len(), 3);
        assert!(matches!(&errors[0], ValidationError::OutOfRange { param, .. } if param == "rate"));
        assert!(matches!(
            &errors[1],
            ValidationError::NotFinite { param } if param == "centreDelay"
        ));
        assert!(matches!(&errors[2], ValidationError::OutOfRange { param, .. } if param == "mix"));
    }

    #[test]
    fn test_validation_does_not_modify() {
        let preset = Preset::new("x").with_depth(2.0);
        let before = preset.clone();
        let _ = validate_preset(&preset);
        assert_eq!(preset, before);
    }

    #[test]
    fn test_display() {
        let err = ValidationError::Multiple(vec![
            ValidationError::NotFinite {
                param: "rate".to_string(),
            },
            ValidationError::UnknownParameter("speed".to_string()),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("'rate' is not a finite number"), "got: {msg}");
        assert!(msg.contains("unknown parameter 'speed'"), "got: {msg}");
    }
}
