//! Factory presets bundled with the library.
//!
//! These are embedded at compile time and always available, covering the
//! range of sounds the engine can make: classic chorus, wide ensemble,
//! flanger, vibrato, and a dry bypass.

use crate::Preset;

/// Names of the factory presets, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["classic", "wide", "flange", "vibrato", "bypass"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("classic", CLASSIC_PRESET),
    ("wide", WIDE_PRESET),
    ("flange", FLANGE_PRESET),
    ("vibrato", VIBRATO_PRESET),
    ("bypass", BYPASS_PRESET),
];

/// Subtle doubling in the 10-15 ms range.
const CLASSIC_PRESET: &str = r#"
name = "Classic"
description = "Subtle doubling, slow sweep"
rate = 0.8
depth = 0.25
centreDelay = 12.0
feedback = 0.0
mix = 0.5
"#;

/// Longer delay and deeper sweep for an ensemble spread.
const WIDE_PRESET: &str = r#"
name = "Wide"
description = "Deep, slow ensemble for pads"
rate = 0.3
depth = 0.4
centreDelay = 20.0
feedback = 0.1
mix = 0.6
"#;

/// Short delay with strong feedback turns the chorus into a flanger.
const FLANGE_PRESET: &str = r#"
name = "Flange"
description = "Short delay, high feedback jet sweep"
rate = 0.25
depth = 0.8
centreDelay = 2.0
feedback = 0.7
mix = 0.5
"#;

/// Fully wet, so only the pitch wobble is heard.
const VIBRATO_PRESET: &str = r#"
name = "Vibrato"
description = "Fully wet pitch modulation"
rate = 5.0
depth = 0.3
centreDelay = 5.0
feedback = 0.0
mix = 1.0
"#;

/// Dry signal only.
const BYPASS_PRESET: &str = r#"
name = "Bypass"
description = "Dry signal, effect disabled"
feedback = 0.0
mix = 0.0
"#;

/// All factory presets, in display order.
///
/// # Example
///
/// ```rust
/// use chorale_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by identifier or display name (case-insensitive).
///
/// ```rust
/// use chorale_config::get_factory_preset;
///
/// let flange = get_factory_preset("Flange").unwrap();
/// assert_eq!(flange.centre_delay, 2.0);
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Some((*id, Preset::from_toml(toml).ok()?)))
        .find(|(id, preset)| {
            id.eq_ignore_ascii_case(name) || preset.name.eq_ignore_ascii_case(name)
        })
        .map(|(_, preset)| preset)
}

/// Identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Returns `true` if `name` matches a factory preset (case-insensitive).
///
/// ```rust
/// use chorale_config::is_factory_preset;
///
/// assert!(is_factory_preset("vibrato"));
/// assert!(is_factory_preset("Vibrato"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
