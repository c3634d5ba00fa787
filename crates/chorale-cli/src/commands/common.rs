//! Shared CLI helpers used across multiple commands.

use chorale_config::{Preset, find_preset, get_factory_preset, validate_preset};
use chorale_core::{ChorusEngine, Interpolation, LfoWaveform};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Parse an `id=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid parameter format: '{s}' (expected id=value)"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("Invalid value for '{key}': '{value}'"))?;
    Ok((key.trim().to_string(), value))
}

/// Load a preset by name or path.
///
/// Searches in this order:
/// 1. Factory presets (by name)
/// 2. User and system presets (by name)
/// 3. File path
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        return Ok(Preset::load(&path)?);
    }

    let path = PathBuf::from(name);
    if path.exists() {
        return Ok(Preset::load(&path)?);
    }

    anyhow::bail!(
        "Preset '{}' not found. Use 'chorale presets list' to see available presets.",
        name
    )
}

/// Parameter flags shared by every command that configures the engine.
#[derive(Args, Debug, Default)]
pub struct ParamArgs {
    /// Modulation rate in Hz
    #[arg(long)]
    pub rate: Option<f64>,

    /// Modulation depth (0-1)
    #[arg(long)]
    pub depth: Option<f64>,

    /// Centre delay in ms
    #[arg(long)]
    pub centre_delay: Option<f64>,

    /// Feedback (-1 to 1)
    #[arg(long, allow_negative_numbers = true)]
    pub feedback: Option<f64>,

    /// Wet/dry mix (0-1)
    #[arg(long)]
    pub mix: Option<f64>,

    /// Parameter by ID (e.g. "centreDelay=12")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    pub param: Vec<(String, f64)>,
}

impl ParamArgs {
    /// Overlay the flags onto `preset`. Named flags win over `--param`.
    pub fn apply_to(&self, preset: &mut Preset) -> anyhow::Result<()> {
        for (id, value) in &self.param {
            preset.set_by_id(id, *value)?;
        }

        let named = [
            ("rate", self.rate),
            ("depth", self.depth),
            ("centreDelay", self.centre_delay),
            ("feedback", self.feedback),
            ("mix", self.mix),
        ];
        for (id, value) in named {
            if let Some(value) = value {
                preset.set_by_id(id, value)?;
            }
        }
        Ok(())
    }
}

/// Resolve the starting preset and apply command-line overrides.
///
/// Out-of-range values are reported and clamped when applied to the engine.
pub fn resolve_preset(preset: Option<&str>, params: &ParamArgs) -> anyhow::Result<Preset> {
    let mut resolved = match preset {
        Some(name) => load_preset(name)?,
        None => Preset::new("Command Line"),
    };
    params.apply_to(&mut resolved)?;

    if let Err(e) = validate_preset(&resolved) {
        tracing::warn!(preset = %resolved.name, "{e}; values will be clamped");
    }
    Ok(resolved)
}

/// Delay-line interpolation choice.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum InterpolationArg {
    /// Two-point linear
    #[default]
    Linear,
    /// Four-point cubic
    Cubic,
}

/// LFO waveform choice.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum WaveformArg {
    /// Sine
    #[default]
    Sine,
    /// Triangle
    Triangle,
}

/// Engine voicing flags.
#[derive(Args, Debug, Default)]
pub struct VoicingArgs {
    /// Delay-line interpolation
    #[arg(long, value_enum, default_value_t)]
    pub interpolation: InterpolationArg,

    /// LFO waveform
    #[arg(long, value_enum, default_value_t)]
    pub waveform: WaveformArg,
}

impl VoicingArgs {
    /// Configure `engine` with the selected interpolation and waveform.
    pub fn configure(&self, engine: &mut ChorusEngine) {
        engine.set_interpolation(match self.interpolation {
            InterpolationArg::Linear => Interpolation::Linear,
            InterpolationArg::Cubic => Interpolation::Cubic,
        });
        engine.set_waveform(match self.waveform {
            WaveformArg::Sine => LfoWaveform::Sine,
            WaveformArg::Triangle => LfoWaveform::Triangle,
        });
    }
}

/// Print the five parameter values of a preset.
pub fn print_preset_values(preset: &Preset) {
    println!("  Rate:         {:.3} Hz", preset.rate);
    println!("  Depth:        {:.3}", preset.depth);
    println!("  Center Delay: {:.3} ms", preset.centre_delay);
    println!("  Feedback:     {:.3}", preset.feedback);
    println!("  Mix:          {:.3}", preset.mix);
}
