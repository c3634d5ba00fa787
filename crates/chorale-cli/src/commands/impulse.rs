//! Impulse response rendering.
//!
//! Feeds a unit impulse through a freshly prepared mono engine and lists the
//! taps that come out. With zero depth the response is the dry tap at 0
//! plus the delayed tap and its feedback echoes.

use super::common::{ParamArgs, VoicingArgs, print_preset_values, resolve_preset};
use chorale_io::{OfflineRenderer, WavSpec, write_wav};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ImpulseArgs {
    /// Preset name or file (TOML); flags below override its values
    #[arg(short, long)]
    preset: Option<String>,

    #[command(flatten)]
    params: ParamArgs,

    #[command(flatten)]
    voicing: VoicingArgs,

    /// Sample rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Response length in samples
    #[arg(long, default_value = "4096")]
    length: usize,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Magnitude below which a tap counts as zero
    #[arg(long, default_value = "1e-6")]
    threshold: f32,

    /// Maximum number of taps to print
    #[arg(long, default_value = "32")]
    limit: usize,

    /// Also write the response to a WAV file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ImpulseArgs) -> anyhow::Result<()> {
    if args.length == 0 {
        anyhow::bail!("--length must be at least 1 sample");
    }

    let preset = resolve_preset(args.preset.as_deref(), &args.params)?;
    println!("Impulse response of {}:", preset.name);
    print_preset_values(&preset);

    let spec = WavSpec {
        channels: 1,
        sample_rate: args.sample_rate,
        bits_per_sample: 32,
    };
    let mut renderer = OfflineRenderer::new(&spec, args.block_size)?;
    args.voicing.configure(renderer.engine_mut());
    preset.apply(renderer.params());

    let mut impulse = vec![0.0f32; args.length];
    impulse[0] = 1.0;
    let response = renderer.render(&[impulse], 0)?;
    let response = &response[0];

    let taps: Vec<(usize, f32)> = response
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, s)| s.abs() > args.threshold)
        .collect();

    println!(
        "\n{} non-zero tap(s) in {} samples at {} Hz:",
        taps.len(),
        args.length,
        args.sample_rate
    );
    println!("  {:>8}  {:>10}  {:>12}", "sample", "ms", "value");
    for &(index, value) in taps.iter().take(args.limit) {
        let ms = index as f64 * 1000.0 / f64::from(args.sample_rate);
        println!("  {index:>8}  {ms:>10.3}  {value:>12.6}");
    }
    if taps.len() > args.limit {
        println!("  ... {} more", taps.len() - args.limit);
    }

    if let Some(path) = &args.output {
        write_wav(path, &[response], spec)?;
        println!("\nWrote {}", path.display());
    }

    Ok(())
}
