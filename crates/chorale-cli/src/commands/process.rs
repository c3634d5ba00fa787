//! File-based chorus processing command.

use super::common::{ParamArgs, VoicingArgs, print_preset_values, resolve_preset};
use chorale_io::{OfflineRenderer, RenderStats, WavSpec, read_wav, write_wav};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or file (TOML); flags below override its values
    #[arg(short, long)]
    preset: Option<String>,

    #[command(flatten)]
    params: ParamArgs,

    #[command(flatten)]
    voicing: VoicingArgs,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,

    /// Silence appended after the input so the delayed signal rings out (ms)
    #[arg(long, default_value = "0")]
    tail_ms: f32,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{s}' (use 16, 24, or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (input, spec) = read_wav(&args.input)?;
    let frames = input.first().map_or(0, Vec::len);

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        spec.channels,
        spec.sample_rate,
        frames as f32 / spec.sample_rate as f32
    );

    let preset = resolve_preset(args.preset.as_deref(), &args.params)?;
    println!("Using {}:", preset.name);
    print_preset_values(&preset);

    let mut renderer = OfflineRenderer::new(&spec, args.block_size)?;
    args.voicing.configure(renderer.engine_mut());
    preset.apply(renderer.params());

    let tail_frames = renderer.frames_for_ms(args.tail_ms);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} blocks ({eta})")?
            .progress_chars("##-"),
    );

    let output = renderer.render_with_progress(&input, tail_frames, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    })?;

    pb.finish_with_message("done");

    let input_stats = RenderStats::measure(&input);
    let output_stats = RenderStats::measure(&output);

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        input_stats.rms_db(),
        input_stats.peak_db()
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        output_stats.rms_db(),
        output_stats.peak_db()
    );

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bit_depth() {
        assert_eq!(parse_bit_depth("16"), Ok(16));
        assert_eq!(parse_bit_depth("24"), Ok(24));
        assert_eq!(parse_bit_depth("32"), Ok(32));
        assert!(parse_bit_depth("8").is_err());
        assert!(parse_bit_depth("abc").is_err());
    }
}
