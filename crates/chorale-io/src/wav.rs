//! WAV file reading and writing.
//!
//! Buffers are channel-major: `channels[c][n]` is frame `n` of channel `c`.
//! Integer PCM is scaled to `[-1, 1)` on read and clamped on write.

use crate::{Error, Result, common_length};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// WAV audio encoding format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WavFormat {
    /// Linear PCM (integer samples).
    Pcm,
    /// IEEE 754 floating-point samples.
    IeeeFloat,
}

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample.
    pub bits_per_sample: u16,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Audio encoding format.
    pub format: WavFormat,
}

/// Read WAV metadata without loading sample data.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let total_samples = u64::from(reader.len()); // total across all channels
    let num_frames = total_samples / u64::from(spec.channels.max(1));
    let duration_secs = num_frames as f64 / f64::from(spec.sample_rate);

    let format = match spec.sample_format {
        SampleFormat::Float => WavFormat::IeeeFloat,
        SampleFormat::Int => WavFormat::Pcm,
    };

    Ok(WavInfo {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        num_frames,
        duration_secs,
        format,
    })
}

/// WAV file specification.
///
/// 32-bit files are written as IEEE float; 16- and 24-bit as integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz (e.g., 44100, 48000).
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24, or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl WavSpec {
    fn to_hound(self) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            16 | 24 => SampleFormat::Int,
            32 => SampleFormat::Float,
            other => {
                return Err(Error::UnsupportedFormat(format!(
                    "{other}-bit output (use 16, 24, or 32)"
                )));
            }
        };
        Ok(hound::WavSpec {
            channels: self.channels,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

/// Read a WAV file into channel-major `f32` buffers.
///
/// # Example
/// ```no_run
/// let (channels, spec) = chorale_io::read_wav("input.wav")?;
/// println!("{} channels at {} Hz", channels.len(), spec.sample_rate);
/// # Ok::<(), chorale_io::Error>(())
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let spec = WavSpec::from(hound_spec);
    let num_channels = usize::from(spec.channels);
    if num_channels == 0 {
        return Err(Error::UnsupportedFormat("zero-channel file".into()));
    }

    let interleaved: Vec<f32> = match hound_spec.sample_format {
        SampleFormat::Float => {
            if spec.bits_per_sample != 32 {
                return Err(Error::UnsupportedFormat(format!(
                    "{}-bit float",
                    spec.bits_per_sample
                )));
            }
            reader
                .into_samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            if !(8..=32).contains(&bits) {
                return Err(Error::UnsupportedFormat(format!("{bits}-bit PCM")));
            }
            let max_val = (1i64 << (bits - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / num_channels;
    let mut channels: Vec<Vec<f32>> = (0..num_channels)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    for frame in interleaved.chunks_exact(num_channels) {
        for (channel, &sample) in channels.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }

    tracing::debug!(
        channels = num_channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames,
        "read WAV"
    );

    Ok((channels, spec))
}

/// Write channel-major buffers to a WAV file.
///
/// The number of buffers must match `spec.channels` and all buffers must
/// have the same length.
///
/// # Example
/// ```no_run
/// use chorale_io::{WavSpec, write_wav};
///
/// let silence = vec![vec![0.0f32; 48000]; 2];
/// write_wav("output.wav", &silence, WavSpec::default())?;
/// # Ok::<(), chorale_io::Error>(())
/// ```
pub fn write_wav<P: AsRef<Path>, C: AsRef<[f32]>>(
    path: P,
    channels: &[C],
    spec: WavSpec,
) -> Result<()> {
    let expected = usize::from(spec.channels);
    if channels.len() != expected {
        return Err(Error::ChannelMismatch {
            expected,
            found: channels.len(),
        });
    }
    let frames = common_length(channels)?;
    let hound_spec = spec.to_hound()?;
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for n in 0..frames {
            for channel in channels {
                writer.write_sample(channel.as_ref()[n])?;
            }
        }
    } else {
        let max_val = (1i32 << (spec.bits_per_sample - 1)) as f32;
        for n in 0..frames {
            for channel in channels {
                let sample = channel.as_ref()[n];
                let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;

    tracing::debug!(
        channels = expected,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames,
        "wrote WAV"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_roundtrip_f32_stereo() {
        let left: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin()).collect();
        let right: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).cos()).collect();
        let spec = WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[&left, &right], spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec, spec);
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], left);
        assert_eq!(loaded[1], right);
    }

    #[test]
    fn test_roundtrip_i16() {
        let samples: Vec<f32> = (0..1000).map(|i| (i as f32 / 1000.0).sin() * 0.9).collect();
        let spec = WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
        };

        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[&samples], spec).unwrap();

        let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
        assert_eq!(loaded_spec.sample_rate, 44100);
        assert_eq!(loaded[0].len(), samples.len());

        // 16-bit has less precision
        for (a, b) in samples.iter().zip(loaded[0].iter()) {
            assert!((a - b).abs() < 0.001);
        }
    }

    #[test]
    fn test_write_rejects_wrong_channel_count() {
        let file = NamedTempFile::new().unwrap();
        let mono = vec![0.0f32; 16];
        let err = write_wav(file.path(), &[&mono], WavSpec::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::ChannelMismatch {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_write_rejects_ragged_channels() {
        let file = NamedTempFile::new().unwrap();
        let a = vec![0.0f32; 16];
        let b = vec![0.0f32; 15];
        let err = write_wav(file.path(), &[&a, &b], WavSpec::default()).unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { channel: 1, .. }));
    }

    #[test]
    fn test_write_rejects_unsupported_bit_depth() {
        let file = NamedTempFile::new().unwrap();
        let mono = vec![0.0f32; 16];
        let spec = WavSpec {
            channels: 1,
            bits_per_sample: 12,
            ..Default::default()
        };
        let err = write_wav(file.path(), &[&mono], spec).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_int_write_clamps_overs() {
        let file = NamedTempFile::new().unwrap();
        let hot = vec![2.0f32, -2.0];
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 16,
        };
        write_wav(file.path(), &[&hot], spec).unwrap();
        let (loaded, _) = read_wav(file.path()).unwrap();
        assert!(loaded[0][0] < 1.0 && loaded[0][0] > 0.999);
        assert_eq!(loaded[0][1], -1.0);
    }
}
