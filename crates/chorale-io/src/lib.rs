//! Audio file I/O and offline rendering for the Chorale chorus engine.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for channel-major buffers
//! - **Offline rendering**: [`OfflineRenderer`] for running a whole file through
//!   a [`ChorusEngine`](chorale_core::ChorusEngine) block by block
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chorale_io::{OfflineRenderer, read_wav, write_wav};
//!
//! # fn main() -> chorale_io::Result<()> {
//! let (channels, spec) = read_wav("input.wav")?;
//!
//! let mut renderer = OfflineRenderer::new(&spec, 512)?;
//! renderer.params().set_depth(0.3);
//! renderer.params().set_centre_delay(15.0);
//! let processed = renderer.render(&channels, 0)?;
//!
//! write_wav("output.wav", &processed, spec)?;
//! # Ok(())
//! # }
//! ```

mod renderer;
mod wav;

pub use renderer::{OfflineRenderer, RenderStats};
pub use wav::{WavFormat, WavInfo, WavSpec, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The requested sample format is not supported.
    #[error("Unsupported sample format: {0}")]
    UnsupportedFormat(String),

    /// The engine rejected the stream configuration.
    #[error("Engine prepare failed: {0}")]
    Prepare(#[from] chorale_core::PrepareError),

    /// Buffer channel count does not match the stream.
    #[error("Channel count mismatch: expected {expected}, got {found}")]
    ChannelMismatch {
        /// Channels the stream declares.
        expected: usize,
        /// Channels actually supplied.
        found: usize,
    },

    /// Channels in one buffer have different lengths.
    #[error("Channel {channel} has {found} samples, expected {expected}")]
    LengthMismatch {
        /// Offending channel index.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        found: usize,
    },
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Check that every channel has the same length and return it.
pub(crate) fn common_length<C: AsRef<[f32]>>(channels: &[C]) -> Result<usize> {
    let expected = channels.first().map_or(0, |c| c.as_ref().len());
    for (channel, samples) in channels.iter().enumerate().skip(1) {
        let found = samples.as_ref().len();
        if found != expected {
            return Err(Error::LengthMismatch {
                channel,
                expected,
                found,
            });
        }
    }
    Ok(expected)
}
