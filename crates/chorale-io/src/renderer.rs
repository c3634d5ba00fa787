//! Offline rendering of whole buffers through the chorus engine.

use crate::{Error, Result, WavSpec, common_length};
use chorale_core::{ChorusEngine, ChorusParams, ms_to_samples};

/// Runs channel-major buffers through a [`ChorusEngine`] in fixed blocks.
///
/// The engine takes one parameter snapshot per block, exactly as it would
/// inside an audio callback of the same block size, so an offline render is
/// sample-identical to a real-time one.
#[derive(Debug)]
pub struct OfflineRenderer {
    engine: ChorusEngine,
    spec: WavSpec,
    block_size: usize,
}

impl OfflineRenderer {
    /// Create a renderer with a fresh engine prepared for `spec`.
    pub fn new(spec: &WavSpec, block_size: usize) -> Result<Self> {
        Self::with_engine(ChorusEngine::new(), spec, block_size)
    }

    /// Wrap an existing engine, (re)preparing it for `spec`.
    pub fn with_engine(
        mut engine: ChorusEngine,
        spec: &WavSpec,
        block_size: usize,
    ) -> Result<Self> {
        engine.prepare(
            f64::from(spec.sample_rate),
            block_size,
            usize::from(spec.channels),
        )?;
        Ok(Self {
            engine,
            spec: *spec,
            block_size,
        })
    }

    /// The parameter store the engine reads from.
    pub fn params(&self) -> &ChorusParams {
        self.engine.params_ref()
    }

    /// Mutable access to the engine (interpolation, waveform, reset).
    pub fn engine_mut(&mut self) -> &mut ChorusEngine {
        &mut self.engine
    }

    /// Stream configuration the engine is prepared for.
    pub fn spec(&self) -> WavSpec {
        self.spec
    }

    /// Block size used for rendering.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of frames covering `ms` milliseconds at the stream rate.
    pub fn frames_for_ms(&self, ms: f32) -> usize {
        if ms.is_finite() && ms > 0.0 {
            ms_to_samples(ms, self.spec.sample_rate as f32).ceil() as usize
        } else {
            0
        }
    }

    /// Render `input` plus `tail_frames` of trailing silence.
    pub fn render<C: AsRef<[f32]>>(
        &mut self,
        input: &[C],
        tail_frames: usize,
    ) -> Result<Vec<Vec<f32>>> {
        self.render_with_progress(input, tail_frames, |_, _| {})
    }

    /// Render like [`render`](Self::render), calling `progress(done, total)`
    /// after every block.
    pub fn render_with_progress<C, F>(
        &mut self,
        input: &[C],
        tail_frames: usize,
        mut progress: F,
    ) -> Result<Vec<Vec<f32>>>
    where
        C: AsRef<[f32]>,
        F: FnMut(usize, usize),
    {
        let expected = usize::from(self.spec.channels);
        if input.len() != expected {
            return Err(Error::ChannelMismatch {
                expected,
                found: input.len(),
            });
        }
        let frames = common_length(input)?;
        let total = frames + tail_frames;

        let mut output: Vec<Vec<f32>> = input
            .iter()
            .map(|channel| {
                let mut buf = Vec::with_capacity(total);
                buf.extend_from_slice(channel.as_ref());
                buf.resize(total, 0.0);
                buf
            })
            .collect();

        let blocks = total.div_ceil(self.block_size);
        tracing::info!(
            frames,
            tail_frames,
            blocks,
            block_size = self.block_size,
            channels = expected,
            "rendering"
        );

        for block in 0..blocks {
            let start = block * self.block_size;
            let end = (start + self.block_size).min(total);

            let mut slices: Vec<&mut [f32]> = output
                .iter_mut()
                .map(|channel| &mut channel[start..end])
                .collect();
            self.engine.process(&mut slices);

            progress(block + 1, blocks);
        }

        Ok(output)
    }
}

/// Level summary of a rendered buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Frames per channel.
    pub frames: usize,
    /// Largest absolute sample across all channels.
    pub peak: f32,
    /// RMS over all channels.
    pub rms: f32,
}

impl RenderStats {
    /// Measure channel-major `channels`.
    pub fn measure<C: AsRef<[f32]>>(channels: &[C]) -> Self {
        let mut peak = 0.0f32;
        let mut sum_sq = 0.0f64;
        let mut count = 0usize;
        for channel in channels {
            for &s in channel.as_ref() {
                peak = peak.max(s.abs());
                sum_sq += f64::from(s) * f64::from(s);
            }
            count += channel.as_ref().len();
        }
        let rms = if count == 0 {
            0.0
        } else {
            (sum_sq / count as f64).sqrt() as f32
        };
        Self {
            frames: channels.first().map_or(0, |c| c.as_ref().len()),
            peak,
            rms,
        }
    }

    /// Peak level in dBFS.
    pub fn peak_db(&self) -> f32 {
        chorale_core::linear_to_db(self.peak)
    }

    /// RMS level in dBFS.
    pub fn rms_db(&self) -> f32 {
        chorale_core::linear_to_db(self.rms)
    }
}
