//! Fractional delay line for the chorus voices.
//!
//! A circular buffer with a single write cursor. Reads are addressed in
//! samples *behind the write cursor* and happen before the current sample is
//! written, so a delay of `d` returns the input from `d` ticks ago:
//!
//! ```text
//! tick n:   w = read(d)      // x[n - d]
//!           write(x[n] + fb * w)
//! ```
//!
//! The buffer length is always a power of two so wrapping is a mask, not a
//! division.
//!
//! # Interpolation
//!
//! Modulated delay times move continuously, so integer-only reads would step
//! audibly. [`Interpolation::Linear`] blends the two neighbouring taps;
//! [`Interpolation::Cubic`] uses four taps for a flatter passband at the cost
//! of one extra sample of minimum delay.

use alloc::vec;
use alloc::vec::Vec;
use libm::floorf;

/// Interpolation method for fractional delay reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// Linear interpolation between two samples
    #[default]
    Linear,
    /// Cubic interpolation (4-point, smoother)
    Cubic,
}

impl Interpolation {
    /// Shortest delay, in samples, this method can read without touching the
    /// slot that is about to be overwritten.
    #[inline]
    pub const fn min_delay(self) -> f32 {
        match self {
            Interpolation::Linear => 1.0,
            Interpolation::Cubic => 2.0,
        }
    }

    /// Number of taps behind `floor(d)` the method reads.
    #[inline]
    const fn trailing_taps(self) -> usize {
        match self {
            Interpolation::Linear => 1,
            Interpolation::Cubic => 2,
        }
    }
}

/// Circular delay buffer with fractional reads.
///
/// # Memory
///
/// Allocated once in [`DelayLine::new`]; [`clear`](Self::clear) zeroes in
/// place. Nothing on the read/write path allocates.
///
/// # Example
///
/// ```rust
/// use chorale_core::DelayLine;
///
/// let mut delay = DelayLine::new(64);
/// delay.write(1.0);
/// for _ in 0..9 {
///     delay.write(0.0);
/// }
/// // The impulse was written ten ticks ago.
/// assert_eq!(delay.read(10.0), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    buffer: Vec<f32>,
    mask: usize,
    write_pos: usize,
    interpolation: Interpolation,
}

impl DelayLine {
    /// Creates a delay line holding at least `min_capacity` samples.
    ///
    /// The actual capacity is `min_capacity` rounded up to a power of two.
    ///
    /// # Panics
    ///
    /// Panics if `min_capacity` is less than 4.
    pub fn new(min_capacity: usize) -> Self {
        assert!(min_capacity >= 4, "Delay capacity must be >= 4");

        let len = min_capacity.next_power_of_two();
        Self {
            buffer: vec![0.0; len],
            mask: len - 1,
            write_pos: 0,
            interpolation: Interpolation::Linear,
        }
    }

    /// Sets the interpolation method for fractional reads.
    pub fn set_interpolation(&mut self, interp: Interpolation) {
        self.interpolation = interp;
    }

    /// Current interpolation method.
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Buffer length in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Longest readable delay in samples for the current interpolation.
    pub fn max_delay(&self) -> f32 {
        (self.buffer.len() - self.interpolation.trailing_taps()) as f32
    }

    /// Current write cursor position.
    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    /// Reads the sample `delay_samples` ticks behind the write cursor.
    ///
    /// The delay is clamped into `[min_delay, max_delay]`; NaN reads at the
    /// minimum delay.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let min = self.interpolation.min_delay();
        let delay = if delay_samples.is_nan() {
            min
        } else {
            delay_samples.clamp(min, self.max_delay())
        };

        let whole = floorf(delay);
        let frac = delay - whole;
        let tap = self.write_pos.wrapping_sub(whole as usize) & self.mask;

        match self.interpolation {
            Interpolation::Linear => {
                let a = self.buffer[tap];
                let b = self.buffer[tap.wrapping_sub(1) & self.mask];
                a + (b - a) * frac
            }

            Interpolation::Cubic => {
                // 4-point cubic; y0 is the newer neighbour, y3 the oldest
                let y0 = self.buffer[(tap + 1) & self.mask];
                let y1 = self.buffer[tap];
                let y2 = self.buffer[tap.wrapping_sub(1) & self.mask];
                let y3 = self.buffer[tap.wrapping_sub(2) & self.mask];

                let t = frac;
                let t2 = t * t;
                let t3 = t2 * t;

                let a0 = y3 - y2 - y0 + y1;
                let a1 = y0 - y1 - a0;
                let a2 = y2 - y0;

                a0 * t3 + a1 * t2 + a2 * t + y1
            }
        }
    }

    /// Writes a sample at the cursor and advances it.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) & self.mask;
    }

    /// One feedback tick: read at `delay_samples`, then write
    /// `input + feedback * read`. Returns the read value.
    #[inline]
    pub fn tick(&mut self, input: f32, delay_samples: f32, feedback: f32) -> f32 {
        let wet = self.read(delay_samples);
        self.write(crate::math::flush_denormal(input + feedback * wet));
        wet
    }

    /// Zeroes the buffer and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rounds_up_to_power_of_two() {
        assert_eq!(DelayLine::new(4).capacity(), 4);
        assert_eq!(DelayLine::new(5).capacity(), 8);
        assert_eq!(DelayLine::new(9604).capacity(), 16384);
    }

    #[test]
    #[should_panic]
    fn tiny_capacity_panics() {
        let _delay = DelayLine::new(2);
    }

    #[test]
    fn integer_delay_is_exact() {
        let mut delay = DelayLine::new(16);
        for i in 1..=6 {
            delay.write(i as f32);
        }
        // Last written is 6 (one tick ago), so delay 3 is 4.
        assert_eq!(delay.read(1.0), 6.0);
        assert_eq!(delay.read(3.0), 4.0);
    }

    #[test]
    fn linear_interpolates_between_taps() {
        let mut delay = DelayLine::new(16);
        for i in 0..4 {
            delay.write(i as f32);
        }
        // delay 1 → 3.0, delay 2 → 2.0
        let output = delay.read(1.5);
        assert!((output - 2.5).abs() < 1e-6, "Expected 2.5, got {}", output);
    }

    #[test]
    fn read_clamps_below_minimum() {
        let mut delay = DelayLine::new(8);
        delay.write(0.25);
        delay.write(0.75);
        assert_eq!(delay.read(0.0), 0.75);
        assert_eq!(delay.read(-10.0), 0.75);
        assert_eq!(delay.read(f32::NAN), 0.75);
    }

    #[test]
    fn read_clamps_above_capacity() {
        let mut delay = DelayLine::new(8);
        for i in 0..8 {
            delay.write(i as f32 + 1.0);
        }
        // Cursor is back at 0; the oldest sample (1.0) sits under it.
        assert_eq!(delay.read(7.0), 2.0);
        assert_eq!(delay.read(1000.0), 2.0);
    }

    #[test]
    fn wraps_around_buffer_end() {
        let mut delay = DelayLine::new(4);
        for i in 1..=6 {
            delay.write(i as f32);
        }
        assert_eq!(delay.read(1.0), 6.0);
        assert_eq!(delay.read(3.0), 4.0);
    }

    #[test]
    fn tick_reads_before_writing() {
        let mut delay = DelayLine::new(8);
        // Empty line: first read is silence, the written value is the input.
        let wet = delay.tick(1.0, 1.0, 0.5);
        assert_eq!(wet, 0.0);
        // Next tick reads the impulse back and feeds half of it forward.
        let wet = delay.tick(0.0, 1.0, 0.5);
        assert_eq!(wet, 1.0);
        let wet = delay.tick(0.0, 1.0, 0.5);
        assert_eq!(wet, 0.5);
    }

    #[test]
    fn clear_zeroes_and_rewinds() {
        let mut delay = DelayLine::new(8);
        for _ in 0..5 {
            delay.write(1.0);
        }
        delay.clear();
        assert_eq!(delay.write_position(), 0);
        for d in 1..8 {
            assert_eq!(delay.read(d as f32), 0.0);
        }
    }

    #[test]
    fn cubic_matches_linear_at_integer_delays() {
        let mut lin = DelayLine::new(32);
        let mut cub = DelayLine::new(32);
        cub.set_interpolation(Interpolation::Cubic);
        for i in 0..20 {
            let s = libm::sinf(i as f32 * 0.3);
            lin.write(s);
            cub.write(s);
        }
        for d in 2..10 {
            assert_eq!(lin.read(d as f32), cub.read(d as f32));
        }
    }

    #[test]
    fn cubic_more_accurate_on_smooth_signal() {
        let mut lin = DelayLine::new(64);
        let mut cub = DelayLine::new(64);
        cub.set_interpolation(Interpolation::Cubic);

        for i in 0..32 {
            let sample = libm::sinf(i as f32 * core::f32::consts::TAU / 32.0);
            lin.write(sample);
            cub.write(sample);
        }

        // Cursor sits after sample 31, so delay 5.5 lands on index 26.5.
        let truth = libm::sinf(26.5 * core::f32::consts::TAU / 32.0);
        let lin_err = (lin.read(5.5) - truth).abs();
        let cub_err = (cub.read(5.5) - truth).abs();
        assert!(
            cub_err <= lin_err,
            "Cubic error ({cub_err}) should be <= linear error ({lin_err})"
        );
    }

    #[test]
    fn cubic_max_delay_is_one_lower() {
        let mut delay = DelayLine::new(16);
        assert_eq!(delay.max_delay(), 15.0);
        delay.set_interpolation(Interpolation::Cubic);
        assert_eq!(delay.max_delay(), 14.0);
    }
}
