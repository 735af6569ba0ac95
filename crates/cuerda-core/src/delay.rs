//! Delay line implementations for the string model, feedback body, and echo.
//!
//! Two ring-buffer variants with fractional-delay interpolated reads:
//!
//! - [`FixedDelayLine`] - owned `[f32; N]` storage, compile-time capacity.
//!   Used where the state lives inline in the owning struct (the resonator's
//!   string, the feedback-body delays).
//! - [`DelayLine`] - borrowed `&mut [f32]` storage. Used where the buffer is
//!   too large to live inline and is placed once at initialization in a
//!   persistent memory region (echo delays, reverb storage).
//!
//! Neither variant ever resizes; capacity is fixed for the life of the
//! process and reads are total over any non-negative fractional delay.
//!
//! # Interpolation
//!
//! Reading at a non-integer delay interpolates neighboring samples. Linear
//! is the cheap default; [`Interpolation::Hermite`] (4-point Catmull-Rom)
//! is used by the string resonator, where interpolation error directly
//! becomes pitch error.

/// Interpolation method for fractional delay reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interpolation {
    /// No interpolation (truncate to the nearest stored sample)
    None,
    /// Linear interpolation between two samples
    #[default]
    Linear,
    /// 4-point Catmull-Rom Hermite interpolation (smoothest)
    Hermite,
}

/// Interpolated read shared by both delay line variants.
///
/// `write_pos` is the next slot to be written; delay 0 is the most recently
/// written sample, larger delays are older. Reads wrap modulo the buffer
/// length and never index out of bounds.
#[inline]
fn read_interpolated(
    buffer: &[f32],
    write_pos: usize,
    delay_samples: f32,
    interpolation: Interpolation,
) -> f32 {
    debug_assert!(delay_samples >= 0.0);

    let len = buffer.len();
    let delay_clamped = delay_samples.max(0.0).min((len - 1) as f32);

    let delay_int = delay_clamped as usize;
    let frac = delay_clamped - delay_int as f32;

    // Sample `delay_int` samples before the last written one.
    let read_pos = (write_pos + len - delay_int - 1) % len;

    match interpolation {
        Interpolation::None => buffer[read_pos],

        Interpolation::Linear => {
            let older = (read_pos + len - 1) % len;
            let a = buffer[read_pos];
            let b = buffer[older];
            a + (b - a) * frac
        }

        Interpolation::Hermite => {
            // Catmull-Rom over [x0, x1] with one sample of context each side:
            // xm1 is one sample newer than the read point, x2 one older than x1.
            let xm1 = buffer[(read_pos + 1) % len];
            let x0 = buffer[read_pos];
            let x1 = buffer[(read_pos + len - 1) % len];
            let x2 = buffer[(read_pos + len - 2) % len];

            let c1 = 0.5 * (x1 - xm1);
            let c2 = xm1 - 2.5 * x0 + 2.0 * x1 - 0.5 * x2;
            let c3 = 0.5 * (x2 - xm1) + 1.5 * (x0 - x1);

            ((c3 * frac + c2) * frac + c1) * frac + x0
        }
    }
}

/// Ring-buffer delay line over borrowed storage.
///
/// The caller supplies the backing slice (typically placed in an arena at
/// initialization) and the line treats it as a circular buffer for its
/// entire lifetime. Capacity equals the slice length and never changes.
///
/// # Example
///
/// ```rust
/// use cuerda_core::{DelayLine, Interpolation};
///
/// let mut storage = [0.0f32; 64];
/// let mut line = DelayLine::new(&mut storage);
/// line.write(1.0);
/// let out = line.read(0.0);
/// assert_eq!(out, 1.0);
/// ```
#[derive(Debug)]
pub struct DelayLine<'a> {
    buffer: &'a mut [f32],
    write_pos: usize,
    interpolation: Interpolation,
}

impl<'a> DelayLine<'a> {
    /// Wrap a backing slice as a delay line.
    ///
    /// # Panics
    ///
    /// Panics if the slice is empty.
    pub fn new(buffer: &'a mut [f32]) -> Self {
        assert!(!buffer.is_empty(), "delay storage must be non-empty");
        buffer.fill(0.0);
        Self {
            buffer,
            write_pos: 0,
            interpolation: Interpolation::Linear,
        }
    }

    /// Set the interpolation method for fractional reads.
    pub fn set_interpolation(&mut self, interp: Interpolation) {
        self.interpolation = interp;
    }

    /// Read a delayed sample; `delay_samples` may be fractional.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        read_interpolated(self.buffer, self.write_pos, delay_samples, self.interpolation)
    }

    /// Write a sample and advance the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Zero the buffer and reset the write position.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }
}

/// Fixed-size delay line with owned storage (compile-time capacity).
///
/// # Example
///
/// ```rust
/// use cuerda_core::FixedDelayLine;
///
/// let mut delay: FixedDelayLine<4096> = FixedDelayLine::new();
/// delay.write(1.0);
/// let output = delay.read(0.0);
/// assert_eq!(output, 1.0);
/// ```
pub struct FixedDelayLine<const N: usize> {
    buffer: [f32; N],
    write_pos: usize,
    interpolation: Interpolation,
}

impl<const N: usize> FixedDelayLine<N> {
    /// Create a zeroed delay line.
    pub fn new() -> Self {
        Self {
            buffer: [0.0; N],
            write_pos: 0,
            interpolation: Interpolation::Linear,
        }
    }

    /// Set the interpolation method for fractional reads.
    pub fn set_interpolation(&mut self, interp: Interpolation) {
        self.interpolation = interp;
    }

    /// Capacity in samples.
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Read a delayed sample; `delay_samples` may be fractional.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        read_interpolated(&self.buffer, self.write_pos, delay_samples, self.interpolation)
    }

    /// Write a sample and advance the write position.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % N;
    }

    /// Zero the buffer and reset the write position.
    pub fn clear(&mut self) {
        self.buffer = [0.0; N];
        self.write_pos = 0;
    }
}

impl<const N: usize> Default for FixedDelayLine<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_delay_recovers_sample() {
        let mut storage = [0.0f32; 16];
        let mut line = DelayLine::new(&mut storage);
        for i in 1..=5 {
            line.write(i as f32);
        }
        assert_eq!(line.read(0.0), 5.0);
        assert_eq!(line.read(3.0), 2.0);
    }

    #[test]
    fn linear_interpolation_midpoint() {
        let mut storage = [0.0f32; 16];
        let mut line = DelayLine::new(&mut storage);
        line.write(0.0);
        line.write(1.0);
        line.write(2.0);
        line.write(3.0);
        let out = line.read(1.5);
        assert!((out - 1.5).abs() < 1e-6, "got {out}");
    }

    #[test]
    fn read_wraps_across_buffer_boundary() {
        let mut storage = [0.0f32; 4];
        let mut line = DelayLine::new(&mut storage);
        for i in 1..=5 {
            line.write(i as f32);
        }
        assert_eq!(line.read(3.0), 2.0);
    }

    #[test]
    fn oversized_delay_is_clamped_not_panicking() {
        let mut storage = [0.0f32; 8];
        let mut line = DelayLine::new(&mut storage);
        line.write(1.0);
        let out = line.read(1e9);
        assert!(out.is_finite());
    }

    #[test]
    fn hermite_is_exact_on_linear_ramps() {
        // Catmull-Rom reproduces linear and quadratic signals exactly, so a
        // pure ramp must come back with no error at any fraction.
        let mut line: FixedDelayLine<64> = FixedDelayLine::new();
        line.set_interpolation(Interpolation::Hermite);
        for i in 0..32 {
            line.write(i as f32);
        }
        for frac in [0.25, 0.5, 0.75] {
            let delay = 5.0 + frac;
            let expected = 31.0 - delay;
            let out = line.read(delay);
            assert!((out - expected).abs() < 1e-4, "delay {delay}: got {out}");
        }
    }

    #[test]
    fn hermite_beats_linear_on_sine() {
        let mut lin: FixedDelayLine<64> = FixedDelayLine::new();
        let mut her: FixedDelayLine<64> = FixedDelayLine::new();
        her.set_interpolation(Interpolation::Hermite);
        for i in 0..48 {
            let s = libm::sinf(i as f32 * core::f32::consts::TAU / 24.0);
            lin.write(s);
            her.write(s);
        }
        // True value at 5.5 samples back from sample index 47
        let truth = libm::sinf(41.5 * core::f32::consts::TAU / 24.0);
        let lin_err = (lin.read(5.5) - truth).abs();
        let her_err = (her.read(5.5) - truth).abs();
        assert!(her_err <= lin_err, "hermite {her_err} vs linear {lin_err}");
    }

    #[test]
    fn truncating_read_ignores_fraction() {
        let mut line: FixedDelayLine<16> = FixedDelayLine::new();
        line.set_interpolation(Interpolation::None);
        for i in 0..5 {
            line.write(i as f32);
        }
        assert_eq!(line.read(1.7), 3.0);
    }

    #[test]
    fn clear_silences_line() {
        let mut line: FixedDelayLine<32> = FixedDelayLine::new();
        for _ in 0..40 {
            line.write(1.0);
        }
        line.clear();
        for d in 0..31 {
            assert_eq!(line.read(d as f32), 0.0);
        }
    }

    #[test]
    #[should_panic]
    fn empty_storage_panics() {
        let mut storage: [f32; 0] = [];
        let _ = DelayLine::new(&mut storage);
    }
}
