//! DC blocking filter.
//!
//! First-order highpass (Julius O. Smith's DC blocker):
//!
//! ```text
//! H(z) = (1 - z^-1) / (1 - R*z^-1)
//! ```
//!
//! A resonant feedback loop accumulates DC offset relentlessly; the string
//! model runs one of these inside the loop so the offset never builds up.

use core::f32::consts::PI;

/// DC blocking filter using a first-order highpass.
///
/// The cutoff sits around 7 Hz, below the audible range.
pub struct DcBlocker {
    /// R coefficient (pole position, controls cutoff frequency)
    coeff: f32,
    x_prev: f32,
    y_prev: f32,
}

impl DcBlocker {
    const DEFAULT_CUTOFF_HZ: f32 = 7.0;

    /// Create a new DC blocker for the given sample rate.
    pub fn new(sample_rate: f32) -> Self {
        Self {
            coeff: Self::calculate_coeff(Self::DEFAULT_CUTOFF_HZ, sample_rate),
            x_prev: 0.0,
            y_prev: 0.0,
        }
    }

    /// Process a single sample: `y[n] = x[n] - x[n-1] + R * y[n-1]`.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = input - self.x_prev + self.coeff * self.y_prev;
        self.x_prev = input;
        self.y_prev = output;
        output
    }

    /// Reset the filter state to zero.
    pub fn reset(&mut self) {
        self.x_prev = 0.0;
        self.y_prev = 0.0;
    }

    /// Update the sample rate, keeping the same cutoff frequency.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.coeff = Self::calculate_coeff(Self::DEFAULT_CUTOFF_HZ, sample_rate);
    }

    /// `R = 1 - 2π*fc/fs`, clamped to [0.9, 0.9999] for stability.
    fn calculate_coeff(cutoff_hz: f32, sample_rate: f32) -> f32 {
        let r = 1.0 - (2.0 * PI * cutoff_hz / sample_rate);
        r.clamp(0.9, 0.9999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_dc() {
        let mut blocker = DcBlocker::new(48000.0);
        let mut output = 0.0;
        for _ in 0..48000 {
            output = blocker.process(1.0);
        }
        assert!(output.abs() < 0.01, "DC should be removed, got {output}");
    }

    #[test]
    fn passes_audio_band() {
        let mut blocker = DcBlocker::new(48000.0);
        let freq = 1000.0;
        for i in 0..48000 {
            let t = i as f32 / 48000.0;
            blocker.process(libm::sinf(2.0 * PI * freq * t));
        }
        let mut max_output = 0.0f32;
        for i in 0..48 {
            let t = (48000 + i) as f32 / 48000.0;
            let output = blocker.process(libm::sinf(2.0 * PI * freq * t));
            max_output = max_output.max(output.abs());
        }
        assert!(max_output > 0.95, "1 kHz should pass, max was {max_output}");
    }

    #[test]
    fn finite_under_square_wave() {
        let mut blocker = DcBlocker::new(48000.0);
        for i in 0..10000 {
            let input = if i % 2 == 0 { 1.0 } else { -1.0 };
            assert!(blocker.process(input).is_finite());
        }
    }
}
