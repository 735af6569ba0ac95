//! Stereo biquad filters band-limiting the feedback loop.

use cuerda_core::{Biquad, highpass_coefficients, lowpass_coefficients};

/// Filter response selector for [`StereoFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// 12 dB/oct lowpass
    Lowpass,
    /// 12 dB/oct highpass
    Highpass,
}

/// A pair of biquads sharing one set of RBJ coefficients, processing both
/// channels of the feedback path.
pub struct StereoFilter {
    left: Biquad,
    right: Biquad,
    mode: FilterMode,
    sample_rate: f32,
    q: f32,
}

impl StereoFilter {
    /// Create a stereo filter at the given cutoff.
    pub fn new(sample_rate: f32, mode: FilterMode, cutoff_hz: f32, q: f32) -> Self {
        let mut filter = Self {
            left: Biquad::new(),
            right: Biquad::new(),
            mode,
            sample_rate,
            q,
        };
        filter.set_cutoff(cutoff_hz);
        filter
    }

    /// Retune both channels; cutoff is clamped just below Nyquist.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        let cutoff = cutoff_hz.clamp(1.0, self.sample_rate * 0.497);
        let (b0, b1, b2, a0, a1, a2) = match self.mode {
            FilterMode::Lowpass => lowpass_coefficients(cutoff, self.q, self.sample_rate),
            FilterMode::Highpass => highpass_coefficients(cutoff, self.q, self.sample_rate),
        };
        self.left.set_coefficients(b0, b1, b2, a0, a1, a2);
        self.right.set_coefficients(b0, b1, b2, a0, a1, a2);
    }

    /// Filter one stereo frame in place.
    #[inline]
    pub fn process(&mut self, l: &mut f32, r: &mut f32) {
        *l = self.left.process(*l);
        *r = self.right.process(*r);
    }

    /// Clear both channel histories.
    pub fn clear(&mut self) {
        self.left.clear();
        self.right.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rms(filter: &mut StereoFilter, freq: f32, sample_rate: f32) -> f32 {
        let mut acc = 0.0f64;
        let n = 4_800;
        for i in 0..n {
            let mut s = libm::sinf(i as f32 * core::f32::consts::TAU * freq / sample_rate);
            let mut r = s;
            filter.process(&mut s, &mut r);
            if i >= n / 2 {
                acc += f64::from(s * s);
            }
        }
        (acc / f64::from(n as u32 / 2)).sqrt() as f32
    }

    #[test]
    fn lowpass_attenuates_above_cutoff() {
        let sr = 48_000.0;
        let mut lpf = StereoFilter::new(sr, FilterMode::Lowpass, 1_000.0, 0.9);
        let low = rms(&mut lpf, 100.0, sr);
        lpf.clear();
        let high = rms(&mut lpf, 10_000.0, sr);
        assert!(high < low * 0.1, "low {low}, high {high}");
    }

    #[test]
    fn highpass_attenuates_below_cutoff() {
        let sr = 48_000.0;
        let mut hpf = StereoFilter::new(sr, FilterMode::Highpass, 1_000.0, 0.9);
        let high = rms(&mut hpf, 10_000.0, sr);
        hpf.clear();
        let low = rms(&mut hpf, 100.0, sr);
        assert!(low < high * 0.1, "low {low}, high {high}");
    }

    #[test]
    fn channels_filter_independently() {
        let mut lpf = StereoFilter::new(48_000.0, FilterMode::Lowpass, 1_000.0, 0.9);
        let mut l = 1.0;
        let mut r = 0.0;
        lpf.process(&mut l, &mut r);
        assert!(l != 0.0);
        assert_eq!(r, 0.0);
    }

    #[test]
    fn absurd_cutoff_is_clamped() {
        let mut lpf = StereoFilter::new(48_000.0, FilterMode::Lowpass, 1.0e9, 0.9);
        lpf.set_cutoff(-50.0);
        let mut l = 0.5;
        let mut r = 0.5;
        for _ in 0..1_000 {
            lpf.process(&mut l, &mut r);
            assert!(l.is_finite() && r.is_finite());
        }
    }
}
