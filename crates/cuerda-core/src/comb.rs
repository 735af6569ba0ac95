//! Feedback comb filter with damping, for reverb algorithms.
//!
//! The classic Freeverb comb: a delay line whose output is fed back through
//! a one-pole lowpass. Storage is borrowed so a reverb can place all of its
//! comb buffers in one persistent memory region at initialization.

use crate::delay::DelayLine;
use crate::math::flush_denormal;

/// Feedback comb filter with damped (lowpass-filtered) feedback.
///
/// The delay length equals the backing slice length; pick mutually prime
/// lengths across a comb bank to avoid coincident resonances.
#[derive(Debug)]
pub struct CombFilter<'a> {
    delay: DelayLine<'a>,
    feedback: f32,
    damp1: f32,
    damp2: f32,
    filterstore: f32,
}

impl<'a> CombFilter<'a> {
    /// Create a comb filter over the given backing storage.
    ///
    /// # Panics
    ///
    /// Panics if the slice is empty.
    pub fn new(buffer: &'a mut [f32]) -> Self {
        Self {
            delay: DelayLine::new(buffer),
            feedback: 0.5,
            damp1: 0.5,
            damp2: 0.5,
            filterstore: 0.0,
        }
    }

    /// Set the feedback amount, clamped to [0, 0.99].
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    /// Set the damping amount (0 = bright, 1 = dark), clamped to [0, 1].
    #[inline]
    pub fn set_damp(&mut self, damp: f32) {
        self.damp1 = damp.clamp(0.0, 1.0);
        self.damp2 = 1.0 - self.damp1;
    }

    /// Process a single sample.
    ///
    /// Output is the delayed signal; the write-back is the input plus the
    /// lowpass-damped feedback.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delay_samples = (self.delay.capacity() - 1) as f32;
        let output = self.delay.read(delay_samples);

        // filterstore = output * (1 - damp) + filterstore * damp
        self.filterstore = flush_denormal(output * self.damp2 + self.filterstore * self.damp1);

        self.delay.write(input + self.filterstore * self.feedback);

        output
    }

    /// Clear the comb filter state.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.filterstore = 0.0;
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
