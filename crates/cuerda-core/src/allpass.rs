//! Schroeder allpass filter for reverb diffusion.
//!
//! Passes all frequencies at equal gain while smearing phase, turning the
//! discrete echoes from a comb bank into a diffuse wash. Storage is
//! borrowed, like [`CombFilter`](crate::comb::CombFilter), so a reverb can
//! place its buffers in a persistent memory region at initialization.

use crate::delay::DelayLine;
use crate::math::flush_denormal;

/// Schroeder allpass filter.
///
/// ```text
/// output = -input + delayed
/// delay_input = input + delayed * feedback
/// ```
#[derive(Debug)]
pub struct AllpassFilter<'a> {
    delay: DelayLine<'a>,
    feedback: f32,
}

impl<'a> AllpassFilter<'a> {
    /// Create an allpass filter over the given backing storage.
    ///
    /// # Panics
    ///
    /// Panics if the slice is empty.
    pub fn new(buffer: &'a mut [f32]) -> Self {
        Self {
            delay: DelayLine::new(buffer),
            feedback: 0.5,
        }
    }

    /// Set the feedback coefficient, clamped to (-0.99, 0.99).
    ///
    /// Around 0.5 for reverb diffusion.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(-0.99, 0.99);
    }

    /// Process a single sample through the allpass structure.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delay_samples = (self.delay.capacity() - 1) as f32;
        let delayed = self.delay.read(delay_samples);

        let output = -input + delayed;
        self.delay
            .write(flush_denormal(input + delayed * self.feedback));

        output
    }

    /// Clear the allpass filter state.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Delay length in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
