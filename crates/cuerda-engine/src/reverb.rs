//! Stereo reverb tank for the feedback loop tail.
//!
//! Freeverb topology per channel: 8 parallel damped combs into 4 series
//! allpasses, with the right channel's delay lengths offset by a fixed
//! stereo spread. All delay storage is placed in the arena at construction;
//! the audio path allocates nothing.

use cuerda_arena::Arena;
use cuerda_core::{AllpassFilter, CombFilter};

/// Freeverb comb delay times at the 44.1 kHz reference rate.
/// Mutually prime to avoid coincident resonances.
const COMB_TUNINGS_44K: [usize; 8] = [1116, 1188, 1277, 1356, 1422, 1491, 1557, 1617];

/// Freeverb allpass delay times at the 44.1 kHz reference rate.
const ALLPASS_TUNINGS_44K: [usize; 4] = [556, 441, 341, 225];

/// Right-channel delay offset in reference-rate samples.
const STEREO_SPREAD: usize = 23;

/// Reference sample rate for the tuning constants.
const REFERENCE_RATE: f32 = 44100.0;

/// Maximum comb feedback; the tank must stay a decaying system.
const MAX_FEEDBACK: f32 = 0.98;

fn scale_to_rate(samples: usize, target_rate: f32) -> usize {
    ((samples as f32 * target_rate / REFERENCE_RATE) as usize).max(1)
}

struct ReverbChannel<'a> {
    combs: [CombFilter<'a>; 8],
    allpasses: [AllpassFilter<'a>; 4],
}

impl<'a> ReverbChannel<'a> {
    fn new(sample_rate: f32, arena: &'a Arena, spread: usize) -> Self {
        let combs = COMB_TUNINGS_44K.map(|t| {
            let len = scale_to_rate(t + spread, sample_rate);
            CombFilter::new(arena.alloc_samples(len))
        });
        let allpasses = ALLPASS_TUNINGS_44K.map(|t| {
            let len = scale_to_rate(t + spread, sample_rate);
            let mut ap = AllpassFilter::new(arena.alloc_samples(len));
            ap.set_feedback(0.5);
            ap
        });
        Self { combs, allpasses }
    }

    #[inline]
    fn process(&mut self, input: f32) -> f32 {
        let mut sum = 0.0;
        for comb in &mut self.combs {
            sum += comb.process(input);
        }
        sum *= 0.125;
        for allpass in &mut self.allpasses {
            sum = allpass.process(sum);
        }
        sum
    }
}

/// Stereo Freeverb tank with arena-placed delay storage.
pub struct StereoReverb<'a> {
    left: ReverbChannel<'a>,
    right: ReverbChannel<'a>,
    sample_rate: f32,
}

impl<'a> StereoReverb<'a> {
    /// Build the tank, carving all delay buffers out of `arena`.
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot hold the reverb storage.
    pub fn new(sample_rate: f32, arena: &'a Arena) -> Self {
        Self {
            left: ReverbChannel::new(sample_rate, arena, 0),
            right: ReverbChannel::new(sample_rate, arena, STEREO_SPREAD),
            sample_rate,
        }
    }

    /// Set the tank decay via comb feedback, clamped to [0, 0.98].
    pub fn set_feedback(&mut self, feedback: f32) {
        let fb = feedback.clamp(0.0, MAX_FEEDBACK);
        for comb in self.left.combs.iter_mut().chain(self.right.combs.iter_mut()) {
            comb.set_feedback(fb);
        }
    }

    /// Set the in-tank lowpass cutoff; higher cutoff means less damping.
    pub fn set_lp_freq(&mut self, freq_hz: f32) {
        let damp = (1.0 - freq_hz / (self.sample_rate * 0.5)).clamp(0.0, 1.0);
        for comb in self.left.combs.iter_mut().chain(self.right.combs.iter_mut()) {
            comb.set_damp(damp);
        }
    }

    /// Process one stereo frame, returning the fully wet tail.
    #[inline]
    pub fn process(&mut self, l: f32, r: f32) -> (f32, f32) {
        let mono = 0.5 * (l + r);
        (self.left.process(mono), self.right.process(mono))
    }
}
