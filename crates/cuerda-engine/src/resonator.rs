//! Karplus-Strong string resonator.
//!
//! A plucked-string physical model turned into a resonator: the excitation
//! input is summed into a fractional delay loop whose length sets the pitch,
//! with a fixed lowpass and a DC blocker inside the loop. The hard clamp on
//! the loop sum keeps the surrounding feedback topology bounded no matter
//! how hot the excitation gets.
//!
//! Below roughly 11.7 Hz the delay line is too short for the requested
//! period, so the model runs at its lowest genuine pitch and upsamples the
//! output on the fly with a linear interpolator. Corner case, kept cheap.

use cuerda_core::{DcBlocker, FixedDelayLine, Interpolation, OnePole, lerp};

/// String delay capacity in samples.
const DELAY_LINE_SIZE: usize = 8192;

/// Loop sum clamp. Keeps runaway feedback bounded without shaping the
/// signal below the threshold.
const LOOP_CLAMP: f32 = 20.0;

/// Fixed in-loop attenuation applied each cycle.
const LOOP_ATTENUATION: f32 = 0.8;

/// Fixed cutoff of the in-loop damping lowpass, Hz.
const DAMPING_CUTOFF_HZ: f32 = 8000.0;

/// Karplus-Strong resonator with excitation input.
pub struct StringResonator {
    sample_rate: f32,
    /// Normalized frequency (cycles per sample), clamped to [0, 0.25].
    frequency: f32,
    string: FixedDelayLine<DELAY_LINE_SIZE>,
    damping_filter: OnePole,
    dc_blocker: DcBlocker,
    /// Last two genuine loop outputs, newest first.
    out_samples: [f32; 2],
    src_phase: f32,
    brightness: f32,
    damping: f32,
}

impl StringResonator {
    /// Create a resonator tuned to 440 Hz.
    pub fn new(sample_rate: f32) -> Self {
        let mut string = FixedDelayLine::new();
        string.set_interpolation(Interpolation::Hermite);
        let mut resonator = Self {
            sample_rate,
            frequency: 0.0,
            string,
            damping_filter: OnePole::new(sample_rate, DAMPING_CUTOFF_HZ),
            dc_blocker: DcBlocker::new(sample_rate),
            out_samples: [0.0; 2],
            src_phase: 0.0,
            brightness: 0.5,
            damping: 0.8,
        };
        resonator.set_freq(440.0);
        resonator
    }

    /// Set the string pitch in Hz.
    pub fn set_freq(&mut self, freq_hz: f32) {
        self.frequency = (freq_hz / self.sample_rate).clamp(0.0, 0.25);
    }

    /// Set string brightness in [0, 1].
    ///
    /// Stored but not currently wired into the loop filter; the loop runs
    /// at a fixed damping cutoff.
    pub fn set_brightness(&mut self, brightness: f32) {
        self.brightness = brightness.clamp(0.0, 1.0);
    }

    /// Set string damping in [0, 1]. See [`set_brightness`](Self::set_brightness).
    pub fn set_damping(&mut self, damping: f32) {
        self.damping = damping.clamp(0.0, 1.0);
    }

    /// Clear all loop state, keeping the current tuning.
    pub fn reset(&mut self) {
        self.string.clear();
        self.damping_filter.reset();
        self.dc_blocker.reset();
        self.out_samples = [0.0; 2];
        self.src_phase = 0.0;
    }

    /// Run one sample of the string loop with `excitation` summed in.
    pub fn process(&mut self, excitation: f32) -> f32 {
        let delay = (1.0 / self.frequency).clamp(4.0, DELAY_LINE_SIZE as f32 - 4.0);

        // When the requested period fits the line, the interpolator must
        // not get in the way: force a genuine cycle every sample.
        let mut src_ratio = delay * self.frequency;
        if src_ratio >= 0.9999 {
            self.src_phase = 1.0;
            src_ratio = 1.0;
        }

        self.src_phase += src_ratio;
        if self.src_phase > 1.0 {
            self.src_phase -= 1.0;

            let mut s = self.string.read(delay);
            s += excitation;
            s = s.clamp(-LOOP_CLAMP, LOOP_CLAMP);

            s = self.dc_blocker.process(s);
            s *= LOOP_ATTENUATION;

            s = self.damping_filter.process(s);
            self.string.write(s);

            self.out_samples[1] = self.out_samples[0];
            self.out_samples[0] = s;
        }

        // Crossfade between the two retained genuine samples; collapses to
        // the newest one when src_ratio is 1.
        lerp(self.out_samples[1], self.out_samples[0], self.src_phase)
    }
}
