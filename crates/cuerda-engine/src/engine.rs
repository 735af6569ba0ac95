//! The feedback synthesis engine.
//!
//! A stereo pair of string resonators sits inside a feedback loop with a
//! saturator, a lowpass/highpass pair, and a reverb tank. A broadband noise
//! floor keeps the loop seeded so raising the feedback gain always finds
//! something to regenerate. An echo delay taps the loop output on the way
//! out.

use cuerda_arena::Arena;
use cuerda_core::{
    FixedDelayLine, WhiteNoise, db_to_linear, midi_to_hz, onepole_coef,
};

use crate::echo::EchoDelay;
use crate::filter::{FilterMode, StereoFilter};
use crate::resonator::StringResonator;
use crate::reverb::StereoReverb;
use crate::saturate::Saturator;

/// Feedback-body delay capacity in samples (250 ms at 48 kHz).
pub const MAX_FEEDBACK_DELAY: usize = 12_000;

/// Echo delay capacity in samples (5 s at 48 kHz).
pub const MAX_ECHO_DELAY: usize = 48_000 * 5;

/// Noise floor injected into the loop, dBFS.
const NOISE_FLOOR_DBFS: f32 = -90.0;

/// Offset of the right channel's feedback read position in samples.
const CHANNEL_SKEW: f32 = 4.0;

/// Bytes of arena storage sufficient for one engine at any sample rate up
/// to 192 kHz (the reverb tunings scale with rate; the echo buffers do
/// not). Useful for sizing a shared arena.
pub const ARENA_BUDGET: usize = (2 * MAX_ECHO_DELAY + 160_000) * 4;

/// Stereo feedback string synthesizer.
///
/// Construction places the echo and reverb buffers in the supplied arena;
/// everything else lives inline. The audio path never allocates.
///
/// # Example
///
/// ```rust
/// use cuerda_arena::Arena;
/// use cuerda_engine::{ARENA_BUDGET, FeedbackEngine};
///
/// let arena = Arena::with_capacity(ARENA_BUDGET);
/// let mut engine = FeedbackEngine::new(48_000.0, &arena);
/// engine.set_feedback_gain(-24.0);
/// let (l, r) = engine.process(0.0);
/// ```
pub struct FeedbackEngine<'a> {
    sample_rate: f32,

    noise: WhiteNoise,
    strings: [StringResonator; 2],
    fb_delays: [FixedDelayLine<MAX_FEEDBACK_DELAY>; 2],
    saturators: [Saturator; 2],
    fb_lpf: StereoFilter,
    fb_hpf: StereoFilter,
    reverb: StereoReverb<'a>,
    echoes: [EchoDelay<'a>; 2],

    fb_delay_samples: f32,
    fb_delay_target: f32,
    fb_delay_coef: f32,

    fb_gain: f32,
    echo_send: f32,
    reverb_mix: f32,
    output_level: f32,
}

impl<'a> FeedbackEngine<'a> {
    /// Build the engine, carving long delay storage out of `arena`.
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot hold the echo and reverb buffers
    /// ([`ARENA_BUDGET`] is always enough).
    pub fn new(sample_rate: f32, arena: &'a Arena) -> Self {
        let mut noise = WhiteNoise::new();
        noise.set_amp(db_to_linear(NOISE_FLOOR_DBFS));

        let strings = [sample_rate, sample_rate].map(|sr| {
            let mut s = StringResonator::new(sr);
            s.set_brightness(0.98);
            s.set_freq(midi_to_hz(40.0));
            s.set_damping(0.4);
            s
        });

        let echoes = [(), ()].map(|()| {
            let mut echo = EchoDelay::new(sample_rate, arena.alloc_samples(MAX_ECHO_DELAY));
            echo.set_delay_time(5.0, true);
            echo.set_feedback(0.5);
            echo.set_lag_time(0.5);
            echo
        });

        let mut reverb = StereoReverb::new(sample_rate, arena);
        reverb.set_feedback(0.85);
        reverb.set_lp_freq(12_000.0);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            arena_used = arena.used(),
            arena_capacity = arena.capacity(),
            "feedback engine initialized"
        );

        Self {
            sample_rate,
            noise,
            strings,
            fb_delays: [FixedDelayLine::new(), FixedDelayLine::new()],
            saturators: [Saturator::new(0.4); 2],
            fb_lpf: StereoFilter::new(sample_rate, FilterMode::Lowpass, 18_000.0, 0.9),
            fb_hpf: StereoFilter::new(sample_rate, FilterMode::Highpass, 60.0, 0.9),
            reverb,
            echoes,
            fb_delay_samples: 1.0,
            fb_delay_target: 1.0,
            fb_delay_coef: onepole_coef(0.2, sample_rate),
            fb_gain: 0.0,
            echo_send: 0.0,
            reverb_mix: 0.0,
            output_level: 0.5,
        }
    }

    /// Tune both strings to a MIDI note number (fractional allowed).
    pub fn set_string_pitch(&mut self, note: f32) {
        let freq = midi_to_hz(note);
        for string in &mut self.strings {
            string.set_freq(freq);
        }
    }

    /// Set loop regeneration in dBFS; 0 dB holds, positive grows.
    pub fn set_feedback_gain(&mut self, gain_db: f32) {
        self.fb_gain = db_to_linear(gain_db);
    }

    /// Set the feedback-body delay in seconds.
    ///
    /// The length glides toward the target at audio rate (0.2 s lag), so
    /// moving the control bends pitch instead of clicking.
    pub fn set_feedback_delay(&mut self, delay_s: f32) {
        self.fb_delay_target =
            (delay_s * self.sample_rate).clamp(1.0, (MAX_FEEDBACK_DELAY - 1) as f32);
    }

    /// Set the loop lowpass cutoff in Hz.
    pub fn set_feedback_lpf_cutoff(&mut self, cutoff_hz: f32) {
        self.fb_lpf.set_cutoff(cutoff_hz);
    }

    /// Set the loop highpass cutoff in Hz.
    pub fn set_feedback_hpf_cutoff(&mut self, cutoff_hz: f32) {
        self.fb_hpf.set_cutoff(cutoff_hz);
    }

    /// Set the echo delay time in seconds (lagged, tape-style).
    pub fn set_echo_time(&mut self, seconds: f32) {
        for echo in &mut self.echoes {
            echo.set_delay_time(seconds, false);
        }
    }

    /// Set echo regeneration in [0, 1.5].
    pub fn set_echo_feedback(&mut self, feedback: f32) {
        for echo in &mut self.echoes {
            echo.set_feedback(feedback);
        }
    }

    /// Set how much loop output feeds the echo.
    pub fn set_echo_send(&mut self, send: f32) {
        self.echo_send = send;
    }

    /// Set the dry/reverb crossfade in [0, 1].
    pub fn set_reverb_mix(&mut self, mix: f32) {
        self.reverb_mix = mix.clamp(0.0, 1.0);
    }

    /// Set the reverb tank decay.
    pub fn set_reverb_decay(&mut self, decay: f32) {
        self.reverb.set_feedback(decay);
    }

    /// Set the final output level.
    pub fn set_output_level(&mut self, level: f32) {
        self.output_level = level;
    }

    /// Run one sample of the full feedback topology.
    pub fn process(&mut self, input: f32) -> (f32, f32) {
        self.fb_delay_samples +=
            (self.fb_delay_target - self.fb_delay_samples) * self.fb_delay_coef;

        let noise = self.noise.process();

        // Feedback reads are skewed a few samples apart so the two loops
        // never phase-lock exactly.
        let in_l = self.fb_delays[0].read(self.fb_delay_samples) + noise + input;
        let in_r = self.fb_delays[1].read((self.fb_delay_samples - CHANNEL_SKEW).max(1.0))
            + noise
            + input;

        let mut l = self.strings[0].process(in_l);
        let mut r = self.strings[1].process(in_r);

        l = self.saturators[0].process(l);
        r = self.saturators[1].process(r);

        self.fb_lpf.process(&mut l, &mut r);
        self.fb_hpf.process(&mut l, &mut r);

        let (verb_l, verb_r) = self.reverb.process(l, r);
        l -= (l - verb_l) * self.reverb_mix;
        r -= (r - verb_r) * self.reverb_mix;

        self.fb_delays[0].write(l * self.fb_gain);
        self.fb_delays[1].write(r * self.fb_gain);

        let echo_l = self.echoes[0].process(l * self.echo_send);
        let echo_r = self.echoes[1].process(r * self.echo_send);

        l = 0.5 * (l + echo_l);
        r = 0.5 * (r + echo_r);

        (l * self.output_level, r * self.output_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_arena() -> Arena {
        Arena::with_capacity(ARENA_BUDGET)
    }

    #[test]
    fn silent_engine_outputs_noise_floor_only() {
        let arena = engine_arena();
        let mut engine = FeedbackEngine::new(48_000.0, &arena);
        engine.set_feedback_gain(-120.0);

        let mut peak = 0.0f32;
        for _ in 0..48_000 {
            let (l, r) = engine.process(0.0);
            peak = peak.max(l.abs().max(r.abs()));
        }
        // -90 dBFS noise through the resonator stays far below audibility.
        assert!(peak < 1e-2, "noise floor leaked: {peak}");
    }

    #[test]
    fn zero_feedback_gain_feeds_silence_into_loop() {
        let arena = engine_arena();
        let mut engine = FeedbackEngine::new(48_000.0, &arena);
        // -inf dB maps to a linear gain of exactly zero.
        engine.set_feedback_gain(f32::NEG_INFINITY);
        engine.set_string_pitch(40.0);

        // Kick the string hard, then let it ring out.
        engine.process(1.0);
        for _ in 0..48_000 {
            let (l, r) = engine.process(0.0);
            assert!(l.is_finite() && r.is_finite());
        }

        // Nothing recirculates, so once the string has decayed the only
        // energy left is the injected noise floor.
        let mut tail = 0.0f32;
        for _ in 0..48_000 {
            let (l, r) = engine.process(0.0);
            tail = tail.max(l.abs().max(r.abs()));
        }
        assert!(tail < 1e-2, "feedback path kept ringing: {tail}");
    }

    #[test]
    fn impulse_with_low_feedback_decays_bounded() {
        let arena = engine_arena();
        let mut engine = FeedbackEngine::new(48_000.0, &arena);
        engine.set_feedback_gain(-60.0);
        engine.set_string_pitch(40.0);

        let mut peak = 0.0f32;
        let (l0, r0) = engine.process(1.0);
        peak = peak.max(l0.abs().max(r0.abs()));
        for _ in 0..96_000 {
            let (l, r) = engine.process(0.0);
            assert!(l.is_finite() && r.is_finite());
            peak = peak.max(l.abs().max(r.abs()));
        }
        assert!(peak > 0.0);
        assert!(peak < 20.0 * 0.5, "unbounded output {peak}");

        let mut tail = 0.0f32;
        for _ in 0..4_800 {
            let (l, r) = engine.process(0.0);
            tail = tail.max(l.abs().max(r.abs()));
        }
        assert!(tail < peak, "tail {tail} never decayed from {peak}");
    }
}
