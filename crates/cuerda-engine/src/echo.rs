//! Tape-style echo with a lagged read head.
//!
//! The delay time does not jump when the control moves: the read position
//! slides toward its target through a one-pole lag, producing the pitch
//! warp of a tape machine changing speed. Feedback is allowed above unity
//! for deliberate runaway echo; the write path is soft-clipped so runaway
//! saturates instead of diverging.

use cuerda_core::{DelayLine, flush_denormal, onepole_coef, soft_clip};

/// Maximum echo feedback. Above 1.0 the echo self-oscillates by design.
const MAX_FEEDBACK: f32 = 1.5;

/// Single-channel echo delay over arena-placed storage.
pub struct EchoDelay<'a> {
    line: DelayLine<'a>,
    sample_rate: f32,
    delay_samples: f32,
    delay_target: f32,
    lag_coef: f32,
    feedback: f32,
}

impl<'a> EchoDelay<'a> {
    /// Wrap a backing buffer as an echo delay.
    ///
    /// The buffer length sets the maximum delay time. Defaults: delay
    /// pinned to the full buffer, feedback 0.5, lag 0.5 s.
    pub fn new(sample_rate: f32, buffer: &'a mut [f32]) -> Self {
        let max = (buffer.len() - 1) as f32;
        let mut echo = Self {
            line: DelayLine::new(buffer),
            sample_rate,
            delay_samples: max,
            delay_target: max,
            lag_coef: 1.0,
            feedback: 0.5,
        };
        echo.set_lag_time(0.5);
        echo
    }

    /// Set the delay time in seconds, clamped to the buffer length.
    ///
    /// `immediate` jumps the read head instead of sliding it.
    pub fn set_delay_time(&mut self, seconds: f32, immediate: bool) {
        let max = (self.line.capacity() - 1) as f32;
        self.delay_target = (seconds * self.sample_rate).clamp(1.0, max);
        if immediate {
            self.delay_samples = self.delay_target;
        }
    }

    /// Set how long the read head takes to glide to a new delay time.
    pub fn set_lag_time(&mut self, seconds: f32) {
        self.lag_coef = onepole_coef(seconds, self.sample_rate);
    }

    /// Set the regeneration amount in [0, 1.5].
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, MAX_FEEDBACK);
    }

    /// Process one sample, returning the wet (delayed) signal only.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.delay_samples += (self.delay_target - self.delay_samples) * self.lag_coef;

        let delayed = self.line.read(self.delay_samples);
        self.line
            .write(flush_denormal(soft_clip(input + delayed * self.feedback)));
        delayed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_returns_input_after_delay() {
        let mut buf = vec![0.0f32; 48_000];
        let mut echo = EchoDelay::new(48_000.0, &mut buf);
        echo.set_delay_time(0.01, true); // 480 samples
        echo.set_feedback(0.0);

        let mut first_hit = None;
        let _ = echo.process(1.0);
        for i in 1..1_000 {
            let out = echo.process(0.0);
            if out.abs() > 0.1 {
                first_hit = Some(i);
                break;
            }
        }
        let hit = first_hit.expect("echo never returned");
        assert!((hit as i64 - 480).unsigned_abs() <= 2, "echo at {hit}");
    }

    #[test]
    fn feedback_regenerates_repeats() {
        let mut buf = vec![0.0f32; 4_800];
        let mut echo = EchoDelay::new(48_000.0, &mut buf);
        echo.set_delay_time(0.001, true); // 48 samples
        echo.set_feedback(0.5);

        let _ = echo.process(1.0);
        let mut peaks = 0;
        let mut prev = 0.0f32;
        for _ in 0..1_000 {
            let out = echo.process(0.0).abs();
            if out > 0.05 && prev <= 0.05 {
                peaks += 1;
            }
            prev = out;
        }
        assert!(peaks >= 3, "only {peaks} repeats");
    }

    #[test]
    fn runaway_feedback_saturates_not_diverges() {
        let mut buf = vec![0.0f32; 480];
        let mut echo = EchoDelay::new(48_000.0, &mut buf);
        echo.set_delay_time(0.005, true);
        echo.set_feedback(1.5);

        let _ = echo.process(1.0);
        for _ in 0..100_000 {
            let out = echo.process(0.0);
            assert!(out.is_finite());
            assert!(out.abs() <= 1.0 + 1e-6, "runaway {out}");
        }
    }

    #[test]
    fn delay_time_glides_instead_of_jumping() {
        let mut buf = vec![0.0f32; 48_000];
        let mut echo = EchoDelay::new(48_000.0, &mut buf);
        echo.set_delay_time(0.1, true);
        echo.set_lag_time(0.5);
        echo.set_delay_time(0.5, false);

        // After a handful of samples the head has barely moved.
        for _ in 0..10 {
            let _ = echo.process(0.0);
        }
        assert!(echo.delay_samples < 0.1 * 48_000.0 + 100.0);
        assert!(echo.delay_samples > 0.1 * 48_000.0 - 1.0);
    }

    #[test]
    fn feedback_clamps_to_limit() {
        let mut buf = vec![0.0f32; 64];
        let mut echo = EchoDelay::new(48_000.0, &mut buf);
        echo.set_feedback(9.0);
        assert_eq!(echo.feedback, MAX_FEEDBACK);
        echo.set_feedback(-1.0);
        assert_eq!(echo.feedback, 0.0);
    }
}
