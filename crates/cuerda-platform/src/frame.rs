//! Raw control input snapshot.

/// One snapshot of raw normalized control readings in [0, 1].
///
/// Values carry hardware polarity: the wiring inverts the travel, so a
/// reading of 1.0 is the knob's zero position. [`ControlSurface`]
/// re-inverts during mapping; callers pass readings through untouched.
///
/// [`ControlSurface`]: crate::ControlSurface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlFrame {
    /// String pitch knob.
    pub pitch: f32,
    /// Feedback gain knob.
    pub feedback_gain: f32,
    /// Feedback body (loop delay) knob.
    pub feedback_body: f32,
    /// Feedback lowpass cutoff knob.
    pub lpf_cutoff: f32,
    /// Feedback highpass cutoff knob.
    pub hpf_cutoff: f32,
    /// Reverb mix knob.
    pub reverb_mix: f32,
    /// Reverb decay knob.
    pub reverb_decay: f32,
    /// Echo send knob.
    pub echo_send: f32,
    /// Echo time knob.
    pub echo_time: f32,
    /// Echo feedback knob.
    pub echo_feedback: f32,
    /// Output volume knob.
    pub output_volume: f32,
    /// Toggle that instantly halves the echo time for a doppler warp.
    pub echo_half_time: bool,
}

impl Default for ControlFrame {
    /// All knobs at their zero position (raw 1.0 under inverted polarity).
    fn default() -> Self {
        Self {
            pitch: 1.0,
            feedback_gain: 1.0,
            feedback_body: 1.0,
            lpf_cutoff: 1.0,
            hpf_cutoff: 1.0,
            reverb_mix: 1.0,
            reverb_decay: 1.0,
            echo_send: 1.0,
            echo_time: 1.0,
            echo_feedback: 1.0,
            output_volume: 1.0,
            echo_half_time: false,
        }
    }
}
