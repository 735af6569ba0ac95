//! Parameter registration and the block-rate control driver.

use cuerda_core::{Curve, tension};
use cuerda_engine::FeedbackEngine;
use cuerda_registry::ParameterRegistry;

use crate::frame::ControlFrame;

/// Tension exponent shaping the reverb decay knob. Negative bows the
/// response toward slow growth at the low end.
const REVERB_DECAY_TENSION: f32 = -3.0;

/// Identifier for each mappable engine parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineParam {
    /// String pitch as a MIDI note number.
    StringPitch,
    /// Loop regeneration in dBFS.
    FeedbackGain,
    /// Loop delay ("body") in seconds.
    FeedbackBody,
    /// Loop lowpass cutoff in Hz.
    FeedbackLpfCutoff,
    /// Loop highpass cutoff in Hz.
    FeedbackHpfCutoff,
    /// Dry/reverb crossfade.
    ReverbMix,
    /// Reverb tank decay.
    ReverbDecay,
    /// Echo send amount.
    EchoSend,
    /// Echo delay time in seconds.
    EchoTime,
    /// Echo regeneration.
    EchoFeedback,
    /// Final output level.
    OutputLevel,
}

/// Wires every engine parameter into a smoothed registry and drives it at
/// block rate.
pub struct ControlSurface<'a> {
    params: ParameterRegistry<EngineParam, FeedbackEngine<'a>>,
}

impl<'a> ControlSurface<'a> {
    /// Register the full parameter set at the given control (block) rate.
    pub fn new(control_rate: f32) -> Self {
        let mut params: ParameterRegistry<EngineParam, FeedbackEngine<'a>> =
            ParameterRegistry::new(control_rate);

        // String freq/pitch as note number
        params.register(
            EngineParam::StringPitch,
            40.0,
            16.0,
            72.0,
            Curve::Linear,
            0.2,
            |e, v| e.set_string_pitch(v),
        );

        // Feedback gain in dBFS
        params.register(
            EngineParam::FeedbackGain,
            -60.0,
            -60.0,
            12.0,
            Curve::Linear,
            0.05,
            |e, v| e.set_feedback_gain(v),
        );

        // Feedback body/delay in seconds
        params.register(
            EngineParam::FeedbackBody,
            0.001,
            0.001,
            0.1,
            Curve::Exponential,
            1.0,
            |e, v| e.set_feedback_delay(v),
        );

        // Feedback filter cutoffs in Hz
        params.register(
            EngineParam::FeedbackLpfCutoff,
            18_000.0,
            100.0,
            18_000.0,
            Curve::Logarithmic,
            0.05,
            |e, v| e.set_feedback_lpf_cutoff(v),
        );
        params.register(
            EngineParam::FeedbackHpfCutoff,
            250.0,
            10.0,
            4_000.0,
            Curve::Logarithmic,
            0.05,
            |e, v| e.set_feedback_hpf_cutoff(v),
        );

        params.register(
            EngineParam::ReverbMix,
            0.0,
            0.0,
            1.0,
            Curve::Linear,
            0.05,
            |e, v| e.set_reverb_mix(v),
        );

        // Reverb decay; the knob input is tension-shaped in update()
        params.register(
            EngineParam::ReverbDecay,
            0.2,
            0.2,
            1.0,
            Curve::Linear,
            0.05,
            |e, v| e.set_reverb_decay(v),
        );

        params.register(
            EngineParam::EchoSend,
            0.0,
            0.0,
            1.0,
            Curve::Exponential,
            0.05,
            |e, v| e.set_echo_send(v),
        );

        params.register(
            EngineParam::EchoTime,
            0.5,
            0.05,
            5.0,
            Curve::Exponential,
            0.1,
            |e, v| e.set_echo_time(v),
        );

        params.register(
            EngineParam::EchoFeedback,
            0.0,
            0.0,
            1.5,
            Curve::Linear,
            0.05,
            |e, v| e.set_echo_feedback(v),
        );

        params.register(
            EngineParam::OutputLevel,
            0.5,
            0.0,
            1.0,
            Curve::Exponential,
            0.05,
            |e, v| e.set_output_level(v),
        );

        Self { params }
    }

    /// Feed one frame of raw control readings into the registry targets.
    pub fn update(&mut self, frame: &ControlFrame) {
        let p = &mut self.params;
        p.update_normalized(EngineParam::StringPitch, 1.0 - frame.pitch);
        p.update_normalized(EngineParam::FeedbackGain, 1.0 - frame.feedback_gain);
        p.update_normalized(EngineParam::FeedbackBody, 1.0 - frame.feedback_body);
        p.update_normalized(EngineParam::FeedbackLpfCutoff, 1.0 - frame.lpf_cutoff);
        p.update_normalized(EngineParam::FeedbackHpfCutoff, 1.0 - frame.hpf_cutoff);
        p.update_normalized(EngineParam::ReverbMix, 1.0 - frame.reverb_mix);
        // Anti-exponential shaping for the decay knob's useful range
        p.update_normalized(
            EngineParam::ReverbDecay,
            tension(1.0 - frame.reverb_decay, REVERB_DECAY_TENSION),
        );
        p.update_normalized(EngineParam::EchoSend, 1.0 - frame.echo_send);
        // The toggle halves the echo time instantly for a doppler warp
        let echo_scale = if frame.echo_half_time { 0.5 } else { 1.0 };
        p.update_normalized(EngineParam::EchoTime, (1.0 - frame.echo_time) * echo_scale);
        p.update_normalized(EngineParam::EchoFeedback, 1.0 - frame.echo_feedback);
        p.update_normalized(EngineParam::OutputLevel, 1.0 - frame.output_volume);
    }

    /// Advance smoothing one control tick and push values into the engine.
    pub fn process(&mut self, engine: &mut FeedbackEngine<'a>) {
        self.params.process(engine);
    }

    /// Drive one audio block: one control update and smoothing tick, then
    /// per-sample engine processing.
    ///
    /// # Panics
    ///
    /// Panics if the output slices are shorter than `input`.
    pub fn process_block(
        &mut self,
        engine: &mut FeedbackEngine<'a>,
        frame: &ControlFrame,
        input: &[f32],
        out_l: &mut [f32],
        out_r: &mut [f32],
    ) {
        assert!(out_l.len() >= input.len() && out_r.len() >= input.len());
        self.update(frame);
        self.process(engine);
        for (i, &sample) in input.iter().enumerate() {
            let (l, r) = engine.process(sample);
            out_l[i] = l;
            out_r[i] = r;
        }
    }
}
