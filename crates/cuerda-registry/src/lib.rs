//! Cuerda Registry - smoothed parameter registration and dispatch.
//!
//! Control surfaces deliver raw knob positions at the control rate; the audio
//! engine wants clamped, curved, zipper-free values applied through typed
//! setters. [`ParameterRegistry`] sits between the two: each registered
//! parameter owns a [`SmoothedValue`], a range, a [`Curve`], and a handler
//! closure that pushes the smoothed value into the processing target.
//!
//! # Example
//!
//! ```rust
//! use cuerda_core::Curve;
//! use cuerda_registry::ParameterRegistry;
//!
//! #[derive(Clone, Copy, PartialEq, Eq)]
//! enum Param { Volume }
//!
//! struct Amp { gain: f32 }
//!
//! let mut registry: ParameterRegistry<Param, Amp> = ParameterRegistry::new(1_000.0);
//! registry.register(Param::Volume, 0.5, 0.0, 1.0, Curve::Linear, 0.0, |amp, v| {
//!     amp.gain = v;
//! });
//!
//! let mut amp = Amp { gain: 0.0 };
//! registry.update(Param::Volume, 0.8);
//! registry.process(&mut amp);
//! assert_eq!(amp.gain, 0.8);
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! cuerda-registry = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use cuerda_core::{Curve, SmoothedValue, onepole_coef};

/// Handler invoked with the smoothed parameter value on every control tick.
pub type ParamHandler<Target> = Box<dyn FnMut(&mut Target, f32) + Send>;

struct Slot<Target> {
    value: SmoothedValue,
    min: f32,
    max: f32,
    curve: Curve,
    handler: ParamHandler<Target>,
}

/// Registry of smoothed, range-mapped parameters keyed by `Id`.
///
/// Parameters are stored in registration order and found by linear scan;
/// parameter counts are small enough that a map buys nothing.
/// Updates against an unknown `Id` are silently dropped, so a control
/// surface can always send its full frame regardless of what the target
/// registered.
pub struct ParameterRegistry<Id, Target> {
    control_rate: f32,
    slots: Vec<(Id, Slot<Target>)>,
}

impl<Id: PartialEq + Copy, Target> ParameterRegistry<Id, Target> {
    /// Create an empty registry ticking at `control_rate` Hz.
    ///
    /// The control rate fixes the smoothing coefficient per parameter, so it
    /// must match the rate at which [`process`](Self::process) is called.
    #[must_use]
    pub fn new(control_rate: f32) -> Self {
        Self {
            control_rate,
            slots: Vec::new(),
        }
    }

    /// Register a parameter with its range, response curve, smoothing time,
    /// and handler.
    ///
    /// `smooth_time_s` is the -60 dB settling time; zero snaps instantly.
    /// Re-registering an existing `id` is ignored and the first registration
    /// wins. Returns whether the parameter was added.
    pub fn register(
        &mut self,
        id: Id,
        initial: f32,
        min: f32,
        max: f32,
        curve: Curve,
        smooth_time_s: f32,
        handler: impl FnMut(&mut Target, f32) + Send + 'static,
    ) -> bool {
        if self.slot(id).is_some() {
            return false;
        }
        let coeff = onepole_coef(smooth_time_s, self.control_rate);
        self.slots.push((
            id,
            Slot {
                value: SmoothedValue::new(initial.clamp(min, max), coeff),
                min,
                max,
                curve,
                handler: Box::new(handler),
            },
        ));
        true
    }

    /// Set a parameter target in engineering units, clamped to its range.
    pub fn update(&mut self, id: Id, value: f32) {
        self.update_inner(id, value, false);
    }

    /// Like [`update`](Self::update) but bypasses smoothing for the jump.
    pub fn update_immediate(&mut self, id: Id, value: f32) {
        self.update_inner(id, value, true);
    }

    /// Set a parameter target from normalized [0, 1] input through its
    /// registered response curve.
    pub fn update_normalized(&mut self, id: Id, norm: f32) {
        self.update_normalized_inner(id, norm, false);
    }

    /// Like [`update_normalized`](Self::update_normalized) but bypasses
    /// smoothing for the jump.
    pub fn update_normalized_immediate(&mut self, id: Id, norm: f32) {
        self.update_normalized_inner(id, norm, true);
    }

    /// Advance every parameter one control tick and invoke its handler with
    /// the smoothed value.
    pub fn process(&mut self, target: &mut Target) {
        for (_, slot) in &mut self.slots {
            let v = slot.value.advance();
            (slot.handler)(target, v);
        }
    }

    /// The current (smoothed) value of a parameter, if registered.
    #[must_use]
    pub fn value(&self, id: Id) -> Option<f32> {
        self.slot(id).map(|s| s.value.value())
    }

    /// The pending target of a parameter, if registered.
    #[must_use]
    pub fn target(&self, id: Id) -> Option<f32> {
        self.slot(id).map(|s| s.value.target())
    }

    /// Number of registered parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no parameters are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn update_inner(&mut self, id: Id, value: f32, immediate: bool) {
        if let Some(slot) = self.slot_mut(id) {
            slot.value.set(value.clamp(slot.min, slot.max), immediate);
        }
    }

    fn update_normalized_inner(&mut self, id: Id, norm: f32, immediate: bool) {
        if let Some(slot) = self.slot_mut(id) {
            let mapped = slot.curve.map(norm.clamp(0.0, 1.0), slot.min, slot.max);
            slot.value.set(mapped, immediate);
        }
    }

    fn slot(&self, id: Id) -> Option<&Slot<Target>> {
        self.slots.iter().find(|(k, _)| *k == id).map(|(_, s)| s)
    }

    fn slot_mut(&mut self, id: Id) -> Option<&mut Slot<Target>> {
        self.slots
            .iter_mut()
            .find(|(k, _)| *k == id)
            .map(|(_, s)| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    enum Param {
        Cutoff,
        Gain,
    }

    #[derive(Default)]
    struct Sink {
        cutoff: f32,
        gain: f32,
    }

    fn registry() -> ParameterRegistry<Param, Sink> {
        let mut r: ParameterRegistry<Param, Sink> = ParameterRegistry::new(1_000.0);
        r.register(
            Param::Cutoff,
            1_000.0,
            100.0,
            18_000.0,
            Curve::Logarithmic,
            0.0,
            |s, v| s.cutoff = v,
        );
        r.register(Param::Gain, 0.5, 0.0, 1.0, Curve::Linear, 0.0, |s, v| {
            s.gain = v;
        });
        r
    }

    #[test]
    fn first_process_applies_initial_values() {
        let mut r = registry();
        let mut sink = Sink::default();
        r.process(&mut sink);
        assert_eq!(sink.cutoff, 1_000.0);
        assert_eq!(sink.gain, 0.5);
    }

    #[test]
    fn update_clamps_to_range() {
        let mut r = registry();
        let mut sink = Sink::default();
        r.update(Param::Gain, 4.0);
        r.process(&mut sink);
        assert_eq!(sink.gain, 1.0);
        r.update(Param::Gain, -2.0);
        r.process(&mut sink);
        assert_eq!(sink.gain, 0.0);
    }

    #[test]
    fn update_normalized_maps_through_curve() {
        let mut r = registry();
        let mut sink = Sink::default();
        r.update_normalized(Param::Cutoff, 0.5);
        r.process(&mut sink);
        // Log curve midpoint is the geometric mean of the range.
        let expected = (100.0f32 * 18_000.0).sqrt();
        assert!((sink.cutoff - expected).abs() < 2.0, "got {}", sink.cutoff);
    }

    #[test]
    fn update_normalized_clamps_input() {
        let mut r = registry();
        let mut sink = Sink::default();
        r.update_normalized(Param::Gain, 3.5);
        r.process(&mut sink);
        assert_eq!(sink.gain, 1.0);
    }

    #[test]
    fn unknown_id_is_a_no_op() {
        let mut r: ParameterRegistry<u32, Sink> = ParameterRegistry::new(1_000.0);
        r.register(1, 0.0, 0.0, 1.0, Curve::Linear, 0.0, |s, v| s.gain = v);
        r.update(99, 0.7);
        r.update_normalized(99, 0.7);
        let mut sink = Sink::default();
        r.process(&mut sink);
        assert_eq!(sink.gain, 0.0);
    }

    #[test]
    fn duplicate_registration_keeps_first() {
        let mut r: ParameterRegistry<u32, Sink> = ParameterRegistry::new(1_000.0);
        assert!(r.register(1, 0.25, 0.0, 1.0, Curve::Linear, 0.0, |s, v| {
            s.gain = v;
        }));
        assert!(!r.register(1, 0.75, 0.0, 1.0, Curve::Linear, 0.0, |s, v| {
            s.cutoff = v;
        }));
        assert_eq!(r.len(), 1);
        let mut sink = Sink::default();
        r.process(&mut sink);
        assert_eq!(sink.gain, 0.25);
        assert_eq!(sink.cutoff, 0.0);
    }

    #[test]
    fn smoothing_converges_on_target() {
        let mut r: ParameterRegistry<u32, Sink> = ParameterRegistry::new(1_000.0);
        r.register(1, 0.0, 0.0, 1.0, Curve::Linear, 0.05, |s, v| s.gain = v);
        let mut sink = Sink::default();
        r.process(&mut sink);
        assert_eq!(sink.gain, 0.0);

        r.update(1, 1.0);
        r.process(&mut sink);
        let first = sink.gain;
        assert!(first > 0.0 && first < 1.0);
        for _ in 0..1_000 {
            r.process(&mut sink);
        }
        assert!((sink.gain - 1.0).abs() < 1e-3);
    }

    #[test]
    fn update_immediate_skips_smoothing() {
        let mut r: ParameterRegistry<u32, Sink> = ParameterRegistry::new(1_000.0);
        r.register(1, 0.0, 0.0, 1.0, Curve::Linear, 0.5, |s, v| s.gain = v);
        let mut sink = Sink::default();
        r.process(&mut sink);
        r.update_immediate(1, 1.0);
        r.process(&mut sink);
        assert_eq!(sink.gain, 1.0);
    }

    #[test]
    fn update_normalized_immediate_skips_smoothing() {
        let mut r: ParameterRegistry<u32, Sink> = ParameterRegistry::new(1_000.0);
        r.register(1, 100.0, 100.0, 18_000.0, Curve::Logarithmic, 0.5, |s, v| {
            s.cutoff = v;
        });
        let mut sink = Sink::default();
        r.process(&mut sink);
        assert_eq!(sink.cutoff, 100.0);
        r.update_normalized_immediate(1, 1.0);
        r.process(&mut sink);
        // The curved target lands in one tick despite the long smooth time.
        assert!((sink.cutoff - 18_000.0).abs() < 1.0, "got {}", sink.cutoff);
    }

    #[test]
    fn value_and_target_report_state() {
        let mut r = registry();
        assert_eq!(r.value(Param::Gain), Some(0.5));
        r.update(Param::Gain, 0.9);
        assert_eq!(r.target(Param::Gain), Some(0.9));
        assert_eq!(r.value(Param::Cutoff), Some(1_000.0));
        assert_eq!(r.value(Param::Gain), Some(0.5));
    }
}
