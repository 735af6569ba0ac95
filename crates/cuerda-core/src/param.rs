//! Smoothed control values for zipper-free parameter changes.
//!
//! Control input arrives in coarse steps (once per block, quantized ADC
//! reads); applying it directly produces audible discontinuities. A
//! [`SmoothedValue`] decouples the two rates: the control side writes a
//! target, the audio (or control-tick) side calls [`advance`] and receives
//! a one-pole-smoothed trajectory toward it.
//!
//! ```rust
//! use cuerda_core::SmoothedValue;
//!
//! let mut level = SmoothedValue::new(0.5, 0.01);
//! level.set(1.0, false);
//! let v = level.advance(); // first call snaps to the pending target
//! assert_eq!(v, 1.0);
//! ```
//!
//! [`advance`]: SmoothedValue::advance

/// A scalar value smoothed toward its target by a one-pole lowpass.
///
/// The coefficient is supplied directly (see
/// [`onepole_coef`](crate::math::onepole_coef) for deriving one from a
/// smoothing time) and is clamped to [0, 1]: 0 freezes the value, 1 tracks
/// the target instantly.
///
/// The very first [`advance`](Self::advance) after construction snaps to the
/// target instead of smoothing. Targets are routinely written before the
/// first read (a control scan runs before the first audio block), and
/// without the snap every parameter would ramp in audibly from its
/// registered default.
#[derive(Debug, Clone)]
pub struct SmoothedValue {
    target: f32,
    current: f32,
    coeff: f32,
    primed: bool,
}

impl SmoothedValue {
    /// Create a smoothed value at `initial` with a one-pole `coeff` in [0, 1].
    pub fn new(initial: f32, coeff: f32) -> Self {
        Self {
            target: initial,
            current: initial,
            coeff: coeff.clamp(0.0, 1.0),
            primed: false,
        }
    }

    /// Set the target the value smooths toward.
    ///
    /// With `immediate` the current value snaps as well, bypassing the
    /// smoothing entirely. Used for hard resets such as the echo-time
    /// doubling switch.
    #[inline]
    pub fn set(&mut self, target: f32, immediate: bool) {
        self.target = target;
        if immediate {
            self.current = target;
        }
    }

    /// Advance one smoothing step and return the new current value.
    ///
    /// `current += (target - current) * coeff`, except the first call after
    /// construction, which returns the target exactly.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        if self.primed {
            self.current += (self.target - self.current) * self.coeff;
        } else {
            self.primed = true;
            self.current = self.target;
        }
        self.current
    }

    /// Read the current value without advancing.
    #[inline]
    pub fn value(&self) -> f32 {
        self.current
    }

    /// Read the target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Replace the smoothing coefficient, clamped to [0, 1].
    pub fn set_coeff(&mut self, coeff: f32) {
        self.coeff = coeff.clamp(0.0, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_advance_returns_initial_exactly() {
        let mut v = SmoothedValue::new(0.25, 0.001);
        assert_eq!(v.advance(), 0.25);
    }

    #[test]
    fn first_advance_snaps_to_pending_target() {
        // Target written before the first read: no slow ramp from initial
        let mut v = SmoothedValue::new(0.0, 0.001);
        v.set(0.9, false);
        assert_eq!(v.advance(), 0.9);
    }

    #[test]
    fn converges_monotonically() {
        let mut v = SmoothedValue::new(0.0, 0.05);
        v.advance();
        v.set(1.0, false);
        let mut prev = v.value();
        for _ in 0..2000 {
            let cur = v.advance();
            assert!(cur >= prev, "not monotone: {prev} -> {cur}");
            prev = cur;
        }
        assert!((v.value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn immediate_set_bypasses_smoothing() {
        let mut v = SmoothedValue::new(0.0, 0.001);
        v.advance();
        v.set(2.0, true);
        assert_eq!(v.value(), 2.0);
        assert_eq!(v.advance(), 2.0);
    }

    #[test]
    fn zero_coeff_freezes_after_priming() {
        let mut v = SmoothedValue::new(0.5, 0.0);
        v.advance();
        v.set(1.0, false);
        for _ in 0..10 {
            assert_eq!(v.advance(), 0.5);
        }
    }

    #[test]
    fn coeff_is_clamped() {
        let mut v = SmoothedValue::new(0.0, 7.0);
        v.advance();
        v.set(1.0, false);
        // coeff clamps to 1.0: tracks instantly
        assert_eq!(v.advance(), 1.0);
    }
}
