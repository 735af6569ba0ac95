//! Mathematical utility functions for DSP.
//!
//! Allocation-free helpers shared by the resonator, the feedback engine, and
//! the control layer. All functions are suitable for `no_std` use via `libm`.
//!
//! # Level and pitch conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - dB and linear gain
//! - [`midi_to_hz`] - equal-tempered MIDI note number to frequency
//!
//! # Control shaping
//!
//! - [`onepole_coef`] - smoothing time to one-pole coefficient
//! - [`tension`] - exponential tension response curve for knobs
//!
//! # Waveshaping
//!
//! - [`soft_clip`] - smooth tanh saturation
//! - [`hard_clip`] - brick-wall limiting, used as the resonator safety clamp

use libm::{expf, logf, tanhf};

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use cuerda_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Input is floored at 1e-10 to keep the result finite.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Convert a MIDI note number to frequency in Hz (A4 = note 69 = 440 Hz).
///
/// Accepts fractional note numbers for detuning.
#[inline]
pub fn midi_to_hz(note: f32) -> f32 {
    440.0 * expf((note - 69.0) * core::f32::consts::LN_2 / 12.0)
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Soft clip using hyperbolic tangent.
///
/// Smooth saturation that approaches ±1 asymptotically.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Hard clip to ±threshold range.
#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` with one fewer multiply:
/// `dry + (wet - dry) * mix`.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Convert a smoothing time to a one-pole coefficient.
///
/// The returned coefficient drives the update
/// `current += (target - current) * coeff` once per tick at `rate` Hz, and
/// is scaled so the value settles to within -60 dB (0.1%) of its target
/// after `time_s` seconds:
///
/// ```text
/// coeff = 1 - exp(ln(0.001) / (time_s * rate))
/// ```
///
/// Degenerate inputs (`time_s <= 0` or `rate <= 0`) return 1.0, which makes
/// the smoother track its target instantly.
#[inline]
pub fn onepole_coef(time_s: f32, rate: f32) -> f32 {
    // ln(0.001): -60 dB settling point
    const LN_MILLI: f32 = -6.907_755;
    if time_s <= 0.0 || rate <= 0.0 {
        1.0
    } else {
        1.0 - expf(LN_MILLI / (time_s * rate))
    }
}

/// Exponential tension curve mapping [0,1] onto [0,1].
///
/// `t > 0` bows the curve toward slow-start/fast-finish, `t < 0` the
/// opposite (anti-exponential). `t` near zero degenerates to the identity.
/// Used to reshape knob response before normalized parameter updates, e.g.
/// the reverb-decay control uses `t = -3`.
#[inline]
pub fn tension(x: f32, t: f32) -> f32 {
    if t.abs() < 1e-3 {
        x
    } else {
        (expf(t * x) - 1.0) / (expf(t) - 1.0)
    }
}

/// Flush subnormal (denormalized) floats to zero.
///
/// Subnormal floats cause severe CPU performance degradation on most
/// architectures. Values below 1e-20 are replaced with zero, leaving margin
/// before the IEEE 754 subnormal range begins. Use in feedback loops where
/// the signal can decay indefinitely toward zero.
#[allow(clippy::inline_always)]
#[inline(always)]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
