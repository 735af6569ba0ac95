//! Response curves for mapping normalized control input onto parameter ranges.
//!
//! Physical knobs deliver values in [0, 1]; most musical parameters want a
//! non-linear response across their range. A [`Curve`] is a monotonic map
//! from [0, 1] onto `[min, max]`.
//!
//! | Curve | Character | Typical use |
//! |-------|-----------|-------------|
//! | [`Curve::Linear`] | Equal resolution everywhere | mix, level |
//! | [`Curve::Exponential`] | More resolution at the low end | send amounts, times |
//! | [`Curve::Logarithmic`] | Equal resolution per octave | filter cutoffs |

use crate::math::lerp;
use libm::{expf, logf};

/// Monotonic response curve from normalized [0, 1] onto `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Curve {
    /// Identity mapping. Equal resolution across the range.
    #[default]
    Linear,
    /// Squared input before the linear map. More resolution at low values.
    Exponential,
    /// Logarithmic spacing: equal knob travel per octave.
    /// Requires `min > 0`.
    Logarithmic,
}

impl Curve {
    /// Map a normalized value onto `[min, max]` through this curve.
    ///
    /// `norm` is expected to already be clamped to [0, 1] by the caller.
    /// A logarithmic map with `min <= 0` is degenerate and returns `min`.
    #[inline]
    pub fn map(self, norm: f32, min: f32, max: f32) -> f32 {
        match self {
            Curve::Linear => lerp(min, max, norm),
            Curve::Exponential => lerp(min, max, norm * norm),
            Curve::Logarithmic => {
                if min <= 0.0 {
                    return min;
                }
                expf(lerp(logf(min), logf(max), norm))
            }
        }
    }
}
