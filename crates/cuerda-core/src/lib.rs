//! Cuerda Core - DSP primitives for feedback string synthesis
//!
//! This crate provides the foundational building blocks used by the cuerda
//! engine: parameter smoothing, interpolated delay lines, filters, and the
//! small math kit they share. Everything is real-time safe once constructed.
//!
//! # Core Abstractions
//!
//! ## Parameter Smoothing
//!
//! Zipper-free parameter changes for click-free automation:
//!
//! - [`SmoothedValue`] - One-pole exponential smoothing with snap-on-first-read
//! - [`Curve`] - Linear, exponential, and logarithmic control-to-value mappings
//!
//! ## Delay Lines
//!
//! - [`DelayLine`] - Variable-length delay over borrowed storage
//! - [`FixedDelayLine`] - Fixed-capacity delay (compile-time size)
//! - [`Interpolation`] - None, linear, or 4-point Hermite fractional reads
//!
//! ## Filters
//!
//! - [`Biquad`] - Second-order IIR with RBJ cookbook coefficients
//! - [`OnePole`] - Single-pole lowpass for tone shaping and lag
//! - [`DcBlocker`] - First-order highpass pinned near DC
//! - [`CombFilter`] - Damped feedback comb for reverb algorithms
//! - [`AllpassFilter`] - Schroeder allpass for diffusion
//!
//! ## Sources & Utilities
//!
//! - [`WhiteNoise`] - LCG white noise source
//! - Math functions: [`db_to_linear`], [`midi_to_hz`], [`soft_clip`],
//!   [`onepole_coef`], etc.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! cuerda-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod allpass;
pub mod biquad;
pub mod comb;
pub mod curve;
pub mod dc_blocker;
pub mod delay;
pub mod math;
pub mod noise;
pub mod one_pole;
pub mod param;

// Re-export main types at crate root
pub use allpass::AllpassFilter;
pub use biquad::{Biquad, highpass_coefficients, lowpass_coefficients};
pub use comb::CombFilter;
pub use curve::Curve;
pub use dc_blocker::DcBlocker;
pub use delay::{DelayLine, FixedDelayLine, Interpolation};
pub use math::{
    db_to_linear, flush_denormal, hard_clip, lerp, linear_to_db, midi_to_hz, onepole_coef,
    soft_clip, tension, wet_dry_mix,
};
pub use noise::WhiteNoise;
pub use one_pole::OnePole;
pub use param::SmoothedValue;
