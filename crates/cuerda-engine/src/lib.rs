//! Cuerda Engine - feedback string synthesis.
//!
//! A stereo synthesizer voice built around controlled feedback: two
//! Karplus-Strong resonators sit inside a delayed feedback loop with
//! saturation, filtering, and reverb, and an echo delay taps the result.
//! The instrument is played by riding the loop gain against the resonator
//! tuning rather than by triggering notes.
//!
//! # Components
//!
//! - [`StringResonator`] - Karplus-Strong string with excitation input
//! - [`Saturator`] - level-compensated soft clipper
//! - [`StereoFilter`] - stereo biquad pair ([`FilterMode`])
//! - [`EchoDelay`] - tape-style echo with a lagged read head
//! - [`StereoReverb`] - Freeverb tank over arena storage
//! - [`FeedbackEngine`] - the assembled topology
//!
//! Long delay storage is placed once in a [`cuerda_arena::Arena`];
//! [`ARENA_BUDGET`] sizes it. The audio path never allocates.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature in your `Cargo.toml`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod echo;
pub mod engine;
pub mod filter;
pub mod resonator;
pub mod reverb;
pub mod saturate;

// Re-export main types at crate root
pub use echo::EchoDelay;
pub use engine::{ARENA_BUDGET, FeedbackEngine, MAX_ECHO_DELAY, MAX_FEEDBACK_DELAY};
pub use filter::{FilterMode, StereoFilter};
pub use resonator::StringResonator;
pub use reverb::StereoReverb;
pub use saturate::Saturator;
