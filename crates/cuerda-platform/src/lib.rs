//! Cuerda Platform - control surface for the feedback engine.
//!
//! This crate maps a fixed set of raw analog control readings onto the
//! engine's parameters: hardware polarity inversion, response curves,
//! special-case shaping (the reverb decay tension curve, the echo-time
//! halving toggle), and block-rate smoothing through the parameter
//! registry.
//!
//! # Core Abstractions
//!
//! - [`EngineParam`] - identifier for each mappable engine parameter
//! - [`ControlFrame`] - one snapshot of raw normalized control readings
//! - [`ControlSurface`] - registry wiring plus the block-rate driver
//!
//! The audio callback is externally driven: the caller owns the period and
//! calls [`ControlSurface::process_block`] once per block with the latest
//! control frame.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible for embedded targets. Disable the
//! default `std` feature in your `Cargo.toml`.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod frame;
pub mod surface;

// Re-export main types at crate root
pub use frame::ControlFrame;
pub use surface::{ControlSurface, EngineParam};
