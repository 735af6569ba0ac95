//! White noise generator.
//!
//! Linear-congruential white noise in [-1, 1] with a settable output
//! amplitude. The feedback engine runs one of these at around -90 dBFS as a
//! broadband excitation floor: with nothing at the input, the noise alone
//! is what the resonant feedback loop amplifies into a tone.
//!
//! Deterministic and allocation-free; quality is entirely adequate for an
//! excitation source (this is not a cryptographic or statistical RNG).

/// Linear-congruential white noise source.
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    state: u32,
    amp: f32,
}

impl WhiteNoise {
    // Numerical Recipes LCG constants
    const MUL: u32 = 1664525;
    const INC: u32 = 1013904223;

    /// Create a noise source with unit amplitude.
    pub fn new() -> Self {
        Self {
            state: 0x12345678,
            amp: 1.0,
        }
    }

    /// Set the output amplitude (linear gain applied to the ±1 raw noise).
    pub fn set_amp(&mut self, amp: f32) {
        self.amp = amp;
    }

    /// Reseed the generator.
    pub fn set_seed(&mut self, seed: u32) {
        self.state = seed;
    }

    /// Produce the next noise sample in `[-amp, amp]`.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(Self::MUL).wrapping_add(Self::INC);
        // Top bits have the best statistics; map to [-1, 1)
        let unit = (self.state >> 9) as f32 / 4194304.0 - 1.0;
        unit * self.amp
    }
}

impl Default for WhiteNoise {
    fn default() -> Self {
        Self::new()
    }
}
