//! Drive-controlled saturator for the feedback loop.
//!
//! Cubic soft clipper with a drive-dependent pre-gain and a post-gain that
//! compensates the level change, so sweeping drive changes the harmonic
//! content far more than the loudness.

/// Rational approximation of tanh used as the clipping shape.
#[inline]
fn soft_limit(x: f32) -> f32 {
    x * (27.0 + x * x) / (27.0 + 9.0 * x * x)
}

/// Saturating transfer curve, flat at +-1 beyond +-3.
#[inline]
fn soft_clip(x: f32) -> f32 {
    if x < -3.0 {
        -1.0
    } else if x > 3.0 {
        1.0
    } else {
        soft_limit(x)
    }
}

/// Soft-clipping waveshaper with level-compensated drive.
#[derive(Debug, Clone, Copy)]
pub struct Saturator {
    pre_gain: f32,
    post_gain: f32,
}

impl Saturator {
    /// Create a saturator at the given drive in [0, 1].
    pub fn new(drive: f32) -> Self {
        let mut sat = Self {
            pre_gain: 0.0,
            post_gain: 1.0,
        };
        sat.set_drive(drive);
        sat
    }

    /// Set the drive amount in [0, 1].
    ///
    /// Low drive interpolates toward a mild linear gain; high drive ramps
    /// the pre-gain steeply (up to 24x at full drive) for fuzz territory.
    pub fn set_drive(&mut self, drive: f32) {
        let drive = drive.clamp(0.0, 1.0) * 2.0;
        let drive_2 = drive * drive;

        let pre_gain_a = drive * 0.5;
        let pre_gain_b = drive_2 * drive_2 * drive * 24.0;
        self.pre_gain = pre_gain_a + (pre_gain_b - pre_gain_a) * drive_2;

        let drive_squashed = drive * (2.0 - drive);
        self.post_gain = 1.0 / soft_clip(0.33 + drive_squashed * (soft_clip(self.pre_gain) - 0.33));
    }

    /// Shape one sample.
    #[inline]
    pub fn process(&self, input: f32) -> f32 {
        soft_clip(self.pre_gain * input) * self.post_gain
    }
}
