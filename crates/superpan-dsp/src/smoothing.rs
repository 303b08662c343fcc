/// Linear ramp smoother for click-free, sample-accurate gain changes.
///
/// Each retarget ramps from the current value, even one taken mid-ramp, to the
/// new target over the full ramp length. The last sample of a ramp lands on the
/// target exactly and the value holds there until the next retarget.
#[derive(Clone, Copy, Debug)]
pub struct LinearSmoother {
    current: f32,
    target: f32,
    step: f32,
    remaining: u32,
    ramp_samples: u32,
}

impl Default for LinearSmoother {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl LinearSmoother {
    /// Creates a smoother resting at `initial` with a zero-length ramp.
    #[inline]
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            remaining: 0,
            ramp_samples: 0,
        }
    }

    #[inline]
    pub fn with_ramp(sample_rate: f32, ramp_seconds: f32, initial: f32) -> Self {
        let mut s = Self::new(initial);
        s.reset(sample_rate, ramp_seconds);
        s
    }

    /// Sets the ramp length and abandons any ramp in flight; the value snaps
    /// to the current target.
    #[inline]
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        self.ramp_samples = ramp_length(sample_rate, ramp_seconds);
        self.set_current_and_target_value(self.target);
    }

    #[inline]
    pub fn set_current_and_target_value(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.remaining = 0;
    }

    /// Starts a ramp toward `value`. Re-setting the existing target leaves the
    /// ramp toward it untouched.
    #[inline]
    pub fn set_target_value(&mut self, value: f32) {
        if value == self.target {
            return;
        }
        if self.ramp_samples == 0 {
            self.set_current_and_target_value(value);
            return;
        }
        self.target = value;
        self.remaining = self.ramp_samples;
        self.step = (value - self.current) / self.ramp_samples as f32;
    }

    /// Advances one sample and returns the new value.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.remaining == 0 {
            return self.current;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.current = self.target;
            self.step = 0.0;
        } else {
            self.current = self.bounded(self.current + self.step);
        }
        self.current
    }

    /// Advances `samples` samples at once and returns the resulting value.
    #[inline]
    pub fn skip(&mut self, samples: u32) -> f32 {
        if samples >= self.remaining {
            self.set_current_and_target_value(self.target);
        } else {
            self.remaining -= samples;
            self.current = self.bounded(self.current + self.step * samples as f32);
        }
        self.current
    }

    /// Keeps accumulated rounding error from carrying the value past the target.
    #[inline]
    fn bounded(&self, value: f32) -> f32 {
        if self.step > 0.0 {
            value.min(self.target)
        } else {
            value.max(self.target)
        }
    }

    #[inline]
    pub fn is_smoothing(&self) -> bool {
        self.remaining > 0
    }

    #[inline]
    pub fn current_value(&self) -> f32 {
        self.current
    }

    #[inline]
    pub fn target_value(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn ramp_samples(&self) -> u32 {
        self.ramp_samples
    }

    #[inline]
    pub fn remaining_samples(&self) -> u32 {
        self.remaining
    }
}

/// Ramp length in samples. Non-positive or NaN inputs give a zero-length ramp.
#[inline]
pub fn ramp_length(sample_rate: f32, ramp_seconds: f32) -> u32 {
    let unusable = |value: f32| value.is_nan() || value <= 0.0;
    if unusable(sample_rate) || unusable(ramp_seconds) {
        return 0;
    }
    (f64::from(sample_rate) * f64::from(ramp_seconds)).round() as u32
}
