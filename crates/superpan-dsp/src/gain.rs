use crate::smoothing::LinearSmoother;

/// Minimum linear value treated as silence.
const MIN_LINEAR: f32 = 1e-7;

#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    if db <= -120.0 {
        0.0
    } else {
        10.0f32.powf(db * 0.05)
    }
}

#[inline]
pub fn linear_to_db(gain: f32) -> f32 {
    if gain <= MIN_LINEAR {
        f32::NEG_INFINITY
    } else {
        20.0 * gain.log10()
    }
}

/// Multiplies `samples` in place by consecutive values of `smoother`.
///
/// Returns the gain applied to the last sample, or the smoother's resting
/// value for an empty slice.
#[inline]
pub fn apply_smoothed_gain(samples: &mut [f32], smoother: &mut LinearSmoother) -> f32 {
    if !smoother.is_smoothing() {
        let gain = smoother.current_value();
        for sample in samples.iter_mut() {
            *sample *= gain;
        }
        return gain;
    }

    let mut gain = smoother.current_value();
    for sample in samples.iter_mut() {
        gain = smoother.next_value();
        *sample *= gain;
    }
    gain
}
