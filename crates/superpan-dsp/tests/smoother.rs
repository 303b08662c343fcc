use superpan_dsp::LinearSmoother;

const SAMPLE_RATE: f32 = 48_000.0;
const RAMP_SECONDS: f32 = 0.05;
const RAMP_SAMPLES: usize = 2_400;

fn centered() -> LinearSmoother {
    let mut smoother = LinearSmoother::with_ramp(SAMPLE_RATE, RAMP_SECONDS, 0.0);
    smoother.set_current_and_target_value(0.5);
    smoother
}

#[test]
fn ramp_reaches_target_after_full_length() {
    let mut smoother = centered();
    assert_eq!(smoother.ramp_samples() as usize, RAMP_SAMPLES);
    smoother.set_target_value(1.0);

    let mut value = 0.0;
    for i in 0..RAMP_SAMPLES {
        value = smoother.next_value();
        if i + 1 == RAMP_SAMPLES / 2 {
            assert!((value - 0.75).abs() < 1e-3, "midpoint was {value}");
        }
    }
    assert_eq!(value, 1.0);
    assert!(!smoother.is_smoothing());
}

#[test]
fn ramp_is_monotonic_between_start_and_target() {
    let mut smoother = centered();
    smoother.set_target_value(0.1);
    let mut previous = 0.5;
    for _ in 0..RAMP_SAMPLES {
        let value = smoother.next_value();
        assert!(value <= previous, "{value} rose above {previous}");
        assert!(value >= 0.1 - 1e-6);
        previous = value;
    }
    assert_eq!(previous, 0.1);
}

#[test]
fn completed_ramp_does_not_drift() {
    let mut smoother = centered();
    smoother.set_target_value(0.8);
    smoother.skip(RAMP_SAMPLES as u32);
    for _ in 0..10_000 {
        assert_eq!(smoother.next_value(), 0.8);
    }
}

#[test]
fn retarget_restarts_countdown_from_current_value() {
    let mut smoother = centered();
    smoother.set_target_value(1.0);
    for _ in 0..RAMP_SAMPLES / 2 {
        smoother.next_value();
    }
    let mid = smoother.current_value();

    smoother.set_target_value(0.0);
    assert_eq!(smoother.remaining_samples() as usize, RAMP_SAMPLES);
    let first = smoother.next_value();
    assert!((mid - first - mid / RAMP_SAMPLES as f32).abs() < 1e-6);

    let mut value = first;
    for _ in 1..RAMP_SAMPLES {
        value = smoother.next_value();
    }
    assert_eq!(value, 0.0);
}

#[test]
fn no_jump_larger_than_one_step() {
    let mut smoother = centered();
    let max_step = 1.0 / RAMP_SAMPLES as f32 + 1e-6;
    let mut previous = smoother.current_value();
    for target in [1.0, 0.0, 0.7, 0.2, 1.0] {
        smoother.set_target_value(target);
        for _ in 0..RAMP_SAMPLES / 3 {
            let value = smoother.next_value();
            assert!((value - previous).abs() <= max_step);
            previous = value;
        }
    }
}
