use criterion::{black_box, criterion_group, criterion_main, Criterion};
use superpan_dsp::{apply_smoothed_gain, compute_gains, LinearSmoother, PanLaw};

fn bench_smoothed_gain(c: &mut Criterion) {
    let mut channel = vec![0.5f32; 512];
    let mut smoother = LinearSmoother::with_ramp(48_000.0, 0.05, 0.5);
    let mut flip = false;
    c.bench_function("smoothed gain 1x512", |b| {
        b.iter(|| {
            flip = !flip;
            smoother.set_target_value(if flip { 1.0 } else { 0.0 });
            apply_smoothed_gain(black_box(&mut channel), &mut smoother)
        })
    });
}

fn bench_pan_laws(c: &mut Criterion) {
    for law in PanLaw::ALL {
        c.bench_function(&format!("compute gains {law}"), |b| {
            b.iter(|| compute_gains(black_box(0.3), black_box(law)))
        });
    }
}

criterion_group!(benches, bench_smoothed_gain, bench_pan_laws);
criterion_main!(benches);
