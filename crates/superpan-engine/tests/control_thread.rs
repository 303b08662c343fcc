use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use superpan_engine::{AudioBuffer, AudioProcessor, BufferConfig, ChannelLayout, PanLaw, SuperPan};

#[test]
fn control_thread_writes_while_audio_thread_processes() {
    let mut panner = SuperPan::default();
    panner
        .prepare(&BufferConfig::new(48_000.0, 128, ChannelLayout::Stereo))
        .expect("prepare");
    let params = panner.parameters();
    let meter = panner.meter();
    let running = Arc::new(AtomicBool::new(true));

    let writer = {
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut step = 0u32;
            while running.load(Ordering::Relaxed) {
                let pan = ((step % 200) as f32 / 100.0) - 1.0;
                params.set_pan(pan);
                params.set_pan_law(PanLaw::from_index(step % 5));
                step = step.wrapping_add(1);
                thread::yield_now();
            }
        })
    };

    let ui = {
        let running = Arc::clone(&running);
        thread::spawn(move || {
            let mut polls = 0usize;
            loop {
                let gains = meter.gains();
                assert!((0.0..=1.0).contains(&gains.left));
                assert!((0.0..=1.0).contains(&gains.right));
                polls += 1;
                if !running.load(Ordering::Relaxed) {
                    break polls;
                }
                thread::yield_now();
            }
        })
    };

    let mut buffer = AudioBuffer::new(2, 128);
    for _ in 0..2_000 {
        for channel in buffer.channels_mut() {
            channel.fill(1.0);
        }
        panner.process(&mut buffer).expect("process");
        for sample in buffer.channels().flatten() {
            assert!(sample.is_finite());
            assert!((0.0..=1.0).contains(sample));
        }
    }

    running.store(false, Ordering::Relaxed);
    writer.join().expect("writer thread");
    assert!(ui.join().expect("ui thread") > 0);
}
