use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::sync::atomic::{AtomicUsize, Ordering};

use superpan_engine::{
    AudioBuffer, AudioProcessor, BufferConfig, ChannelLayout, PanLaw, PannerConfig, SuperPan,
};

struct CountingAllocator;

static ALLOCATIONS: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static TRACKING: Cell<bool> = const { Cell::new(false) };
}

fn record() {
    if TRACKING.try_with(Cell::get).unwrap_or(false) {
        ALLOCATIONS.fetch_add(1, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        record();
        System.alloc(layout)
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        record();
        System.alloc_zeroed(layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        record();
        System.realloc(ptr, layout, new_size)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator;

// Only allocations made on the calling thread are counted, so the test harness
// running other work concurrently cannot disturb the result.
fn allocations_during(f: impl FnOnce()) -> usize {
    let before = ALLOCATIONS.load(Ordering::SeqCst);
    TRACKING.with(|tracking| tracking.set(true));
    f();
    TRACKING.with(|tracking| tracking.set(false));
    ALLOCATIONS.load(Ordering::SeqCst) - before
}

#[test]
fn no_alloc_in_process() {
    let config = BufferConfig::new(48_000.0, 128, ChannelLayout::Stereo);
    let mut panner = SuperPan::new(PannerConfig::default());
    panner.prepare(&config).expect("prepare");
    let params = panner.parameters();
    let meter = panner.meter();
    let mut buffer = AudioBuffer::from_config(&config);
    for channel in buffer.channels_mut() {
        channel.fill(0.5);
    }

    let allocations = allocations_during(|| {
        for block in 0..64u32 {
            params.set_pan(-1.0 + block as f32 / 32.0);
            params.set_pan_law(PanLaw::ALL[block as usize % PanLaw::ALL.len()]);
            if block % 16 == 15 {
                params.set_pan_law_index(99);
            }
            panner.process(&mut buffer).expect("process");
            let gains = meter.gains();
            assert!(gains.left >= 0.0 && gains.right >= 0.0);
        }
    });

    assert_eq!(allocations, 0, "allocations detected while processing");
}
