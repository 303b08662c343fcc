//! Gain meter published by the audio thread for visualisation.

use core::sync::atomic::Ordering;

use atomic_float::AtomicF32;
use superpan_dsp::{linear_to_db, GainPair};

/// Most recently applied per-channel gains.
///
/// Written once per block by the audio thread and polled by the UI at a low
/// rate. The two channels are independent scalars, so a reader may observe
/// the left value of one block next to the right value of the following one.
#[derive(Debug)]
pub struct GainMeter {
    left: AtomicF32,
    right: AtomicF32,
}

impl Default for GainMeter {
    fn default() -> Self {
        Self::new(GainPair::default())
    }
}

impl GainMeter {
    pub fn new(initial: GainPair) -> Self {
        Self {
            left: AtomicF32::new(initial.left),
            right: AtomicF32::new(initial.right),
        }
    }

    #[inline]
    pub fn store(&self, gains: GainPair) {
        self.left.store(gains.left, Ordering::Relaxed);
        self.right.store(gains.right, Ordering::Relaxed);
    }

    #[inline]
    pub fn gains(&self) -> GainPair {
        GainPair::new(
            self.left.load(Ordering::Relaxed),
            self.right.load(Ordering::Relaxed),
        )
    }

    pub fn gains_db(&self) -> (f32, f32) {
        let gains = self.gains();
        (linear_to_db(gains.left), linear_to_db(gains.right))
    }
}
