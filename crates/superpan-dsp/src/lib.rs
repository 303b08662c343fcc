//! SuperPan DSP
//! ============
//!
//! Real-time safe building blocks for the SuperPan stereo panner: the pan-law
//! gain table, a linear per-sample gain smoother and helpers for applying a
//! smoothed gain to a channel in place. Nothing in this crate allocates on the
//! processing path.

#![deny(unsafe_code)]

pub mod gain;
pub mod pan;
pub mod smoothing;

pub use gain::{apply_smoothed_gain, db_to_linear, linear_to_db};
pub use pan::{compute_gains, GainPair, PanLaw};
pub use smoothing::LinearSmoother;
