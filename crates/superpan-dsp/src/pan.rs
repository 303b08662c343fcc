//! Pan-law utilities.
//!
//! Maps a pan position in the range [-1.0, 1.0] to linear gains for the left
//! and right channels. The audio thread, the gain meter and curve displays all
//! go through [`compute_gains`], so a drawn curve is always the applied curve.

use core::f32::consts::FRAC_PI_4;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Selects the curve used to turn a pan position into channel gains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum PanLaw {
    /// Amplitude cross-fade, each channel at 0.5 (-6 dB) when centered.
    Linear = 0,
    /// Sine/cosine equal-power law, each channel at -3 dB when centered.
    #[default]
    ConstantPower = 1,
    /// Square root of the linear cross-fade.
    SquareRoot = 2,
    /// Attenuates the far channel only. Both channels sit at unity when
    /// centered and the near channel is never boosted.
    Balance = 3,
}

impl PanLaw {
    pub const ALL: [PanLaw; 4] = [
        PanLaw::Linear,
        PanLaw::ConstantPower,
        PanLaw::SquareRoot,
        PanLaw::Balance,
    ];

    /// Decodes a host parameter index. Indices outside `0..=3` map to the
    /// default law rather than to silence.
    #[inline]
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => PanLaw::Linear,
            1 => PanLaw::ConstantPower,
            2 => PanLaw::SquareRoot,
            3 => PanLaw::Balance,
            _ => PanLaw::default(),
        }
    }

    #[inline]
    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            PanLaw::Linear => "Linear",
            PanLaw::ConstantPower => "-3 dB Constant Power",
            PanLaw::SquareRoot => "Square-root",
            PanLaw::Balance => "Balance",
        }
    }

    #[inline]
    pub fn gains(self, pan: f32) -> GainPair {
        compute_gains(pan, self)
    }

    /// Samples the law across the whole pan range, returning `steps + 1`
    /// evenly spaced `(pan, gains)` points from hard left to hard right.
    pub fn curve(self, steps: usize) -> Vec<(f32, GainPair)> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let pan = -1.0 + 2.0 * i as f32 / steps as f32;
                (pan, self.gains(pan))
            })
            .collect()
    }
}

impl fmt::Display for PanLaw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Linear left/right gains produced by a pan law.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GainPair {
    pub left: f32,
    pub right: f32,
}

impl GainPair {
    pub const UNITY: GainPair = GainPair::new(1.0, 1.0);

    #[inline]
    pub const fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Same gain on both channels.
    #[inline]
    pub const fn splat(gain: f32) -> Self {
        Self::new(gain, gain)
    }
}

impl From<(f32, f32)> for GainPair {
    fn from((left, right): (f32, f32)) -> Self {
        Self::new(left, right)
    }
}

/// Computes the channel gains for `pan` under `law`.
///
/// `pan` is clamped to [-1.0, 1.0]; NaN is treated as center. Every law yields
/// gains inside [0.0, 1.0].
#[inline]
pub fn compute_gains(pan: f32, law: PanLaw) -> GainPair {
    let p = if pan.is_nan() { 0.0 } else { pan.clamp(-1.0, 1.0) };
    match law {
        PanLaw::Linear => GainPair::new((1.0 - p) * 0.5, (1.0 + p) * 0.5),
        PanLaw::ConstantPower => {
            let theta = (p + 1.0) * FRAC_PI_4;
            // cos(pi/2) rounds to a tiny negative value in f32.
            GainPair::new(theta.cos().clamp(0.0, 1.0), theta.sin().clamp(0.0, 1.0))
        }
        PanLaw::SquareRoot => {
            GainPair::new(((1.0 - p) * 0.5).sqrt(), ((1.0 + p) * 0.5).sqrt())
        }
        PanLaw::Balance => GainPair::new(
            if p <= 0.0 { 1.0 } else { 1.0 - p },
            if p >= 0.0 { 1.0 } else { 1.0 + p },
        ),
    }
}
