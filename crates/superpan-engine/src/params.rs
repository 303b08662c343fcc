//! Shared parameter state for the panner.
//!
//! Each parameter lives in its own atomic scalar so the control thread can
//! write while the audio thread reads without locks. The audio thread loads
//! each value once per block.

use core::sync::atomic::{AtomicU32, Ordering};
use std::fmt;

use atomic_float::AtomicF32;
use serde::{Deserialize, Serialize};
use superpan_dsp::{compute_gains, GainPair, PanLaw};
use thiserror::Error;

pub const PARAM_PAN: &str = "pan";
pub const PARAM_PAN_LAW: &str = "pan_law";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterId(String);

impl ParameterId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ParameterId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ParameterKind {
    Continuous { min: f32, max: f32, default: f32 },
    Choice { options: Vec<String>, default: usize },
}

impl ParameterKind {
    pub fn default_value(&self) -> ParameterValue {
        match self {
            ParameterKind::Continuous { default, .. } => ParameterValue::Continuous(*default),
            ParameterKind::Choice { default, .. } => ParameterValue::Choice(*default),
        }
    }

    pub fn validate(&self, id: &ParameterId, value: &ParameterValue) -> Result<(), ParameterError> {
        match (self, value) {
            (ParameterKind::Continuous { min, max, .. }, ParameterValue::Continuous(v)) => {
                if v.is_nan() || *v < *min || *v > *max {
                    Err(ParameterError::OutOfRange {
                        id: id.clone(),
                        min: *min,
                        max: *max,
                        value: *v,
                    })
                } else {
                    Ok(())
                }
            }
            (ParameterKind::Choice { options, .. }, ParameterValue::Choice(index)) => {
                if *index >= options.len() {
                    Err(ParameterError::InvalidChoice {
                        id: id.clone(),
                        index: *index,
                        count: options.len(),
                    })
                } else {
                    Ok(())
                }
            }
            _ => Err(ParameterError::WrongType {
                id: id.clone(),
                expected: self.type_name(),
                actual: value.type_name(),
            }),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ParameterKind::Continuous { .. } => "continuous",
            ParameterKind::Choice { .. } => "choice",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ParameterValue {
    Continuous(f32),
    Choice(usize),
}

impl ParameterValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::Continuous(_) => "continuous",
            ParameterValue::Choice(_) => "choice",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub id: ParameterId,
    pub name: String,
    pub kind: ParameterKind,
    pub description: Option<String>,
}

impl ParameterDefinition {
    pub fn new(id: impl Into<ParameterId>, name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Host-visible description of the panner's two parameters.
pub fn parameter_layout() -> Vec<ParameterDefinition> {
    vec![
        ParameterDefinition::new(
            PARAM_PAN,
            "Pan",
            ParameterKind::Continuous {
                min: -1.0,
                max: 1.0,
                default: 0.0,
            },
        )
        .with_description("Stereo position from hard left (-1) to hard right (+1)"),
        ParameterDefinition::new(
            PARAM_PAN_LAW,
            "Pan Law",
            ParameterKind::Choice {
                options: PanLaw::ALL.iter().map(|law| law.label().to_owned()).collect(),
                default: PanLaw::default().index() as usize,
            },
        )
        .with_description("Curve mapping the pan position to channel gains"),
    ]
}

#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("unknown parameter `{0}`")]
    UnknownParameter(ParameterId),
    #[error("parameter `{id}` expected {expected} value but received {actual}")]
    WrongType {
        id: ParameterId,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("parameter `{id}` received value {value} outside of range {min}..={max}")]
    OutOfRange {
        id: ParameterId,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("parameter `{id}` received choice index {index} outside of 0..{count}")]
    InvalidChoice {
        id: ParameterId,
        index: usize,
        count: usize,
    },
}

/// Pan position and pan-law selector shared between control and audio threads.
#[derive(Debug)]
pub struct PanParameters {
    pan: AtomicF32,
    pan_law: AtomicU32,
}

impl Default for PanParameters {
    fn default() -> Self {
        Self::new(0.0, PanLaw::default())
    }
}

impl PanParameters {
    pub fn new(pan: f32, law: PanLaw) -> Self {
        Self {
            pan: AtomicF32::new(sanitize_pan(pan)),
            pan_law: AtomicU32::new(law.index()),
        }
    }

    #[inline]
    pub fn pan(&self) -> f32 {
        self.pan.load(Ordering::Relaxed)
    }

    /// Stores a new pan position, clamped to [-1.0, 1.0].
    #[inline]
    pub fn set_pan(&self, pan: f32) {
        self.pan.store(sanitize_pan(pan), Ordering::Relaxed);
    }

    #[inline]
    pub fn pan_law(&self) -> PanLaw {
        PanLaw::from_index(self.pan_law_index())
    }

    /// Raw selector as written by the host, before decoding.
    #[inline]
    pub fn pan_law_index(&self) -> u32 {
        self.pan_law.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn set_pan_law(&self, law: PanLaw) {
        self.pan_law.store(law.index(), Ordering::Relaxed);
    }

    /// Stores a raw host index. Unknown indices decode to the default law.
    #[inline]
    pub fn set_pan_law_index(&self, index: u32) {
        self.pan_law.store(index, Ordering::Relaxed);
    }

    /// Gains the audio thread is heading toward for the current settings.
    #[inline]
    pub fn target_gains(&self) -> GainPair {
        compute_gains(self.pan(), self.pan_law())
    }

    pub fn get(&self, id: &ParameterId) -> Result<ParameterValue, ParameterError> {
        match id.as_str() {
            PARAM_PAN => Ok(ParameterValue::Continuous(self.pan())),
            PARAM_PAN_LAW => Ok(ParameterValue::Choice(self.pan_law().index() as usize)),
            _ => Err(ParameterError::UnknownParameter(id.clone())),
        }
    }

    /// Validates `value` against [`parameter_layout`] and stores it.
    pub fn set(&self, id: &ParameterId, value: ParameterValue) -> Result<(), ParameterError> {
        let layout = parameter_layout();
        let definition = layout
            .iter()
            .find(|definition| &definition.id == id)
            .ok_or_else(|| ParameterError::UnknownParameter(id.clone()))?;
        if let Err(err) = definition.kind.validate(id, &value) {
            tracing::warn!(parameter = %id, error = %err, "rejected parameter change");
            return Err(err);
        }

        match (id.as_str(), value) {
            (PARAM_PAN, ParameterValue::Continuous(pan)) => self.set_pan(pan),
            (PARAM_PAN_LAW, ParameterValue::Choice(index)) => {
                self.set_pan_law(PanLaw::from_index(index as u32))
            }
            _ => return Err(ParameterError::UnknownParameter(id.clone())),
        }
        Ok(())
    }
}

#[inline]
fn sanitize_pan(pan: f32) -> f32 {
    if pan.is_nan() {
        0.0
    } else {
        pan.clamp(-1.0, 1.0)
    }
}
