use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AudioBuffer, BufferConfig, ChannelLayout};

/// Metadata a host shows for a processor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub id: String,
    pub name: String,
    pub vendor: String,
    pub version: Option<String>,
    pub description: Option<String>,
    pub accepts_midi: bool,
    pub produces_midi: bool,
}

impl PluginDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>, vendor: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vendor: vendor.into(),
            version: None,
            description: None,
            accepts_midi: false,
            produces_midi: false,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl fmt::Display for PluginDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.vendor)
    }
}

/// Errors that can be returned by processor lifecycle calls.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("processor reported an invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("processor is not ready to process")]
    NotPrepared,
}

/// Host-facing lifecycle of an in-place audio effect.
///
/// `prepare` and `release` run on a control thread. `process` runs on the
/// audio thread and must not block, allocate or perform I/O.
pub trait AudioProcessor: Send + Sync {
    fn descriptor(&self) -> PluginDescriptor;
    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()>;
    fn process(&mut self, buffer: &mut AudioBuffer) -> anyhow::Result<()>;

    /// Called when the stream stops. Processors keep their allocations.
    fn release(&mut self) {}

    fn supports_layout(&self, layout: ChannelLayout) -> bool {
        matches!(layout, ChannelLayout::Mono | ChannelLayout::Stereo)
    }

    fn latency_samples(&self) -> usize {
        0
    }

    fn tail_seconds(&self) -> f64 {
        0.0
    }
}
