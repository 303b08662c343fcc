use serde::{Deserialize, Serialize};

/// Channel configuration a processor is asked to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelLayout {
    Mono,
    Stereo,
    Custom(u8),
}

impl ChannelLayout {
    pub fn channels(&self) -> u8 {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
            ChannelLayout::Custom(channels) => *channels,
        }
    }
}

/// Stream parameters handed to processors when a stream starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BufferConfig {
    pub sample_rate: f32,
    pub block_size: usize,
    pub layout: ChannelLayout,
}

impl BufferConfig {
    pub fn new(sample_rate: f32, block_size: usize, layout: ChannelLayout) -> Self {
        Self {
            sample_rate,
            block_size,
            layout,
        }
    }
}

/// Non-interleaved audio buffer processed in place.
#[derive(Debug, Clone, Default)]
pub struct AudioBuffer {
    channels: Vec<Vec<f32>>,
}

impl AudioBuffer {
    pub fn new(num_channels: usize, block_size: usize) -> Self {
        let channels = (0..num_channels).map(|_| vec![0.0; block_size]).collect();
        Self { channels }
    }

    pub fn from_config(config: &BufferConfig) -> Self {
        Self::new(config.layout.channels() as usize, config.block_size)
    }

    /// Wraps existing channel data. Channels are expected to share a length.
    pub fn from_channels(channels: Vec<Vec<f32>>) -> Self {
        Self { channels }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Frames per channel.
    pub fn len(&self) -> usize {
        self.channels
            .first()
            .map(|channel| channel.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Mutable views of the first two channels, or `None` for fewer than two.
    pub fn stereo_mut(&mut self) -> Option<(&mut [f32], &mut [f32])> {
        match self.channels.as_mut_slice() {
            [left, right, ..] => Some((left.as_mut_slice(), right.as_mut_slice())),
            _ => None,
        }
    }

    pub fn channels(&self) -> impl Iterator<Item = &Vec<f32>> {
        self.channels.iter()
    }

    pub fn channels_mut(&mut self) -> impl Iterator<Item = &mut Vec<f32>> {
        self.channels.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stereo_view_requires_two_channels() {
        let mut mono = AudioBuffer::new(1, 8);
        assert!(mono.stereo_mut().is_none());

        let mut surround = AudioBuffer::new(6, 8);
        let (left, right) = surround.stereo_mut().expect("stereo view");
        left[0] = 1.0;
        right[0] = -1.0;
        assert_eq!(surround.channel(0).map(|c| c[0]), Some(1.0));
        assert_eq!(surround.channel(1).map(|c| c[0]), Some(-1.0));
    }

    #[test]
    fn from_config_allocates_layout() {
        let config = BufferConfig::new(48_000.0, 64, ChannelLayout::Stereo);
        let buffer = AudioBuffer::from_config(&config);
        assert_eq!(buffer.num_channels(), 2);
        assert_eq!(buffer.len(), 64);
        assert!(AudioBuffer::default().is_empty());
    }
}
