use std::sync::Arc;

use superpan_dsp::{apply_smoothed_gain, compute_gains, GainPair, LinearSmoother};

use crate::config::PannerConfig;
use crate::meter::GainMeter;
use crate::params::PanParameters;
use crate::plugin::{AudioProcessor, PluginDescriptor, PluginError};
use crate::{AudioBuffer, BufferConfig, ChannelLayout};

pub const PLUGIN_ID: &str = "superpan.effects.panner";
pub const PLUGIN_NAME: &str = "SuperPan";

/// Stereo panner with per-sample gain smoothing.
///
/// The control side writes [`PanParameters`] and polls [`GainMeter`]; both are
/// shared by `Arc`. The two smoothers belong to the audio thread alone.
pub struct SuperPan {
    config: PannerConfig,
    params: Arc<PanParameters>,
    meter: Arc<GainMeter>,
    left: LinearSmoother,
    right: LinearSmoother,
    sample_rate: Option<f32>,
}

impl SuperPan {
    pub fn new(config: PannerConfig) -> Self {
        let params = Arc::new(PanParameters::new(config.initial_pan, config.initial_law));
        Self::with_parameters(config, params)
    }

    /// Builds a panner that reads from an existing parameter context.
    pub fn with_parameters(config: PannerConfig, params: Arc<PanParameters>) -> Self {
        let startup = config.startup_gain;
        Self {
            config,
            params,
            meter: Arc::new(GainMeter::new(GainPair::splat(startup))),
            left: LinearSmoother::new(startup),
            right: LinearSmoother::new(startup),
            sample_rate: None,
        }
    }

    pub fn config(&self) -> &PannerConfig {
        &self.config
    }

    pub fn parameters(&self) -> Arc<PanParameters> {
        Arc::clone(&self.params)
    }

    pub fn meter(&self) -> Arc<GainMeter> {
        Arc::clone(&self.meter)
    }

    /// Gains applied to the last processed sample of each channel.
    pub fn instantaneous_gains(&self) -> GainPair {
        self.meter.gains()
    }

    pub fn sample_rate(&self) -> Option<f32> {
        self.sample_rate
    }

    pub fn is_prepared(&self) -> bool {
        self.sample_rate.is_some()
    }

    /// Re-initialises smoothing for a new stream. Both channels rest at the
    /// startup gain so the first block ramps from there instead of from zero.
    pub fn on_stream_start(&mut self, sample_rate: f32) {
        let startup = self.config.startup_gain;
        for smoother in [&mut self.left, &mut self.right] {
            smoother.reset(sample_rate, self.config.ramp_seconds);
            smoother.set_current_and_target_value(startup);
        }
        self.meter.store(GainPair::splat(startup));
        self.sample_rate = Some(sample_rate);
    }

    pub fn on_stream_stop(&mut self) {
        self.sample_rate = None;
    }

    /// Applies the current pan to the first two channels of `buffer` in place.
    ///
    /// Buffers with fewer than two channels pass through untouched. Channels
    /// past the first two are not modified.
    pub fn process_block(&mut self, buffer: &mut AudioBuffer) {
        let Some((left, right)) = buffer.stereo_mut() else {
            return;
        };

        let target = compute_gains(self.params.pan(), self.params.pan_law());
        self.left.set_target_value(target.left);
        self.right.set_target_value(target.right);

        let applied = GainPair::new(
            apply_smoothed_gain(left, &mut self.left),
            apply_smoothed_gain(right, &mut self.right),
        );
        self.meter.store(applied);
    }
}

impl Default for SuperPan {
    fn default() -> Self {
        Self::new(PannerConfig::default())
    }
}

impl AudioProcessor for SuperPan {
    fn descriptor(&self) -> PluginDescriptor {
        PluginDescriptor::new(PLUGIN_ID, PLUGIN_NAME, "SuperPan")
            .with_version(env!("CARGO_PKG_VERSION"))
            .with_description("Stereo panner with selectable pan law")
    }

    fn prepare(&mut self, config: &BufferConfig) -> anyhow::Result<()> {
        if !config.sample_rate.is_finite() || config.sample_rate <= 0.0 {
            return Err(PluginError::InvalidConfig(format!(
                "sample rate {} must be positive",
                config.sample_rate
            ))
            .into());
        }
        if !self.supports_layout(config.layout) {
            tracing::warn!(
                layout = ?config.layout,
                "unsupported channel layout, audio will pass through unchanged"
            );
        }
        self.on_stream_start(config.sample_rate);
        tracing::info!(
            sample_rate = config.sample_rate,
            block_size = config.block_size,
            ramp_samples = self.left.ramp_samples(),
            "{} prepared",
            PLUGIN_NAME
        );
        Ok(())
    }

    fn process(&mut self, buffer: &mut AudioBuffer) -> anyhow::Result<()> {
        if !self.is_prepared() {
            return Err(PluginError::NotPrepared.into());
        }
        self.process_block(buffer);
        Ok(())
    }

    fn release(&mut self) {
        self.on_stream_stop();
        tracing::debug!("{} released", PLUGIN_NAME);
    }

    fn supports_layout(&self, layout: ChannelLayout) -> bool {
        matches!(layout, ChannelLayout::Stereo)
    }
}
