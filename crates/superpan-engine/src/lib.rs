//! SuperPan Engine
//! ===============
//! Host-facing side of the SuperPan stereo panner: buffer and lifecycle
//! types, the lock-free parameter context, the gain meter and the
//! [`SuperPan`] processor that ties them to the DSP primitives in
//! [`superpan_dsp`].

pub mod buffer;
pub mod config;
pub mod meter;
pub mod panner;
pub mod params;
pub mod plugin;

pub use buffer::{AudioBuffer, BufferConfig, ChannelLayout};
pub use config::{ConfigError, PannerConfig};
pub use meter::GainMeter;
pub use panner::SuperPan;
pub use params::{
    parameter_layout, PanParameters, ParameterDefinition, ParameterError, ParameterId,
    ParameterKind, ParameterValue, PARAM_PAN, PARAM_PAN_LAW,
};
pub use plugin::{AudioProcessor, PluginDescriptor, PluginError};
pub use superpan_dsp::{compute_gains, GainPair, PanLaw};

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn processor_runs_through_trait_object() {
        let config = BufferConfig::new(48_000.0, 128, ChannelLayout::Stereo);
        let mut processor: Box<dyn AudioProcessor> = Box::new(SuperPan::default());
        processor.prepare(&config).expect("prepare");

        let mut rng = rand::thread_rng();
        let mut buffer = AudioBuffer::from_config(&config);
        for channel in buffer.channels_mut() {
            for sample in channel.iter_mut() {
                *sample = rng.gen_range(-0.25..0.25);
            }
        }
        let input = buffer.clone();
        processor.process(&mut buffer).expect("process");

        // Ramping from the 0.5 startup gain toward 0.707 keeps every gain in [0.5, 1].
        for (out, inp) in buffer.channels().zip(input.channels()) {
            for (o, i) in out.iter().zip(inp.iter()) {
                assert!(o.abs() <= i.abs());
                assert!(o.abs() >= 0.5 * i.abs() - 1e-6);
            }
        }
    }
}
