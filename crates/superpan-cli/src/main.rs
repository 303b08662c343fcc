use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use superpan_engine::{
    AudioBuffer, AudioProcessor, BufferConfig, ChannelLayout, PanLaw, PannerConfig, SuperPan,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => execute_render(args),
        Commands::Curve(args) => execute_curve(args),
    }
}

#[derive(Parser)]
#[command(author, version, about = "Offline tools for the SuperPan stereo panner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pan a WAV file and write the result as 32-bit float WAV.
    Render(RenderArgs),
    /// Print the gains of a pan law across the pan range.
    Curve(CurveArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Source WAV file.
    #[arg(long)]
    input: PathBuf,
    /// Destination WAV file.
    #[arg(long)]
    output: PathBuf,
    /// Pan position at the start of the file, -1 (left) to 1 (right).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pan: f32,
    /// Pan position at the end of the file. The pan moves linearly between
    /// the two, updated once per block.
    #[arg(long, allow_negative_numbers = true)]
    pan_end: Option<f32>,
    #[arg(long, value_enum, default_value_t = LawArg::ConstantPower)]
    law: LawArg,
    /// Frames per processing block.
    #[arg(long, default_value_t = 512)]
    block_size: usize,
    /// Optional panner configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct CurveArgs {
    #[arg(long, value_enum, default_value_t = LawArg::ConstantPower)]
    law: LawArg,
    /// Number of intervals between hard left and hard right.
    #[arg(long, default_value_t = 20)]
    steps: usize,
    /// Emit JSON instead of a text table.
    #[arg(long)]
    json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LawArg {
    Linear,
    ConstantPower,
    SquareRoot,
    Balance,
}

impl From<LawArg> for PanLaw {
    fn from(value: LawArg) -> Self {
        match value {
            LawArg::Linear => PanLaw::Linear,
            LawArg::ConstantPower => PanLaw::ConstantPower,
            LawArg::SquareRoot => PanLaw::SquareRoot,
            LawArg::Balance => PanLaw::Balance,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct DecodedAudio {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl DecodedAudio {
    fn frames(&self) -> usize {
        self.channels.first().map(Vec::len).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy)]
struct PanSweep {
    start: f32,
    end: f32,
    law: PanLaw,
    block_size: usize,
}

fn execute_render(args: RenderArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => PannerConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PannerConfig::default(),
    };
    let sweep = PanSweep {
        start: args.pan,
        end: args.pan_end.unwrap_or(args.pan),
        law: args.law.into(),
        block_size: args.block_size,
    };

    let input = read_wav(&args.input)?;
    let rendered = render(&input, config, sweep)?;
    write_wav(&args.output, &rendered)?;

    println!(
        "Rendered {} frames ({} law) to {}",
        rendered.frames(),
        sweep.law,
        args.output.display()
    );
    Ok(())
}

fn render(audio: &DecodedAudio, config: PannerConfig, sweep: PanSweep) -> Result<DecodedAudio> {
    if sweep.block_size == 0 {
        bail!("block size must be at least one frame");
    }
    for (flag, pan) in [("--pan", sweep.start), ("--pan-end", sweep.end)] {
        if !(-1.0..=1.0).contains(&pan) {
            bail!("{flag} {pan} is outside -1..=1");
        }
    }
    let channel_count = audio.channels.len();
    let layout = match channel_count {
        1 => ChannelLayout::Mono,
        2 => ChannelLayout::Stereo,
        n => ChannelLayout::Custom(
            u8::try_from(n).with_context(|| format!("{n} channels are not supported"))?,
        ),
    };
    if channel_count < 2 {
        tracing::warn!(
            channels = channel_count,
            "input is not stereo, audio passes through unchanged"
        );
    }

    let mut panner = SuperPan::new(PannerConfig {
        initial_pan: sweep.start,
        initial_law: sweep.law,
        ..config
    });
    panner.prepare(&BufferConfig::new(
        audio.sample_rate as f32,
        sweep.block_size,
        layout,
    ))?;
    let params = panner.parameters();

    let frames = audio.frames();
    let mut output: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frames))
        .collect();
    let mut offset = 0;
    while offset < frames {
        let len = sweep.block_size.min(frames - offset);
        let progress = if frames > 1 {
            offset as f32 / (frames - 1) as f32
        } else {
            0.0
        };
        params.set_pan(sweep.start + (sweep.end - sweep.start) * progress);

        let mut block = AudioBuffer::from_channels(
            audio
                .channels
                .iter()
                .map(|channel| channel[offset..offset + len].to_vec())
                .collect(),
        );
        panner.process(&mut block)?;
        for (out, processed) in output.iter_mut().zip(block.channels()) {
            out.extend_from_slice(processed);
        }
        offset += len;
    }
    panner.release();

    Ok(DecodedAudio {
        sample_rate: audio.sample_rate,
        channels: output,
    })
}

fn read_wav(path: &Path) -> Result<DecodedAudio> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let channel_count = spec.channels as usize;
    if channel_count == 0 {
        bail!("{} has no audio channels", path.display());
    }

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<f32>, _>>(),
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.max(1) - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|sample| sample.map(|value| value as f32 * scale))
                .collect::<Result<Vec<f32>, _>>()
        }
    }
    .with_context(|| format!("failed to decode {}", path.display()))?;

    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(samples.len() / channel_count))
        .collect();
    for frame in samples.chunks_exact(channel_count) {
        for (channel, sample) in channels.iter_mut().zip(frame) {
            channel.push(*sample);
        }
    }
    tracing::debug!(
        path = %path.display(),
        sample_rate = spec.sample_rate,
        channels = channel_count,
        "decoded input"
    );

    Ok(DecodedAudio {
        sample_rate: spec.sample_rate,
        channels,
    })
}

fn write_wav(path: &Path, audio: &DecodedAudio) -> Result<()> {
    let channel_count = u16::try_from(audio.channels.len())
        .with_context(|| format!("{} channels are not supported", audio.channels.len()))?;
    let mut writer = hound::WavWriter::create(
        path,
        hound::WavSpec {
            channels: channel_count,
            sample_rate: audio.sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        },
    )
    .with_context(|| format!("failed to create {}", path.display()))?;

    for frame in 0..audio.frames() {
        for channel in &audio.channels {
            let sample = channel.get(frame).copied().unwrap_or(0.0);
            writer.write_sample(sample)?;
        }
    }
    writer
        .finalize()
        .with_context(|| format!("failed to finalise {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct CurvePoint {
    pan: f32,
    left: f32,
    right: f32,
}

fn curve_points(law: PanLaw, steps: usize) -> Vec<CurvePoint> {
    law.curve(steps)
        .into_iter()
        .map(|(pan, gains)| CurvePoint {
            pan,
            left: gains.left,
            right: gains.right,
        })
        .collect()
}

fn execute_curve(args: CurveArgs) -> Result<()> {
    let law = PanLaw::from(args.law);
    let points = curve_points(law, args.steps);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&points)?);
        return Ok(());
    }

    println!("{law}");
    println!("{:>7}  {:>8}  {:>8}", "pan", "left", "right");
    for point in points {
        println!(
            "{:>7.3}  {:>8.5}  {:>8.5}",
            point.pan, point.left, point.right
        );
    }
    Ok(())
}
