//! File-based amp processing command.

use crate::wav::{self, WavSpec};
use amperio_core::linear_to_db;
use amperio_engine::Engine;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Model file (keras-style JSON capture)
    #[arg(short, long)]
    model: PathBuf,

    /// First conditioning parameter (0..1, for input size >= 2)
    #[arg(long, default_value = "0.5")]
    param1: f32,

    /// Second conditioning parameter (0..1, for input size 3)
    #[arg(long, default_value = "0.5")]
    param2: f32,

    /// Master volume in dB
    #[arg(long, default_value = "0.0")]
    master: f32,

    /// Bypass the model (dry render, for A/B comparison)
    #[arg(long)]
    bypass: bool,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    println!("Reading {}...", args.input.display());
    let (samples, spec) = wav::read_wav(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    debug!(
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        "input read"
    );

    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        spec.sample_rate,
        samples.len() as f32 / sample_rate
    );

    let mut engine = Engine::new(sample_rate);
    engine.load_model_blocking(&args.model)?;
    engine.set_control("PARAM1", args.param1);
    engine.set_control("PARAM2", args.param2);
    engine.set_control("MASTER", args.master);
    engine.set_control("BYPASS", f32::from(u8::from(args.bypass)));
    info!(
        model = %args.model.display(),
        input_size = engine.model_input_size(),
        bypass = args.bypass,
        "engine configured"
    );

    println!(
        "Model loaded: {} input(s){}",
        engine.model_input_size(),
        if engine.model_input_size() > 1 {
            " (conditioned)"
        } else {
            ""
        }
    );

    let pb = ProgressBar::new(samples.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut output = samples.clone();
    for chunk in output.chunks_mut(args.block_size) {
        engine.process_block(chunk);
        pb.inc(chunk.len() as u64);
    }
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    let out_spec = WavSpec {
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };
    println!("\nWriting {}...", args.output.display());
    wav::write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
