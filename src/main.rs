//! Wipe Sense CLI
//!
//! Command-line demo driving the system-wipe recognizer with a scripted
//! mock-sensor sweep.

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use wipe_sense::{
    recognizer::{SystemWipeRecognizer, WipeStatus},
    sensor::{FileConfig, FrameSource, MockSensor},
};

/// Sweep direction for the scripted demo gesture.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Sweep {
    Up,
    Down,
}

#[derive(Debug, Parser)]
#[command(name = "wipe-sense", version, about = "System-wipe recognizer demo")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Direction of the scripted sweep.
    #[arg(long, value_enum, default_value = "down")]
    sweep: Sweep,

    /// Number of frames to process (overrides the config file).
    #[arg(long)]
    frames: Option<u32>,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Wipe Sense v{}", wipe_sense::VERSION);
    info!("This is a demonstration using mock sensor input");

    let config = match &args.config {
        Some(path) => match FileConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => FileConfig::default(),
    };

    let mut sensor = MockSensor::new();
    if let Err(e) = sensor.open(&config.sensor) {
        eprintln!("Failed to open sensor: {}", e);
        std::process::exit(1);
    }

    let mut recognizer = SystemWipeRecognizer::with_tuning(config.tuning.clone());

    let frame_count = args.frames.unwrap_or(config.run.frame_count).max(2);
    let dark_lead_in = frame_count / 4;
    let sweep_frames = frame_count - dark_lead_in;

    info!(
        "Scripting a {:?} sweep over {} frames ({} dark lead-in)",
        args.sweep, frame_count, dark_lead_in
    );

    let mut begun = 0u32;
    let mut completed = 0u32;

    for i in 0..frame_count {
        if i < dark_lead_in {
            sensor.clear_band();
        } else {
            // Band center travels edge to edge over the sweep frames.
            let t = (i - dark_lead_in) as f32 / (sweep_frames - 1).max(1) as f32;
            let center = match args.sweep {
                Sweep::Down => 0.05 + 0.9 * t,
                Sweep::Up => 0.95 - 0.9 * t,
            };
            sensor.set_band(center, 0.12);
        }

        let frame = match sensor.capture() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Frame capture failed: {}", e);
                continue;
            }
        };

        let wipe = recognizer.process(&frame);
        match wipe.status {
            WipeStatus::NotActive => {}
            WipeStatus::Begin => {
                begun += 1;
                info!("Frame {}: wipe began ({:?})", i, wipe.direction);
            }
            WipeStatus::Update => {
                info!(
                    "Frame {}: wipe {:?} at {:.0}%",
                    i,
                    wipe.direction,
                    wipe.progress * 100.0
                );
            }
            WipeStatus::Complete => {
                completed += 1;
                info!("Frame {}: wipe {:?} complete", i, wipe.direction);
            }
            WipeStatus::Abort => {
                info!("Frame {}: wipe aborted", i);
            }
        }
    }

    sensor.close();

    info!(
        "Processed {} frames: {} gestures began, {} completed (tuning: {:?})",
        frame_count,
        begun,
        completed,
        recognizer.tuning()
    );
}
