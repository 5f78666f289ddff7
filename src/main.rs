use anyhow::{Context, Result};
use clap::Parser;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use lofarsim::config::{Angle, SimConfig, WindowKind};
use lofarsim::output::{OutputFormat, create_formatter, write_response_csv, write_spectrogram_csv};
use lofarsim::signal_processing::angle_error;
use lofarsim::{Simulation, SimulationReport, save_wav};

#[derive(Parser, Debug)]
#[command(name = "lofarsim")]
#[command(about = "Simulate a passive hydrophone line array: beamform, scan for bearing, render lofargrams")]
struct Args {
    /// TOML configuration file (command-line options override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of hydrophones
    #[arg(long)]
    sensors: Option<usize>,

    /// Hydrophone spacing in meters
    #[arg(long)]
    spacing: Option<f64>,

    /// Propagation speed in m/s
    #[arg(long)]
    speed: Option<f64>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Signal duration in seconds
    #[arg(short, long)]
    duration: Option<f64>,

    /// Fundamental frequency in Hz
    #[arg(long)]
    freq: Option<f64>,

    /// Additive source noise level (standard deviation)
    #[arg(long)]
    noise: Option<f64>,

    /// Independent per-hydrophone noise level (standard deviation)
    #[arg(long)]
    sensor_noise: Option<f64>,

    /// Random seed for reproducible noise
    #[arg(short, long)]
    seed: Option<u64>,

    /// True source bearing (e.g., "30deg", "0.52rad")
    #[arg(short, long, allow_hyphen_values = true)]
    bearing: Option<Angle>,

    /// First scan angle (e.g., "-90deg")
    #[arg(long, allow_hyphen_values = true)]
    scan_start: Option<Angle>,

    /// Last scan angle (e.g., "90deg")
    #[arg(long, allow_hyphen_values = true)]
    scan_end: Option<Angle>,

    /// Scan step (e.g., "1deg")
    #[arg(long)]
    scan_step: Option<Angle>,

    /// Spectrogram window
    #[arg(long, value_enum)]
    window: Option<WindowKind>,

    /// Output format for the bearing response
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Directory for CSV and WAV artifacts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn build_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };

    if let Some(n) = args.sensors {
        config.array.num_sensors = n;
    }
    if let Some(d) = args.spacing {
        config.array.sensor_spacing_m = d;
    }
    if let Some(c) = args.speed {
        config.array.propagation_speed_mps = c;
    }
    if let Some(rate) = args.sample_rate {
        config.signal.sample_rate_hz = rate;
    }
    if let Some(duration) = args.duration {
        config.signal.duration_s = duration;
    }
    if let Some(freq) = args.freq {
        config.signal.base_freq_hz = freq;
    }
    if let Some(noise) = args.noise {
        config.signal.noise_level = noise;
    }
    if let Some(noise) = args.sensor_noise {
        config.source.sensor_noise_level = noise;
    }
    if let Some(seed) = args.seed {
        config.signal.random_seed = Some(seed);
    }
    if let Some(bearing) = args.bearing {
        config.source.bearing_rad = bearing.as_radians();
    }
    if let Some(start) = args.scan_start {
        config.scan.start_rad = start.as_radians();
    }
    if let Some(end) = args.scan_end {
        config.scan.end_rad = end.as_radians();
    }
    if let Some(step) = args.scan_step {
        config.scan.step_rad = step.as_radians();
    }
    if let Some(window) = args.window {
        config.spectrogram.window = window;
    }

    Ok(config)
}

fn write_artifacts(dir: &Path, report: &SimulationReport) -> Result<()> {
    fs::create_dir_all(dir).context("Failed to create output directory")?;

    let create = |name: &str| -> Result<BufWriter<File>> {
        let path = dir.join(name);
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        Ok(BufWriter::new(file))
    };

    write_response_csv(create("bearing_response.csv")?, &report.response)
        .context("Failed to write bearing response")?;
    write_spectrogram_csv(create("spectrogram_raw.csv")?, &report.raw_spectrogram)
        .context("Failed to write raw spectrogram")?;
    write_spectrogram_csv(create("spectrogram_beam.csv")?, &report.beam_spectrogram)
        .context("Failed to write beam spectrogram")?;

    save_wav(dir.join("raw.wav"), &report.sensors.signals()[0])
        .context("Failed to write raw.wav")?;
    save_wav(dir.join("beam.wav"), &report.beam.waveform).context("Failed to write beam.wav")?;

    log::info!("Artifacts written to {}", dir.display());
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = build_config(&args)?;
    let simulation = Simulation::new(&config).context("Invalid simulation configuration")?;
    let report = simulation.run().context("Simulation failed")?;

    let formatter = create_formatter(args.format, args.verbose > 0);
    println!("{}", formatter.format(&report.response));

    if matches!(args.format, OutputFormat::Text) {
        println!(
            "True bearing: {:>6.1}° error: {:+.1}°",
            report.true_bearing_rad.to_degrees(),
            angle_error(report.estimated_bearing_rad(), report.true_bearing_rad).to_degrees()
        );
        if let Some(gain) = report.array_gain() {
            println!("Array gain at peak: {:.2}x", gain);
        }
    }

    if let Some(dir) = &args.output_dir {
        write_artifacts(dir, &report)?;
    }

    Ok(())
}
