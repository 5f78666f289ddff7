use lofarsim::config::WindowKind;
use lofarsim::output::{OutputFormat, create_formatter, write_response_csv, write_spectrogram_csv};
use lofarsim::{SimConfig, SimError, Simulation, save_wav};
use std::path::PathBuf;

fn seeded_default(duration_s: f64) -> SimConfig {
    let mut config = SimConfig::default();
    config.signal.duration_s = duration_s;
    config.signal.random_seed = Some(42);
    config
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("lofarsim_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_default_scenario_finds_bearing() {
    let report = Simulation::new(&seeded_default(2.0)).unwrap().run().unwrap();

    assert_eq!(report.sensors.num_sensors(), 40);
    assert_eq!(report.response.len(), 181);
    assert!(report.warnings.is_empty());

    let error_deg = report.bearing_error_rad().to_degrees();
    assert!(error_deg.abs() <= 1.0 + 1e-9, "bearing error {:.2}°", error_deg);
}

#[test]
fn test_pipeline_with_sensor_noise() {
    let mut config = seeded_default(2.0);
    config.source.bearing_rad = (-15f64).to_radians();
    config.source.sensor_noise_level = 1.0;

    let report = Simulation::new(&config).unwrap().run().unwrap();
    let error_deg = report.bearing_error_rad().to_degrees();
    assert!(error_deg.abs() <= 1.0 + 1e-9, "bearing error {:.2}°", error_deg);

    // Uncorrelated sensor noise averages down in the beam
    let gain = report.array_gain().unwrap();
    assert!(gain < 0.6, "beam should suppress sensor noise, gain {}", gain);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let mut config = seeded_default(1.0);
    config.array.num_sensors = 8;
    config.source.sensor_noise_level = 0.2;

    let a = Simulation::new(&config).unwrap().run().unwrap();
    let b = Simulation::new(&config).unwrap().run().unwrap();
    assert_eq!(a.source.samples(), b.source.samples());
    assert_eq!(a.response.powers(), b.response.powers());
    assert_eq!(a.beam_spectrogram, b.beam_spectrogram);
}

#[test]
fn test_beam_spectrogram_shows_fundamental() {
    let report = Simulation::new(&seeded_default(2.0)).unwrap().run().unwrap();
    let spectrogram = &report.beam_spectrogram;

    // (2000 - 256) / 128 + 1 segments, 256 / 2 + 1 bins
    assert_eq!(spectrogram.num_time_bins(), 14);
    assert_eq!(spectrogram.num_frequency_bins(), 129);

    for t in 0..spectrogram.num_time_bins() {
        let peak = spectrogram.peak_frequency_hz(t).unwrap();
        assert!((peak - 50.0).abs() < 4.0, "segment {} peaks at {} Hz", t, peak);
    }
}

#[test]
fn test_config_file_drives_simulation() {
    let dir = scratch_dir("config");
    let path = dir.join("scenario.toml");
    std::fs::write(
        &path,
        r#"
[array]
num_sensors = 12
sensor_spacing_m = 3.0

[source]
bearing_rad = -0.5235987755982988

[signal]
sample_rate_hz = 2000
duration_s = 1.0
base_freq_hz = 100.0
harmonics = []
noise_level = 0.0

[spectrogram]
window_size = 128
overlap = 64
window = "hamming"
"#,
    )
    .unwrap();

    let config = SimConfig::load(&path).unwrap();
    assert_eq!(config.array.num_sensors, 12);
    assert_eq!(config.spectrogram.window, WindowKind::Hamming);

    let report = Simulation::new(&config).unwrap().run().unwrap();
    assert_eq!(report.sensors.num_sensors(), 12);
    assert_eq!(report.beam_spectrogram.num_frequency_bins(), 65);
    assert!(report.bearing_error_rad().abs() <= 1f64.to_radians() + 1e-9);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_missing_config_file() {
    let result = SimConfig::load("/nonexistent/lofarsim/scenario.toml");
    assert!(matches!(result, Err(SimError::Io(_))));
}

#[test]
fn test_exports() {
    let mut config = seeded_default(1.0);
    config.array.num_sensors = 8;
    let report = Simulation::new(&config).unwrap().run().unwrap();

    let mut buf = Vec::new();
    write_response_csv(&mut buf, &report.response).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("angle_rad,angle_deg,power"));
    assert_eq!(lines.count(), report.response.len());

    let mut buf = Vec::new();
    write_spectrogram_csv(&mut buf, &report.raw_spectrogram).unwrap();
    let rows = String::from_utf8(buf).unwrap().lines().count() - 1;
    assert_eq!(
        rows,
        report.raw_spectrogram.num_time_bins() * report.raw_spectrogram.num_frequency_bins()
    );

    let json = create_formatter(OutputFormat::Json, false).format(&report.response);
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["points"].as_array().unwrap().len(), 181);

    let dir = scratch_dir("wav");
    let path = dir.join("beam.wav");
    save_wav(&path, &report.beam.waveform).unwrap();
    let reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().sample_rate, 1000);
    assert_eq!(reader.len() as usize, report.beam.waveform.len());
    std::fs::remove_dir_all(&dir).ok();
}
