use lofarsim::array::{ArraySpec, propagate_plane_wave};
use lofarsim::config::SignalConfig;
use lofarsim::simulation::SignalSynthesizer;
use lofarsim::{SensorSignalSet, Waveform};

/// Noise-free single-tone source configuration
pub fn tone_config(freq_hz: f64, sample_rate: u32, duration_secs: f64) -> SignalConfig {
    SignalConfig {
        sample_rate_hz: sample_rate,
        duration_s: duration_secs,
        base_freq_hz: freq_hz,
        harmonics: Vec::new(),
        modulation: None,
        noise_level: 0.0,
        random_seed: None,
        strict_nyquist: false,
    }
}

/// Unit-amplitude sine through the synthesizer
pub fn tone(freq_hz: f64, sample_rate: u32, duration_secs: f64) -> Waveform {
    SignalSynthesizer::new(tone_config(freq_hz, sample_rate, duration_secs))
        .expect("valid tone config")
        .generate()
        .expect("tone synthesis")
        .waveform
}

/// Noise-free plane wave from `bearing_degrees` received by `array`
pub fn plane_wave_sensors(
    array: &ArraySpec,
    freq_hz: f64,
    sample_rate: u32,
    duration_secs: f64,
    bearing_degrees: f64,
) -> SensorSignalSet {
    let source = tone(freq_hz, sample_rate, duration_secs);
    propagate_plane_wave(&source, array, bearing_degrees.to_radians(), None)
        .expect("plane wave propagation")
}
