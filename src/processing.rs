use crate::array::{ArraySpec, SensorNoiseConfig, propagate_plane_wave};
use crate::beamforming::{BeamformResult, BearingResponse, BearingScanner, ScanRange};
use crate::config::SimConfig;
use crate::error::{Result, SimError, SimWarning};
use crate::signal_processing::{Spectrogram, SpectrogramRenderer, angle_error};
use crate::simulation::SignalSynthesizer;
use crate::waveform::{SensorSignalSet, Waveform};

/// Everything produced by one simulation run
#[derive(Debug, Clone)]
pub struct SimulationReport {
    /// Configured arrival angle of the simulated source
    pub true_bearing_rad: f64,
    /// Source waveform before propagation
    pub source: Waveform,
    /// Per-hydrophone received signals
    pub sensors: SensorSignalSet,
    /// Power versus steering angle
    pub response: BearingResponse,
    /// Beam steered at the inferred bearing
    pub beam: BeamformResult,
    /// Lofargram of the reference hydrophone (sensor 0)
    pub raw_spectrogram: Spectrogram,
    /// Lofargram of the steered beam
    pub beam_spectrogram: Spectrogram,
    /// Non-fatal diagnostics raised along the way
    pub warnings: Vec<SimWarning>,
}

impl SimulationReport {
    pub fn estimated_bearing_rad(&self) -> f64 {
        self.response.best_angle()
    }

    /// Signed error of the estimate against the configured bearing
    pub fn bearing_error_rad(&self) -> f64 {
        angle_error(self.estimated_bearing_rad(), self.true_bearing_rad)
    }

    /// Beam power over single-sensor power at the inferred bearing
    pub fn array_gain(&self) -> Option<f64> {
        let reference = self.sensors.sensor(0)?.power();
        (reference > 0.0).then(|| self.beam.power / reference)
    }
}

/// Synthesize, propagate, scan and render from one [`SimConfig`]
///
/// All parameters are validated in [`Simulation::new`], so a constructed
/// simulation only fails at run time on data-dependent conditions such
/// as a signal shorter than the spectrogram window.
#[derive(Debug)]
pub struct Simulation {
    synthesizer: SignalSynthesizer,
    array: ArraySpec,
    scanner: BearingScanner,
    range: ScanRange,
    renderer: SpectrogramRenderer,
    bearing_rad: f64,
    sensor_noise: Option<SensorNoiseConfig>,
    warnings: Vec<SimWarning>,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Self> {
        let array = ArraySpec::from_config(&config.array)?;
        let synthesizer = SignalSynthesizer::new(config.signal.clone())?;
        let range = ScanRange::from_config(&config.scan)?;
        let renderer = SpectrogramRenderer::new(&config.spectrogram)?;

        let bearing_rad = config.source.bearing_rad;
        if !bearing_rad.is_finite() {
            return Err(SimError::Config(format!(
                "source bearing must be finite, got {}",
                bearing_rad
            )));
        }

        let level = config.source.sensor_noise_level;
        if !level.is_finite() || level < 0.0 {
            return Err(SimError::Config(format!(
                "sensor noise level must be non-negative, got {}",
                level
            )));
        }
        let sensor_noise = (level > 0.0).then(|| SensorNoiseConfig {
            level,
            // Offset so sensor noise never replays the source noise stream
            seed: config.signal.random_seed.map(|s| s.wrapping_add(1)),
        });

        let mut warnings = Vec::new();
        let sample_rate_hz = config.signal.sample_rate_hz;
        let required_hz = array.min_interpolation_rate_hz(range.step_rad());
        if (sample_rate_hz as f64) < required_hz {
            let warning = SimWarning::InterpolationLimited {
                sample_rate_hz,
                required_hz,
            };
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        Ok(Self {
            synthesizer,
            array,
            scanner: BearingScanner::new(array),
            range,
            renderer,
            bearing_rad,
            sensor_noise,
            warnings,
        })
    }

    pub fn array(&self) -> &ArraySpec {
        &self.array
    }

    /// Diagnostics raised while validating the configuration
    pub fn warnings(&self) -> &[SimWarning] {
        &self.warnings
    }

    pub fn run(&self) -> Result<SimulationReport> {
        let synthesis = self.synthesizer.generate()?;
        log::info!(
            "Source: {:.2} s at {} Hz, {} component(s)",
            synthesis.waveform.duration(),
            synthesis.waveform.sample_rate(),
            self.synthesizer.component_frequencies().len()
        );

        let sensors = propagate_plane_wave(
            &synthesis.waveform,
            &self.array,
            self.bearing_rad,
            self.sensor_noise.as_ref(),
        )?;
        log::info!(
            "Propagated to {} hydrophones ({:.1} m aperture) from {:.2}°",
            sensors.num_sensors(),
            self.array.aperture_m(),
            self.bearing_rad.to_degrees()
        );

        let response = self.scanner.scan(&sensors, &self.range)?;
        let estimate = response.best_angle();
        log::info!(
            "Scanned {} angles, peak at {:.2}° (error {:+.2}°)",
            response.len(),
            estimate.to_degrees(),
            angle_error(estimate, self.bearing_rad).to_degrees()
        );

        let beam = self.scanner.beamformer().form_beam(&sensors, estimate)?;
        let reference = &sensors.signals()[0];
        let raw_spectrogram = self.renderer.render(reference)?;
        let beam_spectrogram = self.renderer.render(&beam.waveform)?;

        Ok(SimulationReport {
            true_bearing_rad: self.bearing_rad,
            source: synthesis.waveform,
            sensors,
            response,
            beam,
            raw_spectrogram,
            beam_spectrogram,
            warnings: self.warnings.iter().cloned().chain(synthesis.warnings).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> SimConfig {
        let mut config = SimConfig::default();
        config.array.num_sensors = 16;
        config.signal.duration_s = 1.0;
        config.signal.noise_level = 0.0;
        config.signal.random_seed = Some(5);
        config
    }

    #[test]
    fn test_invalid_config_rejected_up_front() {
        let mut config = small_config();
        config.array.num_sensors = 1;
        assert!(Simulation::new(&config).is_err());

        let mut config = small_config();
        config.scan.step_rad = 0.0;
        assert!(Simulation::new(&config).is_err());

        let mut config = small_config();
        config.source.sensor_noise_level = -1.0;
        assert!(Simulation::new(&config).is_err());
    }

    #[test]
    fn test_report_shapes() {
        let report = Simulation::new(&small_config()).unwrap().run().unwrap();
        assert_eq!(report.sensors.num_sensors(), 16);
        assert_eq!(report.response.len(), 181);
        assert_eq!(report.beam.waveform.len(), report.source.len());
        assert_eq!(
            report.raw_spectrogram.num_time_bins(),
            report.beam_spectrogram.num_time_bins()
        );
        // 16 x 6 m resolves 1° steps only from about 2.2 kHz
        assert!(matches!(
            report.warnings.as_slice(),
            [SimWarning::InterpolationLimited {
                sample_rate_hz: 1000,
                ..
            }]
        ));
    }

    #[test]
    fn test_default_array_needs_no_interpolation_warning() {
        let mut config = small_config();
        config.array.num_sensors = 40;
        let sim = Simulation::new(&config).unwrap();
        assert!(sim.warnings().is_empty());

        config.signal.sample_rate_hz = 4000;
        config.array.num_sensors = 16;
        assert!(Simulation::new(&config).unwrap().warnings().is_empty());
    }

    #[test]
    fn test_short_signal_fails_at_render() {
        let mut config = small_config();
        config.signal.duration_s = 0.1;
        let sim = Simulation::new(&config).unwrap();
        assert!(matches!(
            sim.run(),
            Err(SimError::InsufficientData { .. })
        ));
    }
}
