use std::f64::consts::PI;

use crate::config::SignalConfig;
use crate::error::{Result, SimError, SimWarning};
use crate::waveform::Waveform;

use super::noise::{add_gaussian_noise, create_rng};

/// Synthesized waveform together with any non-fatal diagnostics
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub waveform: Waveform,
    pub warnings: Vec<SimWarning>,
}

impl Synthesis {
    pub fn has_nyquist_violation(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, SimWarning::NyquistViolation { .. }))
    }
}

/// Tonal source generator
///
/// Produces a unit-amplitude fundamental plus configured harmonics,
/// optionally amplitude-modulated and with additive Gaussian noise.
/// With `random_seed` set, every call to [`generate`](Self::generate)
/// yields bit-identical output.
#[derive(Debug, Clone)]
pub struct SignalSynthesizer {
    config: SignalConfig,
}

impl SignalSynthesizer {
    /// Validate `config` and build a synthesizer
    ///
    /// Rejects a zero sample rate, a duration that rounds to no samples,
    /// a non-positive fundamental, negative noise level and out-of-range
    /// modulation. Components at or
    /// above Nyquist are only rejected when `strict_nyquist` is set;
    /// otherwise they are reported by [`generate`](Self::generate).
    pub fn new(config: SignalConfig) -> Result<Self> {
        if config.sample_rate_hz == 0 {
            return Err(SimError::Config(
                "sample rate must be greater than zero".to_string(),
            ));
        }
        if !config.duration_s.is_finite() || config.duration_s <= 0.0 {
            return Err(SimError::Config(format!(
                "duration must be positive, got {} s",
                config.duration_s
            )));
        }
        if !config.base_freq_hz.is_finite() || config.base_freq_hz <= 0.0 {
            return Err(SimError::Config(format!(
                "base frequency must be positive, got {} Hz",
                config.base_freq_hz
            )));
        }
        if !config.noise_level.is_finite() || config.noise_level < 0.0 {
            return Err(SimError::Config(format!(
                "noise level must be non-negative, got {}",
                config.noise_level
            )));
        }
        for (index, h) in config.harmonics.iter().enumerate() {
            if !h.multiplier.is_finite() || h.multiplier <= 0.0 {
                return Err(SimError::Config(format!(
                    "harmonic {} multiplier must be positive, got {}",
                    index, h.multiplier
                )));
            }
            if !h.amplitude.is_finite() || !h.phase_rad.is_finite() {
                return Err(SimError::Config(format!(
                    "harmonic {} amplitude and phase must be finite",
                    index
                )));
            }
        }
        if let Some(m) = config.modulation {
            if !m.rate_hz.is_finite() || m.rate_hz < 0.0 {
                return Err(SimError::Config(format!(
                    "modulation rate must be non-negative, got {} Hz",
                    m.rate_hz
                )));
            }
            if !(0.0..=1.0).contains(&m.depth) {
                return Err(SimError::Config(format!(
                    "modulation depth must be within 0-1, got {}",
                    m.depth
                )));
            }
        }

        let synth = Self { config };
        if synth.num_samples() == 0 {
            return Err(SimError::Config(format!(
                "duration {} s is shorter than one sample at {} Hz",
                synth.config.duration_s, synth.config.sample_rate_hz
            )));
        }
        if synth.config.strict_nyquist
            && let Some(warning) = synth.nyquist_warnings().into_iter().next()
        {
            return Err(SimError::Config(warning.to_string()));
        }
        Ok(synth)
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// Number of samples produced (`round(duration * sample_rate)`)
    pub fn num_samples(&self) -> usize {
        (self.config.duration_s * self.config.sample_rate_hz as f64).round() as usize
    }

    /// Frequencies of every tonal component, fundamental first
    pub fn component_frequencies(&self) -> Vec<f64> {
        std::iter::once(self.config.base_freq_hz)
            .chain(
                self.config
                    .harmonics
                    .iter()
                    .map(|h| h.multiplier * self.config.base_freq_hz),
            )
            .collect()
    }

    fn nyquist_warnings(&self) -> Vec<SimWarning> {
        let nyquist_hz = self.config.sample_rate_hz as f64 / 2.0;
        self.component_frequencies()
            .into_iter()
            .filter(|&f| f >= nyquist_hz)
            .map(|frequency_hz| SimWarning::NyquistViolation {
                frequency_hz,
                nyquist_hz,
            })
            .collect()
    }

    /// Generate the source waveform
    pub fn generate(&self) -> Result<Synthesis> {
        let warnings = self.nyquist_warnings();
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        let cfg = &self.config;
        let sample_rate = cfg.sample_rate_hz as f64;
        let omega = 2.0 * PI * cfg.base_freq_hz;

        let mut samples: Vec<f64> = (0..self.num_samples())
            .map(|i| {
                let t = i as f64 / sample_rate;
                let tonal = (omega * t).sin()
                    + cfg
                        .harmonics
                        .iter()
                        .map(|h| h.amplitude * (h.multiplier * omega * t + h.phase_rad).sin())
                        .sum::<f64>();
                let envelope = cfg
                    .modulation
                    .map_or(1.0, |m| 1.0 + m.depth * (2.0 * PI * m.rate_hz * t).sin());
                tonal * envelope
            })
            .collect();

        if cfg.noise_level > 0.0 {
            let mut rng = create_rng(cfg.random_seed);
            add_gaussian_noise(&mut samples, cfg.noise_level, &mut rng)?;
        }

        log::debug!(
            "Synthesized {} samples at {} Hz ({} components, noise {})",
            samples.len(),
            cfg.sample_rate_hz,
            1 + cfg.harmonics.len(),
            cfg.noise_level
        );

        Ok(Synthesis {
            waveform: Waveform::new(cfg.sample_rate_hz, samples)?,
            warnings,
        })
    }
}
