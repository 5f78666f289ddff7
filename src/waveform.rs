use crate::error::{Result, SimError};
use crate::signal_processing::math::mean_square;

/// Sampled real-valued signal at a fixed sample rate
///
/// Immutable once built: producers hand it over by value and consumers
/// only ever borrow the samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    sample_rate: u32,
    samples: Vec<f64>,
}

impl Waveform {
    /// Wrap `samples` taken at `sample_rate` Hz
    ///
    /// Empty sample vectors are allowed; stages that need data reject
    /// them themselves.
    pub fn new(sample_rate: u32, samples: Vec<f64>) -> Result<Self> {
        if sample_rate == 0 {
            return Err(SimError::Config(
                "sample rate must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            sample_rate,
            samples,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (`len / sample_rate`)
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Mean squared amplitude
    pub fn power(&self) -> f64 {
        mean_square(&self.samples)
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

/// One waveform per sensor, all sharing length and sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSignalSet {
    signals: Vec<Waveform>,
}

impl SensorSignalSet {
    /// Build a set, rejecting empty input or mismatched shapes
    pub fn new(signals: Vec<Waveform>) -> Result<Self> {
        let Some(first) = signals.first() else {
            return Err(SimError::ShapeMismatch(
                "sensor signal set must contain at least one waveform".to_string(),
            ));
        };
        let (rate, len) = (first.sample_rate(), first.len());

        for (index, signal) in signals.iter().enumerate().skip(1) {
            if signal.sample_rate() != rate {
                return Err(SimError::ShapeMismatch(format!(
                    "sensor {} has sample rate {} Hz, sensor 0 has {} Hz",
                    index,
                    signal.sample_rate(),
                    rate
                )));
            }
            if signal.len() != len {
                return Err(SimError::ShapeMismatch(format!(
                    "sensor {} has {} samples, sensor 0 has {}",
                    index,
                    signal.len(),
                    len
                )));
            }
        }

        Ok(Self { signals })
    }

    pub fn num_sensors(&self) -> usize {
        self.signals.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.signals[0].sample_rate()
    }

    /// Samples per sensor
    pub fn signal_len(&self) -> usize {
        self.signals[0].len()
    }

    pub fn signals(&self) -> &[Waveform] {
        &self.signals
    }

    pub fn sensor(&self, index: usize) -> Option<&Waveform> {
        self.signals.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Waveform> {
        self.signals.iter()
    }
}
