//! Short-time Fourier magnitude spectrogram (lofargram)
//!
//! Each segment of `window_size` samples, advanced by
//! `window_size - overlap`, is mean-detrended, windowed and transformed.
//! Only the non-negative frequency bins `0..=window_size/2` are kept.
//!
//! Magnitudes are a single-sided amplitude spectrum normalised by the
//! window sum, so a unit-amplitude sinusoid centred on a bin reads close
//! to 1.0 regardless of window choice.

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f64::consts::PI;
use std::fmt;
use std::sync::Arc;

use crate::config::{SpectrogramConfig, WindowKind};
use crate::error::{Result, SimError};
use crate::signal_processing::math::amplitude_to_db;
use crate::waveform::Waveform;

/// Time-frequency magnitude grid indexed `[time_bin][frequency_bin]`
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Spectrogram {
    /// Segment centre times in seconds
    pub times_s: Vec<f64>,
    /// Bin centre frequencies in Hz
    pub frequencies_hz: Vec<f64>,
    /// Amplitude per (time, frequency) bin
    pub magnitudes: Vec<Vec<f64>>,
}

impl Spectrogram {
    pub fn num_time_bins(&self) -> usize {
        self.times_s.len()
    }

    pub fn num_frequency_bins(&self) -> usize {
        self.frequencies_hz.len()
    }

    pub fn magnitude(&self, time_bin: usize, frequency_bin: usize) -> Option<f64> {
        self.magnitudes.get(time_bin)?.get(frequency_bin).copied()
    }

    /// Magnitudes in dB (`20 log10`), floored to stay finite
    pub fn to_db(&self) -> Vec<Vec<f64>> {
        self.magnitudes
            .iter()
            .map(|row| row.iter().map(|&m| amplitude_to_db(m)).collect())
            .collect()
    }

    /// Frequency of the strongest bin in `time_bin`
    pub fn peak_frequency_hz(&self, time_bin: usize) -> Option<f64> {
        let row = self.magnitudes.get(time_bin)?;
        let mut best: Option<(usize, f64)> = None;
        for (k, &m) in row.iter().enumerate() {
            if best.is_none_or(|(_, b)| m > b) {
                best = Some((k, m));
            }
        }
        best.map(|(k, _)| self.frequencies_hz[k])
    }

    /// Iterate `(time_s, frequency_hz, magnitude)` in time-major order
    pub fn triples(&self) -> impl Iterator<Item = (f64, f64, f64)> + '_ {
        self.times_s
            .iter()
            .zip(self.magnitudes.iter())
            .flat_map(move |(&t, row)| {
                self.frequencies_hz
                    .iter()
                    .zip(row.iter())
                    .map(move |(&f, &m)| (t, f, m))
            })
    }
}

/// STFT-based spectrogram renderer
pub struct SpectrogramRenderer {
    window_size: usize,
    hop_size: usize,
    window: Vec<f64>,
    window_sum: f64,
    fft: Arc<dyn Fft<f64>>,
}

impl fmt::Debug for SpectrogramRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectrogramRenderer")
            .field("window_size", &self.window_size)
            .field("hop_size", &self.hop_size)
            .finish()
    }
}

impl SpectrogramRenderer {
    pub fn new(config: &SpectrogramConfig) -> Result<Self> {
        if config.window_size < 2 {
            return Err(SimError::Config(format!(
                "spectrogram window must be at least 2 samples, got {}",
                config.window_size
            )));
        }
        if config.overlap >= config.window_size {
            return Err(SimError::Config(format!(
                "spectrogram overlap ({}) must be smaller than the window ({})",
                config.overlap, config.window_size
            )));
        }

        let window = make_window(config.window, config.window_size);
        let window_sum = window.iter().sum::<f64>();
        let fft = FftPlanner::new().plan_fft_forward(config.window_size);

        Ok(Self {
            window_size: config.window_size,
            hop_size: config.window_size - config.overlap,
            window,
            window_sum,
            fft,
        })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Render `waveform` into a magnitude spectrogram
    pub fn render(&self, waveform: &Waveform) -> Result<Spectrogram> {
        let samples = waveform.samples();
        if samples.len() < self.window_size {
            return Err(SimError::InsufficientData {
                needed: self.window_size,
                available: samples.len(),
            });
        }

        let sample_rate = waveform.sample_rate() as f64;
        let num_segments = 1 + (samples.len() - self.window_size) / self.hop_size;
        let num_bins = self.window_size / 2 + 1;

        let frequencies_hz = (0..num_bins)
            .map(|k| k as f64 * sample_rate / self.window_size as f64)
            .collect();

        let mut times_s = Vec::with_capacity(num_segments);
        let mut magnitudes = Vec::with_capacity(num_segments);
        let mut buffer = vec![Complex::new(0.0, 0.0); self.window_size];

        for segment in 0..num_segments {
            let start = segment * self.hop_size;
            let frame = &samples[start..start + self.window_size];
            let mean = frame.iter().sum::<f64>() / self.window_size as f64;

            for ((slot, &x), &w) in buffer.iter_mut().zip(frame).zip(&self.window) {
                *slot = Complex::new((x - mean) * w, 0.0);
            }
            self.fft.process(&mut buffer);

            let row = buffer[..num_bins]
                .iter()
                .enumerate()
                .map(|(k, bin)| {
                    let single_sided = if k == 0 || 2 * k == self.window_size {
                        1.0
                    } else {
                        2.0
                    };
                    single_sided * bin.norm() / self.window_sum
                })
                .collect();

            times_s.push((start as f64 + self.window_size as f64 / 2.0) / sample_rate);
            magnitudes.push(row);
        }

        log::debug!(
            "Spectrogram: {} segments x {} bins ({} Hz resolution)",
            num_segments,
            num_bins,
            sample_rate / self.window_size as f64
        );

        Ok(Spectrogram {
            times_s,
            frequencies_hz,
            magnitudes,
        })
    }
}

fn make_window(kind: WindowKind, size: usize) -> Vec<f64> {
    let denom = (size - 1) as f64;
    match kind {
        WindowKind::Hann => (0..size)
            .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos()))
            .collect(),
        WindowKind::Hamming => (0..size)
            .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / denom).cos())
            .collect(),
        WindowKind::Rectangular => vec![1.0; size],
    }
}
