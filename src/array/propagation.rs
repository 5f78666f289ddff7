use crate::error::Result;
use crate::signal_processing::apply_delay;
use crate::simulation::{add_gaussian_noise, create_rng};
use crate::waveform::{SensorSignalSet, Waveform};

use super::ArraySpec;

/// Independent per-hydrophone noise
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorNoiseConfig {
    /// Standard deviation of the added noise
    pub level: f64,
    /// Base seed; sensor `i` draws from `seed + i`
    pub seed: Option<u64>,
}

/// Replicate `source` across `array` as a plane wave arriving from `bearing_rad`
///
/// Each sensor receives the source delayed by its geometric delay for
/// `bearing_rad`. With `noise`, every sensor also gets its own
/// uncorrelated Gaussian noise.
pub fn propagate_plane_wave(
    source: &Waveform,
    array: &ArraySpec,
    bearing_rad: f64,
    noise: Option<&SensorNoiseConfig>,
) -> Result<SensorSignalSet> {
    let delays = array.delays_for_angle(bearing_rad);

    log::debug!(
        "Propagating {:.2}° plane wave across {} sensors (max delay {:.3} ms)",
        bearing_rad.to_degrees(),
        array.num_sensors(),
        delays.last().copied().unwrap_or(0.0) * 1e3
    );

    let signals = delays
        .iter()
        .enumerate()
        .map(|(index, &delay)| {
            let received = apply_delay(source, delay)?;
            match noise {
                Some(n) if n.level > 0.0 => {
                    let mut samples = received.into_samples();
                    let mut rng = create_rng(n.seed.map(|s| s.wrapping_add(index as u64)));
                    add_gaussian_noise(&mut samples, n.level, &mut rng)?;
                    Waveform::new(source.sample_rate(), samples)
                }
                _ => Ok(received),
            }
        })
        .collect::<Result<Vec<_>>>()?;

    SensorSignalSet::new(signals)
}
