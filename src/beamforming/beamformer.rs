use crate::array::ArraySpec;
use crate::error::{Result, SimError};
use crate::signal_processing::{FractionalDelay, mean_square};
use crate::waveform::{SensorSignalSet, Waveform};

/// Output of one delay-and-sum steering
#[derive(Debug, Clone, PartialEq)]
pub struct BeamformResult {
    /// Steering angle in radians from broadside
    pub angle_rad: f64,
    /// Aligned, summed and N-normalized signal
    pub waveform: Waveform,
    /// Mean squared amplitude of `waveform`
    pub power: f64,
}

/// Delay-and-sum beamformer for a uniform linear array
///
/// Steering at angle θ advances each sensor by its geometric delay for θ
/// (applies the negated delay), sums the aligned signals and divides by
/// the sensor count. The 1/N normalization keeps `power` comparable
/// across array sizes: N identical inputs return that input unchanged.
#[derive(Debug, Clone, Copy)]
pub struct Beamformer {
    array: ArraySpec,
}

impl Beamformer {
    pub fn new(array: ArraySpec) -> Self {
        Self { array }
    }

    pub fn array(&self) -> &ArraySpec {
        &self.array
    }

    /// Steer the array at `angle_rad` and combine `sensors`
    pub fn form_beam(&self, sensors: &SensorSignalSet, angle_rad: f64) -> Result<BeamformResult> {
        self.check_shape(sensors)?;

        let sample_rate = sensors.sample_rate();
        let len = sensors.signal_len();
        if len == 0 {
            return Err(SimError::EmptyWaveform);
        }

        let mut sum = vec![0.0; len];
        for (signal, delay) in sensors
            .iter()
            .zip(self.array.delays_for_angle(angle_rad))
        {
            let aligned = FractionalDelay::from_seconds(-delay, sample_rate)?.apply(signal.samples());
            for (acc, x) in sum.iter_mut().zip(aligned) {
                *acc += x;
            }
        }

        let n = self.array.num_sensors() as f64;
        for acc in sum.iter_mut() {
            *acc /= n;
        }

        let power = mean_square(&sum);
        Ok(BeamformResult {
            angle_rad,
            waveform: Waveform::new(sample_rate, sum)?,
            power,
        })
    }

    fn check_shape(&self, sensors: &SensorSignalSet) -> Result<()> {
        if sensors.num_sensors() != self.array.num_sensors() {
            return Err(SimError::ShapeMismatch(format!(
                "array has {} sensors but {} signals were supplied",
                self.array.num_sensors(),
                sensors.num_sensors()
            )));
        }
        Ok(())
    }
}

/// Delay-and-sum `sensors` for `array` steered at `angle_rad`
pub fn form_beam(
    sensors: &SensorSignalSet,
    array: &ArraySpec,
    angle_rad: f64,
) -> Result<BeamformResult> {
    Beamformer::new(*array).form_beam(sensors, angle_rad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn tone_set(copies: usize) -> SensorSignalSet {
        let w = Waveform::new(
            1000,
            (0..500).map(|i| (i as f64 * 0.3).sin()).collect(),
        )
        .unwrap();
        SensorSignalSet::new(vec![w; copies]).unwrap()
    }

    #[test]
    fn test_identical_signals_at_broadside_return_input() {
        let array = ArraySpec::new(6, 1.0, 1500.0).unwrap();
        let sensors = tone_set(6);
        let result = form_beam(&sensors, &array, 0.0).unwrap();
        for (out, input) in result
            .waveform
            .samples()
            .iter()
            .zip(sensors.signals()[0].samples())
        {
            assert_abs_diff_eq!(*out, *input, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(result.power, sensors.signals()[0].power(), epsilon = 1e-12);
    }

    #[test]
    fn test_sensor_count_mismatch() {
        let array = ArraySpec::new(4, 1.0, 1500.0).unwrap();
        let result = form_beam(&tone_set(3), &array, 0.0);
        assert!(matches!(result, Err(SimError::ShapeMismatch(_))));
    }

    #[test]
    fn test_deterministic() {
        let array = ArraySpec::new(4, 1.0, 1500.0).unwrap();
        let sensors = tone_set(4);
        let a = form_beam(&sensors, &array, 0.4).unwrap();
        let b = form_beam(&sensors, &array, 0.4).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_result_keeps_shape_and_angle() {
        let array = ArraySpec::new(4, 1.0, 1500.0).unwrap();
        let result = form_beam(&tone_set(4), &array, -0.2).unwrap();
        assert_eq!(result.waveform.len(), 500);
        assert_eq!(result.waveform.sample_rate(), 1000);
        assert_eq!(result.angle_rad, -0.2);
    }
}
