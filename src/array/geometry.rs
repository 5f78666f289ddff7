use crate::config::ArrayConfig;
use crate::error::{Result, SimError};

/// Uniform linear hydrophone array
///
/// Sensor `i` sits at `i * spacing_m` along the array axis. Steering
/// angles are measured from broadside: `0` is perpendicular to the axis
/// and positive angles tilt toward increasing sensor index, so a plane
/// wave from a positive angle reaches sensor 0 first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArraySpec {
    num_sensors: usize,
    spacing_m: f64,
    speed_mps: f64,
}

impl ArraySpec {
    /// Create an array of `num_sensors` elements
    ///
    /// # Arguments
    /// * `num_sensors` - Number of hydrophones (at least 2)
    /// * `spacing_m` - Inter-element spacing in meters
    /// * `speed_mps` - Propagation speed of the medium in m/s
    pub fn new(num_sensors: usize, spacing_m: f64, speed_mps: f64) -> Result<Self> {
        if num_sensors < 2 {
            return Err(SimError::Config(format!(
                "array needs at least 2 sensors to beamform, got {}",
                num_sensors
            )));
        }
        if !spacing_m.is_finite() || spacing_m <= 0.0 {
            return Err(SimError::Config(format!(
                "sensor spacing must be positive, got {} m",
                spacing_m
            )));
        }
        if !speed_mps.is_finite() || speed_mps <= 0.0 {
            return Err(SimError::Config(format!(
                "propagation speed must be positive, got {} m/s",
                speed_mps
            )));
        }
        Ok(Self {
            num_sensors,
            spacing_m,
            speed_mps,
        })
    }

    pub fn from_config(config: &ArrayConfig) -> Result<Self> {
        Self::new(
            config.num_sensors,
            config.sensor_spacing_m,
            config.propagation_speed_mps,
        )
    }

    pub fn num_sensors(&self) -> usize {
        self.num_sensors
    }

    pub fn spacing_m(&self) -> f64 {
        self.spacing_m
    }

    pub fn speed_mps(&self) -> f64 {
        self.speed_mps
    }

    /// Per-sensor arrival delay in seconds relative to sensor 0
    ///
    /// `delay_i = i * d * sin(angle) / c`. Sensor 0 is always exactly zero.
    pub fn delays_for_angle(&self, angle_rad: f64) -> Vec<f64> {
        let per_sensor = self.spacing_m * angle_rad.sin() / self.speed_mps;
        (0..self.num_sensors)
            .map(|i| i as f64 * per_sensor)
            .collect()
    }

    /// Sensor positions along the array axis in meters
    pub fn sensor_positions(&self) -> Vec<f64> {
        (0..self.num_sensors)
            .map(|i| i as f64 * self.spacing_m)
            .collect()
    }

    /// Distance between the first and last sensor
    pub fn aperture_m(&self) -> f64 {
        (self.num_sensors - 1) as f64 * self.spacing_m
    }

    /// Largest delay magnitude any steering angle can produce (end-fire)
    pub fn max_abs_delay_s(&self) -> f64 {
        self.aperture_m() / self.speed_mps
    }

    /// Sample rate above which fractional-delay loss cannot move the scan peak
    ///
    /// Linear interpolation at a half-sample offset, applied once to
    /// propagate and once to steer, costs a tone about `ω² / 2` of its
    /// power (`ω = 2πf / fs`). One `step_rad` off the broadside peak the
    /// main lobe drops by `(N² - 1) / 12 · (2πf d step / c)²`. Both grow
    /// with `f²`, so the crossover `c / (d step) · √(6 / (N² - 1))` holds
    /// for every tonal component. It is a worst-case bound: below it the
    /// peak can land on the wrong step, above it it cannot.
    pub fn min_interpolation_rate_hz(&self, step_rad: f64) -> f64 {
        let n = self.num_sensors as f64;
        self.speed_mps / (self.spacing_m * step_rad) * (6.0 / (n * n - 1.0)).sqrt()
    }

    /// Approximate main-lobe half-width at `freq_hz`, in radians at broadside
    ///
    /// Uses `asin(λ / (N d))`, clamped to π/2 once the array is too short
    /// relative to the wavelength to form a null.
    pub fn beamwidth_rad(&self, freq_hz: f64) -> f64 {
        let wavelength = self.speed_mps / freq_hz;
        let ratio = wavelength / (self.num_sensors as f64 * self.spacing_m);
        if ratio >= 1.0 {
            std::f64::consts::FRAC_PI_2
        } else {
            ratio.asin()
        }
    }
}
