use serde::Serialize;

use crate::array::ArraySpec;
use crate::config::ScanConfig;
use crate::constants::{MAX_SCAN_POINTS, SCAN_ENDPOINT_TOLERANCE};
use crate::error::{Result, SimError};
use crate::signal_processing::power_to_db;
use crate::waveform::SensorSignalSet;

use super::Beamformer;

/// Validated, inclusive sweep of steering angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanRange {
    start_rad: f64,
    end_rad: f64,
    step_rad: f64,
    count: usize,
}

impl ScanRange {
    /// Sweep from `start_rad` to `end_rad` in increments of `step_rad`
    ///
    /// The end angle is included when it lies on a step boundary. A
    /// non-positive step or an inverted range is a configuration error.
    pub fn new(start_rad: f64, end_rad: f64, step_rad: f64) -> Result<Self> {
        if !start_rad.is_finite() || !end_rad.is_finite() || !step_rad.is_finite() {
            return Err(SimError::Config(
                "scan range and step must be finite".to_string(),
            ));
        }
        if step_rad <= 0.0 {
            return Err(SimError::Config(format!(
                "scan step must be positive, got {} rad",
                step_rad
            )));
        }
        if end_rad < start_rad {
            return Err(SimError::Config(format!(
                "scan range is inverted: end {} rad < start {} rad",
                end_rad, start_rad
            )));
        }

        let steps = ((end_rad - start_rad) / step_rad + SCAN_ENDPOINT_TOLERANCE).floor();
        if steps >= MAX_SCAN_POINTS as f64 {
            return Err(SimError::Config(format!(
                "scan would evaluate more than {} angles",
                MAX_SCAN_POINTS
            )));
        }

        Ok(Self {
            start_rad,
            end_rad,
            step_rad,
            count: steps as usize + 1,
        })
    }

    pub fn from_config(config: &ScanConfig) -> Result<Self> {
        Self::new(config.start_rad, config.end_rad, config.step_rad)
    }

    pub fn start_rad(&self) -> f64 {
        self.start_rad
    }

    pub fn end_rad(&self) -> f64 {
        self.end_rad
    }

    pub fn step_rad(&self) -> f64 {
        self.step_rad
    }

    /// Number of angles in the sweep (always at least 1)
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Angle at sweep position `index`, computed without accumulation
    pub fn angle(&self, index: usize) -> f64 {
        self.start_rad + index as f64 * self.step_rad
    }

    pub fn angles(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(|i| self.angle(i))
    }
}

/// Output power at one steering angle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BearingPoint {
    pub angle_rad: f64,
    pub power: f64,
}

impl BearingPoint {
    pub fn angle_deg(&self) -> f64 {
        self.angle_rad.to_degrees()
    }
}

/// Angle-power table from one scan, in ascending angle order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BearingResponse {
    points: Vec<BearingPoint>,
}

impl BearingResponse {
    fn new(points: Vec<BearingPoint>) -> Self {
        debug_assert!(!points.is_empty());
        Self { points }
    }

    pub fn points(&self) -> &[BearingPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point with the highest power; ties go to the earliest angle
    pub fn best(&self) -> &BearingPoint {
        let mut best = &self.points[0];
        for point in &self.points[1..] {
            if point.power > best.power {
                best = point;
            }
        }
        best
    }

    /// Inferred bearing: the angle of maximum output power
    pub fn best_angle(&self) -> f64 {
        self.best().angle_rad
    }

    pub fn powers(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.power).collect()
    }

    /// Power of each point in dB relative to the peak (peak = 0 dB)
    pub fn relative_db(&self) -> Vec<f64> {
        let peak = self.best().power;
        self.points
            .iter()
            .map(|p| power_to_db(p.power) - power_to_db(peak))
            .collect()
    }
}

/// Brute-force bearing search over a [`ScanRange`]
#[derive(Debug, Clone, Copy)]
pub struct BearingScanner {
    beamformer: Beamformer,
}

impl BearingScanner {
    pub fn new(array: ArraySpec) -> Self {
        Self {
            beamformer: Beamformer::new(array),
        }
    }

    pub fn beamformer(&self) -> &Beamformer {
        &self.beamformer
    }

    /// Beamform at every angle in `range` and record the output power
    pub fn scan(&self, sensors: &SensorSignalSet, range: &ScanRange) -> Result<BearingResponse> {
        log::debug!(
            "Scanning {} angles from {:.2}° to {:.2}°",
            range.len(),
            range.start_rad().to_degrees(),
            range.end_rad().to_degrees()
        );

        let points = self.evaluate(sensors, range)?;
        let response = BearingResponse::new(points);

        log::debug!(
            "Peak power {:.6} at {:.2}°",
            response.best().power,
            response.best().angle_deg()
        );
        Ok(response)
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, sensors: &SensorSignalSet, range: &ScanRange) -> Result<Vec<BearingPoint>> {
        range
            .angles()
            .map(|angle_rad| self.point(sensors, angle_rad))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, sensors: &SensorSignalSet, range: &ScanRange) -> Result<Vec<BearingPoint>> {
        use rayon::prelude::*;

        // Indexed collect keeps scan order regardless of completion order
        (0..range.len())
            .into_par_iter()
            .map(|i| self.point(sensors, range.angle(i)))
            .collect()
    }

    fn point(&self, sensors: &SensorSignalSet, angle_rad: f64) -> Result<BearingPoint> {
        let beam = self.beamformer.form_beam(sensors, angle_rad)?;
        Ok(BearingPoint {
            angle_rad,
            power: beam.power,
        })
    }
}

/// Sweep `array` over `start_rad..=end_rad` in `step_rad` increments
pub fn scan(
    sensors: &SensorSignalSet,
    array: &ArraySpec,
    start_rad: f64,
    end_rad: f64,
    step_rad: f64,
) -> Result<BearingResponse> {
    let range = ScanRange::new(start_rad, end_rad, step_rad)?;
    BearingScanner::new(*array).scan(sensors, &range)
}
