//! Physical defaults and numeric tolerances
//!
//! Shared by the geometry, scanning and spectrogram stages so that the
//! same thresholds apply everywhere.

/// Nominal speed of sound in seawater (m/s).
pub const SEAWATER_SOUND_SPEED_MPS: f64 = 1500.0;

/// Fractional delays below this many samples are treated as integer shifts.
pub const FRACTIONAL_DELAY_EPSILON: f64 = 1e-12;

/// Tolerance, in units of the scan step, for including the end angle of a scan.
pub const SCAN_ENDPOINT_TOLERANCE: f64 = 1e-9;

/// Upper bound on the number of angles a single scan may evaluate.
pub const MAX_SCAN_POINTS: usize = 1_000_000;

/// Floor applied to magnitudes and powers before converting to decibels.
pub const DB_FLOOR: f64 = 1e-12;
