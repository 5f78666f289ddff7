use std::f64::consts::PI;

use crate::constants::DB_FLOOR;

/// Mean of squared samples (0 for an empty slice)
pub fn mean_square(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().map(|&x| x * x).sum::<f64>() / samples.len() as f64
}

/// Convert a power ratio to decibels
pub fn power_to_db(power: f64) -> f64 {
    10.0 * power.max(DB_FLOOR).log10()
}

/// Convert an amplitude ratio to decibels
pub fn amplitude_to_db(amplitude: f64) -> f64 {
    20.0 * amplitude.max(DB_FLOOR).log10()
}

/// Wrap an angle to [-PI, PI)
pub fn wrap_to_pi(angle_rad: f64) -> f64 {
    (angle_rad + PI).rem_euclid(2.0 * PI) - PI
}

/// Signed angular error with wrap-around handling
pub fn angle_error(measured_rad: f64, expected_rad: f64) -> f64 {
    wrap_to_pi(measured_rad - expected_rad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_mean_square() {
        assert_eq!(mean_square(&[]), 0.0);
        assert_abs_diff_eq!(mean_square(&[2.0, -2.0]), 4.0);
    }

    #[test]
    fn test_db_conversions() {
        assert_abs_diff_eq!(power_to_db(100.0), 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(amplitude_to_db(10.0), 20.0, epsilon = 1e-12);
        // Zero is floored rather than producing -inf
        assert!(power_to_db(0.0).is_finite());
    }

    #[test]
    fn test_wrap_to_pi() {
        assert_abs_diff_eq!(wrap_to_pi(0.0), 0.0);
        assert_abs_diff_eq!(wrap_to_pi(3.0 * PI / 2.0), -PI / 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(wrap_to_pi(-3.0 * PI / 2.0), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_angle_error() {
        assert_abs_diff_eq!(angle_error(0.1, -0.1), 0.2, epsilon = 1e-12);
        // Across the wrap point
        assert_abs_diff_eq!(angle_error(PI - 0.05, -PI + 0.05), -0.1, epsilon = 1e-12);
    }
}
