use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::error::{Result, SimError};

/// Seeded generator when `seed` is given, entropy-seeded otherwise
pub fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Add zero-mean Gaussian noise with standard deviation `std_dev`
pub fn add_gaussian_noise(samples: &mut [f64], std_dev: f64, rng: &mut ChaCha8Rng) -> Result<()> {
    if std_dev == 0.0 {
        return Ok(());
    }
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| SimError::Config(format!("invalid noise level {}: {}", std_dev, e)))?;

    for sample in samples.iter_mut() {
        *sample += normal.sample(rng);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal_processing::math::mean_square;

    #[test]
    fn test_seeded_noise_reproducible() {
        let mut a = vec![0.0; 64];
        let mut b = vec![0.0; 64];
        add_gaussian_noise(&mut a, 0.5, &mut create_rng(Some(3))).unwrap();
        add_gaussian_noise(&mut b, 0.5, &mut create_rng(Some(3))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_power_matches_level() {
        let mut samples = vec![0.0; 20_000];
        add_gaussian_noise(&mut samples, 0.1, &mut create_rng(Some(11))).unwrap();
        let power = mean_square(&samples);
        assert!(
            (power - 0.01).abs() < 0.001,
            "noise power {} should be close to 0.01",
            power
        );
    }

    #[test]
    fn test_zero_level_leaves_samples() {
        let mut samples = vec![1.0; 8];
        add_gaussian_noise(&mut samples, 0.0, &mut create_rng(None)).unwrap();
        assert_eq!(samples, vec![1.0; 8]);
    }

    #[test]
    fn test_negative_level_rejected() {
        let mut samples = vec![0.0; 8];
        assert!(add_gaussian_noise(&mut samples, -1.0, &mut create_rng(Some(1))).is_err());
    }
}
