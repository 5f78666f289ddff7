use lofarsim::SimError;
use lofarsim::array::ArraySpec;

const SPEED: f64 = 1500.0;

#[test]
fn test_broadside_has_no_delay() {
    let array = ArraySpec::new(40, 6.0, SPEED).unwrap();
    let delays = array.delays_for_angle(0.0);

    assert_eq!(delays.len(), 40);
    for (i, d) in delays.iter().enumerate() {
        assert_eq!(*d, 0.0, "sensor {} delayed at broadside", i);
    }
}

#[test]
fn test_reference_sensor_always_zero() {
    let array = ArraySpec::new(8, 0.75, SPEED).unwrap();
    for deg in [-90.0f64, -45.0, -10.0, 0.0, 17.5, 60.0, 90.0] {
        let delays = array.delays_for_angle(deg.to_radians());
        assert_eq!(delays[0], 0.0, "sensor 0 delayed at {}°", deg);
    }
}

#[test]
fn test_delays_are_antisymmetric() {
    let array = ArraySpec::new(12, 2.5, SPEED).unwrap();
    for deg in [5.0f64, 30.0, 72.0, 90.0] {
        let pos = array.delays_for_angle(deg.to_radians());
        let neg = array.delays_for_angle(-deg.to_radians());
        for i in 0..pos.len() {
            assert!(
                (pos[i] + neg[i]).abs() < 1e-15,
                "sensor {} at ±{}°: {} vs {}",
                i,
                deg,
                pos[i],
                neg[i]
            );
        }
    }
}

#[test]
fn test_delays_increase_linearly_with_index() {
    let array = ArraySpec::new(8, 0.75, SPEED).unwrap();
    let angle = 30f64.to_radians();
    let step = 0.75 * angle.sin() / SPEED;

    let delays = array.delays_for_angle(angle);
    for (i, d) in delays.iter().enumerate() {
        assert!(
            (d - i as f64 * step).abs() < 1e-15,
            "sensor {}: expected {}, got {}",
            i,
            i as f64 * step,
            d
        );
    }
    // Positive angles put the wavefront on sensor 0 first
    assert!(delays.windows(2).all(|w| w[1] > w[0]));
}

#[test]
fn test_endfire_delay_matches_aperture() {
    let array = ArraySpec::new(40, 6.0, SPEED).unwrap();
    let delays = array.delays_for_angle(std::f64::consts::FRAC_PI_2);

    let last = *delays.last().unwrap();
    assert!((last - array.aperture_m() / SPEED).abs() < 1e-12);
    assert!((array.max_abs_delay_s() - last).abs() < 1e-12);
}

#[test]
fn test_invalid_geometry_rejected() {
    assert!(matches!(ArraySpec::new(1, 6.0, SPEED), Err(SimError::Config(_))));
    assert!(matches!(ArraySpec::new(8, 0.0, SPEED), Err(SimError::Config(_))));
    assert!(matches!(ArraySpec::new(8, 1.0, -1500.0), Err(SimError::Config(_))));
    assert!(matches!(ArraySpec::new(8, f64::NAN, SPEED), Err(SimError::Config(_))));
}
