use super::*;

#[test]
fn drift_is_a_pure_function_of_time() {
    let a = drift_offset(12.5, 0.75, 6.0);
    let b = drift_offset(12.5, 0.75, 6.0);
    assert_eq!(a, b);
    assert!((a.x - (12.5f64 * 0.75).sin() * 6.0).abs() < 1e-12);
    assert!((a.y - (12.5f64 * 0.75).cos() * 6.0).abs() < 1e-12);
}

#[test]
fn drift_stays_on_amplitude_circle() {
    for i in 0..100 {
        let v = drift_offset(f64::from(i) * 0.37, 1.3, 4.0);
        assert!((v.length() - 4.0).abs() < 1e-9);
    }
}

#[test]
fn tint_opacity_cycles_between_zero_and_point_three() {
    assert!((tint_opacity(0.0) - 0.15).abs() < 1e-12);
    assert!((tint_opacity(std::f64::consts::PI) - 0.3).abs() < 1e-12);
    for i in 0..1000 {
        let o = tint_opacity(f64::from(i) * 0.01);
        assert!((0.0..=0.3 + 1e-12).contains(&o));
    }
}

#[test]
fn clip_gate_opens_near_sine_peak_only() {
    let gate = ClipGate::DEFAULT;
    // sin(pi/2) = 1 > 0.7
    assert!(gate.is_open(0.0, std::f64::consts::FRAC_PI_2));
    assert!(!gate.is_open(0.0, 0.0));
    // t·0.2 = pi/2 with zero phase
    assert!(gate.is_open(std::f64::consts::FRAC_PI_2 / 0.2, 0.0));
}
