use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn curves_hit_their_stops() {
    assert!(close(Curve::Flicker.sample(0.0), 1.0));
    assert!(close(Curve::Flicker.sample(0.5), 0.0));
    assert!(close(Curve::Flicker.sample(0.75), 0.3));
    assert!(close(Curve::Blink.sample(0.25), 0.05));
    assert!(close(Curve::PulseScale.sample(0.5), 1.05));
}

#[test]
fn curves_interpolate_linearly() {
    assert!(close(Curve::Flicker.sample(0.125), 0.6));
    assert!(close(Curve::PulseScale.sample(0.25), 1.015));
}

#[test]
fn loop_is_inactive_before_delay() {
    let l = KeyframeLoop::new(Curve::Flicker, 0.6, 1.0, LoopMode::Repeat);
    assert_eq!(l.sample(0.5), None);
    assert!(close(l.sample(1.0).unwrap(), 1.0));
    assert!(close(l.sample(1.3).unwrap(), 0.0));
}

#[test]
fn repeat_wraps_each_period() {
    let l = KeyframeLoop::new(Curve::Flicker, 2.0, 0.0, LoopMode::Repeat);
    assert!(close(l.progress(0.5).unwrap(), 0.25));
    assert!(close(l.progress(2.5).unwrap(), 0.25));
}

#[test]
fn ping_pong_reverses_odd_cycles() {
    let l = KeyframeLoop::new(Curve::PulseScale, 1.0, 0.0, LoopMode::PingPong);
    assert!(close(l.progress(0.25).unwrap(), 0.25));
    assert!(close(l.progress(1.25).unwrap(), 0.75));
    assert!(close(l.progress(2.25).unwrap(), 0.25));
}

#[test]
fn zero_period_never_activates() {
    let l = KeyframeLoop::new(Curve::Blink, 0.0, 0.0, LoopMode::Repeat);
    assert_eq!(l.sample(3.0), None);
}
