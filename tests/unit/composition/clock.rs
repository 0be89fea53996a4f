use super::*;

#[test]
fn rejects_non_positive_rates() {
    assert!(FrameClock::new(0.0).is_err());
    assert!(FrameClock::new(-30.0).is_err());
    assert!(FrameClock::new(f64::NAN).is_err());
}

#[test]
fn interval_matches_the_rate() {
    let clock = FrameClock::new(10.0).unwrap();
    assert_eq!(clock.interval(), Duration::from_millis(100));
}

#[test]
fn throttles_until_the_interval_elapses() {
    let mut clock = FrameClock::new(10.0).unwrap();
    let t0 = Instant::now();

    assert!(clock.should_render(t0));
    assert!(!clock.should_render(t0 + Duration::from_millis(50)));
    assert!(clock.should_render(t0 + Duration::from_millis(100)));

    // The accepted tick becomes the new reference point.
    assert!(!clock.should_render(t0 + Duration::from_millis(150)));
    assert!(clock.should_render(t0 + Duration::from_millis(210)));
}

#[test]
fn restart_renders_immediately() {
    let mut clock = FrameClock::new(10.0).unwrap();
    let t0 = Instant::now();

    assert!(clock.should_render(t0));
    assert!(!clock.should_render(t0 + Duration::from_millis(10)));

    clock.restart();
    assert!(clock.should_render(t0 + Duration::from_millis(20)));
}
