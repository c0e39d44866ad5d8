use super::*;

#[test]
fn single_step_moves_fraction_of_gap() {
    assert_eq!(smooth(&0.0, &100.0, 0.25), 25.0);
    assert_eq!(smooth(&100.0, &0.0, 0.5), 50.0);
    assert_eq!(smooth(&3.0, &9.0, 1.0), 9.0);
}

#[test]
fn vector_channels_are_independent() {
    let v = smooth(&Vec2::new(0.0, 10.0), &Vec2::new(10.0, 10.0), 0.5);
    assert_eq!(v, Vec2::new(5.0, 10.0));
}

#[test]
fn converges_monotonically_within_bound() {
    for factor in [0.04, 0.05, 0.08, 0.3] {
        let mut s = Smoothed::new(0.0, factor);
        s.set_target(1000.0);

        let eps = 0.01;
        // (1 - f)^n * d < eps once n > ln(d / eps) / f.
        let bound = ((1000.0f64 / eps).ln() / factor).ceil() as usize + 1;

        let mut prev_gap = s.lag().abs();
        let mut frames = 0;
        while s.lag().abs() >= eps {
            s.tick();
            frames += 1;
            let gap = s.lag().abs();
            assert!(gap < prev_gap, "gap must shrink every frame");
            assert!(s.current() <= 1000.0, "must never overshoot");
            prev_gap = gap;
            assert!(frames <= bound, "factor {factor} exceeded {bound} frames");
        }
    }
}

#[test]
fn invalid_factor_is_clamped() {
    assert_eq!(Smoothed::new(0.0, 5.0).factor(), 1.0);
    assert!(Smoothed::new(0.0, -1.0).factor() > 0.0);
    assert_eq!(Smoothed::new(0.0, f64::NAN).factor(), 1.0);
}

#[test]
fn snap_clears_lag() {
    let mut s = Smoothed::new(Vec2::ZERO, 0.1);
    s.set_target(Vec2::new(4.0, 4.0));
    s.tick();
    s.snap(Vec2::new(1.0, 2.0));
    assert_eq!(s.lag(), Vec2::ZERO);
    assert_eq!(s.current(), Vec2::new(1.0, 2.0));
}
