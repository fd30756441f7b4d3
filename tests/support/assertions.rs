pub const EPS: f64 = 1e-9;

pub fn assert_near(actual: f64, expected: f64) {
    assert_near_within(actual, expected, EPS);
}

pub fn assert_near_within(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
