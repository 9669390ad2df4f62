//! Trigonometry in degrees, plus modular wrap-around helpers.
//!
//! Inverse functions clamp their argument to [-1, 1] first, so values that
//! overshoot by a rounding error (e.g. `1.0000000002`) resolve to the pole
//! instead of producing NaN.

/// Sine of an angle in degrees.
pub fn sin(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// Cosine of an angle in degrees.
pub fn cos(deg: f64) -> f64 {
    deg.to_radians().cos()
}

/// Tangent of an angle in degrees.
pub fn tan(deg: f64) -> f64 {
    deg.to_radians().tan()
}

/// Arcsine in degrees. Input is clamped to [-1, 1].
pub fn arcsin(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).asin().to_degrees()
}

/// Arccosine in degrees. Input is clamped to [-1, 1].
pub fn arccos(x: f64) -> f64 {
    x.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Arccotangent in degrees, `atan(1/x)`.
pub fn arccot(x: f64) -> f64 {
    (1.0 / x).atan().to_degrees()
}

/// Two-argument arctangent in degrees.
pub fn arctan2(y: f64, x: f64) -> f64 {
    y.atan2(x).to_degrees()
}

/// Wrap `a` into `[0, b)`.
///
/// `a - b * floor(a / b)`, with a final correction so the result is never
/// negative.
pub fn fix(a: f64, b: f64) -> f64 {
    let r = a - b * (a / b).floor();
    if r < 0.0 { r + b } else { r }
}

/// Normalize an angle to [0, 360) degrees.
pub fn fix_angle(deg: f64) -> f64 {
    fix(deg, 360.0)
}

/// Normalize an hour value to [0, 24).
pub fn fix_hour(hours: f64) -> f64 {
    fix(hours, 24.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sin_cos_quadrants() {
        assert!((sin(90.0) - 1.0).abs() < 1e-12);
        assert!(sin(0.0).abs() < 1e-12);
        assert!((cos(0.0) - 1.0).abs() < 1e-12);
        assert!(cos(90.0).abs() < 1e-12);
    }

    #[test]
    fn tan_45() {
        assert!((tan(45.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn inverse_clamps_overshoot() {
        assert!(arccos(1.0001).abs() < 1e-9);
        assert!((arccos(-1.0001) - 180.0).abs() < 1e-9);
        assert!((arcsin(1.0001) - 90.0).abs() < 1e-9);
        assert!((arcsin(-1.0001) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn arccot_one() {
        assert!((arccot(1.0) - 45.0).abs() < 1e-12);
    }

    #[test]
    fn arctan2_quadrant() {
        assert!((arctan2(1.0, -1.0) - 135.0).abs() < 1e-12);
    }

    #[test]
    fn fix_angle_wraps() {
        assert!((fix_angle(370.0) - 10.0).abs() < 1e-12);
        assert!((fix_angle(-10.0) - 350.0).abs() < 1e-12);
        assert_eq!(fix_angle(0.0), 0.0);
        assert_eq!(fix_angle(360.0), 0.0);
    }

    #[test]
    fn fix_hour_wraps() {
        assert!((fix_hour(25.0) - 1.0).abs() < 1e-12);
        assert!((fix_hour(-1.0) - 23.0).abs() < 1e-12);
        assert!((fix_hour(12.0) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn fix_is_idempotent() {
        for a in [-725.5, -1.0, 0.0, 13.25, 359.999, 1e6] {
            let once = fix_angle(a);
            assert!((fix_angle(once) - once).abs() < 1e-9, "a = {a}");
            assert!((0.0..360.0).contains(&once), "a = {a} -> {once}");
            let h = fix_hour(a);
            assert!((fix_hour(h) - h).abs() < 1e-9, "a = {a}");
            assert!((0.0..24.0).contains(&h), "a = {a} -> {h}");
        }
    }
}
