//! # String conversions for the output layer
//!
//! Fixed-precision renderers for the numbers shown to the user. Every function rounds
//! **before** splitting a value into its components so that a carry (e.g. `59.96 s`) never
//! produces an out-of-range field such as `60.0`.
use crate::constants::{Degree, Hour, Radian, SECONDS_PER_HOUR};
use crate::observational::Visibility;

/// Reduce an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(angle: Degree) -> Degree {
    angle.rem_euclid(360.0)
}

/// Signed solar altitude with one decimal, e.g. `+62.8°`.
///
/// Arguments
/// ---------
/// * `altitude`: altitude in radians.
/// * `visibility`: appends ` (below horizon)` when the event is not visible.
pub fn fmt_altitude(altitude: Radian, visibility: Visibility) -> String {
    let deg = altitude.to_degrees();
    // Avoid printing "-0.0°"
    let deg = if (deg * 10.0).round() == 0.0 { 0.0 } else { deg };

    let suffix = if visibility.is_visible() {
        ""
    } else {
        " (below horizon)"
    };
    format!("{deg:+.1}°{suffix}")
}

/// Azimuth in `[0, 360)` with one decimal, e.g. `215.4°`.
pub fn fmt_azimuth(azimuth: Radian) -> String {
    let tenths = (normalize_degrees(azimuth.to_degrees()) * 10.0).round() as i64;
    let tenths = tenths.rem_euclid(3600);
    format!("{}.{}°", tenths / 10, tenths % 10)
}

/// Eclipse magnitude with three decimals.
pub fn fmt_magnitude(magnitude: f64) -> String {
    format!("{magnitude:.3}")
}

/// Duration as `XmYY.Ys`, e.g. `2m29.9s`.
pub fn fmt_duration(duration: Hour) -> String {
    let tenths = (duration.abs() * SECONDS_PER_HOUR * 10.0).round() as i64;
    format!(
        "{}m{:02}.{}s",
        tenths / 600,
        tenths % 600 / 10,
        tenths % 10
    )
}

/// Fraction of the solar disk covered, as a percentage with two decimals (`71.55%`).
pub fn fmt_coverage(obscuration: f64) -> String {
    format!("{:.2}%", obscuration * 100.0)
}

#[cfg(test)]
mod conversion_test {
    use super::*;

    #[test]
    fn test_fmt_altitude() {
        let above = Visibility::AboveHorizon;
        assert_eq!(fmt_altitude(62.8434_f64.to_radians(), above), "+62.8°");
        assert_eq!(fmt_altitude(0.0165_f64.to_radians(), above), "+0.0°");
        assert_eq!(fmt_altitude(-0.01_f64.to_radians(), above), "+0.0°");
        assert_eq!(
            fmt_altitude(-3.4069_f64.to_radians(), Visibility::BelowHorizon),
            "-3.4° (below horizon)"
        );
    }

    #[test]
    fn test_fmt_azimuth() {
        assert_eq!(fmt_azimuth(215.3743_f64.to_radians()), "215.4°");
        assert_eq!(fmt_azimuth(-90.0_f64.to_radians()), "270.0°");
        assert_eq!(fmt_azimuth(359.97_f64.to_radians()), "0.0°");
        assert_eq!(fmt_azimuth(0.04_f64.to_radians()), "0.0°");
    }

    #[test]
    fn test_fmt_magnitude() {
        assert_eq!(fmt_magnitude(1.010513055570028), "1.011");
        assert_eq!(fmt_magnitude(0.7695426671187482), "0.770");
    }

    #[test]
    fn test_fmt_duration() {
        assert_eq!(fmt_duration(149.918 / 3600.0), "2m29.9s");
        assert_eq!(fmt_duration(113.807 / 3600.0), "1m53.8s");
        assert_eq!(fmt_duration(59.97 / 3600.0), "1m00.0s");
        assert_eq!(fmt_duration(0.0), "0m00.0s");
    }

    #[test]
    fn test_fmt_coverage() {
        assert_eq!(fmt_coverage(1.0), "100.00%");
        assert_eq!(fmt_coverage(0.7154705414670509), "71.55%");
        assert_eq!(fmt_coverage(0.039722895770059184), "3.97%");
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert_eq!(normalize_degrees(720.0), 0.0);
    }
}
