//! # Observational quantities
//!
//! Converts a solved [`Circumstance`] into what an observer actually sees:
//!
//! - topocentric **altitude** and **azimuth** of the Sun (azimuth measured from north
//!   through east);
//! - the **position angle** `P` of the contact point, measured on the solar disk from the
//!   north point towards the east;
//! - the **vertex angle** `V = P − Q`, measured from the zenith point, where `Q` is the
//!   parallactic angle;
//! - a horizon **visibility** flag.
use serde::Serialize;

use crate::circumstance::{Circumstance, EventKind};
use crate::constants::{Radian, DPI, HORIZON_ALTITUDE};
use crate::observer::ObserverConstants;

/// Whether the Sun is above the horizon at an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Visibility {
    AboveHorizon,
    BelowHorizon,
}

impl Visibility {
    /// Classify an altitude (radians) against the refracted horizon.
    pub fn from_altitude(altitude: Radian) -> Visibility {
        if altitude > HORIZON_ALTITUDE {
            Visibility::AboveHorizon
        } else {
            Visibility::BelowHorizon
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::AboveHorizon
    }
}

/// Topocentric altitude and azimuth of the Sun from the declination and local hour angle
/// of the shadow axis.
///
/// Arguments
/// -----------------
/// * `sin_d`, `cos_d`: sine and cosine of the declination.
/// * `sin_h`, `cos_h`: sine and cosine of the local hour angle.
/// * `observer`: observer constants (geodetic latitude is used).
///
/// Return
/// ----------
/// * `(altitude, azimuth)` in radians; azimuth in `(-π, π]`, north = 0, east = π/2.
pub fn altitude_azimuth(
    sin_d: f64,
    cos_d: f64,
    sin_h: f64,
    cos_h: f64,
    observer: &ObserverConstants,
) -> (Radian, Radian) {
    let (sin_lat, cos_lat) = observer.latitude().sin_cos();

    let altitude = (sin_d * sin_lat + cos_d * cos_lat * cos_h).asin();
    let azimuth = (-sin_h * cos_d).atan2(sin_d * cos_lat - cos_h * sin_lat * cos_d);

    (altitude, azimuth)
}

/// Position angle `P` of a contact point, in radians within `[0, 2π)`.
///
/// The internal contacts (C2, C3) of a total eclipse are seen from inside the Moon's
/// disk: the shadow vector is reversed for them.
pub fn position_angle(circumstance: &Circumstance, total: bool) -> Radian {
    let internal = matches!(circumstance.event_kind, EventKind::C2 | EventKind::C3);
    let sign = if total && internal { -1.0 } else { 1.0 };

    (sign * circumstance.u)
        .atan2(sign * circumstance.v)
        .rem_euclid(DPI)
}

/// Parallactic angle `Q` of the Sun, in radians.
pub fn parallactic_angle(circumstance: &Circumstance, observer: &ObserverConstants) -> Radian {
    let q = (observer.latitude().cos() * circumstance.sin_h / circumstance.altitude.cos())
        .clamp(-1.0, 1.0)
        .asin();

    if circumstance.eta < 0.0 {
        std::f64::consts::PI - q
    } else {
        q
    }
}

/// Vertex angle `V = P − Q` of a contact point, in radians within `[0, 2π)`.
pub fn vertex_angle(
    circumstance: &Circumstance,
    observer: &ObserverConstants,
    total: bool,
) -> Radian {
    let p = position_angle(circumstance, total);
    let q = parallactic_angle(circumstance, observer);
    (p - q).rem_euclid(DPI)
}

#[cfg(test)]
mod observational_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_sun_on_meridian() {
        // Equatorial observer, Sun at the zenith
        let obs = ObserverConstants::new(0.0, 0.0, None, None).unwrap();
        let (alt, _) = altitude_azimuth(0.0, 1.0, 0.0, 1.0, &obs);
        assert_relative_eq!(alt, std::f64::consts::FRAC_PI_2);

        // Northern observer, Sun south on the meridian
        let obs = ObserverConstants::new(45.0, 0.0, None, None).unwrap();
        let (alt, az) = altitude_azimuth(0.0, 1.0, 0.0, 1.0, &obs);
        assert_relative_eq!(alt, 45.0_f64.to_radians(), epsilon = 1e-12);
        assert_relative_eq!(az.abs(), std::f64::consts::PI, epsilon = 1e-12);
    }

    #[test]
    fn test_morning_sun_is_east() {
        // Negative hour angle: before the meridian passage, Sun in the east
        let obs = ObserverConstants::new(30.0, 0.0, None, None).unwrap();
        let h: f64 = -60.0_f64.to_radians();
        let (_, az) = altitude_azimuth(0.0, 1.0, h.sin(), h.cos(), &obs);
        assert!(az > 0.0 && az < std::f64::consts::PI);
    }

    #[test]
    fn test_visibility() {
        assert_eq!(Visibility::from_altitude(0.1), Visibility::AboveHorizon);
        assert_eq!(Visibility::from_altitude(-0.001), Visibility::AboveHorizon);
        assert_eq!(Visibility::from_altitude(-0.01), Visibility::BelowHorizon);
        assert!(!Visibility::BelowHorizon.is_visible());
    }
}
