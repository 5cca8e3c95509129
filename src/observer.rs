//! # Observer geometry
//!
//! Converts a site given by geodetic latitude/longitude (and optionally altitude and
//! UTC offset) into the **geocentric parallax terms** (ρ·sinφ′, ρ·cosφ′) consumed by every
//! local-circumstance evaluation.
//!
//! ## Conventions
//!
//! - Inputs: latitude/longitude in **degrees**, longitude **east positive** (the usual
//!   GPS convention), altitude in **meters**, UTC offset in **hours** (east positive).
//! - Stored: latitude in radians, longitude in radians **west positive**, which is the
//!   sign convention of the Besselian hour angle.
//! - ρ·sinφ′ and ρ·cosφ′ are expressed in **Earth equatorial radii**.
//!
//! The geodetic-to-geocentric conversion follows the classical formula
//!
//! ```text
//! u      = atan( (b/a) · tan φ )
//! ρ sinφ′ = (b/a) · sin u + (h/a) · sin φ
//! ρ cosφ′ =         cos u + (h/a) · cos φ
//! ```
//!
//! with `b/a = 0.99664719` and `a = 6378140 m`.
use ordered_float::NotNan;
use serde::Serialize;

use crate::constants::{Degree, Hour, Meter, Radian, EARTH_AXIS_RATIO, EARTH_EQUATORIAL_RADIUS};
use crate::eclipse_errors::EclipseError;

/// Observer constants shared by every evaluation of the local circumstances.
///
/// Built once per location and never mutated afterwards. The struct is `Copy`, so it can
/// be passed by value into the solvers or shared between threads freely.
///
/// See also
/// ------------
/// * [`lat_alt_to_parallax`] – Geodetic latitude/altitude → (ρ·sinφ′, ρ·cosφ′).
/// * [`crate::circumstance::Circumstance::evaluate`] – Main consumer of these constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ObserverConstants {
    /// Geodetic latitude in **radians** (north positive).
    latitude: NotNan<f64>,

    /// Longitude in **radians**, **west positive**.
    longitude: NotNan<f64>,

    /// Height above the reference ellipsoid in **meters**.
    altitude: NotNan<f64>,

    /// Offset of the local civil time with respect to UTC, in **hours** (east positive).
    utc_offset: NotNan<f64>,

    /// ρ·sinφ′ in **Earth radii**.
    rho_sin_phi: NotNan<f64>,

    /// ρ·cosφ′ in **Earth radii**.
    rho_cos_phi: NotNan<f64>,
}

/// Wrap a finite value, naming the offending input otherwise.
fn finite(value: f64, name: &'static str) -> Result<NotNan<f64>, EclipseError> {
    NotNan::new(value)
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(EclipseError::NonFiniteInput(name))
}

impl ObserverConstants {
    /// Create the observer constants from geodetic coordinates.
    ///
    /// Arguments
    /// -----------------
    /// * `latitude`: Geodetic latitude in **degrees**, within `[-90, 90]`.
    /// * `longitude`: Longitude in **degrees**, east positive, within `[-180, 180]`.
    /// * `altitude`: Optional height above the ellipsoid in **meters** (default 0).
    /// * `utc_offset`: Optional civil time offset from UTC in **hours** (default 0).
    ///
    /// Return
    /// ----------
    /// * The validated [`ObserverConstants`].
    ///
    /// Errors
    /// ----------
    /// * [`EclipseError::NonFiniteInput`] if any input is NaN or infinite.
    /// * [`EclipseError::InvalidLatitude`] / [`EclipseError::InvalidLongitude`] when out of range.
    pub fn new(
        latitude: Degree,
        longitude: Degree,
        altitude: Option<Meter>,
        utc_offset: Option<Hour>,
    ) -> Result<ObserverConstants, EclipseError> {
        let latitude = finite(latitude, "latitude")?;
        let longitude = finite(longitude, "longitude")?;
        let altitude = finite(altitude.unwrap_or(0.0), "altitude")?;
        let utc_offset = finite(utc_offset.unwrap_or(0.0), "utc_offset")?;

        if !(-90.0..=90.0).contains(&*latitude) {
            return Err(EclipseError::InvalidLatitude(*latitude));
        }
        if !(-180.0..=180.0).contains(&*longitude) {
            return Err(EclipseError::InvalidLongitude(*longitude));
        }

        let lat_radians = (*latitude).to_radians();
        let (rho_sin_phi, rho_cos_phi) = lat_alt_to_parallax(lat_radians, *altitude);

        Ok(ObserverConstants {
            latitude: finite(lat_radians, "latitude")?,
            // West-positive longitude, as used by the Besselian hour angle
            longitude: finite(-(*longitude).to_radians(), "longitude")?,
            altitude,
            utc_offset,
            rho_sin_phi: finite(rho_sin_phi, "latitude")?,
            rho_cos_phi: finite(rho_cos_phi, "latitude")?,
        })
    }

    /// Geodetic latitude in radians.
    pub fn latitude(&self) -> Radian {
        self.latitude.into_inner()
    }

    /// Longitude in radians, **west positive**.
    pub fn longitude(&self) -> Radian {
        self.longitude.into_inner()
    }

    /// Height above the ellipsoid in meters.
    pub fn altitude(&self) -> Meter {
        self.altitude.into_inner()
    }

    /// Civil time offset from UTC in hours (east positive).
    pub fn utc_offset(&self) -> Hour {
        self.utc_offset.into_inner()
    }

    /// ρ·sinφ′ in Earth radii.
    pub fn rho_sin_phi(&self) -> f64 {
        self.rho_sin_phi.into_inner()
    }

    /// ρ·cosφ′ in Earth radii.
    pub fn rho_cos_phi(&self) -> f64 {
        self.rho_cos_phi.into_inner()
    }
}

/// Compute the geocentric parallax terms of an observer.
///
/// Arguments
/// ---------
/// * `lat` - Geodetic latitude of the observer in **radians**.
/// * `altitude` - Observer's height above the reference ellipsoid in **meters**.
///
/// Returns
/// -------
/// A tuple `(rho_sin_phi, rho_cos_phi)`:
/// * `rho_sin_phi`: distance of the observer projected on the rotation axis,
/// * `rho_cos_phi`: distance of the observer projected on the equatorial plane,
///
/// both in units of the Earth equatorial radius.
pub fn lat_alt_to_parallax(lat: Radian, altitude: Meter) -> (f64, f64) {
    // Reduced (parametric) latitude
    let u = (EARTH_AXIS_RATIO * lat.tan()).atan();

    let height = altitude / EARTH_EQUATORIAL_RADIUS;

    let rho_sin_phi = EARTH_AXIS_RATIO * u.sin() + height * lat.sin();
    let rho_cos_phi = u.cos() + height * lat.cos();

    (rho_sin_phi, rho_cos_phi)
}

#[cfg(test)]
mod observer_test {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_observer_constructor() {
        let observer = ObserverConstants::new(0.0, 0.0, None, None).unwrap();
        assert_eq!(observer.latitude(), 0.0);
        assert_eq!(observer.longitude(), 0.0);
        assert_eq!(observer.rho_sin_phi(), 0.0);
        assert_eq!(observer.rho_cos_phi(), 1.0);
        assert_eq!(observer.utc_offset(), 0.0);

        let observer = ObserverConstants::new(35.0, -83.0, Some(850.0), Some(-4.0)).unwrap();
        assert_relative_eq!(observer.latitude(), 35.0_f64.to_radians());
        // West positive internally
        assert_relative_eq!(observer.longitude(), 83.0_f64.to_radians());
        assert_eq!(observer.altitude(), 850.0);
        assert_eq!(observer.utc_offset(), -4.0);
    }

    #[test]
    fn test_parallax_at_poles() {
        let (rs, rc) = lat_alt_to_parallax(90.0_f64.to_radians(), 0.0);
        assert_relative_eq!(rs, EARTH_AXIS_RATIO, epsilon = 1e-12);
        assert_relative_eq!(rc, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parallax_altitude_term() {
        let lat = 35.0_f64.to_radians();
        let (rs0, rc0) = lat_alt_to_parallax(lat, 0.0);
        let (rs1, rc1) = lat_alt_to_parallax(lat, EARTH_EQUATORIAL_RADIUS * 1e-3);

        assert_relative_eq!(rs1 - rs0, 1e-3 * lat.sin(), epsilon = 1e-15);
        assert_relative_eq!(rc1 - rc0, 1e-3 * lat.cos(), epsilon = 1e-15);

        // Geocentric distance stays close to one Earth radius at sea level
        assert_relative_eq!((rs0 * rs0 + rc0 * rc0).sqrt(), 0.99893, epsilon = 1e-4);
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            ObserverConstants::new(91.0, 0.0, None, None),
            Err(EclipseError::InvalidLatitude(91.0))
        );
        assert_eq!(
            ObserverConstants::new(0.0, -180.5, None, None),
            Err(EclipseError::InvalidLongitude(-180.5))
        );
        assert_eq!(
            ObserverConstants::new(f64::NAN, 0.0, None, None),
            Err(EclipseError::NonFiniteInput("latitude"))
        );
        assert_eq!(
            ObserverConstants::new(10.0, 10.0, Some(f64::INFINITY), None),
            Err(EclipseError::NonFiniteInput("altitude"))
        );
        assert!(ObserverConstants::new(-90.0, 180.0, None, None).is_ok());
    }

    #[test]
    fn test_non_finite_inputs_are_named() {
        assert_eq!(
            ObserverConstants::new(0.0, f64::NEG_INFINITY, None, Some(f64::NAN)),
            Err(EclipseError::NonFiniteInput("longitude"))
        );
        assert_eq!(
            ObserverConstants::new(0.0, 0.0, None, Some(f64::NAN)),
            Err(EclipseError::NonFiniteInput("utc_offset"))
        );
        // Non-finite values are rejected before the range checks
        assert_eq!(
            ObserverConstants::new(f64::INFINITY, 0.0, None, None),
            Err(EclipseError::NonFiniteInput("latitude"))
        );
    }
}
