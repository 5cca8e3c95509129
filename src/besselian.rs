//! # Besselian elements
//!
//! Polynomial description of the Moon's shadow over the fundamental plane for a single
//! eclipse, and their evaluation at a Besselian time `t` (hours elapsed since the
//! reference hour `t0`, in TT).
//!
//! ## Series
//!
//! | Quantity | Meaning                                                  | Degree |
//! |----------|----------------------------------------------------------|--------|
//! | `x`, `y` | shadow-axis coordinates on the fundamental plane (ER)     | 3      |
//! | `d`      | declination of the shadow axis (deg)                      | 2      |
//! | `mu`     | Greenwich hour angle of the shadow axis (deg)             | 2      |
//! | `l1`     | radius of the penumbral shadow on the fundamental plane  | 2      |
//! | `l2`     | radius of the umbral shadow on the fundamental plane     | 2      |
//!
//! Coefficients are stored in **increasing** power of `t`. Every series and its first
//! derivative are evaluated with Horner's scheme.
//!
//! ## Bundled data
//!
//! [`AUGUST_21_2017`] holds the elements of the total solar eclipse of 2017 August 21
//! (T0 = 18h TDT, predicted ΔT = 70.3 s).
use serde::Serialize;

use crate::circumstance::EventKind;
use crate::constants::{Degree, Hour, JD};

/// Besselian elements of one solar eclipse.
///
/// The struct is immutable once built and `Copy`: the solvers only ever read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BesselianElements {
    /// Julian Date (TT) of greatest eclipse.
    pub julian_date: JD,
    /// Reference hour T0 (TT) of the polynomial series.
    pub t0: Hour,
    /// Lower bound of the validity window, in hours from T0.
    pub t_min: Hour,
    /// Upper bound of the validity window, in hours from T0.
    pub t_max: Hour,
    /// ΔT = TT − UT, in **seconds**.
    pub delta_t: f64,
    /// x(t), Earth radii.
    pub x: [f64; 4],
    /// y(t), Earth radii.
    pub y: [f64; 4],
    /// d(t), degrees.
    pub d: [Degree; 3],
    /// μ(t), degrees.
    pub mu: [Degree; 3],
    /// l1(t), Earth radii.
    pub l1: [f64; 3],
    /// l2(t), Earth radii.
    pub l2: [f64; 3],
    /// tan f1 (penumbral cone).
    pub tan_f1: f64,
    /// tan f2 (umbral cone).
    pub tan_f2: f64,
}

/// Total solar eclipse of 2017 August 21.
pub const AUGUST_21_2017: BesselianElements = BesselianElements {
    julian_date: 2457987.268521,
    t0: 18.0,
    t_min: -4.0,
    t_max: 4.0,
    delta_t: 70.3,
    x: [-0.129571, 0.5406426, -2.94e-05, -8.1e-06],
    y: [0.485416, -0.14164, -9.05e-05, 2.05e-06],
    d: [11.86696, -0.013622, -2e-06],
    mu: [89.24543, 15.003937, 0.0],
    l1: [0.542093, 0.0001241, -1.18e-05],
    l2: [-0.004025, 0.0001234, -1.17e-05],
    tan_f1: 0.0046222,
    tan_f2: 0.0045992,
};

/// Values of the Besselian series that depend only on time.
///
/// `d`, `m` and their derivatives are in radians (per hour). Radii that were not
/// requested by the [`EventKind`] are left to `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDependent {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub d: f64,
    pub sin_d: f64,
    pub cos_d: f64,
    pub dd: f64,
    pub m: f64,
    pub dm: f64,
    pub l1: Option<(f64, f64)>,
    pub l2: Option<(f64, f64)>,
}

/// Evaluate `c[0] + c[1]·t + … + c[n]·tⁿ` with Horner's scheme.
pub(crate) fn horner(coefficients: &[f64], t: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * t + c)
}

/// Evaluate the derivative `c[1] + 2·c[2]·t + … + n·c[n]·tⁿ⁻¹` with Horner's scheme.
pub(crate) fn horner_derivative(coefficients: &[f64], t: f64) -> f64 {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .rev()
        .fold(0.0, |acc, (n, c)| acc * t + n as f64 * c)
}

impl BesselianElements {
    /// Evaluate the time-only dependent quantities at Besselian time `t`.
    ///
    /// Arguments
    /// -----------------
    /// * `kind`: the event being solved; decides which shadow radius is evaluated.
    /// * `t`: hours since T0 (TT).
    ///
    /// Return
    /// ----------
    /// * A [`TimeDependent`] record; `l1` is populated for the penumbral events
    ///   (C1, C4, mid-eclipse) and `l2` for the umbral ones (C2, C3, mid-eclipse).
    pub fn time_dependent(&self, kind: EventKind, t: Hour) -> TimeDependent {
        let d = horner(&self.d, t).to_radians();

        let mut mu = horner(&self.mu, t);
        if mu >= 360.0 {
            mu -= 360.0;
        }

        let l1 = kind
            .needs_penumbra()
            .then(|| (horner(&self.l1, t), horner_derivative(&self.l1, t)));
        let l2 = kind
            .needs_umbra()
            .then(|| (horner(&self.l2, t), horner_derivative(&self.l2, t)));

        TimeDependent {
            x: horner(&self.x, t),
            y: horner(&self.y, t),
            dx: horner_derivative(&self.x, t),
            dy: horner_derivative(&self.y, t),
            d,
            sin_d: d.sin(),
            cos_d: d.cos(),
            dd: horner_derivative(&self.d, t).to_radians(),
            m: mu.to_radians(),
            dm: horner_derivative(&self.mu, t).to_radians(),
            l1,
            l2,
        }
    }

    /// Julian Date of 0h (TT) on the calendar day containing T0.
    pub fn reference_day(&self) -> JD {
        (self.julian_date - self.t0 / 24.0).floor() + 0.5
    }

    /// Return `true` if `t` lies within the validity window of the series.
    pub fn is_within_validity(&self, t: Hour) -> bool {
        (self.t_min..=self.t_max).contains(&t)
    }
}
