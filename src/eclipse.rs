//! # Local circumstances of a solar eclipse
//!
//! Entry point of the crate. [`LocalCircumstances`] runs the whole pipeline for one
//! location:
//!
//! ```text
//! ObserverConstants ──► mid-eclipse solver ──► EclipseType
//!                                               │
//!             None ◄────────────────────────────┤
//!             Partial ──► C1, C4                │
//!             Total / Annular ──► C1, C2, C3, C4
//!                                               ▼
//!                    observational conversion + time formatting ──► EclipseResult
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use umbra::eclipse::EclipseType;
//!
//! let result = umbra::solve(35.0, -83.0).unwrap();
//! assert_eq!(result.eclipse_type(), EclipseType::Total);
//!
//! let c2 = result.contact2().unwrap();
//! println!("totality starts at {} UT ({})", c2.time(), c2.altitude_string());
//! println!("{result}");
//! ```
use hifitime::Epoch;
use itertools::Itertools;
use serde::Serialize;

use crate::besselian::{BesselianElements, AUGUST_21_2017};
use crate::circumstance::{Circumstance, EventKind};
use crate::constants::{Degree, Hour};
use crate::conversion::{fmt_altitude, fmt_azimuth, fmt_coverage, fmt_duration, fmt_magnitude};
use crate::eclipse_errors::EclipseError;
use crate::observational::{position_angle, vertex_angle, Visibility};
use crate::observer::ObserverConstants;
use crate::solver::contact::solve_contact;
use crate::solver::mid_eclipse::{solve_mid_eclipse, MidEclipse};
use crate::solver::{Convergence, SolverParams};
use crate::time::{event_epoch, LocalTime};

pub use crate::solver::mid_eclipse::EclipseType;

/// One solved event (contact or greatest eclipse), ready for display.
///
/// Angles are in **degrees**: altitude in `[-90, 90]`, azimuth, position angle and vertex
/// angle in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Contact {
    pub event_kind: EventKind,
    /// Besselian time, hours since T0 (TT).
    pub t: Hour,
    pub local_time: LocalTime,
    pub altitude: Degree,
    pub azimuth: Degree,
    pub position_angle: Degree,
    pub vertex_angle: Degree,
    pub visibility: Visibility,
    pub convergence: Convergence,
    #[serde(skip)]
    pub circumstance: Circumstance,
    #[serde(skip)]
    epoch: Epoch,
}

impl Contact {
    fn new(
        elements: &BesselianElements,
        observer: &ObserverConstants,
        circumstance: Circumstance,
        convergence: Convergence,
        eclipse_type: EclipseType,
    ) -> Result<Contact, EclipseError> {
        let total = eclipse_type == EclipseType::Total;
        let epoch = event_epoch(elements, circumstance.t)?;

        Ok(Contact {
            event_kind: circumstance.event_kind,
            t: circumstance.t,
            local_time: LocalTime::from_epoch(epoch, observer.utc_offset()),
            altitude: circumstance.altitude.to_degrees(),
            azimuth: circumstance.azimuth.to_degrees().rem_euclid(360.0),
            position_angle: position_angle(&circumstance, total).to_degrees(),
            vertex_angle: vertex_angle(&circumstance, observer, total).to_degrees(),
            visibility: Visibility::from_altitude(circumstance.altitude),
            convergence,
            circumstance,
            epoch,
        })
    }

    /// Local calendar date, `YYYY-MM-DD`.
    pub fn date(&self) -> String {
        self.local_time.date.to_string()
    }

    /// Local clock time, `HH:MM:SS.s`.
    pub fn time(&self) -> String {
        self.local_time.clock()
    }

    /// Solar altitude, e.g. `+62.8°` or `-3.4° (below horizon)`.
    pub fn altitude_string(&self) -> String {
        fmt_altitude(self.circumstance.altitude, self.visibility)
    }

    /// Solar azimuth from north through east, e.g. `215.4°`.
    pub fn azimuth_string(&self) -> String {
        fmt_azimuth(self.circumstance.azimuth)
    }

    /// UTC instant of the event.
    pub fn event_epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }
}

/// Complete local circumstances of the eclipse at one location.
///
/// `mid` is always solved, even when no eclipse is seen, so that the magnitude and the
/// closest approach can be inspected. The other contacts are present according to the
/// eclipse type: none for [`EclipseType::None`], C1 and C4 for a partial eclipse, all four
/// for a total or annular one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EclipseResult {
    pub eclipse_type: EclipseType,
    pub magnitude: f64,
    pub moon_sun_ratio: f64,
    /// Fraction of the solar disk covered at greatest eclipse, in `[0, 1]`.
    pub obscuration: f64,
    /// Observer–shadow-axis distance at greatest eclipse, Earth radii.
    pub mid_separation: f64,
    pub c1: Option<Contact>,
    pub c2: Option<Contact>,
    pub mid: Contact,
    pub c3: Option<Contact>,
    pub c4: Option<Contact>,
}

impl EclipseResult {
    pub fn eclipse_type(&self) -> EclipseType {
        self.eclipse_type
    }

    pub fn contact1(&self) -> Option<&Contact> {
        self.c1.as_ref()
    }

    pub fn contact2(&self) -> Option<&Contact> {
        self.c2.as_ref()
    }

    /// Greatest eclipse, `None` when no eclipse is seen from the location.
    pub fn contact_mid(&self) -> Option<&Contact> {
        (self.eclipse_type != EclipseType::None).then_some(&self.mid)
    }

    pub fn contact3(&self) -> Option<&Contact> {
        self.c3.as_ref()
    }

    pub fn contact4(&self) -> Option<&Contact> {
        self.c4.as_ref()
    }

    /// Greatest eclipse, including the closest approach of a missed eclipse.
    pub fn greatest_eclipse(&self) -> &Contact {
        &self.mid
    }

    /// Solved events in chronological order of their kind (C1, C2, mid, C3, C4).
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        [
            self.c1.as_ref(),
            self.c2.as_ref(),
            self.contact_mid(),
            self.c3.as_ref(),
            self.c4.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Whether the solved events follow `C1 < C2 ≤ mid ≤ C3 < C4`.
    pub fn is_chronological(&self) -> bool {
        self.contacts().tuple_windows().all(|(a, b)| a.t <= b.t)
    }

    /// Whether the Sun is above the horizon at any solved event.
    ///
    /// The classification is geometric: a location on the night side of the Earth can be
    /// reported as partial or even central with every event below the horizon.
    pub fn is_visible(&self) -> bool {
        self.contacts().any(Contact::is_visible)
    }

    /// Duration of totality (or annularity), `XmYY.Ys`.
    pub fn duration_of_totality(&self) -> Option<String> {
        match (self.c2, self.c3) {
            (Some(c2), Some(c3)) => Some(fmt_duration(c3.t - c2.t)),
            _ => None,
        }
    }

    /// Fraction of the solar disk covered at greatest eclipse, `NN.NN%`.
    pub fn coverage_percent(&self) -> Option<String> {
        (self.eclipse_type != EclipseType::None).then(|| fmt_coverage(self.obscuration))
    }

    /// Eclipse magnitude with three decimals.
    pub fn magnitude_string(&self) -> Option<String> {
        (self.eclipse_type != EclipseType::None).then(|| fmt_magnitude(self.magnitude))
    }
}

/// Fraction of the solar disk area covered by the Moon at greatest eclipse.
///
/// The partial case is the area of the lens where the two disks overlap, expressed with
/// the penumbral and umbral radii `L1`, `L2`, the separation `m` and the Moon/Sun ratio
/// `r`:
///
/// ```text
/// c = acos((L1² + L2² − 2m²) / (L1² − L2²))
/// b = acos((L1·L2 + m²) / (m·(L1 + L2)))
/// a = π − b − c
/// obscuration = (r²·a + b − r·sin c) / π
/// ```
pub fn obscuration(mid: &MidEclipse) -> f64 {
    match mid.eclipse_type {
        EclipseType::None => 0.0,
        EclipseType::Annular => mid.moon_sun_ratio * mid.moon_sun_ratio,
        _ if mid.magnitude >= 1.0 => 1.0,
        _ => {
            let (l1, l2) = (mid.l1_prime, mid.l2_prime);
            let m = mid.separation;
            let ratio = mid.moon_sun_ratio;

            let c = ((l1 * l1 + l2 * l2 - 2.0 * m * m) / (l1 * l1 - l2 * l2))
                .clamp(-1.0, 1.0)
                .acos();
            let b = ((l1 * l2 + m * m) / (m * (l1 + l2))).clamp(-1.0, 1.0).acos();
            let a = std::f64::consts::PI - b - c;

            ((ratio * ratio * a + b - ratio * c.sin()) / std::f64::consts::PI).clamp(0.0, 1.0)
        }
    }
}

/// Local circumstance calculator for one set of Besselian elements.
///
/// The calculator is immutable and `Copy`; it can be shared between threads and reused
/// for any number of locations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalCircumstances {
    elements: BesselianElements,
    params: SolverParams,
}

impl Default for LocalCircumstances {
    /// Calculator for the total solar eclipse of 2017 August 21 with the default solver
    /// parameters.
    fn default() -> Self {
        LocalCircumstances::new(AUGUST_21_2017, SolverParams::default())
    }
}

impl LocalCircumstances {
    pub fn new(elements: BesselianElements, params: SolverParams) -> Self {
        LocalCircumstances { elements, params }
    }

    pub fn elements(&self) -> &BesselianElements {
        &self.elements
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    /// Solve the local circumstances for a location given in degrees (east-positive
    /// longitude), at sea level and in UT.
    pub fn solve_at(
        &self,
        latitude: Degree,
        longitude: Degree,
    ) -> Result<EclipseResult, EclipseError> {
        let observer = ObserverConstants::new(latitude, longitude, None, None)?;
        self.solve(&observer)
    }

    /// Solve the local circumstances for a precomputed observer.
    ///
    /// Return
    /// ----------
    /// * The [`EclipseResult`]. A location outside the penumbral path is a valid result of
    ///   type [`EclipseType::None`], not an error.
    ///
    /// Errors
    /// ----------
    /// * [`EclipseError::NonFiniteEventTime`] if a solved instant is not finite (only
    ///   possible with degenerate elements).
    pub fn solve(&self, observer: &ObserverConstants) -> Result<EclipseResult, EclipseError> {
        let elements = &self.elements;
        let mid = solve_mid_eclipse(elements, observer, &self.params)?;
        let eclipse_type = mid.eclipse_type;

        let contact = |kind: EventKind| -> Result<Contact, EclipseError> {
            let solution = solve_contact(elements, observer, &self.params, &mid, kind)?;
            Contact::new(
                elements,
                observer,
                solution.circumstance,
                solution.convergence,
                eclipse_type,
            )
        };

        let (c1, c4) = if eclipse_type == EclipseType::None {
            (None, None)
        } else {
            (Some(contact(EventKind::C1)?), Some(contact(EventKind::C4)?))
        };

        let (c2, c3) = if eclipse_type.is_central() {
            (Some(contact(EventKind::C2)?), Some(contact(EventKind::C3)?))
        } else {
            (None, None)
        };

        let result = EclipseResult {
            eclipse_type,
            magnitude: mid.magnitude,
            moon_sun_ratio: mid.moon_sun_ratio,
            obscuration: obscuration(&mid),
            mid_separation: mid.separation,
            c1,
            c2,
            mid: Contact::new(
                elements,
                observer,
                mid.circumstance,
                mid.convergence,
                eclipse_type,
            )?,
            c3,
            c4,
        };

        if !result.is_chronological() {
            log::warn!(
                "contacts of the {} eclipse are not in chronological order",
                result.eclipse_type
            );
        }

        Ok(result)
    }
}

/// Local circumstances of the total solar eclipse of 2017 August 21, at sea level, in UT.
///
/// Arguments
/// -----------------
/// * `latitude`: Geodetic latitude in degrees, north positive.
/// * `longitude`: Longitude in degrees, east positive.
///
/// Errors
/// ----------
/// * [`EclipseError::InvalidLatitude`], [`EclipseError::InvalidLongitude`] or
///   [`EclipseError::NonFiniteInput`] for invalid coordinates.
pub fn solve(latitude: Degree, longitude: Degree) -> Result<EclipseResult, EclipseError> {
    LocalCircumstances::default().solve_at(latitude, longitude)
}
