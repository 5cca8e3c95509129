//! # Local circumstances at a Besselian time
//!
//! A [`Circumstance`] is the complete state of the eclipse geometry, as seen by one
//! observer, at one Besselian time `t`. It combines:
//!
//! 1. the time-only dependent Besselian quantities (shadow axis `x, y`, declination `d`,
//!    hour angle `μ`, shadow radii `l1, l2` and their time derivatives);
//! 2. the projection of the observer on the fundamental plane (`ξ, η, ζ`) and its
//!    velocity (`ξ', η'`);
//! 3. the observer-relative shadow position `(u, v)` and velocity `(a, b)`;
//! 4. the parallax-corrected radii `l1', l2'` and the topocentric altitude/azimuth.
//!
//! Each call to [`Circumstance::evaluate`] builds a fresh record from `t`: no field is
//! ever carried over from a previous iteration of a solver.
//!
//! ```text
//!        BesselianElements ──time_dependent(t)──► TimeDependent
//!                                                      │
//!   ObserverConstants ─────────────────────────────────┤
//!                                                      ▼
//!                                      Circumstance { ξ, η, ζ, u, v, a, b, n², l', alt, az }
//! ```
use nalgebra::Vector2;
use serde::Serialize;

use crate::besselian::BesselianElements;
use crate::constants::{EarthRadii, Hour, Radian, DELTA_T_TO_HOUR_ANGLE};
use crate::eclipse_errors::EclipseError;
use crate::observational::altitude_azimuth;
use crate::observer::ObserverConstants;

/// Shadow cone whose boundary defines a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Shadow {
    /// Outer cone, bounded by `l1`: partial phase.
    Penumbra,
    /// Inner cone, bounded by `l2`: total (`l2 < 0`) or annular (`l2 > 0`) phase.
    Umbra,
}

/// The five instants of a local eclipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    /// First contact, beginning of the partial phase.
    C1,
    /// Second contact, beginning of totality or annularity.
    C2,
    /// Greatest eclipse at the location.
    MidEclipse,
    /// Third contact, end of totality or annularity.
    C3,
    /// Fourth contact, end of the partial phase.
    C4,
}

impl EventKind {
    /// Whether the penumbral radius `l1` must be evaluated for this event.
    pub fn needs_penumbra(self) -> bool {
        matches!(self, EventKind::C1 | EventKind::MidEclipse | EventKind::C4)
    }

    /// Whether the umbral radius `l2` must be evaluated for this event.
    pub fn needs_umbra(self) -> bool {
        matches!(self, EventKind::C2 | EventKind::MidEclipse | EventKind::C3)
    }

    /// Shadow boundary crossed at this contact (`None` for mid-eclipse).
    pub fn shadow(self) -> Option<Shadow> {
        match self {
            EventKind::C1 | EventKind::C4 => Some(Shadow::Penumbra),
            EventKind::C2 | EventKind::C3 => Some(Shadow::Umbra),
            EventKind::MidEclipse => None,
        }
    }

    /// -1 for the contacts before greatest eclipse, +1 after it, 0 at mid-eclipse.
    pub fn side(self) -> f64 {
        match self {
            EventKind::C1 | EventKind::C2 => -1.0,
            EventKind::MidEclipse => 0.0,
            EventKind::C3 | EventKind::C4 => 1.0,
        }
    }
}

/// Local circumstances of the eclipse at a given Besselian time.
///
/// Units
/// -----
/// * lengths (`x`, `y`, `xi`, `eta`, `zeta`, `u`, `v`, radii): Earth equatorial radii,
/// * velocities: Earth radii per hour,
/// * angles: radians, angular rates: radians per hour,
/// * `t`: hours since T0 (TT).
///
/// Invariants
/// ----------
/// * `n_squared == a² + b²`, always recomputed together with `a` and `b`.
/// * `l1`, `dl1`, `l1_prime` are `Some` iff [`EventKind::needs_penumbra`];
///   `l2`, `dl2`, `l2_prime` are `Some` iff [`EventKind::needs_umbra`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Circumstance {
    pub event_kind: EventKind,
    pub t: Hour,

    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,

    pub d: Radian,
    pub sin_d: f64,
    pub cos_d: f64,
    pub dd: f64,

    pub m: Radian,
    pub dm: f64,

    pub l1: Option<f64>,
    pub dl1: Option<f64>,
    pub l2: Option<f64>,
    pub dl2: Option<f64>,

    pub h: Radian,
    pub sin_h: f64,
    pub cos_h: f64,

    pub xi: f64,
    pub eta: f64,
    pub zeta: f64,
    pub dxi: f64,
    pub deta: f64,

    pub u: f64,
    pub v: f64,
    pub a: f64,
    pub b: f64,
    pub n_squared: f64,

    pub l1_prime: Option<f64>,
    pub l2_prime: Option<f64>,

    pub altitude: Radian,
    pub azimuth: Radian,
}

impl Circumstance {
    /// Evaluate the local circumstances of `kind` at Besselian time `t`.
    ///
    /// Arguments
    /// -----------------
    /// * `elements`: Besselian elements of the eclipse.
    /// * `observer`: Precomputed observer constants.
    /// * `kind`: Event being solved (selects which radii are evaluated).
    /// * `t`: Hours since T0 (TT).
    ///
    /// Return
    /// ----------
    /// * A freshly computed [`Circumstance`].
    pub fn evaluate(
        elements: &BesselianElements,
        observer: &ObserverConstants,
        kind: EventKind,
        t: Hour,
    ) -> Circumstance {
        let td = elements.time_dependent(kind, t);
        let rho_sin_phi = observer.rho_sin_phi();
        let rho_cos_phi = observer.rho_cos_phi();

        // Local hour angle of the shadow axis
        let h = td.m - observer.longitude() - elements.delta_t / DELTA_T_TO_HOUR_ANGLE;
        let (sin_h, cos_h) = h.sin_cos();

        // Observer on the fundamental plane
        let xi = rho_cos_phi * sin_h;
        let eta = rho_sin_phi * td.cos_d - rho_cos_phi * cos_h * td.sin_d;
        let zeta = rho_sin_phi * td.sin_d + rho_cos_phi * cos_h * td.cos_d;
        let dxi = td.dm * rho_cos_phi * cos_h;
        let deta = td.dm * xi * td.sin_d - zeta * td.dd;

        let u = td.x - xi;
        let v = td.y - eta;
        let a = td.dx - dxi;
        let b = td.dy - deta;

        let (altitude, azimuth) = altitude_azimuth(td.sin_d, td.cos_d, sin_h, cos_h, observer);

        Circumstance {
            event_kind: kind,
            t,
            x: td.x,
            y: td.y,
            dx: td.dx,
            dy: td.dy,
            d: td.d,
            sin_d: td.sin_d,
            cos_d: td.cos_d,
            dd: td.dd,
            m: td.m,
            dm: td.dm,
            l1: td.l1.map(|(l1, _)| l1),
            dl1: td.l1.map(|(_, dl1)| dl1),
            l2: td.l2.map(|(l2, _)| l2),
            dl2: td.l2.map(|(_, dl2)| dl2),
            h,
            sin_h,
            cos_h,
            xi,
            eta,
            zeta,
            dxi,
            deta,
            u,
            v,
            a,
            b,
            n_squared: a * a + b * b,
            l1_prime: td.l1.map(|(l1, _)| l1 - zeta * elements.tan_f1),
            l2_prime: td.l2.map(|(l2, _)| l2 - zeta * elements.tan_f2),
            altitude,
            azimuth,
        }
    }

    /// Shadow-axis position relative to the observer, `(u, v)`.
    pub fn relative_position(&self) -> Vector2<f64> {
        Vector2::new(self.u, self.v)
    }

    /// Shadow-axis velocity relative to the observer, `(a, b)`.
    pub fn relative_velocity(&self) -> Vector2<f64> {
        Vector2::new(self.a, self.b)
    }

    /// Distance between the observer and the shadow axis, `√(u² + v²)`.
    pub fn separation(&self) -> EarthRadii {
        self.relative_position().norm()
    }

    /// Parallax-corrected radius of the requested shadow.
    ///
    /// Errors
    /// ----------
    /// * [`EclipseError::ShadowRadiusNotEvaluated`] if the event kind of this record does
    ///   not evaluate that shadow.
    pub fn radius(&self, shadow: Shadow) -> Result<EarthRadii, EclipseError> {
        let radius = match shadow {
            Shadow::Penumbra => self.l1_prime,
            Shadow::Umbra => self.l2_prime,
        };
        radius.ok_or(EclipseError::ShadowRadiusNotEvaluated(self.event_kind, shadow))
    }

    /// Time correction `(u·a + v·b) / n²` towards the closest approach of the shadow axis.
    pub fn closest_approach_correction(&self) -> Hour {
        self.relative_position().dot(&self.relative_velocity()) / self.n_squared
    }
}
