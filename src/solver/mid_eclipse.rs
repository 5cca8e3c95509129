//! # Greatest eclipse at a location
//!
//! Newton iteration on the closest approach of the shadow axis to the observer, seeded
//! at `t = 0` (the reference hour T0):
//!
//! ```text
//! f(t) = (u·a + v·b) / n²          t ← t − f(t)
//! ```
//!
//! At the solution, the separation `m = √(u² + v²)` and the parallax-corrected radii give
//!
//! ```text
//! magnitude      = (l1' − m) / (l1' + l2')
//! moon/sun ratio = (l1' − l2') / (l1' + l2')
//! ```
//!
//! and the eclipse type: none if `magnitude ≤ 0`, central (total when `l2' < 0`,
//! annular otherwise) if `m < |l2'|`, partial otherwise.
use serde::Serialize;

use crate::besselian::BesselianElements;
use crate::circumstance::{Circumstance, EventKind, Shadow};
use crate::eclipse_errors::EclipseError;
use crate::observer::ObserverConstants;
use crate::solver::{newton_iterate, Convergence, SolverParams};

/// Kind of eclipse seen from a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EclipseType {
    None,
    Partial,
    Annular,
    Total,
}

impl EclipseType {
    /// Whether the location is inside the umbral/antumbral path (C2 and C3 exist).
    pub fn is_central(self) -> bool {
        matches!(self, EclipseType::Annular | EclipseType::Total)
    }
}

impl std::fmt::Display for EclipseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EclipseType::None => "No eclipse",
            EclipseType::Partial => "Partial",
            EclipseType::Annular => "Annular",
            EclipseType::Total => "Total",
        };
        write!(f, "{label}")
    }
}

/// Solved greatest eclipse and the quantities derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MidEclipse {
    pub circumstance: Circumstance,
    pub convergence: Convergence,
    /// Separation between observer and shadow axis, in Earth radii.
    pub separation: f64,
    /// Parallax-corrected penumbral radius at greatest eclipse.
    pub l1_prime: f64,
    /// Parallax-corrected umbral radius at greatest eclipse (negative for a total eclipse).
    pub l2_prime: f64,
    pub magnitude: f64,
    pub moon_sun_ratio: f64,
    pub eclipse_type: EclipseType,
}

/// Eclipse magnitude from the separation and the parallax-corrected radii.
pub fn magnitude(separation: f64, l1_prime: f64, l2_prime: f64) -> f64 {
    (l1_prime - separation) / (l1_prime + l2_prime)
}

/// Classify the eclipse from the geometry at greatest eclipse.
pub fn classify(magnitude: f64, separation: f64, l2_prime: f64) -> EclipseType {
    if magnitude <= 0.0 {
        EclipseType::None
    } else if separation.abs() < l2_prime.abs() {
        if l2_prime < 0.0 {
            EclipseType::Total
        } else {
            EclipseType::Annular
        }
    } else {
        EclipseType::Partial
    }
}

/// Locate the greatest eclipse at the observer location and classify the eclipse.
///
/// Arguments
/// -----------------
/// * `elements`: Besselian elements of the eclipse.
/// * `observer`: Precomputed observer constants.
/// * `params`: Newton tolerance and iteration cap.
///
/// Return
/// ----------
/// * The [`MidEclipse`] record: solved circumstance, convergence diagnostics, magnitude,
///   Moon/Sun ratio and eclipse type.
///
/// Errors
/// ----------
/// * Only if the mid-eclipse record misses a shadow radius, which cannot happen for
///   [`EventKind::MidEclipse`].
pub fn solve_mid_eclipse(
    elements: &BesselianElements,
    observer: &ObserverConstants,
    params: &SolverParams,
) -> Result<MidEclipse, EclipseError> {
    let seed = Circumstance::evaluate(elements, observer, EventKind::MidEclipse, 0.0);

    let (circumstance, convergence) = newton_iterate(
        seed,
        params,
        |c| Ok(c.closest_approach_correction()),
        |c, correction| {
            Circumstance::evaluate(elements, observer, EventKind::MidEclipse, c.t - correction)
        },
    )?;

    if !convergence.converged {
        log::warn!(
            "mid-eclipse iteration stopped after {} steps (last correction {:e} h)",
            convergence.iterations,
            convergence.last_correction
        );
    }

    let separation = circumstance.separation();
    let l1_prime = circumstance.radius(Shadow::Penumbra)?;
    let l2_prime = circumstance.radius(Shadow::Umbra)?;

    let magnitude = magnitude(separation, l1_prime, l2_prime);
    let moon_sun_ratio = (l1_prime - l2_prime) / (l1_prime + l2_prime);
    let eclipse_type = classify(magnitude, separation, l2_prime);

    log::debug!(
        "mid-eclipse at t = {:.6} h after {} iterations: {eclipse_type}, magnitude {magnitude:.4}",
        circumstance.t,
        convergence.iterations
    );

    Ok(MidEclipse {
        circumstance,
        convergence,
        separation,
        l1_prime,
        l2_prime,
        magnitude,
        moon_sun_ratio,
        eclipse_type,
    })
}
