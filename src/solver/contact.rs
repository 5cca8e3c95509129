//! # Contact instants
//!
//! A contact happens when the observer crosses the boundary of a shadow cone, i.e. when
//! the separation `√(u² + v²)` equals the parallax-corrected radius `L` of that shadow
//! (`l1'` for C1/C4, `l2'` for C2/C3). Each contact is refined by a Newton iteration on
//!
//! ```text
//! k    = (a·v − u·b) / (n·L)
//! f(t) = (u·a + v·b) / n²  −  s·√(1 − k²)·L / n          t ← t − f(t)
//! ```
//!
//! where `s = −1` before greatest eclipse (C1, C2) and `s = +1` after it (C3, C4). The
//! seed is `t_mid + s·√(1 − k²)·L / n`, evaluated with the mid-eclipse geometry.
//!
//! For a total eclipse the umbral radius `l2'` is negative, which mirrors the boundary
//! offset: `s` is flipped for C2 and C3 (both in the seed and in the iteration) whenever
//! `l2' < 0` at greatest eclipse.
//!
//! `1 − k²` is clamped at zero: for grazing geometry near the penumbral edge the rounding
//! of `k` slightly above one would otherwise give a NaN.
use serde::Serialize;

use crate::besselian::BesselianElements;
use crate::circumstance::{Circumstance, EventKind, Shadow};
use crate::constants::Hour;
use crate::eclipse_errors::EclipseError;
use crate::observer::ObserverConstants;
use crate::solver::mid_eclipse::MidEclipse;
use crate::solver::{newton_iterate, Convergence, SolverParams};

/// Solved contact instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContactSolution {
    pub circumstance: Circumstance,
    pub convergence: Convergence,
}

/// Signed offset `s·√(1 − k²)·L / n` between the closest approach and the instant where
/// the observer sits on the shadow boundary of radius `radius`.
fn boundary_offset(circumstance: &Circumstance, radius: f64, sign: f64) -> Hour {
    let n = circumstance.n_squared.sqrt();
    let k = circumstance
        .relative_velocity()
        .perp(&circumstance.relative_position())
        / (n * radius);

    sign * (1.0 - k * k).max(0.0).sqrt() * radius / n
}

/// Side sign of a contact, flipped for the umbral contacts of a total eclipse.
fn boundary_sign(kind: EventKind, shadow: Shadow, mid: &MidEclipse) -> f64 {
    if shadow == Shadow::Umbra && mid.l2_prime < 0.0 {
        -kind.side()
    } else {
        kind.side()
    }
}

/// Initial guess of a contact instant from the mid-eclipse geometry.
///
/// Errors
/// ----------
/// * [`EclipseError::NotAContact`] for [`EventKind::MidEclipse`].
pub fn contact_seed(mid: &MidEclipse, kind: EventKind) -> Result<Hour, EclipseError> {
    let shadow = kind.shadow().ok_or(EclipseError::NotAContact(kind))?;
    let radius = mid.circumstance.radius(shadow)?;
    let sign = boundary_sign(kind, shadow, mid);

    let offset = boundary_offset(&mid.circumstance, radius, sign);
    Ok(mid.circumstance.t + offset)
}

/// Refine one contact instant.
///
/// Arguments
/// -----------------
/// * `elements`: Besselian elements of the eclipse.
/// * `observer`: Precomputed observer constants.
/// * `params`: Newton tolerance and iteration cap.
/// * `mid`: Solved greatest eclipse, used for the seed and the sign rule.
/// * `kind`: One of C1, C2, C3, C4.
///
/// Return
/// ----------
/// * The [`ContactSolution`] at the last iterate. Reaching the iteration cap is logged and
///   reported through [`Convergence::converged`], not as an error.
///
/// Errors
/// ----------
/// * [`EclipseError::NotAContact`] for [`EventKind::MidEclipse`].
pub fn solve_contact(
    elements: &BesselianElements,
    observer: &ObserverConstants,
    params: &SolverParams,
    mid: &MidEclipse,
    kind: EventKind,
) -> Result<ContactSolution, EclipseError> {
    let shadow = kind.shadow().ok_or(EclipseError::NotAContact(kind))?;
    let sign = boundary_sign(kind, shadow, mid);
    let seed = contact_seed(mid, kind)?;

    let (circumstance, convergence) = newton_iterate(
        Circumstance::evaluate(elements, observer, kind, seed),
        params,
        |c| {
            let offset = boundary_offset(c, c.radius(shadow)?, sign);
            Ok(c.closest_approach_correction() - offset)
        },
        |c, correction| Circumstance::evaluate(elements, observer, kind, c.t - correction),
    )?;

    if convergence.converged {
        log::debug!(
            "{kind:?} at t = {:.6} h after {} iterations",
            circumstance.t,
            convergence.iterations
        );
    } else {
        log::warn!(
            "{kind:?} iteration stopped after {} steps (last correction {:e} h)",
            convergence.iterations,
            convergence.last_correction
        );
    }

    if !elements.is_within_validity(circumstance.t) {
        log::warn!(
            "{kind:?} at t = {:.3} h lies outside the validity window [{}, {}]",
            circumstance.t,
            elements.t_min,
            elements.t_max
        );
    }

    Ok(ContactSolution {
        circumstance,
        convergence,
    })
}

#[cfg(test)]
mod contact_test {
    use approx::assert_relative_eq;

    use super::*;
    use crate::besselian::AUGUST_21_2017;
    use crate::solver::mid_eclipse::solve_mid_eclipse;

    fn setup(lat: f64, lon: f64) -> (ObserverConstants, MidEclipse) {
        let observer = ObserverConstants::new(lat, lon, None, None).unwrap();
        let mid = solve_mid_eclipse(&AUGUST_21_2017, &observer, &SolverParams::default()).unwrap();
        (observer, mid)
    }

    fn contact(observer: &ObserverConstants, mid: &MidEclipse, kind: EventKind) -> ContactSolution {
        solve_contact(
            &AUGUST_21_2017,
            observer,
            &SolverParams::default(),
            mid,
            kind,
        )
        .unwrap()
    }

    #[test]
    fn test_mid_eclipse_is_not_a_contact() {
        let (observer, mid) = setup(35.0, -83.0);
        assert_eq!(
            contact_seed(&mid, EventKind::MidEclipse),
            Err(EclipseError::NotAContact(EventKind::MidEclipse))
        );
        assert!(solve_contact(
            &AUGUST_21_2017,
            &observer,
            &SolverParams::default(),
            &mid,
            EventKind::MidEclipse
        )
        .is_err());
    }

    #[test]
    fn test_seeds_bracket_mid_eclipse() {
        let (_, mid) = setup(35.0, -83.0);
        let t = mid.circumstance.t;

        let c1 = contact_seed(&mid, EventKind::C1).unwrap();
        let c2 = contact_seed(&mid, EventKind::C2).unwrap();
        let c3 = contact_seed(&mid, EventKind::C3).unwrap();
        let c4 = contact_seed(&mid, EventKind::C4).unwrap();

        assert!(c1 < c2 && c2 < t && t < c3 && c3 < c4);
    }

    #[test]
    fn test_total_contacts() {
        let (observer, mid) = setup(35.0, -83.0);

        let c1 = contact(&observer, &mid, EventKind::C1);
        let c2 = contact(&observer, &mid, EventKind::C2);
        let c3 = contact(&observer, &mid, EventKind::C3);
        let c4 = contact(&observer, &mid, EventKind::C4);

        assert_relative_eq!(c1.circumstance.t, -0.8520728014842757, epsilon = 1e-6);
        assert_relative_eq!(c2.circumstance.t, 0.6264485596105096, epsilon = 1e-6);
        assert_relative_eq!(c3.circumstance.t, 0.6680924572232291, epsilon = 1e-6);
        assert_relative_eq!(c4.circumstance.t, 2.048874537220469, epsilon = 1e-6);

        for c in [c1, c2, c3, c4] {
            assert!(c.convergence.converged);
        }
    }

    #[test]
    fn test_observer_sits_on_the_shadow_boundary() {
        let (observer, mid) = setup(36.1627, -86.7816);

        for kind in [EventKind::C1, EventKind::C2, EventKind::C3, EventKind::C4] {
            let c = contact(&observer, &mid, kind).circumstance;
            let radius = c.radius(kind.shadow().unwrap()).unwrap();
            assert_relative_eq!(c.separation(), radius.abs(), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_grazing_penumbral_contact_is_finite() {
        let (observer, mid) = setup(-19.8, -40.0);
        assert!(mid.magnitude > 0.0 && mid.magnitude < 0.01);

        let c1 = contact(&observer, &mid, EventKind::C1);
        let c4 = contact(&observer, &mid, EventKind::C4);
        assert!(c1.circumstance.t.is_finite());
        assert!(c4.circumstance.t.is_finite());
        assert!(c1.circumstance.t < mid.circumstance.t);
        assert!(mid.circumstance.t < c4.circumstance.t);
    }
}
