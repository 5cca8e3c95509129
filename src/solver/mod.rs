//! # Local circumstance solvers
//!
//! This module groups the two iterative solvers of the pipeline and their shared
//! configuration:
//!
//! - [`mid_eclipse`] — locates the instant of greatest eclipse at the location (closest
//!   approach of the shadow axis) and classifies the eclipse type;
//! - [`contact`] — refines the four contact instants from analytical seeds derived from
//!   the mid-eclipse geometry;
//! - [`SolverParams`] — tolerance and iteration cap shared by both Newton loops.
//!
//! ## Iteration policy
//!
//! Both solvers apply the fixed-point update `t ← t − f(t)` while `|f(t)| > tolerance`
//! and fewer than `max_iterations` steps have been taken. Hitting the cap is **not** an
//! error: the last iterate is kept and flagged in [`Convergence`]. The default pair
//! (`1e-6` h, `50` iterations) is the reference policy that the contact sign logic has
//! been validated against; change it only with care.
//!
//! ## Usage
//!
//! ```rust
//! use umbra::solver::SolverParams;
//!
//! let params = SolverParams::builder()
//!     .tolerance(1e-8)
//!     .max_iterations(100)
//!     .build()
//!     .unwrap();
//! assert_eq!(params.max_iterations, 100);
//! ```
pub mod contact;
pub mod mid_eclipse;

use std::cmp::Ordering::Greater;

use serde::Serialize;

use crate::constants::{Hour, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::eclipse_errors::EclipseError;

/// Tunable parameters of the Newton iterations.
///
/// Fields
/// -----------------
/// * `tolerance`: stop when the absolute time correction falls below this value (hours).
/// * `max_iterations`: hard cap on the number of corrections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverParams {
    pub tolerance: Hour,
    pub max_iterations: usize,
}

impl SolverParams {
    /// Construct a new [`SolverParams`] with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new [`SolverParamsBuilder`] initialized with the default values.
    pub fn builder() -> SolverParamsBuilder {
        SolverParamsBuilder::new()
    }
}

impl Default for SolverParams {
    fn default() -> Self {
        SolverParams {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Builder for [`SolverParams`], with validation.
#[derive(Debug, Clone)]
pub struct SolverParamsBuilder {
    params: SolverParams,
}

impl Default for SolverParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverParamsBuilder {
    /// Create a new builder initialized with default values.
    pub fn new() -> Self {
        Self {
            params: SolverParams::default(),
        }
    }

    pub fn tolerance(mut self, v: Hour) -> Self {
        self.params.tolerance = v;
        self
    }

    pub fn max_iterations(mut self, v: usize) -> Self {
        self.params.max_iterations = v;
        self
    }

    /// Finalize the builder and produce a [`SolverParams`] instance.
    ///
    /// Validation rules
    /// -----------------
    /// * `tolerance > 0.0` (NaN rejected).
    /// * `max_iterations ≥ 1`.
    ///
    /// Returns
    /// -----------------
    /// * `Ok(SolverParams)` if all values are valid.
    /// * `Err(EclipseError::InvalidSolverParameter)` otherwise.
    pub fn build(self) -> Result<SolverParams, EclipseError> {
        let p = self.params;

        if p.tolerance.partial_cmp(&0.0) != Some(Greater) {
            return Err(EclipseError::InvalidSolverParameter(
                "tolerance must be strictly positive".into(),
            ));
        }
        if p.max_iterations == 0 {
            return Err(EclipseError::InvalidSolverParameter(
                "max_iterations must be >= 1".into(),
            ));
        }

        Ok(p)
    }
}

/// Diagnostics of one Newton iteration.
///
/// `converged == false` means the iteration cap was reached; the result is still the
/// best available estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Convergence {
    /// Number of corrections applied.
    pub iterations: usize,
    /// Whether the last correction fell within the tolerance.
    pub converged: bool,
    /// Last time correction applied, in hours.
    pub last_correction: Hour,
}

/// Run the fixed-point iteration `t ← t − correction(t)` shared by every solver.
///
/// Arguments
/// -----------------
/// * `initial`: the already evaluated state at the seed time.
/// * `params`: tolerance and iteration cap.
/// * `correction`: time correction computed from the current state.
/// * `step`: evaluation of a new state at a given time.
///
/// Return
/// ----------
/// * The last evaluated state with its [`Convergence`] diagnostics.
pub(crate) fn newton_iterate<S, C, E>(
    initial: S,
    params: &SolverParams,
    mut correction: C,
    mut step: E,
) -> Result<(S, Convergence), EclipseError>
where
    C: FnMut(&S) -> Result<Hour, EclipseError>,
    E: FnMut(&S, Hour) -> S,
{
    let mut state = initial;
    let mut last_correction = f64::INFINITY;
    let mut iterations = 0;

    while last_correction.abs() > params.tolerance && iterations < params.max_iterations {
        last_correction = correction(&state)?;
        state = step(&state, last_correction);
        iterations += 1;
        log::trace!("iteration {iterations}: correction = {last_correction:e} h");
    }

    Ok((
        state,
        Convergence {
            iterations,
            converged: last_correction.abs() <= params.tolerance,
            last_correction,
        },
    ))
}
