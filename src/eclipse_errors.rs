use thiserror::Error;

use crate::circumstance::{EventKind, Shadow};

#[derive(Error, Debug)]
pub enum EclipseError {
    #[error("Latitude out of range [-90, 90]: {0}")]
    InvalidLatitude(f64),

    #[error("Longitude out of range [-180, 180]: {0}")]
    InvalidLongitude(f64),

    #[error("Non-finite observer input: {0}")]
    NonFiniteInput(&'static str),

    #[error("Invalid solver parameter: {0}")]
    InvalidSolverParameter(String),

    #[error("Event time is not finite: {0} h")]
    NonFiniteEventTime(f64),

    #[error("{1:?} radius is not evaluated for event {0:?}")]
    ShadowRadiusNotEvaluated(EventKind, Shadow),

    #[error("{0:?} is not a shadow contact")]
    NotAContact(EventKind),
}

impl PartialEq for EclipseError {
    fn eq(&self, other: &Self) -> bool {
        use EclipseError::*;
        match (self, other) {
            (InvalidLatitude(a), InvalidLatitude(b)) => a == b,
            (InvalidLongitude(a), InvalidLongitude(b)) => a == b,
            (NonFiniteInput(a), NonFiniteInput(b)) => a == b,
            (InvalidSolverParameter(a), InvalidSolverParameter(b)) => a == b,
            (NonFiniteEventTime(a), NonFiniteEventTime(b)) => a == b,
            (ShadowRadiusNotEvaluated(a, c), ShadowRadiusNotEvaluated(b, d)) => a == b && c == d,
            (NotAContact(a), NotAContact(b)) => a == b,
            _ => false,
        }
    }
}
