pub mod besselian;
pub mod circumstance;
pub mod constants;
mod conversion;
mod display;
pub mod eclipse;
pub mod eclipse_errors;
pub mod observational;
pub mod observer;
pub mod solver;
pub mod time;

pub use eclipse::{solve, EclipseResult, LocalCircumstances};
pub use eclipse_errors::EclipseError;
