//! # Constants and type definitions for umbra
//!
//! This module centralizes the **physical constants**, **numerical defaults** and
//! **unit type aliases** used by the local-circumstance pipeline.
//!
//! ## Overview
//!
//! - Geodetic constants of the reference ellipsoid used by the Besselian formalism
//! - Unit conversions (hours ↔ seconds)
//! - Solver defaults (tolerance, iteration cap)
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in an hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Ratio of the Earth's polar to equatorial radius (b/a) used for the geocentric latitude.
pub const EARTH_AXIS_RATIO: f64 = 0.99664719;

/// Earth equatorial radius in meters (IAU 1976), the unit of the fundamental plane.
pub const EARTH_EQUATORIAL_RADIUS: Meter = 6_378_140.0;

/// Converts ΔT in seconds into the radian shift of the hour angle of the shadow axis.
///
/// The Earth turns by 1.002738 · 2π rad per 86400 s, so one radian is
/// 86400 / (1.002738 · 2π) ≈ 13713.44 seconds of time.
pub const DELTA_T_TO_HOUR_ANGLE: f64 = 13_713.44;

/// Altitude (radians) under which an event is considered below the horizon.
///
/// Accounts for atmospheric refraction and the solar semi-diameter (≈ -0.3°).
pub const HORIZON_ALTITUDE: Radian = -0.00524;

// -------------------------------------------------------------------------------------------------
// Solver defaults
// -------------------------------------------------------------------------------------------------

/// Default convergence threshold on the time correction, in hours.
pub const DEFAULT_TOLERANCE: Hour = 1e-6;

/// Default hard cap on Newton iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Duration or time of day in hours
pub type Hour = f64;
/// Julian Date (days)
pub type JD = f64;
/// Length in units of the Earth equatorial radius (fundamental plane unit)
pub type EarthRadii = f64;
