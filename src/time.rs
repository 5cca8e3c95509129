//! # Event times
//!
//! Conversion of a Besselian time `t` (hours since T0, TT) into a UTC [`Epoch`] and a
//! civil date and clock time.
//!
//! ```text
//! UT hours    = t + t0 − ΔT / 3600
//! event epoch = 0h UTC of the day containing T0 + UT hours
//! local time  = event epoch + utc_offset
//! ```
//!
//! Clock times are rounded to the tenth of a second with [`Epoch::round`] **before** the
//! calendar date is read, so `23:59:59.97` lands on `00:00:00.0` of the next day.
use std::fmt;

use hifitime::{Duration, Epoch, Unit};
use serde::Serialize;

use crate::besselian::BesselianElements;
use crate::constants::{Hour, SECONDS_PER_HOUR};
use crate::eclipse_errors::EclipseError;

/// Gregorian calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Local civil date and clock time of an event, rounded to the tenth of a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LocalTime {
    pub date: CalendarDate,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub tenth: u8,
}

impl LocalTime {
    /// Civil time of a UTC epoch.
    ///
    /// Arguments
    /// -----------------
    /// * `epoch`: UTC instant of the event.
    /// * `utc_offset`: Civil time offset from UTC in hours, east positive.
    pub fn from_epoch(epoch: Epoch, utc_offset: Hour) -> Self {
        let local = (epoch + Duration::from_hours(utc_offset)).round(Unit::Millisecond * 100);
        let (year, month, day, hour, minute, second, nanos) = local.to_gregorian_utc();

        LocalTime {
            date: CalendarDate { year, month, day },
            hour,
            minute,
            second,
            tenth: (nanos / 100_000_000) as u8,
        }
    }

    /// Clock time as `HH:MM:SS.s`.
    pub fn clock(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}.{}",
            self.hour, self.minute, self.second, self.tenth
        )
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date, self.clock())
    }
}

/// UT hours of Besselian time `t`, counted from 0h of the day containing T0.
pub fn ut_hours(elements: &BesselianElements, t: Hour) -> Hour {
    t + elements.t0 - elements.delta_t / SECONDS_PER_HOUR
}

/// UTC epoch of Besselian time `t`.
///
/// The epoch is built from the reference midnight plus a [`Duration`], which keeps the
/// sub-millisecond resolution a single Julian Date in `f64` would lose.
///
/// Errors
/// ----------
/// * [`EclipseError::NonFiniteEventTime`] if `t` is not finite.
pub fn event_epoch(elements: &BesselianElements, t: Hour) -> Result<Epoch, EclipseError> {
    let ut = ut_hours(elements, t);
    if !ut.is_finite() {
        return Err(EclipseError::NonFiniteEventTime(t));
    }
    let midnight = Epoch::from_jde_utc(elements.reference_day());
    Ok(midnight + Duration::from_hours(ut))
}

/// Local civil date and time of Besselian time `t`.
///
/// Arguments
/// -----------------
/// * `elements`: Besselian elements (reference day, T0 and ΔT).
/// * `utc_offset`: Civil time offset from UTC in hours, east positive.
/// * `t`: Hours since T0 (TT).
///
/// Errors
/// ----------
/// * [`EclipseError::NonFiniteEventTime`] if `t` is not finite.
pub fn local_time(
    elements: &BesselianElements,
    utc_offset: Hour,
    t: Hour,
) -> Result<LocalTime, EclipseError> {
    Ok(LocalTime::from_epoch(event_epoch(elements, t)?, utc_offset))
}
