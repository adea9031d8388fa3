// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Altitude-to-clock-time solver.
//!
//! Every prayer time except Dhuhr is the instant the Sun crosses a given
//! altitude on one side of the meridian.  The hour angle `H` of that crossing
//! follows from the spherical-astronomy relation
//!
//! ```text
//! cos H = (−sin G − sin δ sin φ) / (cos δ cos φ)
//! ```
//!
//! where `G` is the target angle, `δ` the solar declination and `φ` the
//! latitude.  Angles above 90° denote morning events measured from the
//! opposite horizon (`180° − depression`), so they are placed before solar
//! noon; everything else falls after it.
//!
//! All results are hours on the local *mean solar* clock of the observer's
//! meridian.  Time-zone correction happens later in the engine.

use crate::angle::{darccos, darccot, dcos, dsin, dtan, fix_hour};
use crate::julian_date::JulianDate;
use crate::sun::{equation_of_time, sun_declination};
use qtty::{Days, Degrees};

/// Outcome of solving for one solar event.
///
/// `NoSolution` marks an altitude the Sun never reaches on that day
/// (polar day, polar night, or a twilight angle deeper than the Sun dips).
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum EventTime {
    /// Fractional hours since local midnight. May fall outside `[0, 24)`
    /// until formatted.
    Hour(f64),
    NoSolution,
}

impl EventTime {
    /// Wrap a raw hour, mapping `NaN` and infinities to [`EventTime::NoSolution`].
    #[inline]
    pub fn from_hour(hour: f64) -> Self {
        if hour.is_finite() {
            Self::Hour(hour)
        } else {
            Self::NoSolution
        }
    }

    #[inline]
    pub fn hour(self) -> Option<f64> {
        match self {
            Self::Hour(h) => Some(h),
            Self::NoSolution => None,
        }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Self::Hour(_))
    }

    /// Apply `f` to the hour, keeping `NoSolution` as is.
    #[inline]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Hour(h) => Self::from_hour(f(h)),
            Self::NoSolution => Self::NoSolution,
        }
    }

    /// Shift by a signed number of hours.
    #[inline]
    pub fn shifted(self, hours: f64) -> Self {
        self.map(|h| h + hours)
    }
}

impl From<Option<f64>> for EventTime {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::NoSolution, Self::from_hour)
    }
}

/// Observer and date for one computation.
///
/// `julian_date` is already shifted by `−longitude/360` days so that adding a
/// local day fraction lands on the matching UT instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoMoment {
    pub julian_date: JulianDate,
    pub latitude: Degrees,
    pub longitude: Degrees,
    pub utc_offset_hours: f64,
}

impl GeoMoment {
    /// Build a moment for the civil date `jd0` (0h) at the given position.
    pub fn new(jd0: JulianDate, latitude: Degrees, longitude: Degrees, utc_offset_hours: f64) -> Self {
        Self {
            julian_date: jd0 - Days::new(longitude.value() / (15.0 * 24.0)),
            latitude,
            longitude,
            utc_offset_hours,
        }
    }

    #[inline]
    fn at(&self, day_fraction: Days) -> JulianDate {
        self.julian_date + day_fraction
    }

    /// Local mean-solar hour of solar noon.
    pub fn compute_mid_day(&self, day_fraction: Days) -> f64 {
        compute_mid_day(self.julian_date, day_fraction)
    }

    /// Hour at which the Sun reaches angle `angle` (see module docs).
    pub fn compute_time(&self, angle: Degrees, day_fraction: Days) -> EventTime {
        let decl = sun_declination(self.at(day_fraction));
        let noon = self.compute_mid_day(day_fraction);

        let ratio = (-dsin(angle) - dsin(decl) * dsin(self.latitude))
            / (dcos(decl) * dcos(self.latitude));
        if !(-1.0..=1.0).contains(&ratio) {
            return EventTime::NoSolution;
        }
        let v = darccos(ratio).value() / 15.0;

        if angle > Degrees::new(90.0) {
            EventTime::from_hour(noon - v)
        } else {
            EventTime::from_hour(noon + v)
        }
    }

    /// Hour at which an object's shadow equals `shadow_factor` times its
    /// height plus the noon shadow.
    pub fn compute_asr(&self, shadow_factor: f64, day_fraction: Days) -> EventTime {
        let decl = sun_declination(self.at(day_fraction));
        let zenith_at_noon = Degrees::new((self.latitude - decl).value().abs());
        let altitude = darccot(shadow_factor + dtan(zenith_at_noon));
        self.compute_time(Degrees::new(-altitude.value()), day_fraction)
    }
}

/// `12 − EqT` on the meridian clock, for `jd_base + day_fraction`.
pub fn compute_mid_day(jd_base: JulianDate, day_fraction: Days) -> f64 {
    fix_hour(12.0 - equation_of_time(jd_base + day_fraction))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUNRISE_ANGLE: f64 = 180.0 - 0.833;
    const SUNSET_ANGLE: f64 = 0.833;

    fn rawalpindi() -> GeoMoment {
        GeoMoment::new(
            JulianDate::from_calendar(2021, 4, 30),
            Degrees::new(33.573_681_634_123_95),
            Degrees::new(73.173_086_612_440_54),
            5.0,
        )
    }

    fn to_zone(geo: &GeoMoment, t: EventTime) -> f64 {
        t.hour().unwrap() + geo.utc_offset_hours - geo.longitude.value() / 15.0
    }

    #[test]
    fn julian_date_is_longitude_shifted() {
        let geo = rawalpindi();
        let expected = 2_459_334.5 - 73.173_086_612_440_54 / 360.0;
        assert!((geo.julian_date.value() - expected).abs() < 1e-9);
    }

    #[test]
    fn mid_day_near_noon() {
        let geo = rawalpindi();
        let noon = geo.compute_mid_day(Days::new(0.5));
        assert!((noon - 11.954).abs() < 0.01, "{noon}");
        assert!((to_zone(&geo, EventTime::Hour(noon)) - 12.0756).abs() < 0.001);
    }

    #[test]
    fn sunrise_before_and_sunset_after_noon() {
        let geo = rawalpindi();
        let noon = geo.compute_mid_day(Days::new(0.5));
        let rise = geo
            .compute_time(Degrees::new(SUNRISE_ANGLE), Days::new(0.25))
            .hour()
            .unwrap();
        let set = geo
            .compute_time(Degrees::new(SUNSET_ANGLE), Days::new(0.75))
            .hour()
            .unwrap();
        assert!(rise < noon && noon < set);
        // Roughly symmetric around noon.
        assert!(((noon - rise) - (set - noon)).abs() < 0.05);
    }

    #[test]
    fn asr_hanafi_is_later_than_standard() {
        let geo = rawalpindi();
        let t = Days::new(13.0 / 24.0);
        let standard = geo.compute_asr(1.0, t).hour().unwrap();
        let hanafi = geo.compute_asr(2.0, t).hour().unwrap();
        assert!(hanafi > standard + 0.5);
        assert!((to_zone(&geo, EventTime::Hour(hanafi)) - 16.8637).abs() < 0.01);
    }

    #[test]
    fn polar_day_has_no_sunset() {
        let geo = GeoMoment::new(
            JulianDate::from_calendar(2021, 6, 21),
            Degrees::new(78.22),
            Degrees::new(15.65),
            2.0,
        );
        let set = geo.compute_time(Degrees::new(SUNSET_ANGLE), Days::new(0.75));
        assert_eq!(set, EventTime::NoSolution);
        assert!(!set.is_valid());
    }

    #[test]
    fn shallow_sun_has_no_deep_twilight() {
        // Oslo at midsummer never reaches 18° below the horizon.
        let geo = GeoMoment::new(
            JulianDate::from_calendar(2021, 6, 21),
            Degrees::new(59.9139),
            Degrees::new(10.7522),
            2.0,
        );
        let fajr = geo.compute_time(Degrees::new(180.0 - 18.0), Days::new(5.0 / 24.0));
        assert_eq!(fajr, EventTime::NoSolution);
    }

    #[test]
    fn event_time_helpers() {
        assert_eq!(EventTime::from_hour(f64::NAN), EventTime::NoSolution);
        assert_eq!(EventTime::Hour(5.0).shifted(1.5), EventTime::Hour(6.5));
        assert_eq!(EventTime::NoSolution.shifted(1.5), EventTime::NoSolution);
        assert_eq!(EventTime::from(Some(3.0)), EventTime::Hour(3.0));
        assert_eq!(EventTime::from(None), EventTime::NoSolution);
        assert_eq!(EventTime::Hour(2.0).hour(), Some(2.0));
    }
}
