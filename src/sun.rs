// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Low-precision solar ephemeris
//!
//! Apparent declination of the Sun and the equation of time from the
//! analytic series published by the U.S. Naval Observatory ("Approximate
//! Solar Coordinates"):
//!
//! ```text
//! D = JD − 2451545.0
//! g = 357.529 + 0.98560028 D            mean anomaly
//! q = 280.459 + 0.98564736 D            mean longitude
//! L = q + 1.915 sin g + 0.020 sin 2g    ecliptic longitude
//! e = 23.439 − 0.00000036 D             obliquity
//! RA = atan2(cos e sin L, cos L)        right ascension
//! δ  = asin(sin e sin L)                declination
//! EqT = q/15 − RA/15                    equation of time (hours)
//! ```
//!
//! ## Accuracy
//! About 0.01° in position and a few seconds in the equation of time
//! within two centuries of J2000.  That is far below the one-minute
//! resolution of the published prayer times.

use crate::angle::{darcsin, darctan2, dcos, dsin, fix_angle, fix_hour};
use crate::julian_date::JulianDate;
use qtty::Degrees;

/// Declination and equation of time for one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SunPosition {
    /// Apparent declination of the Sun.
    pub declination: Degrees,
    /// Apparent minus mean solar time, in hours, within `[-12, 12)`.
    pub equation_of_time: f64,
}

/// Solar declination and equation of time at `jd`.
pub fn sun_position(jd: JulianDate) -> SunPosition {
    let d = jd.days_since_j2000().value();

    let g = fix_angle(Degrees::new(357.529 + 0.985_600_28 * d));
    let q = fix_angle(Degrees::new(280.459 + 0.985_647_36 * d));
    let l = fix_angle(
        q + Degrees::new(1.915 * dsin(g) + 0.020 * dsin(Degrees::new(2.0 * g.value()))),
    );
    let e = Degrees::new(23.439 - 0.000_000_36 * d);

    let declination = darcsin(dsin(e) * dsin(l));
    let ra_hours = fix_hour(darctan2(dcos(e) * dsin(l), dcos(l)).value() / 15.0);

    // q/15 and RA both live on [0, 24); re-centre the difference on zero.
    let equation_of_time = fix_hour(q.value() / 15.0 - ra_hours + 12.0) - 12.0;

    SunPosition {
        declination,
        equation_of_time,
    }
}

/// Equation of time at `jd`, in hours.
#[inline]
pub fn equation_of_time(jd: JulianDate) -> f64 {
    sun_position(jd).equation_of_time
}

/// Solar declination at `jd`.
#[inline]
pub fn sun_declination(jd: JulianDate) -> Degrees {
    sun_position(jd).declination
}
