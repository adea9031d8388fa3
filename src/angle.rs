// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Degree-domain trigonometry and range reduction.
//!
//! The solar formulas used by this crate are written in degrees, so every
//! trig call goes through one of these wrappers.  Inverse functions return
//! [`Degrees`]; forward functions take [`Degrees`] and return the plain ratio.
//!
//! Domain violations (`|x| > 1` for [`darcsin`] / [`darccos`]) follow
//! IEEE‑754 and yield `NaN`.  Callers that can hit them (the hour-angle
//! solver) check the result explicitly instead of letting `NaN` leak.

use qtty::Degrees;

const FULL_TURN_DEG: f64 = 360.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Reduce an angle to `[0, 360)`.
#[inline]
pub fn fix_angle(angle: Degrees) -> Degrees {
    Degrees::new(reduce(angle.value(), FULL_TURN_DEG))
}

/// Reduce a clock hour to `[0, 24)`.
#[inline]
pub fn fix_hour(hour: f64) -> f64 {
    reduce(hour, HOURS_PER_DAY)
}

/// Euclidean remainder that never returns the modulus itself.
///
/// `rem_euclid` can round up to exactly `modulus` for tiny negative inputs
/// (e.g. `-1e-17`), which would break the half-open range.
#[inline]
fn reduce(x: f64, modulus: f64) -> f64 {
    let r = x.rem_euclid(modulus);
    if r >= modulus {
        0.0
    } else {
        r
    }
}

/// Forward difference `b − a` on the 24 h clock, in `[0, 24)`.
#[inline]
pub fn time_diff(a: f64, b: f64) -> f64 {
    fix_hour(b - a)
}

#[inline]
pub fn dsin(d: Degrees) -> f64 {
    d.value().to_radians().sin()
}

#[inline]
pub fn dcos(d: Degrees) -> f64 {
    d.value().to_radians().cos()
}

#[inline]
pub fn dtan(d: Degrees) -> f64 {
    d.value().to_radians().tan()
}

#[inline]
pub fn darcsin(x: f64) -> Degrees {
    Degrees::new(x.asin().to_degrees())
}

#[inline]
pub fn darccos(x: f64) -> Degrees {
    Degrees::new(x.acos().to_degrees())
}

#[inline]
pub fn darctan(x: f64) -> Degrees {
    Degrees::new(x.atan().to_degrees())
}

#[inline]
pub fn darctan2(y: f64, x: f64) -> Degrees {
    Degrees::new(y.atan2(x).to_degrees())
}

/// Inverse cotangent, `atan2(1, x)`.
///
/// Result lies in `(0, 180)`, so negative arguments map to obtuse angles.
/// This differs from `atan(1/x)` for `x < 0`, which would return a negative
/// angle instead.  The Asr shadow formula only produces `x < 0` when the sun
/// stays below the horizon at noon, where no Asr exists either way.
#[inline]
pub fn darccot(x: f64) -> Degrees {
    darctan2(1.0, x)
}
