// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Rendering of fractional hours.

use crate::angle::fix_hour;
use crate::config::TimeFormat;
use crate::solver::EventTime;

/// Marker printed for events without a usable time.
pub const INVALID_TIME: &str = "----";

/// Render `time` according to `format`.
///
/// `NoSolution`, `NaN` and negative hours always render as [`INVALID_TIME`].
/// Clock formats round to the nearest minute and wrap into `[0, 24)`.
pub fn format_time(time: EventTime, format: TimeFormat) -> String {
    match time {
        EventTime::Hour(hour) => format_hour(hour, format),
        EventTime::NoSolution => INVALID_TIME.to_string(),
    }
}

/// Render a raw fractional hour according to `format`.
pub fn format_hour(hour: f64, format: TimeFormat) -> String {
    if hour.is_nan() || hour < 0.0 {
        return INVALID_TIME.to_string();
    }
    match format {
        TimeFormat::Time24 => to_time24(hour),
        TimeFormat::Time12 => to_time12(hour, true),
        TimeFormat::Time12NoSuffix => to_time12(hour, false),
        TimeFormat::Floating => format!("{hour:.6}"),
    }
}

/// Split into whole hours and minutes after rounding to the nearest minute.
fn hours_minutes(hour: f64) -> (u32, u32) {
    let rounded = fix_hour(hour + 0.5 / 60.0);
    let hours = rounded.floor();
    let minutes = ((rounded - hours) * 60.0).floor();
    (hours as u32, minutes as u32)
}

fn to_time24(hour: f64) -> String {
    let (h, m) = hours_minutes(hour);
    format!("{h:02}:{m:02}")
}

fn to_time12(hour: f64, suffix: bool) -> String {
    let (h, m) = hours_minutes(hour);
    let h12 = (h + 12 - 1) % 12 + 1;
    if suffix {
        let meridiem = if h >= 12 { "pm" } else { "am" };
        format!("{h12:02}:{m:02}{meridiem}")
    } else {
        format!("{h12:02}:{m:02}")
    }
}
