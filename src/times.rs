// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! One day's worth of prayer times.
//!
//! - [`Prayer`]: the seven events, in chronological order.
//! - [`DayTimes`]: unformatted [`EventTime`]s indexed by [`Prayer`].
//! - [`PrayerTimesRecord`]: the same seven values, formatted, as named fields.

use crate::config::TimeFormat;
use crate::error::{Error, Result};
use crate::format::format_time;
use crate::solver::EventTime;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone};
use std::ops::{Index, IndexMut};
use strum_macros::{Display, EnumIter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of events in a day.
pub const PRAYER_COUNT: usize = 7;

/// The seven daily events, in chronological order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Sunset,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; PRAYER_COUNT] = [
        Self::Fajr,
        Self::Sunrise,
        Self::Dhuhr,
        Self::Asr,
        Self::Sunset,
        Self::Maghrib,
        Self::Isha,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Seven [`EventTime`]s, positionally Fajr through Isha.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DayTimes {
    times: [EventTime; PRAYER_COUNT],
}

impl DayTimes {
    pub const fn new(times: [EventTime; PRAYER_COUNT]) -> Self {
        Self { times }
    }

    /// Build from raw hours; non-finite values become `NoSolution`.
    pub fn from_hours(hours: [f64; PRAYER_COUNT]) -> Self {
        Self::new(hours.map(EventTime::from_hour))
    }

    #[inline]
    pub fn get(&self, prayer: Prayer) -> EventTime {
        self.times[prayer.index()]
    }

    pub fn as_array(&self) -> &[EventTime; PRAYER_COUNT] {
        &self.times
    }

    pub fn iter(&self) -> impl Iterator<Item = (Prayer, EventTime)> + '_ {
        Prayer::ALL.into_iter().zip(self.times.iter().copied())
    }

    /// Apply `f` to every event.
    pub fn map(self, f: impl FnMut(EventTime) -> EventTime) -> Self {
        Self::new(self.times.map(f))
    }

    /// Format all seven values.
    pub fn format(&self, format: TimeFormat) -> [String; PRAYER_COUNT] {
        self.times.map(|t| format_time(t, format))
    }

    /// Format all seven values into a named record.
    pub fn to_record(&self, format: TimeFormat) -> PrayerTimesRecord {
        PrayerTimesRecord::from(self.format(format))
    }

    /// Civil date-time of `prayer` on `date`, in the zone `offset`.
    ///
    /// Hours outside `[0, 24)` roll into the neighbouring day, so an Isha
    /// pushed past midnight by high-latitude adjustment lands on `date + 1`.
    /// The result is truncated to the second.
    pub fn to_datetime(
        &self,
        prayer: Prayer,
        date: NaiveDate,
        offset: FixedOffset,
    ) -> Result<DateTime<FixedOffset>> {
        let hour = self.get(prayer).hour().ok_or(Error::NoSolution(prayer))?;
        let invalid_date = || Error::InvalidDate {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        };
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .and_then(|local| offset.from_local_datetime(&local).single())
            .ok_or_else(invalid_date)?;
        let seconds = (hour * 3600.0).floor() as i64;
        Ok(midnight + Duration::seconds(seconds))
    }
}

impl Index<Prayer> for DayTimes {
    type Output = EventTime;

    fn index(&self, prayer: Prayer) -> &Self::Output {
        &self.times[prayer.index()]
    }
}

impl IndexMut<Prayer> for DayTimes {
    fn index_mut(&mut self, prayer: Prayer) -> &mut Self::Output {
        &mut self.times[prayer.index()]
    }
}

/// Formatted times as named fields, for structured output such as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrayerTimesRecord {
    pub fajr: String,
    pub sunrise: String,
    pub dhuhr: String,
    pub asr: String,
    pub sunset: String,
    pub maghrib: String,
    pub isha: String,
}

impl From<[String; PRAYER_COUNT]> for PrayerTimesRecord {
    fn from(values: [String; PRAYER_COUNT]) -> Self {
        let [fajr, sunrise, dhuhr, asr, sunset, maghrib, isha] = values;
        Self {
            fajr,
            sunrise,
            dhuhr,
            asr,
            sunset,
            maghrib,
            isha,
        }
    }
}

impl From<PrayerTimesRecord> for [String; PRAYER_COUNT] {
    fn from(record: PrayerTimesRecord) -> Self {
        [
            record.fajr,
            record.sunrise,
            record.dhuhr,
            record.asr,
            record.sunset,
            record.maghrib,
            record.isha,
        ]
    }
}
