// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Islamic prayer times
//!
//! This crate computes the seven daily events (Fajr, Sunrise, Dhuhr, Asr,
//! Sunset, Maghrib, Isha) for any date and location from a low-precision
//! solar model.
//!
//! # Core types
//!
//! - [`PrayerEngine`]: caller-owned calculator holding an [`EngineConfig`]
//!   and a private [`MethodTable`].
//! - [`Location`]: latitude, longitude and UTC offset of the observer.
//! - [`DayTimes`]: unformatted result, one [`EventTime`] per [`Prayer`].
//! - [`PrayerTimesRecord`]: formatted result as named fields.
//! - [`JulianDate`]: continuous day count used by the solar model.
//!
//! # Calculation methods
//!
//! | Method | Fajr | Maghrib | Isha |
//! |--------|------|---------|------|
//! | [`Method::Jafari`] | 16° | 4° | 14° |
//! | [`Method::Karachi`] | 18° | 0 min | 18° |
//! | [`Method::Isna`] | 15° | 0 min | 15° |
//! | [`Method::Mwl`] | 18° | 0 min | 17° |
//! | [`Method::Makkah`] | 18.5° | 0 min | 90 min |
//! | [`Method::Egypt`] | 19.5° | 0 min | 17.5° |
//! | [`Method::Custom`] | 18° | 0 min | 17° |
//! | [`Method::Tehran`] | 17.7° | 4.5° | 14° |
//!
//! # Example
//!
//! ```
//! use miqat::{AsrJuristic, EngineConfig, HighLatitudeRule, Method, PrayerEngine};
//!
//! let engine = PrayerEngine::new(
//!     EngineConfig::default()
//!         .with_method(Method::Karachi)
//!         .with_asr_juristic(AsrJuristic::Hanafi)
//!         .with_high_latitude(HighLatitudeRule::AngleBased),
//! );
//! let day = engine.compute_day(2021, 4, 30, 33.5737, 73.1731, 5.0);
//! assert_eq!(day[0], "03:49");
//! ```
//!
//! Events the Sun never reaches on a given day (deep twilight in a polar
//! summer, sunrise in a polar night) come back as [`EventTime::NoSolution`]
//! and format as [`INVALID_TIME`].

pub mod angle;
mod config;
mod engine;
mod error;
mod format;
mod julian_date;
mod method;
pub mod solver;
pub mod sun;
mod times;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use config::{AsrJuristic, EngineConfig, HighLatitudeRule, TimeFormat};
pub use engine::{compute_day, Location, PrayerEngine};
pub use error::{Error, Result};
pub use format::{format_hour, format_time, INVALID_TIME};
pub use julian_date::JulianDate;
pub use method::{CustomParams, Method, MethodParameters, MethodTable, RuleKind, TwilightRule};
pub use solver::{EventTime, GeoMoment};
pub use sun::SunPosition;
pub use times::{DayTimes, Prayer, PrayerTimesRecord, PRAYER_COUNT};
