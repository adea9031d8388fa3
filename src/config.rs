// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Engine configuration.
//!
//! [`EngineConfig`] is a small `Copy` value.  The engine reads it for the
//! duration of one computation and never mutates it, so callers are free to
//! keep one per thread or share one behind `&`.

use crate::error::Error;
use crate::method::Method;
use crate::times::PRAYER_COUNT;
use qtty::Degrees;
use std::str::FromStr;
use strum_macros::{Display, EnumIter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Juristic rule for the start of Asr.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AsrJuristic {
    /// Shafi'i, Maliki, Hanbali: shadow equals object height.
    #[default]
    Standard,
    /// Hanafi: shadow equals twice the object height.
    Hanafi,
}

impl AsrJuristic {
    /// Shadow length in multiples of the object height.
    #[inline]
    pub const fn shadow_factor(self) -> f64 {
        match self {
            Self::Standard => 1.0,
            Self::Hanafi => 2.0,
        }
    }
}

impl FromStr for AsrJuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "shafii" | "shafi'i" => Ok(Self::Standard),
            "hanafi" => Ok(Self::Hanafi),
            _ => Err(Error::UnknownJuristic(s.to_string())),
        }
    }
}

/// How twilight times are bounded at high latitudes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HighLatitudeRule {
    /// Leave the solved times untouched.
    None,
    /// Twilight may not exceed half of the night.
    #[default]
    MidNight,
    /// Twilight may not exceed a seventh of the night.
    OneSeventh,
    /// Twilight may not exceed `angle/60` of the night.
    AngleBased,
}

impl HighLatitudeRule {
    /// Fraction of the night allotted to a twilight of depression `angle`.
    pub fn night_portion(self, angle: Degrees) -> f64 {
        match self {
            Self::None => 0.0,
            Self::MidNight => 1.0 / 2.0,
            Self::OneSeventh => 1.0 / 7.0,
            Self::AngleBased => angle.value() / 60.0,
        }
    }
}

impl FromStr for HighLatitudeRule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', '-', ' '], "").as_str() {
            "none" => Ok(Self::None),
            "midnight" => Ok(Self::MidNight),
            "oneseventh" => Ok(Self::OneSeventh),
            "anglebased" => Ok(Self::AngleBased),
            _ => Err(Error::UnknownHighLatitudeRule(s.to_string())),
        }
    }
}

/// Output representation of each time.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeFormat {
    /// `HH:MM`, zero padded.
    #[default]
    #[strum(serialize = "24h")]
    Time24,
    /// `HH:MMam` / `HH:MMpm`.
    #[strum(serialize = "12h")]
    Time12,
    /// `HH:MM` on the 12 hour clock, no suffix.
    #[strum(serialize = "12hNS")]
    Time12NoSuffix,
    /// Raw fractional hours.
    #[strum(serialize = "Float")]
    Floating,
}

impl FromStr for TimeFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "24h" | "time24" => Ok(Self::Time24),
            "12h" | "time12" => Ok(Self::Time12),
            "12hns" | "time12ns" | "time12nosuffix" => Ok(Self::Time12NoSuffix),
            "float" | "floating" => Ok(Self::Floating),
            _ => Err(Error::UnknownTimeFormat(s.to_string())),
        }
    }
}

/// Caller-owned settings for one computation.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub method: Method,
    pub asr_juristic: AsrJuristic,
    pub high_latitude: HighLatitudeRule,
    /// Minutes added to solar noon for Dhuhr.
    pub dhuhr_offset_minutes: i32,
    pub time_format: TimeFormat,
    /// Refinement passes over the seed estimate.
    pub iterations: usize,
    /// Per-prayer minute offsets, applied last.
    pub tune_minutes: [i32; PRAYER_COUNT],
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            method: Method::Mwl,
            asr_juristic: AsrJuristic::Standard,
            high_latitude: HighLatitudeRule::MidNight,
            dhuhr_offset_minutes: 0,
            time_format: TimeFormat::Time24,
            iterations: 1,
            tune_minutes: [0; PRAYER_COUNT],
        }
    }
}

impl EngineConfig {
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_asr_juristic(mut self, asr_juristic: AsrJuristic) -> Self {
        self.asr_juristic = asr_juristic;
        self
    }

    pub fn with_high_latitude(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude = rule;
        self
    }

    pub fn with_dhuhr_offset_minutes(mut self, minutes: i32) -> Self {
        self.dhuhr_offset_minutes = minutes;
        self
    }

    pub fn with_time_format(mut self, format: TimeFormat) -> Self {
        self.time_format = format;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_tune_minutes(mut self, minutes: [i32; PRAYER_COUNT]) -> Self {
        self.tune_minutes = minutes;
        self
    }
}
