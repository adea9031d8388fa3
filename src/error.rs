// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use crate::times::Prayer;

/// Errors raised by the parsing and calendar helpers.
///
/// The numeric computation itself never fails: events the Sun cannot reach
/// are reported as [`EventTime::NoSolution`](crate::EventTime::NoSolution).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unknown calculation method: {0}")]
    UnknownMethod(String),
    #[error("unknown Asr juristic method: {0}")]
    UnknownJuristic(String),
    #[error("unknown high-latitude adjustment: {0}")]
    UnknownHighLatitudeRule(String),
    #[error("unknown time format: {0}")]
    UnknownTimeFormat(String),
    #[error("UTC offset of {0} hours cannot be represented")]
    OffsetOutOfRange(f64),
    #[error("{0} has no solution on this date")]
    NoSolution(Prayer),
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
