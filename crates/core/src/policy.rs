// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Schedule policy model.
//!
//! A policy is an immutable description of *when* a task fires. The
//! scheduler loop matches against it exhaustively; adding a variant is a
//! compile-time-checked exercise.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from policy construction and validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("invalid clock time '{0}': expected two-digit HH:MM")]
    InvalidClockTime(String),
    #[error("interval must be positive")]
    ZeroInterval,
    #[error("{unit} intervals are not supported for {policy} policies")]
    UnsupportedUnit {
        policy: &'static str,
        unit: IntervalUnit,
    },
    #[error("time range ends ({end}) before it starts ({start})")]
    InvertedRange { start: ClockTime, end: ClockTime },
    #[error("time points list is empty")]
    NoTimePoints,
}

/// Minute-resolution local wall-clock time.
///
/// Parses strictly from `"HH:MM"`: two-digit hour (00-23), colon, two-digit
/// minute (00-59). Times without leading zeros are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    /// Minutes since local midnight.
    pub fn minute_of_day(self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PolicyError::InvalidClockTime(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
        if digits.iter().any(|b| !b.is_ascii_digit()) {
            return Err(invalid());
        }
        let hour = (digits[0] - b'0') * 10 + (digits[1] - b'0');
        let minute = (digits[2] - b'0') * 10 + (digits[3] - b'0');
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok(Self { hour, minute })
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Unit for interval-based policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalUnit {
    Seconds,
    Minutes,
    Hours,
}

impl IntervalUnit {
    /// Convert `interval` in this unit to seconds.
    pub fn to_secs(self, interval: u64) -> u64 {
        match self {
            IntervalUnit::Seconds => interval,
            IntervalUnit::Minutes => interval * 60,
            IntervalUnit::Hours => interval * 3600,
        }
    }
}

impl fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntervalUnit::Seconds => write!(f, "seconds"),
            IntervalUnit::Minutes => write!(f, "minutes"),
            IntervalUnit::Hours => write!(f, "hours"),
        }
    }
}

/// When a task fires.
///
/// Serializes as a tagged table so policies can be declared directly in
/// TOML config, e.g. `policy = { type = "once", time = "23:00" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SchedulePolicy {
    /// Fire once per listed clock time, each day.
    TimePoints { times: Vec<ClockTime> },
    /// Fire within `[start, end]` inclusive, at interval multiples from `start`.
    TimeRange {
        start: ClockTime,
        end: ClockTime,
        interval: u64,
        unit: IntervalUnit,
    },
    /// Fire immediately on start, then every interval, unbounded.
    FixedInterval { interval: u64, unit: IntervalUnit },
    /// Fire exactly once at the given clock time, then stop.
    Once { time: ClockTime },
}

impl SchedulePolicy {
    /// Build a [`SchedulePolicy::TimePoints`] from `"HH:MM"` strings.
    ///
    /// Points are sorted and deduplicated.
    pub fn time_points<I, S>(times: I) -> Result<Self, PolicyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = times
            .into_iter()
            .map(|s| s.as_ref().parse())
            .collect::<Result<Vec<ClockTime>, _>>()?;
        parsed.sort_unstable();
        parsed.dedup();
        let policy = Self::TimePoints { times: parsed };
        policy.validate()?;
        Ok(policy)
    }

    /// Build a [`SchedulePolicy::TimeRange`]. Unit must be minutes or hours.
    pub fn time_range(
        start: &str,
        end: &str,
        interval: u64,
        unit: IntervalUnit,
    ) -> Result<Self, PolicyError> {
        let policy = Self::TimeRange {
            start: start.parse()?,
            end: end.parse()?,
            interval,
            unit,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Build a [`SchedulePolicy::FixedInterval`].
    pub fn fixed_interval(interval: u64, unit: IntervalUnit) -> Result<Self, PolicyError> {
        let policy = Self::FixedInterval { interval, unit };
        policy.validate()?;
        Ok(policy)
    }

    /// Build a [`SchedulePolicy::Once`].
    pub fn once(time: &str) -> Result<Self, PolicyError> {
        Ok(Self::Once {
            time: time.parse()?,
        })
    }

    /// Check invariants that deserialization cannot enforce.
    ///
    /// Called by the constructors and again on config load, since a TOML
    /// file can spell out any payload.
    pub fn validate(&self) -> Result<(), PolicyError> {
        match self {
            Self::TimePoints { times } => {
                if times.is_empty() {
                    return Err(PolicyError::NoTimePoints);
                }
            }
            Self::TimeRange {
                start,
                end,
                interval,
                unit,
            } => {
                if *interval == 0 {
                    return Err(PolicyError::ZeroInterval);
                }
                if *unit == IntervalUnit::Seconds {
                    return Err(PolicyError::UnsupportedUnit {
                        policy: "time_range",
                        unit: *unit,
                    });
                }
                if end < start {
                    return Err(PolicyError::InvertedRange {
                        start: *start,
                        end: *end,
                    });
                }
            }
            Self::FixedInterval { interval, .. } => {
                if *interval == 0 {
                    return Err(PolicyError::ZeroInterval);
                }
            }
            Self::Once { .. } => {}
        }
        Ok(())
    }

    /// Short tag for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TimePoints { .. } => "time_points",
            Self::TimeRange { .. } => "time_range",
            Self::FixedInterval { .. } => "fixed_interval",
            Self::Once { .. } => "once",
        }
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
