//! Time primitives
//!
//! `time_point` is microseconds since the Unix epoch (int64 on the wire),
//! `time_point_sec` is whole seconds (uint32 on the wire). Both render
//! textually as ISO-8601 without a timezone suffix, e.g.
//! `2021-12-31T23:59:59.500` / `2021-12-31T23:59:59`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use thiserror::Error;

/// Errors from parsing a textual timestamp
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTimeError {
    /// Not an ISO-8601 timestamp
    #[error("invalid timestamp '{0}'")]
    InvalidFormat(String),

    /// Outside the representable range
    #[error("timestamp '{0}' out of range")]
    OutOfRange(String),
}

const FORMAT_MILLIS: &str = "%Y-%m-%dT%H:%M:%S%.3f";
const FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const FORMAT_SECS: &str = "%Y-%m-%dT%H:%M:%S";
const FORMAT_PARSE: &str = "%Y-%m-%dT%H:%M:%S%.f";

fn parse_naive(s: &str) -> Result<NaiveDateTime, ParseTimeError> {
    NaiveDateTime::parse_from_str(s, FORMAT_PARSE)
        .map_err(|_| ParseTimeError::InvalidFormat(s.to_string()))
}

/// Microsecond-resolution point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePoint {
    /// Microseconds since the Unix epoch
    pub micros: i64,
}

impl TimePoint {
    /// Wraps a raw microsecond count.
    pub fn from_micros(micros: i64) -> Self {
        TimePoint { micros }
    }
}

/// Millisecond precision on millisecond boundaries, full microsecond
/// precision otherwise, so Display -> parse never loses the value.
impl fmt::Display for TimePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp_micros(self.micros) {
            Some(dt) => {
                let format = if self.micros.rem_euclid(1000) == 0 {
                    FORMAT_MILLIS
                } else {
                    FORMAT_MICROS
                };
                write!(f, "{}", dt.naive_utc().format(format))
            }
            None => write!(f, "{}", self.micros),
        }
    }
}

impl FromStr for TimePoint {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = parse_naive(s)?;
        let micros = dt
            .and_utc()
            .timestamp_micros();
        Ok(TimePoint { micros })
    }
}

/// Second-resolution point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimePointSec {
    /// Seconds since the Unix epoch
    pub secs: u32,
}

impl TimePointSec {
    /// Wraps a raw second count.
    pub fn from_secs(secs: u32) -> Self {
        TimePointSec { secs }
    }
}

impl fmt::Display for TimePointSec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match DateTime::from_timestamp(self.secs as i64, 0) {
            Some(dt) => write!(f, "{}", dt.naive_utc().format(FORMAT_SECS)),
            None => write!(f, "{}", self.secs),
        }
    }
}

impl FromStr for TimePointSec {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let dt = parse_naive(s)?;
        let secs = dt.and_utc().timestamp();
        u32::try_from(secs)
            .map(TimePointSec::from_secs)
            .map_err(|_| ParseTimeError::OutOfRange(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_rendering() {
        assert_eq!(TimePoint::from_micros(0).to_string(), "1970-01-01T00:00:00.000");
        assert_eq!(TimePointSec::from_secs(0).to_string(), "1970-01-01T00:00:00");
    }

    #[test]
    fn test_time_point_roundtrip() {
        let tp: TimePoint = "2021-12-31T23:59:59.500".parse().unwrap();
        assert_eq!(tp.to_string(), "2021-12-31T23:59:59.500");
        assert_eq!(tp.micros % 1_000_000, 500_000);
    }

    #[test]
    fn test_time_point_sec_roundtrip() {
        let tp: TimePointSec = "2021-12-31T23:59:59".parse().unwrap();
        assert_eq!(tp.to_string(), "2021-12-31T23:59:59");
    }

    #[test]
    fn test_submillisecond_rendering_is_lossless() {
        let tp = TimePoint::from_micros(1);
        assert_eq!(tp.to_string(), "1970-01-01T00:00:00.000001");
        assert_eq!(tp.to_string().parse::<TimePoint>().unwrap(), tp);

        let tp = TimePoint::from_micros(1_250_500);
        assert_eq!(tp.to_string(), "1970-01-01T00:00:01.250500");
        assert_eq!(tp.to_string().parse::<TimePoint>().unwrap(), tp);

        // millisecond boundaries keep the short form
        assert_eq!(
            TimePoint::from_micros(250_000).to_string(),
            "1970-01-01T00:00:00.250"
        );
    }

    #[test]
    fn test_fraction_is_optional_on_parse() {
        let a: TimePoint = "2000-01-01T00:00:00".parse().unwrap();
        let b: TimePoint = "2000-01-01T00:00:00.000".parse().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_garbage_rejected() {
        assert!("not a time".parse::<TimePoint>().is_err());
        assert!("2021-13-45T99:99:99".parse::<TimePointSec>().is_err());
    }

    #[test]
    fn test_pre_epoch_rejected_for_seconds() {
        let err = "1969-12-31T23:59:59".parse::<TimePointSec>().unwrap_err();
        assert!(matches!(err, ParseTimeError::OutOfRange(_)));
    }
}
