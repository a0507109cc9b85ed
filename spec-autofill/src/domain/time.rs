//! Date parsing and timestamp derivation.
//!
//! Spec documents carry human-readable dates (`start_fmt_date`,
//! `valid_start_fmt_date`, ...) and the autofiller derives epoch-second
//! timestamps from them. Dates may be a bare day (`2019-07-22`), a naive
//! datetime (`2019-07-22T08:00:00`) or a full RFC 3339 datetime with an
//! offset.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Error returned when a date string cannot be parsed or localized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// The string is not a recognized date or datetime format
    #[error("unparseable date: {0:?}")]
    Unparseable(String),

    /// The wall-clock time does not exist in the target timezone (DST gap)
    #[error("time {value:?} does not exist in timezone {tz}")]
    NonexistentLocal { value: String, tz: String },
}

/// Parse the wall-clock components of a date string, ignoring any offset.
fn parse_wall_clock(s: &str) -> Result<NaiveDateTime, TimeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(d.and_time(NaiveTime::MIN));
    }
    Err(TimeError::Unparseable(s.to_string()))
}

/// Epoch seconds for a date string, using the string's own offset when it
/// carries one and UTC otherwise.
///
/// # Examples
///
/// ```
/// use spec_autofill::domain::time::timestamp;
///
/// assert_eq!(timestamp("1970-01-01").unwrap(), 0);
/// assert_eq!(timestamp("1970-01-01T00:00:00+01:00").unwrap(), -3600);
/// ```
pub fn timestamp(s: &str) -> Result<i64, TimeError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp());
    }
    Ok(parse_wall_clock(s)?.and_utc().timestamp())
}

/// Epoch seconds for a date string interpreted as wall-clock time in `tz`.
///
/// Any offset present in the string is discarded; the region timezone wins.
/// An ambiguous local time (DST fold) resolves to the earlier instant.
pub fn timestamp_in(s: &str, tz: Tz) -> Result<i64, TimeError> {
    let naive = parse_wall_clock(s)?;
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| TimeError::NonexistentLocal {
            value: s.to_string(),
            tz: tz.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_date_is_utc_midnight() {
        assert_eq!(timestamp("2019-07-22").unwrap(), 1563753600);
    }

    #[test]
    fn naive_datetime_is_utc() {
        assert_eq!(timestamp("2019-07-22T15:00:00").unwrap(), 1563807600);
    }

    #[test]
    fn offset_datetime_uses_its_own_offset() {
        assert_eq!(timestamp("2019-07-22T08:00:00-07:00").unwrap(), 1563807600);
    }

    #[test]
    fn garbage_fails() {
        assert!(matches!(
            timestamp("not a date"),
            Err(TimeError::Unparseable(_))
        ));
    }

    #[test]
    fn region_timezone_applies_to_naive_dates() {
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        // 08:00 PDT is 15:00 UTC
        assert_eq!(timestamp_in("2019-07-22T08:00:00", tz).unwrap(), 1563807600);
    }

    #[test]
    fn region_timezone_overrides_embedded_offset() {
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        // The +05:00 offset is discarded; wall clock 08:00 is re-read as PDT
        assert_eq!(
            timestamp_in("2019-07-22T08:00:00+05:00", tz).unwrap(),
            1563807600
        );
    }

    #[test]
    fn nonexistent_local_time_fails() {
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        // Spring-forward gap: 02:30 does not exist on 2019-03-10
        assert!(matches!(
            timestamp_in("2019-03-10T02:30:00", tz),
            Err(TimeError::NonexistentLocal { .. })
        ));
    }

    #[test]
    fn utc_timezone_matches_plain_timestamp() {
        let tz: Tz = "UTC".parse().unwrap();
        assert_eq!(
            timestamp_in("2019-07-22", tz).unwrap(),
            timestamp("2019-07-22").unwrap()
        );
    }
}
