//! Event lifecycle status derived from the stored date and start time.
//!
//! Status is computed on every event write and stored alongside the row.
//! It is never recomputed on read, so a stored value can lag behind the
//! clock until the event is next updated.
//!
//! Date and time are wall-clock values in a single configured fixed UTC
//! offset (see `EVENT_UTC_OFFSET_MINUTES` in the API config).

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of the ongoing window after an event's start, in minutes.
pub const ONGOING_WINDOW_MINUTES: i64 = 120;

/// Accepted `event_time` layouts, tried in order.
const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%H:%M:%S%.f"];

/// How long an event counts as ongoing after it starts.
pub fn ongoing_window() -> Duration {
    Duration::minutes(ONGOING_WINDOW_MINUTES)
}

// ---------------------------------------------------------------------------
// Status enum
// ---------------------------------------------------------------------------

/// Derived lifecycle state of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Past,
}

/// All valid event status strings.
pub const VALID_STATUS_STRINGS: &[&str] = &["upcoming", "ongoing", "past"];

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Past => "past",
        }
    }

    /// Parse a status from a query parameter.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "upcoming" => Ok(Self::Upcoming),
            "ongoing" => Ok(Self::Ongoing),
            "past" => Ok(Self::Past),
            _ => Err(CoreError::Validation(format!(
                "status query param is required and must be one of: {}.",
                VALID_STATUS_STRINGS.join(", ")
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an `event_date` value (`YYYY-MM-DD`, optionally followed by a
/// time part which is ignored).
pub fn parse_event_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    let date_part = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!(
            "event_date must be a valid date (YYYY-MM-DD), got '{raw}'"
        ))
    })
}

/// Parse an `event_time` value. Blank or malformed input yields `None`,
/// which callers treat as midnight.
pub fn parse_event_time(raw: &str) -> Option<NaiveTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
}

/// Build the fixed offset used to interpret event wall-clock times.
pub fn utc_offset(minutes: i32) -> Result<FixedOffset, CoreError> {
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "UTC offset must be within +/-1439 minutes, got {minutes}"
            ))
        })
}

// ---------------------------------------------------------------------------
// Computation
// ---------------------------------------------------------------------------

/// The instant an event starts. A missing time means midnight.
pub fn start_instant(
    date: NaiveDate,
    time: Option<NaiveTime>,
    offset: FixedOffset,
) -> DateTime<Utc> {
    let local = date.and_time(time.unwrap_or(NaiveTime::MIN));
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&utc)
}

/// Derive the status of an event at `now`.
///
/// - `now < start` is upcoming
/// - `start <= now <= start + 2h` is ongoing (both bounds inclusive)
/// - anything later is past
pub fn compute_status(
    date: NaiveDate,
    time: Option<NaiveTime>,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> EventStatus {
    let start = start_instant(date, time, offset);
    let end = start + ongoing_window();

    if now < start {
        EventStatus::Upcoming
    } else if now <= end {
        EventStatus::Ongoing
    } else {
        EventStatus::Past
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn utc() -> FixedOffset {
        utc_offset(0).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    fn time() -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(10, 0, 0)
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 10, 0, 0).unwrap()
    }

    // -- compute_status boundaries ------------------------------------------

    #[test]
    fn one_second_before_start_is_upcoming() {
        let now = start() - Duration::seconds(1);
        assert_eq!(compute_status(date(), time(), utc(), now), EventStatus::Upcoming);
    }

    #[test]
    fn exactly_at_start_is_ongoing() {
        assert_eq!(compute_status(date(), time(), utc(), start()), EventStatus::Ongoing);
    }

    #[test]
    fn exactly_at_end_is_ongoing() {
        let now = start() + Duration::hours(2);
        assert_eq!(compute_status(date(), time(), utc(), now), EventStatus::Ongoing);
    }

    #[test]
    fn one_second_after_end_is_past() {
        let now = start() + Duration::hours(2) + Duration::seconds(1);
        assert_eq!(compute_status(date(), time(), utc(), now), EventStatus::Past);
    }

    #[test]
    fn missing_time_means_midnight() {
        let midnight = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();
        assert_eq!(
            compute_status(date(), None, utc(), midnight - Duration::seconds(1)),
            EventStatus::Upcoming
        );
        assert_eq!(
            compute_status(date(), None, utc(), midnight + Duration::minutes(90)),
            EventStatus::Ongoing
        );
    }

    #[test]
    fn offset_shifts_start_instant() {
        // 10:00 at +05:30 is 04:30 UTC.
        let ist = utc_offset(330).unwrap();
        let expected = Utc.with_ymd_and_hms(2025, 3, 14, 4, 30, 0).unwrap();
        assert_eq!(start_instant(date(), time(), ist), expected);
        assert_eq!(compute_status(date(), time(), ist, expected), EventStatus::Ongoing);
    }

    // -- parsing --------------------------------------------------------------

    #[test]
    fn parses_hh_mm_and_hh_mm_ss() {
        assert_eq!(parse_event_time("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse_event_time("09:30:15"), NaiveTime::from_hms_opt(9, 30, 15));
    }

    #[test]
    fn malformed_time_is_none() {
        assert_eq!(parse_event_time(""), None);
        assert_eq!(parse_event_time("soon"), None);
        assert_eq!(parse_event_time("25:00"), None);
    }

    #[test]
    fn date_accepts_iso_datetime_prefix() {
        assert_eq!(parse_event_date("2025-03-14T00:00:00.000Z").unwrap(), date());
        assert_eq!(parse_event_date("2025-03-14").unwrap(), date());
    }

    #[test]
    fn bad_date_is_validation_error() {
        assert_matches!(parse_event_date("14/03/2025"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn out_of_range_offset_rejected() {
        assert_matches!(utc_offset(24 * 60), Err(CoreError::Validation(_)));
        assert!(utc_offset(-330).is_ok());
    }

    #[test]
    fn status_round_trips_through_str() {
        for s in VALID_STATUS_STRINGS {
            assert_eq!(EventStatus::from_str(s).unwrap().as_str(), *s);
        }
        assert_matches!(EventStatus::from_str("cancelled"), Err(CoreError::Validation(_)));
    }
}
