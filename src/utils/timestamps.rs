use chrono::{DateTime, Duration, NaiveDate, Utc};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Convert fractional seconds since the Unix epoch into an instant.
///
/// The whole part becomes seconds and the remainder is scaled to nanoseconds.
/// Returns `None` for non-finite or out-of-range values, and also for a value
/// that lands exactly on the epoch: exports use zero as a "missing" marker, so
/// a genuine epoch-zero timestamp is dropped along with it.
pub fn from_epoch_seconds(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }

    let seconds = value.trunc();
    let nanos = ((value - seconds) * 1e9) as i64;

    let instant = DateTime::from_timestamp(seconds as i64, 0)?
        .checked_add_signed(Duration::nanoseconds(nanos))?;

    if instant == DateTime::UNIX_EPOCH {
        return None;
    }

    Some(instant)
}

/// Same as [`from_epoch_seconds`] for an optional raw value
pub fn from_optional_epoch_seconds(value: Option<f64>) -> Option<DateTime<Utc>> {
    value.and_then(from_epoch_seconds)
}

/// Format an instant as a UTC calendar date (`YYYY-MM-DD`)
pub fn calendar_date(instant: &DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// Parse a user-supplied `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Format an optional instant for terminal output
pub fn format_instant(instant: Option<&DateTime<Utc>>) -> String {
    match instant {
        Some(ts) => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}
