use chrono::{DateTime, NaiveDate, Utc};
use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// Deserialize a field that may be `null` in the export, falling back to the type's default
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Custom deserializer for stored calendar dates.
///
/// Older stores write an empty string when the date is unknown.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| Error::custom(format!("invalid calendar date {:?}: {}", s, e))),
    }
}

/// Custom deserializer for stored instants that maps the zero time
/// (`0001-01-01T00:00:00Z`) to `None`
pub fn deserialize_optional_instant<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    let Some(s) = value else {
        return Ok(None);
    };

    let instant = s
        .parse::<DateTime<Utc>>()
        .map_err(|e| Error::custom(format!("invalid RFC3339 timestamp: {}", e)))?;

    if is_zero_time(&instant) { Ok(None) } else { Ok(Some(instant)) }
}

fn is_zero_time(instant: &DateTime<Utc>) -> bool {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .is_some_and(|zero| instant.naive_utc() == zero)
}
