//! Datetime axis values.
//!
//! Dates are plotted as fractional days since 1970-01-01T00:00:00, so a
//! datetime axis is an ordinary numeric tensor once converted.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::Tensor;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Fractional days between the Unix epoch and `value`.
pub fn days_since_epoch(value: &NaiveDateTime) -> f64 {
    let utc = value.and_utc();
    let seconds = utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) * 1e-9;
    seconds / SECONDS_PER_DAY
}

/// Inverse of [`days_since_epoch`]; `None` when out of chrono's range.
pub fn datetime_from_days(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    // Microsecond rounding absorbs the float error of the day fraction.
    let micros = (days * SECONDS_PER_DAY * 1e6).round() as i64;
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::from_timestamp(secs, nanos).map(|dt| dt.naive_utc())
}

/// 1D tensor of day offsets for a sequence of datetimes.
pub fn datetime_vector(values: &[NaiveDateTime]) -> Tensor {
    Tensor::vector(values.iter().map(days_since_epoch).collect())
}

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM:SS`, `YYYY-MM-DD HH:MM:SS` or a bare date.
pub fn parse_datetime(text: &str) -> Result<NaiveDateTime, String> {
    let trimmed = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("unrecognised datetime `{trimmed}`"))
}
