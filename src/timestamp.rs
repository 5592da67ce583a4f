//! Timestamp formatting helpers for the `YYYY-MM-DD HH:MM:SS[.mmm]` text form.
//!
//! Parsing is permissive: malformed input yields [`zero_time`] instead of an error. Callers that need to tell
//! "unparseable" from "really year 1" must check [`is_zero_time`] themselves.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// `yyyy-mm-dd HH:MM:SS`
pub const ISO_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// `yyyy-mm-dd HH:MM:SS.mmm`
pub const ISO_TIME_FORMAT_MILLIS: &str = "%Y-%m-%d %H:%M:%S%.3f";

// Accepts an optional fractional second after the seconds field.
const ISO_TIME_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Current local time as `yyyy-mm-dd HH:MM:SS`.
pub fn now_time_str_in_local() -> String {
    Local::now().format(ISO_TIME_FORMAT).to_string()
}

/// Current UTC time as `yyyy-mm-dd HH:MM:SS`.
pub fn now_time_str_in_utc() -> String {
    Utc::now().format(ISO_TIME_FORMAT).to_string()
}

/// Current UTC time as `yyyy-mm-dd HH:MM:SS.mmm`.
pub fn now_time_str_in_utc_millis() -> String {
    Utc::now().format(ISO_TIME_FORMAT_MILLIS).to_string()
}

/// Format the wall-clock fields of `ts`, no zone conversion.
pub fn time_iso_str(ts: &NaiveDateTime) -> String {
    ts.format(ISO_TIME_FORMAT).to_string()
}

/// Convert to UTC, then format as `yyyy-mm-dd HH:MM:SS`.
pub fn utc_time_str<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    ts.with_timezone(&Utc).format(ISO_TIME_FORMAT).to_string()
}

/// Convert to UTC, then format as `yyyy-mm-dd HH:MM:SS.mmm`.
pub fn utc_time_str_millis<Tz: TimeZone>(ts: &DateTime<Tz>) -> String {
    ts.with_timezone(&Utc).format(ISO_TIME_FORMAT_MILLIS).to_string()
}

/// Milliseconds since the Unix epoch.
pub fn unix_epoch_millis<Tz: TimeZone>(ts: &DateTime<Tz>) -> i64 {
    ts.timestamp_millis()
}

/// Current time as milliseconds since the Unix epoch.
pub fn now_unix_epoch_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// The sentinel returned for unparseable input: `0001-01-01 00:00:00 UTC`.
pub fn zero_time() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map_or(DateTime::<Utc>::MIN_UTC, |naive| naive.and_utc())
}

/// Whether `ts` is the [`zero_time`] sentinel.
pub fn is_zero_time(ts: &DateTime<Utc>) -> bool {
    *ts == zero_time()
}

/// Parse `yyyy-mm-dd HH:MM:SS[.fff]` as a UTC time.
///
/// ## Returns
/// - The parsed time, or [`zero_time`] when `text` does not match the format.
pub fn parse_utc_time(text: &str) -> DateTime<Utc> {
    NaiveDateTime::parse_from_str(text, ISO_TIME_PARSE_FORMAT)
        .map(|naive| naive.and_utc())
        .unwrap_or_else(|_| zero_time())
}
