//! Lenient parsing of the free-text clock strings stored on shifts.
//!
//! Shift times are entered by people, so two layouts are accepted: 24-hour
//! (`HH:MM`) and 12-hour with a meridiem suffix (`h:MM AM`). Anything else
//! is tolerated rather than rejected: it contributes no hours and sorts as
//! midnight.

use chrono::NaiveTime;
use thiserror::Error;

const TWENTY_FOUR_HOUR: &str = "%H:%M";
const TWELVE_HOUR: &str = "%I:%M %p";
const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Malformed shift time: start {start:?}, end {end:?}")]
pub struct MalformedTime {
    pub start: String,
    pub end: String,
}

/// Tries the 24-hour layout first, then the 12-hour one.
pub fn parse_clock_time(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, TWENTY_FOUR_HOUR)
        .or_else(|_| NaiveTime::parse_from_str(input, TWELVE_HOUR))
        .ok()
}

/// Time of day used to order shifts that share a date.
pub fn sort_time(input: &str) -> NaiveTime {
    parse_clock_time(input).unwrap_or(NaiveTime::MIN)
}

/// Elapsed minutes between two clock strings. A negative span is taken to
/// cross midnight and wraps by a day.
pub fn try_duration_minutes(start: &str, end: &str) -> Result<i64, MalformedTime> {
    match (parse_clock_time(start), parse_clock_time(end)) {
        (Some(start_time), Some(end_time)) => {
            let mut minutes = (end_time - start_time).num_minutes();
            if minutes < 0 {
                minutes += MINUTES_PER_DAY;
            }
            Ok(minutes.max(0))
        }
        _ => Err(MalformedTime {
            start: start.to_owned(),
            end: end.to_owned(),
        }),
    }
}

pub fn try_duration_hours(start: &str, end: &str) -> Result<f64, MalformedTime> {
    try_duration_minutes(start, end).map(|minutes| minutes as f64 / 60.0)
}

pub fn duration_hours(start: &str, end: &str) -> f64 {
    try_duration_hours(start, end).unwrap_or(0.0)
}
