use chrono::{NaiveTime, Timelike};
use std::fmt;

const MINUTES_PER_DAY: i64 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SleepError {
    Missing(&'static str),
    BadTime(String),
}

impl fmt::Display for SleepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SleepError::Missing(field) => write!(f, "missing field `{field}`"),
            SleepError::BadTime(raw) => write!(f, "`{raw}` is not a HH:MM time"),
        }
    }
}

impl std::error::Error for SleepError {}

pub fn parse_clock_time(raw: &str) -> Result<NaiveTime, SleepError> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M").map_err(|_| SleepError::BadTime(raw.to_string()))
}

/// Hours between bedtime and wake time, rounded half to even at one decimal.
/// A wake time earlier than the bedtime is taken to be on the following day.
pub fn sleep_duration_hours(bedtime: NaiveTime, wake_time: NaiveTime) -> f64 {
    let bed_total = minutes_since_midnight(bedtime);
    let mut wake_total = minutes_since_midnight(wake_time);
    if wake_total < bed_total {
        wake_total += MINUTES_PER_DAY;
    }

    let hours = (wake_total - bed_total) as f64 / 60.0;
    (hours * 10.0).round_ties_even() / 10.0
}

fn minutes_since_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}
