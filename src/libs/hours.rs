//! Worked-hours arithmetic.
//!
//! Every screen of the time clock computes the same thing: gross time between
//! entry and exit, minus the lunch break. Times are reduced to minutes since
//! midnight (seconds are ignored) and all arithmetic is done on `i64` minutes.
//!
//! ## Lunch deduction
//!
//! When both lunch punches exist the real break is subtracted. When either is
//! missing the [`LunchPolicy`] decides: a fixed deduction (60 minutes by
//! default) or nothing at all.

use crate::libs::formatter::{format_balance, format_minutes};
use crate::libs::record::{DayTimes, TimeRecord};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Sentinel stored in `total_hours` when entry or exit is missing.
pub const TOTAL_UNKNOWN: &str = "--:--";

/// Default lunch deduction applied when lunch punches are absent.
pub const DEFAULT_LUNCH_MINUTES: i64 = 60;

/// Expected daily workload: a 44-hour week spread over five days.
pub const DEFAULT_DAILY_THRESHOLD: i64 = 528;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LunchPolicy {
    /// Subtract a fixed break when lunch punches are missing.
    Fixed { minutes: i64 },
    /// Subtract nothing when lunch punches are missing.
    None,
}

impl Default for LunchPolicy {
    fn default() -> Self {
        LunchPolicy::Fixed {
            minutes: DEFAULT_LUNCH_MINUTES,
        }
    }
}

impl LunchPolicy {
    fn default_deduction(&self) -> i64 {
        match self {
            LunchPolicy::Fixed { minutes } => *minutes,
            LunchPolicy::None => 0,
        }
    }
}

/// Result of the total-hours computation for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalHours {
    pub minutes: Option<i64>,
    pub overtime: bool,
}

impl TotalHours {
    /// `HH:MM`, or `--:--` when the day is incomplete.
    pub fn text(&self) -> String {
        self.minutes.map(format_minutes).unwrap_or_else(|| TOTAL_UNKNOWN.to_string())
    }
}

pub fn to_minutes(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}

/// Net minutes worked, or `None` unless both entry and exit are present.
pub fn worked_minutes(times: &DayTimes, lunch: LunchPolicy) -> Option<i64> {
    let entry = to_minutes(times.entry?);
    let exit = to_minutes(times.exit?);
    let mut total = exit - entry;

    match (times.lunch_exit, times.lunch_return) {
        (Some(out), Some(back)) => total -= to_minutes(back) - to_minutes(out),
        _ => total -= lunch.default_deduction(),
    }

    Some(total)
}

pub fn total_hours(times: &DayTimes, lunch: LunchPolicy, overtime_threshold: i64) -> TotalHours {
    match worked_minutes(times, lunch) {
        Some(minutes) => TotalHours {
            minutes: Some(minutes),
            overtime: minutes > overtime_threshold,
        },
        None => TotalHours {
            minutes: None,
            overtime: false,
        },
    }
}

/// Signed sum of `worked - daily_threshold` over complete days.
pub fn balance_minutes<'a, I>(records: I, lunch: LunchPolicy, daily_threshold: i64) -> i64
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    records
        .into_iter()
        .filter_map(|r| worked_minutes(&r.times, lunch))
        .map(|worked| worked - daily_threshold)
        .sum()
}

pub fn balance<'a, I>(records: I, lunch: LunchPolicy, daily_threshold: i64) -> String
where
    I: IntoIterator<Item = &'a TimeRecord>,
{
    format_balance(balance_minutes(records, lunch, daily_threshold))
}
