//! Civil "today" and "now" for the time clock.
//!
//! All punches are recorded in São Paulo civil time regardless of the host's
//! local zone. The zone offset is resolved through the IANA database, so a
//! future daylight-saving change does not need code changes.

use crate::libs::calendar::long_date_label;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

pub const SAO_PAULO: Tz = chrono_tz::America::Sao_Paulo;

pub trait Clock {
    /// Current civil date and time in the clock's zone.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Current time truncated to the minute.
    fn now_hm(&self) -> NaiveTime {
        let now = self.now().time();
        NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
    }

    fn today_label(&self) -> String {
        long_date_label(self.today())
    }
}

/// Reads the system clock and converts it to São Paulo civil time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaoPauloClock;

impl Clock for SaoPauloClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&SAO_PAULO).naive_local()
    }
}

/// A clock frozen at a given civil time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        FixedClock(date.and_time(time))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    #[test]
    fn fixed_clock_truncates_seconds() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let clock = FixedClock::at(date, NaiveTime::from_hms_opt(9, 7, 42).unwrap());
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now_hm(), NaiveTime::from_hms_opt(9, 7, 0).unwrap());
        assert_eq!(clock.today_label(), "terça-feira, 5 de março de 2024");
    }

    #[test]
    fn sao_paulo_is_three_hours_behind_utc() {
        // 02:30 UTC on March 5th is still March 4th in São Paulo.
        let utc = Utc.with_ymd_and_hms(2024, 3, 5, 2, 30, 0).unwrap();
        let local = utc.with_timezone(&SAO_PAULO).naive_local();
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(local.time(), NaiveTime::from_hms_opt(23, 30, 0).unwrap());
    }
}
