//! Time records and the daily punch state machine.

use crate::libs::error::ClockError;
use crate::libs::formatter::parse_minutes;
use crate::libs::hours::{total_hours, LunchPolicy, TotalHours, TOTAL_UNKNOWN};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PunchKind {
    Entry,
    LunchOut,
    LunchBack,
    Exit,
}

impl PunchKind {
    pub fn label(&self) -> &'static str {
        match self {
            PunchKind::Entry => "Entrada",
            PunchKind::LunchOut => "Saída Almoço",
            PunchKind::LunchBack => "Retorno Almoço",
            PunchKind::Exit => "Saída",
        }
    }
}

/// Where a day stands in `Empty → EntryMarked → LunchOut → LunchBack → Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    Empty,
    EntryMarked,
    LunchOut,
    LunchBack,
    Closed,
}

impl DayState {
    pub fn label(&self) -> &'static str {
        match self {
            DayState::Empty => "not started",
            DayState::EntryMarked => "working",
            DayState::LunchOut => "at lunch",
            DayState::LunchBack => "back from lunch",
            DayState::Closed => "closed",
        }
    }

    /// The punch that moves the day forward from this state.
    fn accepts(&self, kind: PunchKind) -> bool {
        matches!(
            (self, kind),
            (DayState::Empty, PunchKind::Entry)
                | (DayState::EntryMarked, PunchKind::LunchOut)
                | (DayState::EntryMarked, PunchKind::Exit)
                | (DayState::LunchOut, PunchKind::LunchBack)
                | (DayState::LunchBack, PunchKind::Exit)
        )
    }
}

/// Parses `HH:MM`, tolerating a trailing `:SS`.
pub fn parse_time(input: &str) -> Result<NaiveTime, ClockError> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M"))
        .map_err(|_| ClockError::InvalidTime(input.to_string()))
}

/// Optional form input: blank means absent.
pub fn parse_optional_time(input: Option<&str>) -> Result<Option<NaiveTime>, ClockError> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_time(s).map(Some),
    }
}

pub fn format_time(time: Option<NaiveTime>, absent: &str) -> String {
    time.map(|t| t.format("%H:%M").to_string()).unwrap_or_else(|| absent.to_string())
}

pub(crate) mod hm_option {
    use super::parse_time;
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error> {
        match time {
            Some(t) => serializer.serialize_some(&t.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveTime>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => parse_time(s).map(Some).map_err(serde::de::Error::custom),
        }
    }
}

/// The four punches of one day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTimes {
    #[serde(default, with = "hm_option")]
    pub entry: Option<NaiveTime>,
    #[serde(default, with = "hm_option")]
    pub lunch_exit: Option<NaiveTime>,
    #[serde(default, with = "hm_option")]
    pub lunch_return: Option<NaiveTime>,
    #[serde(default, with = "hm_option")]
    pub exit: Option<NaiveTime>,
}

impl DayTimes {
    pub fn state(&self) -> DayState {
        if self.exit.is_some() {
            DayState::Closed
        } else if self.lunch_return.is_some() {
            DayState::LunchBack
        } else if self.lunch_exit.is_some() {
            DayState::LunchOut
        } else if self.entry.is_some() {
            DayState::EntryMarked
        } else {
            DayState::Empty
        }
    }

    pub fn get(&self, kind: PunchKind) -> Option<NaiveTime> {
        match kind {
            PunchKind::Entry => self.entry,
            PunchKind::LunchOut => self.lunch_exit,
            PunchKind::LunchBack => self.lunch_return,
            PunchKind::Exit => self.exit,
        }
    }

    pub fn set(&mut self, kind: PunchKind, time: Option<NaiveTime>) {
        match kind {
            PunchKind::Entry => self.entry = time,
            PunchKind::LunchOut => self.lunch_exit = time,
            PunchKind::LunchBack => self.lunch_return = time,
            PunchKind::Exit => self.exit = time,
        }
    }

    /// Records `at` against `kind` if the day's state allows it.
    pub fn punch(&mut self, kind: PunchKind, at: NaiveTime) -> Result<(), ClockError> {
        let state = self.state();
        if state == DayState::Closed {
            return Err(ClockError::DayClosed);
        }
        if let Some(existing) = self.get(kind) {
            return Err(ClockError::AlreadyMarked {
                kind,
                at: existing.format("%H:%M").to_string(),
            });
        }
        if !state.accepts(kind) {
            return Err(ClockError::OutOfOrder { kind, state });
        }
        self.set(kind, Some(at));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.state() == DayState::Empty
    }
}

fn unknown_total() -> String {
    TOTAL_UNKNOWN.to_string()
}

/// One attendance entry for one employee on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRecord {
    pub id: String,
    pub user_id: String,
    pub employee_name: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub times: DayTimes,
    #[serde(default = "unknown_total")]
    pub total_hours: String,
    #[serde(default)]
    pub created_at: NaiveDateTime,
}

impl TimeRecord {
    pub fn new(user_id: &str, employee_name: &str, date: NaiveDate, created_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            employee_name: employee_name.to_string(),
            date,
            times: DayTimes::default(),
            total_hours: unknown_total(),
            created_at,
        }
    }

    pub fn with_times(mut self, times: DayTimes, lunch: LunchPolicy) -> Self {
        self.times = times;
        self.refresh_total(lunch);
        self
    }

    /// Recomputes the cached `total_hours` from the four punches.
    pub fn refresh_total(&mut self, lunch: LunchPolicy) {
        // The overtime flag is not cached, any threshold does here.
        self.total_hours = total_hours(&self.times, lunch, i64::MAX).text();
    }

    pub fn total(&self, lunch: LunchPolicy, overtime_threshold: i64) -> TotalHours {
        total_hours(&self.times, lunch, overtime_threshold)
    }

    /// The cached `total_hours` as written at the last update.
    pub fn stored_total(&self, overtime_threshold: i64) -> TotalHours {
        let minutes = parse_minutes(&self.total_hours);
        TotalHours {
            minutes,
            overtime: minutes.map_or(false, |m| m > overtime_threshold),
        }
    }

    pub fn state(&self) -> DayState {
        self.times.state()
    }
}

/// Which dates a listing or export covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordFilter {
    #[default]
    All,
    Date(NaiveDate),
    /// Any date inside the month.
    Month(NaiveDate),
    Range { from: NaiveDate, to: NaiveDate },
}

impl RecordFilter {
    pub fn range(from: NaiveDate, to: NaiveDate) -> Result<Self, ClockError> {
        if from > to {
            return Err(ClockError::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(RecordFilter::Range { from, to })
    }

    /// Inclusive bounds, or `None` for [`RecordFilter::All`].
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match *self {
            RecordFilter::All => None,
            RecordFilter::Date(date) => Some((date, date)),
            RecordFilter::Month(date) => {
                let range = crate::libs::calendar::month_range(date);
                Some((range.first_day, range.last_day))
            }
            RecordFilter::Range { from, to } => Some((from, to)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: RecordFilter,
    pub employee_name: Option<String>,
    pub user_id: Option<String>,
}

impl RecordQuery {
    pub fn new(filter: RecordFilter) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }

    pub fn employee(mut self, name: Option<String>) -> Self {
        self.employee_name = name;
        self
    }

    pub fn user(mut self, user_id: Option<String>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn matches(&self, record: &TimeRecord) -> bool {
        let in_period = match self.filter.bounds() {
            Some((from, to)) => from <= record.date && record.date <= to,
            None => true,
        };
        in_period
            && self.employee_name.as_ref().map_or(true, |name| &record.employee_name == name)
            && self.user_id.as_ref().map_or(true, |id| &record.user_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(s: &str) -> NaiveTime {
        parse_time(s).unwrap()
    }

    #[test]
    fn canonical_day_walks_every_state() {
        let mut times = DayTimes::default();
        assert_eq!(times.state(), DayState::Empty);

        times.punch(PunchKind::Entry, hm("09:00")).unwrap();
        assert_eq!(times.state(), DayState::EntryMarked);
        times.punch(PunchKind::LunchOut, hm("12:00")).unwrap();
        assert_eq!(times.state(), DayState::LunchOut);
        times.punch(PunchKind::LunchBack, hm("13:00")).unwrap();
        assert_eq!(times.state(), DayState::LunchBack);
        times.punch(PunchKind::Exit, hm("18:00")).unwrap();
        assert_eq!(times.state(), DayState::Closed);
    }

    #[test]
    fn repeated_punch_is_rejected() {
        let mut times = DayTimes::default();
        times.punch(PunchKind::Entry, hm("09:00")).unwrap();
        let err = times.punch(PunchKind::Entry, hm("09:05")).unwrap_err();
        assert_eq!(
            err,
            ClockError::AlreadyMarked {
                kind: PunchKind::Entry,
                at: "09:00".to_string()
            }
        );
        assert_eq!(times.entry, Some(hm("09:00")));
    }

    #[test]
    fn out_of_order_punches_are_rejected() {
        let mut times = DayTimes::default();
        assert!(matches!(
            times.punch(PunchKind::LunchOut, hm("12:00")),
            Err(ClockError::OutOfOrder { state: DayState::Empty, .. })
        ));
        assert!(matches!(times.punch(PunchKind::Exit, hm("18:00")), Err(ClockError::OutOfOrder { .. })));

        times.punch(PunchKind::Entry, hm("09:00")).unwrap();
        assert!(matches!(times.punch(PunchKind::LunchBack, hm("13:00")), Err(ClockError::OutOfOrder { .. })));

        times.punch(PunchKind::LunchOut, hm("12:00")).unwrap();
        assert!(matches!(
            times.punch(PunchKind::Exit, hm("18:00")),
            Err(ClockError::OutOfOrder { state: DayState::LunchOut, .. })
        ));
    }

    #[test]
    fn exit_straight_after_entry_skips_lunch() {
        let mut times = DayTimes::default();
        times.punch(PunchKind::Entry, hm("09:00")).unwrap();
        times.punch(PunchKind::Exit, hm("15:00")).unwrap();
        assert_eq!(times.state(), DayState::Closed);
        assert_eq!(times.punch(PunchKind::LunchOut, hm("15:01")), Err(ClockError::DayClosed));
    }

    #[test]
    fn time_parsing_tolerates_seconds() {
        assert_eq!(hm("08:30:15"), NaiveTime::from_hms_opt(8, 30, 15).unwrap());
        assert!(parse_time("8h30").is_err());
        assert_eq!(parse_optional_time(Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_time(None).unwrap(), None);
    }

    #[test]
    fn refresh_total_tracks_the_punches() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut record = TimeRecord::new("u1", "Ana", date, date.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(record.total_hours, TOTAL_UNKNOWN);

        record.times.entry = Some(hm("09:00"));
        record.times.exit = Some(hm("18:00"));
        record.refresh_total(LunchPolicy::default());
        assert_eq!(record.total_hours, "08:00");

        record.refresh_total(LunchPolicy::None);
        assert_eq!(record.total_hours, "09:00");
    }

    #[test]
    fn stored_total_ignores_later_policy_changes() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let mut record = TimeRecord::new("u1", "Ana", date, date.and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(record.stored_total(528).minutes, None);

        record.times.entry = Some(hm("08:00"));
        record.times.exit = Some(hm("18:00"));
        record.refresh_total(LunchPolicy::None);

        let stored = record.stored_total(528);
        assert_eq!(stored.text(), "10:00");
        assert!(stored.overtime);
        assert_eq!(record.total(LunchPolicy::default(), 528).text(), "09:00");
    }

    #[test]
    fn json_shape_is_flat_with_hh_mm_times() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let record = TimeRecord::new("u1", "Ana", date, date.and_hms_opt(9, 0, 0).unwrap()).with_times(
            DayTimes {
                entry: Some(hm("09:00")),
                ..Default::default()
            },
            LunchPolicy::default(),
        );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2024-03-05");
        assert_eq!(json["entry"], "09:00");
        assert!(json["exit"].is_null());
        assert_eq!(json["total_hours"], "--:--");

        let back: TimeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn query_matches_period_and_employee() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let record = TimeRecord::new("u1", "Ana", date, date.and_hms_opt(9, 0, 0).unwrap());

        assert!(RecordQuery::new(RecordFilter::Month(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())).matches(&record));
        assert!(!RecordQuery::new(RecordFilter::Date(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap())).matches(&record));
        assert!(!RecordQuery::default().employee(Some("Bruno".to_string())).matches(&record));
        assert!(RecordQuery::default().user(Some("u1".to_string())).matches(&record));
        assert!(RecordFilter::range(date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()).is_err());
    }
}
