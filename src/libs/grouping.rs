//! Monthly grouping of time records for listings.

use crate::libs::calendar::{month_key, month_label};
use crate::libs::record::TimeRecord;
use chrono::NaiveTime;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGroup {
    /// `YYYY-MM`
    pub key: String,
    /// pt-BR label, e.g. "março de 2024"
    pub label: String,
    pub records: Vec<TimeRecord>,
}

/// Groups records by month: months newest first, records inside a month
/// oldest first with entry time as tiebreak (absent entry sorts as 00:00).
pub fn group_by_month(records: Vec<TimeRecord>) -> Vec<MonthGroup> {
    let mut months: BTreeMap<String, Vec<TimeRecord>> = BTreeMap::new();
    for record in records {
        months.entry(month_key(record.date)).or_default().push(record);
    }

    months
        .into_iter()
        .rev()
        .map(|(key, mut records)| {
            records.sort_by_key(|r| (r.date, r.times.entry.unwrap_or(NaiveTime::MIN)));
            let label = records.first().map(|r| month_label(r.date)).unwrap_or_default();
            MonthGroup { key, label, records }
        })
        .collect()
}

/// Concatenates groups back into a flat list in display order.
pub fn flatten(groups: Vec<MonthGroup>) -> Vec<TimeRecord> {
    groups.into_iter().flat_map(|g| g.records).collect()
}
