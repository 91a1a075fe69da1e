use crate::model::{Activity, CalendarData, Year};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::BTreeMap;

/// Step function from daily commit count to intensity level.
/// Fixed and non-configurable: >=10 -> 4, >=5 -> 3, >=3 -> 2, >=1 -> 1.
pub fn level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        5..=9 => 3,
        _ => 4,
    }
}

/// Commit count per calendar day, truncating each timestamp to its date.
pub fn group_by_day(timestamps: &[DateTime<Utc>]) -> BTreeMap<NaiveDate, u32> {
    let mut days: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for timestamp in timestamps {
        *days.entry(timestamp.date_naive()).or_insert(0) += 1;
    }
    days
}

/// Reduce raw commit timestamps to leveled daily activity plus the aggregate
/// total, keyed by the literal year or by `today`'s year for the
/// last-12-months view. Contributions come out sorted by date.
pub fn build_calendar(timestamps: &[DateTime<Utc>], year: Year, today: NaiveDate) -> CalendarData {
    let contributions: Vec<Activity> = group_by_day(timestamps)
        .into_iter()
        .map(|(date, count)| Activity {
            date,
            count,
            level: level(count),
        })
        .collect();

    let total_count: u64 = contributions.iter().map(|a| u64::from(a.count)).sum();
    let mut total = BTreeMap::new();
    total.insert(year.total_key(today.year()), total_count);

    CalendarData {
        total,
        contributions,
    }
}
