use super::fetch::since_day;
use crate::error::{GhmapError, Result};
use crate::model::{Activity, Year};
use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;

/// One grid cell: a day inside the display range, zero-filled when no
/// activity was recorded for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDay {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

/// One Sunday-first week column; `None` pads the partial first and last weeks.
pub type GridWeek = [Option<GridDay>; 7];

/// The day range the grid covers: the fetch boundary through today for the
/// rolling view, or the whole calendar year for a literal one.
pub fn display_range(year: Year, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
    let since = since_day(year, today)?;
    let until = match year {
        Year::Last => today,
        Year::Literal(y) => NaiveDate::from_ymd_opt(y, 12, 31)
            .ok_or_else(|| GhmapError::InvalidDate(format!("Invalid year: {y}")))?,
    };
    Ok((since, until))
}

/// Lay contributions out as dense week columns covering every day in
/// `since..=until`. Days without activity appear with count 0, level 0.
pub fn layout_weeks(contributions: &[Activity], since: NaiveDate, until: NaiveDate) -> Vec<GridWeek> {
    let by_date: HashMap<NaiveDate, (u32, u8)> = contributions
        .iter()
        .map(|a| (a.date, (a.count, a.level)))
        .collect();

    let mut weeks: Vec<GridWeek> = Vec::new();
    let mut week: GridWeek = [None; 7];
    let mut day = since;

    while day <= until {
        let slot = day.weekday().num_days_from_sunday() as usize;
        let (count, level) = by_date.get(&day).copied().unwrap_or((0, 0));
        week[slot] = Some(GridDay { date: day, count, level });

        if slot == 6 {
            weeks.push(week);
            week = [None; 7];
        }
        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

/// Month labels for the grid header: `(week column, "Jan")` at each column
/// where a new month begins.
pub fn month_spans(weeks: &[GridWeek]) -> Vec<(usize, String)> {
    let mut spans = Vec::new();
    let mut previous: Option<u32> = None;

    for (column, week) in weeks.iter().enumerate() {
        let Some(first) = week.iter().flatten().next() else {
            continue;
        };
        let month = first.date.month();
        if previous != Some(month) {
            spans.push((column, first.date.format("%b").to_string()));
            previous = Some(month);
        }
    }
    spans
}

/// The grid flattened back to chronological days, for cursor navigation.
pub fn flatten_days(weeks: &[GridWeek]) -> Vec<GridDay> {
    let mut days: Vec<GridDay> = weeks.iter().flatten().filter_map(|cell| *cell).collect();
    days.sort_by_key(|day| day.date);
    days
}
