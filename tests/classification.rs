use chrono::{DateTime, NaiveDate, Utc};
use ghmap::calendar::{
    build_calendar, display_range, flatten_days, group_by_day, layout_weeks, level, month_spans,
    since_day,
};
use ghmap::model::Year;
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

#[test]
fn level_step_function_boundaries() {
    assert_eq!(level(0), 0);
    assert_eq!(level(1), 1);
    assert_eq!(level(2), 1);
    assert_eq!(level(3), 2);
    assert_eq!(level(4), 2);
    assert_eq!(level(5), 3);
    assert_eq!(level(9), 3);
    assert_eq!(level(10), 4);
    assert_eq!(level(100), 4);
}

#[test]
fn grouping_counts_commits_per_day() {
    let timestamps = [
        ts("2024-01-01T10:00:00Z"),
        ts("2024-01-01T23:00:00Z"),
        ts("2024-01-02T00:00:00Z"),
    ];

    let grouped = group_by_day(&timestamps);
    let expected: BTreeMap<NaiveDate, u32> =
        [(date(2024, 1, 1), 2), (date(2024, 1, 2), 1)].into_iter().collect();
    assert_eq!(grouped, expected);

    let data = build_calendar(&timestamps, Year::Literal(2024), date(2024, 6, 1));
    assert_eq!(data.contributions.len(), 2);
    assert_eq!(data.contributions[0].date, date(2024, 1, 1));
    assert_eq!(data.contributions[0].count, 2);
    assert_eq!(data.contributions[0].level, 1);
    assert_eq!(data.contributions[1].count, 1);
    assert_eq!(data.contributions[1].level, 1);
    assert_eq!(data.total.get(&2024), Some(&3));
}

#[test]
fn grouping_is_idempotent() {
    let timestamps = [
        ts("2024-03-01T01:00:00Z"),
        ts("2024-03-01T02:00:00Z"),
        ts("2024-03-01T03:00:00Z"),
        ts("2024-03-05T12:00:00Z"),
        ts("2024-04-09T23:59:59Z"),
    ];
    let grouped = group_by_day(&timestamps);

    let regrouped_input: Vec<DateTime<Utc>> = grouped
        .iter()
        .flat_map(|(day, count)| {
            std::iter::repeat(day.and_hms_opt(0, 0, 0).unwrap().and_utc()).take(*count as usize)
        })
        .collect();

    assert_eq!(group_by_day(&regrouped_input), grouped);
}

#[test]
fn empty_commit_list_yields_zero_total() {
    let data = build_calendar(&[], Year::Literal(2023), date(2026, 8, 6));
    assert!(data.contributions.is_empty());
    assert_eq!(data.total.get(&2023), Some(&0));

    let data = build_calendar(&[], Year::Last, date(2026, 8, 6));
    assert_eq!(data.total.get(&2026), Some(&0));
}

#[test]
fn literal_year_boundary_is_january_first() {
    // Independent of the current date.
    assert_eq!(since_day(Year::Literal(2021), date(2026, 8, 6)).unwrap(), date(2021, 1, 1));
    assert_eq!(since_day(Year::Literal(2021), date(2021, 12, 31)).unwrap(), date(2021, 1, 1));
}

#[test]
fn rolling_boundary_is_twelve_months_back() {
    assert_eq!(since_day(Year::Last, date(2024, 3, 15)).unwrap(), date(2023, 3, 15));
    // Leap day clamps to the end of February.
    assert_eq!(since_day(Year::Last, date(2024, 2, 29)).unwrap(), date(2023, 2, 28));
}

#[test]
fn display_range_covers_the_selected_year() {
    let (since, until) = display_range(Year::Literal(2023), date(2026, 8, 6)).unwrap();
    assert_eq!(since, date(2023, 1, 1));
    assert_eq!(until, date(2023, 12, 31));

    let (since, until) = display_range(Year::Last, date(2026, 8, 6)).unwrap();
    assert_eq!(since, date(2025, 8, 6));
    assert_eq!(until, date(2026, 8, 6));
}

#[test]
fn layout_fills_every_day_in_range() {
    let timestamps = [ts("2024-01-10T08:00:00Z")];
    let data = build_calendar(&timestamps, Year::Literal(2024), date(2024, 6, 1));

    let since = date(2024, 1, 1);
    let until = date(2024, 1, 31);
    let weeks = layout_weeks(&data.contributions, since, until);
    let days = flatten_days(&weeks);

    assert_eq!(days.len(), 31);
    assert_eq!(days.first().unwrap().date, since);
    assert_eq!(days.last().unwrap().date, until);

    let active = days.iter().find(|d| d.date == date(2024, 1, 10)).unwrap();
    assert_eq!(active.count, 1);
    assert_eq!(active.level, 1);
    assert!(days.iter().filter(|d| d.date != active.date).all(|d| d.count == 0 && d.level == 0));

    // Every cell sits in its weekday slot.
    for week in &weeks {
        for (slot, cell) in week.iter().enumerate() {
            if let Some(day) = cell {
                assert_eq!(day.date.format("%w").to_string(), slot.to_string());
            }
        }
    }
}

#[test]
fn month_labels_start_at_month_boundaries() {
    let weeks = layout_weeks(&[], date(2024, 1, 1), date(2024, 3, 31));
    let spans = month_spans(&weeks);

    assert_eq!(spans.first().unwrap(), &(0, "Jan".to_string()));
    let labels: Vec<&str> = spans.iter().map(|(_, label)| label.as_str()).collect();
    assert_eq!(labels, ["Jan", "Feb", "Mar"]);
}
