use super::aggregate::build_calendar;
use crate::error::{GhmapError, Result};
use crate::github::GithubClient;
use crate::model::{CalendarData, RepoSpec, Year};
use chrono::{Local, Months, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Earliest day included in the query: Jan 1 for a literal year, twelve
/// months back from today otherwise (chrono clamps Feb 29 to Feb 28).
pub fn since_day(year: Year, today: NaiveDate) -> Result<NaiveDate> {
    match year {
        Year::Literal(y) => NaiveDate::from_ymd_opt(y, 1, 1)
            .ok_or_else(|| GhmapError::InvalidDate(format!("Invalid year: {y}"))),
        Year::Last => today
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| GhmapError::InvalidDate(format!("Date underflow: {today}"))),
    }
}

/// The since boundary for the `since` query variable: local midnight of
/// `since_day`, serialized RFC 3339 in UTC.
pub fn since_rfc3339(year: Year, today: NaiveDate) -> Result<String> {
    let day = since_day(year, today)?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| GhmapError::InvalidDate(format!("Invalid boundary: {day}")))?;
    let local = Local
        .from_local_datetime(&midnight)
        .earliest()
        .ok_or_else(|| GhmapError::InvalidDate(format!("Unrepresentable local time: {midnight}")))?;
    Ok(local
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// One full fetch cycle: since boundary, GraphQL call, day grouping, leveling.
pub fn fetch_calendar(client: &GithubClient, repo: &RepoSpec, year: Year) -> Result<CalendarData> {
    let today = Local::now().date_naive();
    let since = since_rfc3339(year, today)?;
    let timestamps = client.fetch_commit_dates(repo, &since)?;
    Ok(build_calendar(&timestamps, year, today))
}
