use crate::error::{GhmapError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const SCHEMA_VERSION: u32 = 1;

/// One calendar day of commit activity with its derived intensity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub date: NaiveDate,
    pub count: u32,
    pub level: u8,
}

/// One fetch cycle's worth of calendar data. `total` maps the display year
/// to the aggregate commit count; `contributions` is sorted by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarData {
    pub total: BTreeMap<i32, u64>,
    pub contributions: Vec<Activity>,
}

/// Display mode: the most recent twelve months, or one literal calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Year {
    Last,
    Literal(i32),
}

impl Year {
    /// The key under which the aggregate total is stored.
    pub fn total_key(&self, current_year: i32) -> i32 {
        match self {
            Year::Last => current_year,
            Year::Literal(y) => *y,
        }
    }
}

impl FromStr for Year {
    type Err = GhmapError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("last") {
            return Ok(Year::Last);
        }
        match s.parse::<i32>() {
            Ok(y) if (1970..=9999).contains(&y) => Ok(Year::Literal(y)),
            _ => Err(GhmapError::Parse(format!(
                "Invalid year '{s}': expected 'last' or a calendar year"
            ))),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Last => write!(f, "last"),
            Year::Literal(y) => write!(f, "{y}"),
        }
    }
}

/// Repository coordinates for the GraphQL query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSpec {
    pub owner: String,
    pub name: String,
}

impl RepoSpec {
    /// Resolve the query target from the user argument and the repo argument.
    /// `repo` may be `owner/name` or a bare name owned by `user`.
    pub fn resolve(user: &str, repo: &str) -> Result<Self> {
        let (owner, name) = match repo.split_once('/') {
            Some((owner, name)) => (owner, name),
            None => (user, repo),
        };
        if user.is_empty() || owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(GhmapError::Parse(format!(
                "Invalid repository '{repo}': expected 'name' or 'owner/name'"
            )));
        }
        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepoSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Export envelope written by `ghmap export --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarOutput {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub year: String,
    pub total: BTreeMap<i32, u64>,
    pub contributions: Vec<Activity>,
}
