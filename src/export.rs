use crate::calendar::fetch_calendar;
use crate::cli::CommonArgs;
use crate::error::{GhmapError, Result};
use crate::github::GithubClient;
use crate::model::{CalendarData, CalendarOutput, RepoSpec, SCHEMA_VERSION};
use anyhow::Context;
use chrono::Utc;
use console::style;

pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let repo = RepoSpec::resolve(&common.user, &common.repo)
        .context("Failed to resolve repository target")?;
    let token = common.token.clone().ok_or(GhmapError::MissingToken)?;
    let client = GithubClient::new(token, common.endpoint.clone(), common.timeout)
        .context("Failed to build HTTP client")?;

    let data = fetch_calendar(&client, &repo, common.year)
        .context("Failed to fetch contribution data")?;

    if json {
        output_json(&data, &repo, &common)?;
    } else if ndjson {
        output_ndjson(&data)?;
    } else {
        output_summary(&data)?;
    }

    Ok(())
}

fn output_json(data: &CalendarData, repo: &RepoSpec, common: &CommonArgs) -> Result<()> {
    let output = CalendarOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository: repo.to_string(),
        year: common.year.to_string(),
        total: data.total.clone(),
        contributions: data.contributions.clone(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn output_ndjson(data: &CalendarData) -> Result<()> {
    for activity in &data.contributions {
        println!("{}", serde_json::to_string(activity)?);
    }
    Ok(())
}

fn output_summary(data: &CalendarData) -> Result<()> {
    if data.contributions.is_empty() {
        println!("No data to display");
        return Ok(());
    }

    println!("{}", style("Contribution Activity").bold());
    println!("{}", "─".repeat(40));

    for activity in &data.contributions {
        let bar = "▪".repeat(usize::from(activity.level));
        println!(
            "{}  commits: {:>3}  level: {} {}",
            activity.date,
            activity.count,
            activity.level,
            style(bar).green(),
        );
    }

    for (year, total) in &data.total {
        println!("\n{} {} contributions in {}", style("Total:").bold(), total, year);
    }

    Ok(())
}
