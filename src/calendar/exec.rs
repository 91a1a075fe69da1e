use super::{display_range, fetch_calendar, output_grid, output_json, output_ndjson};
use crate::cli::CommonArgs;
use crate::error::GhmapError;
use crate::github::GithubClient;
use crate::model::RepoSpec;
use crate::theme::ThemeMode;
use crate::view::{self, CalendarView, RenderOptions, ViewState};
use anyhow::Context;
use chrono::{Datelike, Local};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn exec(
    common: CommonArgs,
    json: bool,
    ndjson: bool,
    mode: ThemeMode,
    options: RenderOptions,
) -> anyhow::Result<()> {
    let repo = RepoSpec::resolve(&common.user, &common.repo)
        .context("Failed to resolve repository target")?;
    let token = common.token.clone().ok_or(GhmapError::MissingToken)?;
    let client = GithubClient::new(token, common.endpoint.clone(), common.timeout)
        .context("Failed to build HTTP client")?;

    let mut calendar_view = CalendarView::new(repo.clone(), common.year);
    let ticket = calendar_view.begin_fetch();

    // No spinner alongside machine-readable output.
    let pb = if json || ndjson {
        None
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(format!("Fetching contribution activity for {repo}..."));
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    };

    let result = fetch_calendar(&client, &repo, common.year);
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let accepted = calendar_view.complete(ticket, result);
    debug_assert!(accepted, "latest ticket must be accepted");

    match calendar_view.into_state() {
        ViewState::Ready(data) => {
            let today = Local::now().date_naive();
            let plan = view::prepare(&data, common.year, today.year(), &options, false);
            if json {
                output_json(&plan)?;
            } else if ndjson {
                output_ndjson(&plan.activities)?;
            } else {
                let (since, until) =
                    display_range(common.year, today).context("Failed to resolve display range")?;
                output_grid(&plan, mode, since, until)?;
            }
            Ok(())
        }
        ViewState::Failed(err) if options.propagate_errors => {
            Err(anyhow::Error::new(err).context("Failed to fetch contribution data"))
        }
        ViewState::Failed(_) => {
            println!("{}", style(view::error_message(&options, &repo)).red());
            Ok(())
        }
        // A completed fetch with the latest ticket always leaves Ready or Failed.
        ViewState::Idle | ViewState::Loading => Ok(()),
    }
}
