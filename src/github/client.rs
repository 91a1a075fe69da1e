use super::response::{GraphQlRequest, GraphQlResponse, Variables};
use crate::error::{GhmapError, Result};
use crate::model::RepoSpec;
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.github.com/graphql";

/// Single-page query cap; mirrors the `first:` argument in the query text.
pub const HISTORY_PAGE_SIZE: usize = 100;

const USER_AGENT: &str = concat!("ghmap/", env!("CARGO_PKG_VERSION"));

const COMMIT_HISTORY_QUERY: &str = "
query($owner: String!, $name: String!, $since: GitTimestamp!) {
  repository(owner: $owner, name: $name) {
    defaultBranchRef {
      target {
        ... on Commit {
          history(since: $since, first: 100) {
            edges {
              node {
                committedDate
              }
            }
          }
        }
      }
    }
  }
}
";

#[derive(Clone)]
pub struct GithubClient {
    http: Client,
    endpoint: String,
    token: String,
}

impl GithubClient {
    pub fn new(token: String, endpoint: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            token,
        })
    }

    /// Fetch default-branch commit timestamps since `since` (RFC 3339).
    /// Exactly one outbound request per call; no retries, no caching.
    pub fn fetch_commit_dates(&self, repo: &RepoSpec, since: &str) -> Result<Vec<DateTime<Utc>>> {
        let body = GraphQlRequest {
            query: COMMIT_HISTORY_QUERY,
            variables: Variables {
                owner: &repo.owner,
                name: &repo.name,
                since,
            },
        };

        log::debug!("POST {} for '{}' since {}", self.endpoint, repo, since);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&body)
            .send()?;

        let status = response.status();
        let text = response.text()?;

        // Error statuses can still carry a GraphQL error payload with a
        // more useful message than the bare status code.
        let parsed: GraphQlResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => return Err(status_error(status)),
            Err(err) => return Err(GhmapError::MalformedResponse(err.to_string())),
        };

        if parsed.has_errors() {
            return Err(GhmapError::upstream(parsed.first_error_message()));
        }
        if !status.is_success() {
            return Err(status_error(status));
        }

        let dates = parsed.commit_dates();
        log::debug!("{} commit(s) returned for '{repo}'", dates.len());
        if dates.len() >= HISTORY_PAGE_SIZE {
            log::debug!("history for '{repo}' truncated at the {HISTORY_PAGE_SIZE}-entry query cap");
        }
        Ok(dates)
    }
}

fn status_error(status: StatusCode) -> GhmapError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GhmapError::Auth(status.as_u16()),
        _ => GhmapError::Http(status.as_u16()),
    }
}
