use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'a str,
    pub variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
pub struct Variables<'a> {
    pub owner: &'a str,
    pub name: &'a str,
    pub since: &'a str,
}

/// GraphQL response envelope. Every level of the data path is optional:
/// a missing repository, default branch, or history degrades to an empty
/// commit list rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<ResponseData>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseData {
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize)]
pub struct Repository {
    #[serde(rename = "defaultBranchRef")]
    pub default_branch_ref: Option<DefaultBranchRef>,
}

#[derive(Debug, Deserialize)]
pub struct DefaultBranchRef {
    pub target: Option<Target>,
}

#[derive(Debug, Deserialize)]
pub struct Target {
    pub history: Option<History>,
}

#[derive(Debug, Deserialize)]
pub struct History {
    pub edges: Option<Vec<Option<Edge>>>,
}

#[derive(Debug, Deserialize)]
pub struct Edge {
    pub node: Option<CommitNode>,
}

#[derive(Debug, Deserialize)]
pub struct CommitNode {
    #[serde(rename = "committedDate")]
    pub committed_date: Option<DateTime<Utc>>,
}

impl GraphQlResponse {
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }

    /// Message of the first upstream error, if the server provided one.
    pub fn first_error_message(&self) -> Option<String> {
        self.errors
            .as_ref()
            .and_then(|errors| errors.first())
            .and_then(|error| error.message.clone())
    }

    /// Walk the data path and collect commit timestamps, skipping any
    /// null link along the way.
    pub fn commit_dates(self) -> Vec<DateTime<Utc>> {
        self.data
            .and_then(|data| data.repository)
            .and_then(|repo| repo.default_branch_ref)
            .and_then(|branch| branch.target)
            .and_then(|target| target.history)
            .and_then(|history| history.edges)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|edge| edge.node)
            .filter_map(|node| node.committed_date)
            .collect()
    }
}
