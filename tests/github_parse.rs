use chrono::{DateTime, Utc};
use ghmap::error::{GhmapError, GENERIC_FETCH_ERROR};
use ghmap::github::GraphQlResponse;
use pretty_assertions::assert_eq;
use serde_json::json;

fn parse(value: serde_json::Value) -> GraphQlResponse {
    serde_json::from_value(value).unwrap()
}

fn history_body(dates: &[&str]) -> serde_json::Value {
    let edges: Vec<_> = dates
        .iter()
        .map(|d| json!({ "node": { "committedDate": d } }))
        .collect();
    json!({
        "data": {
            "repository": {
                "defaultBranchRef": {
                    "target": { "history": { "edges": edges } }
                }
            }
        }
    })
}

#[test]
fn full_path_yields_commit_dates() {
    let response = parse(history_body(&[
        "2024-01-01T10:00:00Z",
        "2024-01-02T00:00:00Z",
    ]));

    assert!(!response.has_errors());
    let dates = response.commit_dates();
    let expected: Vec<DateTime<Utc>> = vec![
        "2024-01-01T10:00:00Z".parse().unwrap(),
        "2024-01-02T00:00:00Z".parse().unwrap(),
    ];
    assert_eq!(dates, expected);
}

#[test]
fn missing_repository_degrades_to_empty() {
    let response = parse(json!({ "data": { "repository": null } }));
    assert!(response.commit_dates().is_empty());
}

#[test]
fn missing_default_branch_degrades_to_empty() {
    let response = parse(json!({
        "data": { "repository": { "defaultBranchRef": null } }
    }));
    assert!(response.commit_dates().is_empty());
}

#[test]
fn null_edges_and_nodes_are_skipped() {
    let response = parse(json!({
        "data": {
            "repository": {
                "defaultBranchRef": {
                    "target": {
                        "history": {
                            "edges": [
                                null,
                                { "node": null },
                                { "node": { "committedDate": "2024-05-01T12:00:00Z" } }
                            ]
                        }
                    }
                }
            }
        }
    }));

    let dates = response.commit_dates();
    assert_eq!(dates.len(), 1);
    assert_eq!(dates[0], "2024-05-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap());
}

#[test]
fn first_error_message_wins() {
    let response = parse(json!({
        "errors": [
            { "message": "Bad credentials" },
            { "message": "Something else" }
        ]
    }));

    assert!(response.has_errors());
    assert_eq!(response.first_error_message(), Some("Bad credentials".to_string()));
}

#[test]
fn error_without_message_falls_back_to_generic() {
    let response = parse(json!({ "errors": [ {} ] }));

    assert!(response.has_errors());
    assert_eq!(response.first_error_message(), None);

    let err = GhmapError::upstream(response.first_error_message());
    assert_eq!(err.to_string(), format!("GitHub GraphQL error: {GENERIC_FETCH_ERROR}"));
}

#[test]
fn empty_error_array_is_not_an_error() {
    let response = parse(json!({ "data": null, "errors": [] }));
    assert!(!response.has_errors());
    assert!(response.commit_dates().is_empty());
}
