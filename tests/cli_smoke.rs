use assert_cmd::prelude::*;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::process::Command;
use std::thread;

/// Serve exactly one canned HTTP response on a loopback port, in the
/// background, and hand back the endpoint URL to point the CLI at.
fn serve_once(status_line: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            read_request(&mut stream);
            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            let _ = stream.write_all(response.as_bytes());
        }
    });

    format!("http://{addr}")
}

/// Read headers plus the Content-Length body so the client finishes
/// writing before the canned response goes out.
fn read_request(stream: &mut std::net::TcpStream) {
    let mut request = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&chunk[..n]),
        }
        let text = String::from_utf8_lossy(&request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text
            .lines()
            .find_map(|line| line.to_ascii_lowercase().strip_prefix("content-length:").map(str::trim).map(String::from))
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        if request.len() >= header_end + 4 + content_length {
            return;
        }
    }
}

fn history_body(dates: &[&str]) -> String {
    let edges: Vec<String> = dates
        .iter()
        .map(|d| format!(r#"{{"node":{{"committedDate":"{d}"}}}}"#))
        .collect();
    format!(
        r#"{{"data":{{"repository":{{"defaultBranchRef":{{"target":{{"history":{{"edges":[{}]}}}}}}}}}}}}"#,
        edges.join(",")
    )
}

fn ghmap() -> Command {
    let mut cmd = Command::cargo_bin("ghmap").unwrap();
    cmd.env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn help_runs() {
    ghmap().arg("--help").assert().success();
}

#[test]
fn missing_token_fails() {
    let assert = ghmap()
        .args(["--user", "octo", "--repo", "widgets", "show"])
        .assert()
        .failure();
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Missing GitHub token"));
}

#[test]
fn show_json_outputs_render_plan() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        history_body(&[
            "2024-01-01T10:00:00Z",
            "2024-01-01T23:00:00Z",
            "2024-01-02T00:00:00Z",
        ]),
    );

    let out = ghmap()
        .args(["--user", "octo", "--repo", "widgets", "--year", "2024"])
        .args(["--token", "test-token", "--endpoint", &endpoint])
        .args(["show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["total"], 3);
    assert_eq!(v["total_label"], "3 contributions in 2024");
    assert_eq!(v["max_level"], 4);
    assert_eq!(v["loading"], false);

    let activities = v["activities"].as_array().unwrap();
    assert_eq!(activities.len(), 2);
    assert_eq!(activities[0]["date"], "2024-01-01");
    assert_eq!(activities[0]["count"], 2);
    assert_eq!(activities[0]["level"], 1);
    assert_eq!(activities[1]["date"], "2024-01-02");
    assert_eq!(activities[1]["count"], 1);
}

#[test]
fn export_json_outputs_envelope() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        history_body(&["2024-02-03T08:30:00Z", "2024-02-03T09:00:00Z"]),
    );

    let out = ghmap()
        .args(["--user", "octo", "--repo", "octo/widgets", "--year", "2024"])
        .args(["--token", "test-token", "--endpoint", &endpoint])
        .args(["export", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["version"], 1);
    assert_eq!(v["repository"], "octo/widgets");
    assert_eq!(v["year"], "2024");
    assert_eq!(v["total"]["2024"], 2);
    assert_eq!(v["contributions"][0]["count"], 2);
    assert_eq!(v["contributions"][0]["level"], 1);
}

#[test]
fn graphql_error_renders_inline_message() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"errors":[{"message":"Bad credentials"}]}"#.to_string(),
    );

    let assert = ghmap()
        .args(["--user", "octo", "--repo", "widgets"])
        .args(["--token", "test-token", "--endpoint", &endpoint])
        .arg("show")
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout
        .contains("Error - Fetching GitHub contribution data for \"octo/widgets\" failed."));
}

#[test]
fn inline_message_can_be_overridden() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"errors":[{"message":"Bad credentials"}]}"#.to_string(),
    );

    let assert = ghmap()
        .args(["--user", "octo", "--repo", "widgets"])
        .args(["--token", "test-token", "--endpoint", &endpoint])
        .args(["show", "--error-message", "calendar unavailable"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("calendar unavailable"));
}

#[test]
fn strict_mode_propagates_the_upstream_message() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"errors":[{"message":"Bad credentials"}]}"#.to_string(),
    );

    let assert = ghmap()
        .args(["--user", "octo", "--repo", "widgets"])
        .args(["--token", "test-token", "--endpoint", &endpoint])
        .args(["show", "--strict"])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("Bad credentials"));
}

#[test]
fn empty_repository_renders_a_zero_total() {
    let endpoint = serve_once(
        "HTTP/1.1 200 OK",
        r#"{"data":{"repository":{"defaultBranchRef":null}}}"#.to_string(),
    );

    let out = ghmap()
        .args(["--user", "octo", "--repo", "widgets", "--year", "2024"])
        .args(["--token", "test-token", "--endpoint", &endpoint])
        .args(["show", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(v["total"], 0);
    assert_eq!(v["activities"].as_array().unwrap().len(), 0);
}

#[test]
fn http_error_without_payload_fails_in_strict_mode() {
    let endpoint = serve_once("HTTP/1.1 500 Internal Server Error", "oops".to_string());

    let assert = ghmap()
        .args(["--user", "octo", "--repo", "widgets"])
        .args(["--token", "test-token", "--endpoint", &endpoint])
        .args(["show", "--strict"])
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("status 500"));
}
