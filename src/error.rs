use thiserror::Error;

pub type Result<T> = std::result::Result<T, GhmapError>;

/// Fallback message when a GraphQL error payload carries no message field.
pub const GENERIC_FETCH_ERROR: &str = "Failed to fetch GitHub GraphQL data.";

#[derive(Error, Debug)]
pub enum GhmapError {
    #[error("Transport error: {0}")]
    Transport(#[from] Box<reqwest::Error>),
    #[error("Authorization failed (HTTP {0})")]
    Auth(u16),
    #[error("HTTP error: status {0}")]
    Http(u16),
    #[error("GitHub GraphQL error: {0}")]
    Upstream(String),
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Missing GitHub token: set GITHUB_TOKEN or pass --token")]
    MissingToken,
}

impl From<reqwest::Error> for GhmapError {
    fn from(err: reqwest::Error) -> Self {
        GhmapError::Transport(Box::new(err))
    }
}

impl GhmapError {
    /// Upstream error from a GraphQL error payload, falling back to the
    /// generic message when the server provided none.
    pub fn upstream(message: Option<String>) -> Self {
        GhmapError::Upstream(message.unwrap_or_else(|| GENERIC_FETCH_ERROR.to_string()))
    }
}
