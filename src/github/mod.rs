pub mod client;
pub mod response;

pub use client::{GithubClient, DEFAULT_ENDPOINT, HISTORY_PAGE_SIZE};
pub use response::{GraphQlError, GraphQlRequest, GraphQlResponse, Variables};
