//! Code-host layer - publication contract and the GitHub implementation

pub mod client;
pub mod host;

pub use client::{GitHubClient, pull_request_url};
pub use host::{CodeHost, PullRequest};
