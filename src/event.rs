//! Event model for GitHub webhook deliveries.
//!
//! The `X-GitHub-Event` header names the kind of notification being
//! delivered. Only ping and pull-request events carry handler logic here;
//! everything else is acknowledged without processing. Payloads are only
//! deserialized after signature verification succeeds.

use serde::Deserialize;

/// Event-type indicator parsed from the `X-GitHub-Event` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// Webhook handshake sent when the hook is first configured.
    Ping,
    /// Pull request opened, closed, synchronized, etc.
    PullRequest,
    /// Any other event type, carried verbatim for logging.
    Other(String),
}

impl EventKind {
    /// Parses the header value. An absent header defaults to ping.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            None | Some("ping") => Self::Ping,
            Some("pull_request") => Self::PullRequest,
            Some(other) => Self::Other(other.to_string()),
        }
    }
}

/// Pull-request event payload, reduced to the fields the receiver logs.
///
/// GitHub sends far more; unknown fields are ignored during
/// deserialization.
#[derive(Debug, Deserialize)]
pub struct PullRequestEvent {
    /// What happened to the pull request (opened, closed, ...).
    pub action: String,
    /// The pull request itself.
    pub pull_request: PullRequest,
}

/// The pull request nested inside a pull-request event.
#[derive(Debug, Deserialize)]
pub struct PullRequest {
    /// Title of the pull request.
    pub title: String,
    /// Account that opened the pull request.
    pub user: Author,
}

/// Account reference inside a pull-request payload.
#[derive(Debug, Deserialize)]
pub struct Author {
    /// GitHub login of the account.
    pub login: String,
}
