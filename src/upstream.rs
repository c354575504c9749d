//! The HTTP capability the aggregator depends on.
//!
//! `Upstream` is the seam between activity logic and the network: the
//! aggregator only ever talks to this trait, so tests can swap in an
//! in-memory fake. `GitHubClient` is the real implementation.

mod github;

use async_trait::async_trait;
use serde::Deserialize;

use crate::model::{ActivityEvent, Contribution, lenient};

pub use github::GitHubClient;

/// Errors from a single upstream request.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("request timed out")]
    Timeout,

    #[error("invalid base URL {url}: {reason}")]
    BaseUrl { url: String, reason: String },
}

impl UpstreamError {
    /// HTTP status, when the failure came with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::Timeout | Self::BaseUrl { .. } => None,
        }
    }
}

pub type Result<T> = core::result::Result<T, UpstreamError>;

/// Commit detail returned by the commit lookup endpoint.
///
/// Both fields are optional and read independently; whatever is missing
/// or mistyped falls back at the caller.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default, deserialize_with = "lenient")]
    pub html_url: Option<String>,

    #[serde(default, deserialize_with = "lenient")]
    pub commit: Option<CommitBody>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitBody {
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

impl CommitDetail {
    pub fn message(&self) -> Option<&str> {
        self.commit.as_ref().and_then(|c| c.message.as_deref())
    }
}

/// Read-only access to the activity sources.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Up to `count` most recent public events for `identity`, newest first.
    async fn public_events(&self, identity: &str, count: u32) -> Result<Vec<ActivityEvent>>;

    /// Detail for one commit in `owner/repo`.
    async fn commit(&self, owner: &str, repo: &str, sha: &str) -> Result<CommitDetail>;

    /// The last year of daily contribution counts for `identity`.
    async fn contributions(&self, identity: &str) -> Result<Vec<Contribution>>;
}
