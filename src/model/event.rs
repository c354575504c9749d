//! Activity events as delivered by the public events feed.
//!
//! Parsing is permissive: every field defaults when missing, and a field
//! whose JSON type does not match what we expect is treated as absent.

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::CommitSummary;

/// A single entry from the public events feed.
///
/// `kind`, `repo`, and `created_at` are never touched after parsing.
/// Enrichment only fills `commits`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityEvent {
    /// Opaque upstream identifier. Used as a display key only.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub id: String,

    #[serde(rename = "type", default)]
    pub kind: EventKind,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub repo: Repository,

    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<Timestamp>,

    #[serde(default, deserialize_with = "lenient_or_default")]
    pub payload: EventDetail,

    /// Commit summaries attached by enrichment.
    ///
    /// `None` when enrichment was not attempted. Never an empty vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commits: Option<Vec<CommitSummary>>,
}

impl ActivityEvent {
    /// The `owner/name` pair and head SHA needed to look up this push's commit.
    ///
    /// `None` for non-push events, and for pushes missing either piece.
    pub fn push_target(&self) -> Option<PushTarget<'_>> {
        if self.kind != EventKind::Push {
            return None;
        }
        let head = self.payload.head.as_deref().filter(|h| !h.is_empty())?;
        let (owner, name) = self.repo.name.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(PushTarget {
            full_name: &self.repo.name,
            owner,
            name,
            head,
        })
    }
}

/// Where a push landed, borrowed from its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PushTarget<'a> {
    pub full_name: &'a str,
    pub owner: &'a str,
    pub name: &'a str,
    pub head: &'a str,
}

/// The event category.
///
/// Upstream adds new categories without notice, so anything unrecognized
/// lands in `Other` with its raw name preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    Create,
    Delete,
    PullRequest,
    PullRequestReview,
    PullRequestReviewComment,
    Issues,
    IssueComment,
    CommitComment,
    Release,
    Watch,
    Fork,
    Public,
    Gollum,
    Member,
    Other(String),
}

impl EventKind {
    /// The upstream name for this kind, e.g. `"PushEvent"`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Push => "PushEvent",
            Self::Create => "CreateEvent",
            Self::Delete => "DeleteEvent",
            Self::PullRequest => "PullRequestEvent",
            Self::PullRequestReview => "PullRequestReviewEvent",
            Self::PullRequestReviewComment => "PullRequestReviewCommentEvent",
            Self::Issues => "IssuesEvent",
            Self::IssueComment => "IssueCommentEvent",
            Self::CommitComment => "CommitCommentEvent",
            Self::Release => "ReleaseEvent",
            Self::Watch => "WatchEvent",
            Self::Fork => "ForkEvent",
            Self::Public => "PublicEvent",
            Self::Gollum => "GollumEvent",
            Self::Member => "MemberEvent",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for EventKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for EventKind {
    fn from(raw: &str) -> Self {
        match raw {
            "PushEvent" => Self::Push,
            "CreateEvent" => Self::Create,
            "DeleteEvent" => Self::Delete,
            "PullRequestEvent" => Self::PullRequest,
            "PullRequestReviewEvent" => Self::PullRequestReview,
            "PullRequestReviewCommentEvent" => Self::PullRequestReviewComment,
            "IssuesEvent" => Self::Issues,
            "IssueCommentEvent" => Self::IssueComment,
            "CommitCommentEvent" => Self::CommitComment,
            "ReleaseEvent" => Self::Release,
            "WatchEvent" => Self::Watch,
            "ForkEvent" => Self::Fork,
            "PublicEvent" => Self::Public,
            "GollumEvent" => Self::Gollum,
            "MemberEvent" => Self::Member,
            other => Self::Other(other.to_string()),
        }
    }
}

impl Serialize for EventKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EventKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = lenient(deserializer)?;
        Ok(raw.as_deref().map(Self::from).unwrap_or_default())
    }
}

/// The repository an event happened in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    /// `owner/name`.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub name: String,

    /// API URL as given by upstream. Not a browser link.
    #[serde(default, deserialize_with = "lenient_or_default")]
    pub url: String,
}

/// The kind-dependent payload.
///
/// Only the fields we read are modeled; all of them are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDetail {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,

    #[serde(
        rename = "ref",
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub git_ref: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub ref_type: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestRef>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub issue: Option<IssueRef>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewRef>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentRef>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub release: Option<ReleaseRef>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub member: Option<MemberRef>,
}

impl EventDetail {
    /// The action verb, with an empty string treated as absent.
    pub fn action(&self) -> Option<&str> {
        non_empty(self.action.as_deref())
    }

    pub fn git_ref(&self) -> Option<&str> {
        non_empty(self.git_ref.as_deref())
    }

    pub fn ref_type(&self) -> Option<&str> {
        non_empty(self.ref_type.as_deref())
    }

    /// Browser URL of the pull request this event concerns, if any.
    ///
    /// Comments on a PR arrive as issue comments, so the issue's nested
    /// pull request link counts too.
    pub fn pull_request_url(&self) -> Option<&str> {
        let direct = self
            .pull_request
            .as_ref()
            .and_then(|pr| non_empty(pr.html_url.as_deref()));
        direct.or_else(|| {
            self.issue
                .as_ref()
                .and_then(|i| i.pull_request.as_ref())
                .and_then(|pr| non_empty(pr.html_url.as_deref()))
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub merged: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,

    /// Present when the "issue" is really a pull request.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pull_request: Option<PullRequestRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReleaseRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberRef {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Deserialize a field, treating a type mismatch (or `null`) as absent.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}
