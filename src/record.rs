//! View-ready activity records.
//!
//! An `ActivityRecord` is everything a renderer needs for one event, with
//! the pure display helpers already applied. `ActivityView` is the state a
//! consumer shows while and after loading.

use jiff::Timestamp;
use serde::Serialize;

use crate::aggregate::ActivityError;
use crate::describe::{EventLink, describe, link_for};
use crate::model::{ActivityEvent, CommitSummary};
use crate::relative_time::relative_time_label;

/// One displayable activity entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub description: String,
    pub repository: RepositoryLink,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<EventLink>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<CommitLink>,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryLink {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitLink {
    pub label: String,
    pub url: String,
}

impl From<&CommitSummary> for CommitLink {
    fn from(commit: &CommitSummary) -> Self {
        Self {
            label: commit.label(),
            url: commit.url.clone(),
        }
    }
}

impl ActivityRecord {
    /// Build the record for `event` as seen at `now`.
    ///
    /// `web_base` is the browser host the repository link points at.
    pub fn from_event(event: &ActivityEvent, web_base: &str, now: Timestamp) -> Self {
        let name = event.repo.name.clone();
        let url = format!("{}/{name}", web_base.trim_end_matches('/'));
        Self {
            id: event.id.clone(),
            description: describe(event),
            repository: RepositoryLink { name, url },
            link: link_for(event),
            commits: event
                .commits
                .iter()
                .flatten()
                .map(CommitLink::from)
                .collect(),
            time: relative_time_label(event.created_at, now),
        }
    }
}

/// What a consumer should show for the activity feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityView {
    /// Requests are still outstanding.
    Loading,

    /// The feed could not be fetched. Carries the text to display.
    Unavailable(String),

    /// The feed was fetched and had nothing in it.
    Empty,

    Ready(Vec<ActivityRecord>),
}

impl ActivityView {
    /// Settle a finished fetch into a view.
    pub fn settle(
        result: Result<Vec<ActivityEvent>, ActivityError>,
        web_base: &str,
        now: Timestamp,
    ) -> Self {
        match result {
            Err(e) => Self::Unavailable(e.to_string()),
            Ok(events) if events.is_empty() => Self::Empty,
            Ok(events) => Self::Ready(
                events
                    .iter()
                    .map(|e| ActivityRecord::from_event(e, web_base, now))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::SignedDuration;

    use crate::aggregate::tests::event;
    use crate::model::EventKind;

    fn now() -> Timestamp {
        "2024-10-16T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn record_for_enriched_push() {
        let mut e = event("42", EventKind::Push, "kcccr123/website");
        e.payload.git_ref = Some("refs/heads/main".to_string());
        e.created_at = Some(now() - SignedDuration::from_mins(5));
        e.commits = Some(vec![CommitSummary::link_only(
            "abc1234",
            "https://github.com/kcccr123/website/commit/abc1234".to_string(),
        )]);

        let record = ActivityRecord::from_event(&e, "https://github.com/", now());
        assert_eq!(record.id, "42");
        assert_eq!(record.description, "Pushed to main");
        assert_eq!(record.repository.name, "kcccr123/website");
        assert_eq!(record.repository.url, "https://github.com/kcccr123/website");
        assert!(record.link.is_none());
        assert_eq!(
            record.commits,
            [CommitLink {
                label: "Commit abc1234".to_string(),
                url: "https://github.com/kcccr123/website/commit/abc1234".to_string(),
            }]
        );
        assert_eq!(record.time, "5m ago");
    }

    #[test]
    fn unenriched_record_has_no_commits() {
        let e = event("1", EventKind::Watch, "a/b");
        let record = ActivityRecord::from_event(&e, "https://github.com", now());
        assert!(record.commits.is_empty());
        assert_eq!(record.description, "Starred repository");
        assert_eq!(record.time, "unknown time");
    }

    #[test]
    fn settle_distinguishes_empty_from_unavailable() {
        let empty = ActivityView::settle(Ok(Vec::new()), "https://github.com", now());
        assert_eq!(empty, ActivityView::Empty);

        let failed = ActivityView::settle(
            Err(ActivityError::FeedUnavailable {
                status: Some(403),
                message: "API rate limit exceeded".to_string(),
            }),
            "https://github.com",
            now(),
        );
        assert_eq!(
            failed,
            ActivityView::Unavailable("API rate limit exceeded".to_string())
        );
    }

    #[test]
    fn settle_keeps_order() {
        let events = vec![
            event("b", EventKind::Fork, "a/b"),
            event("a", EventKind::Watch, "a/b"),
        ];
        let ActivityView::Ready(records) =
            ActivityView::settle(Ok(events), "https://github.com", now())
        else {
            panic!("expected records");
        };
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[test]
    fn serializes_for_json_output() {
        let e = event("1", EventKind::Watch, "a/b");
        let record = ActivityRecord::from_event(&e, "https://github.com", now());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["description"], "Starred repository");
        assert_eq!(json["repository"]["url"], "https://github.com/a/b");
        assert!(json.get("commits").is_none());
        assert!(json.get("link").is_none());
    }
}
