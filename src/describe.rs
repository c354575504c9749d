//! Human-readable phrasing for activity events.
//!
//! Both functions are total over the open-ended kind space: every event
//! gets a non-empty description, and a missing link is a normal outcome.

use serde::{Deserialize, Serialize};

use crate::model::{ActivityEvent, EventDetail, EventKind, non_empty};

/// The single most relevant outbound link for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLink {
    pub url: String,
    pub label: String,
}

/// A short phrase describing what happened, e.g. `Pushed to main`.
pub fn describe(event: &ActivityEvent) -> String {
    let detail = &event.payload;
    match &event.kind {
        EventKind::Push => match detail.git_ref() {
            Some(git_ref) => format!("Pushed to {}", last_segment(git_ref)),
            None => "Pushed commits".to_string(),
        },
        EventKind::Create => match (detail.ref_type(), detail.git_ref()) {
            (Some("repository"), _) => "Created repository".to_string(),
            (Some(ref_type), Some(git_ref)) => format!("Created {ref_type} {git_ref}"),
            _ => "Created".to_string(),
        },
        EventKind::Delete => match (detail.ref_type(), detail.git_ref()) {
            (Some(ref_type), Some(git_ref)) => format!("Deleted {ref_type} {git_ref}"),
            _ => "Deleted".to_string(),
        },
        EventKind::PullRequest => {
            let merged = detail
                .pull_request
                .as_ref()
                .and_then(|pr| pr.merged)
                .unwrap_or(false);
            if detail.action() == Some("closed") && merged {
                "Merged pull request".to_string()
            } else {
                describe_action(detail.action(), "pull request", "Updated pull request")
            }
        }
        EventKind::Issues => describe_action(detail.action(), "issue", "Updated issue"),
        EventKind::IssueComment => {
            describe_comment(detail, "issue comment", "Commented on issue")
        }
        EventKind::PullRequestReview => {
            let state = detail.review.as_ref().and_then(|r| r.state.as_deref());
            format!("{} pull request", review_verb(state))
        }
        EventKind::PullRequestReviewComment => describe_comment(
            detail,
            "pull request review",
            "Commented on pull request review",
        ),
        EventKind::CommitComment => {
            describe_comment(detail, "commit comment", "Commented on commit")
        }
        EventKind::Release => {
            let release = describe_action(detail.action(), "release", "Published release");
            let tag = detail
                .release
                .as_ref()
                .and_then(|r| non_empty(r.tag_name.as_deref()));
            match tag {
                Some(tag) => format!("{release} {tag}"),
                None => release,
            }
        }
        EventKind::Watch => "Starred repository".to_string(),
        EventKind::Fork => "Forked repository".to_string(),
        EventKind::Public => "Open-sourced repository".to_string(),
        EventKind::Gollum => "Updated wiki".to_string(),
        EventKind::Member => {
            let login = detail
                .member
                .as_ref()
                .and_then(|m| non_empty(m.login.as_deref()));
            match login {
                Some(login) => format!("Added {login} as collaborator"),
                None => "Added collaborator".to_string(),
            }
        }
        EventKind::Other(raw) => describe_unknown_kind(raw),
    }
}

/// The most relevant link for an event, if it has one.
///
/// Pull request links win over issue links, which win over review and
/// comment links. Only pull request, review, and comment kinds link out.
pub fn link_for(event: &ActivityEvent) -> Option<EventLink> {
    let detail = &event.payload;
    let pr_url = detail.pull_request_url();
    let review_url = detail
        .review
        .as_ref()
        .and_then(|r| non_empty(r.html_url.as_deref()));
    let comment_url = detail
        .comment
        .as_ref()
        .and_then(|c| non_empty(c.html_url.as_deref()));

    match event.kind {
        EventKind::PullRequest
        | EventKind::PullRequestReview
        | EventKind::PullRequestReviewComment => {
            if let Some(url) = pr_url {
                let number = detail.pull_request.as_ref().and_then(|pr| pr.number);
                let label = match number {
                    Some(n) => format!("PR #{n}"),
                    None => "View PR".to_string(),
                };
                return Some(link(url, &label));
            }
            review_url
                .map(|url| link(url, "View review"))
                .or_else(|| comment_url.map(|url| link(url, "View comment")))
        }
        EventKind::IssueComment => {
            let issue_url = detail
                .issue
                .as_ref()
                .and_then(|i| non_empty(i.html_url.as_deref()));
            pr_url
                .map(|url| link(url, "View PR"))
                .or_else(|| issue_url.map(|url| link(url, "View issue")))
                .or_else(|| comment_url.map(|url| link(url, "View comment")))
        }
        _ => None,
    }
}

fn link(url: &str, label: &str) -> EventLink {
    EventLink {
        url: url.to_string(),
        label: label.to_string(),
    }
}

/// Comment kinds read "Commented on ..." unless the action is something
/// other than creation.
fn describe_comment(detail: &EventDetail, noun: &str, created: &str) -> String {
    match detail.action() {
        None | Some("created") => created.to_string(),
        action => describe_action(action, noun, created),
    }
}

/// Phrase an action verb applied to `noun`, e.g. `Opened issue`.
fn describe_action(action: Option<&str>, noun: &str, fallback: &str) -> String {
    let Some(action) = action else {
        return fallback.to_string();
    };

    let phrase = match action {
        "opened" => "Opened",
        "closed" => "Closed",
        "reopened" => "Reopened",
        "created" => "Created",
        "edited" => "Edited",
        "deleted" => "Deleted",
        "published" => "Published",
        "released" => "Released",
        "prereleased" => "Pre-released",
        "publicized" => "Publicized",
        "assigned" => "Assigned",
        "unassigned" => "Unassigned",
        "labeled" => "Labeled",
        "unlabeled" => "Unlabeled",
        "synchronize" | "synchronized" => "Updated",
        "review_requested" => "Requested review for",
        "review_request_removed" => "Removed review request for",
        "ready_for_review" => return format!("Marked {noun} ready for review"),
        "locked" => "Locked",
        "unlocked" => "Unlocked",
        "pinned" => "Pinned",
        "unpinned" => "Unpinned",
        "transferred" => "Transferred",
        "restored" => "Restored",
        "added" => "Added",
        "removed" => "Removed",
        "started" => "Starred",
        "submitted" => "Reviewed",
        "dismissed" => "Dismissed review on",
        other => return format!("{} {noun}", humanize(other)),
    };
    format!("{phrase} {noun}")
}

fn review_verb(state: Option<&str>) -> &'static str {
    match state {
        Some("approved") => "Approved",
        Some("changes_requested") => "Requested changes on",
        Some("commented") => "Commented on",
        Some("dismissed") => "Dismissed review on",
        _ => "Reviewed",
    }
}

/// `SponsorshipEvent` → `Sponsorship`, `DiscussionCommentEvent` → `Discussion Comment`.
fn describe_unknown_kind(raw: &str) -> String {
    let stripped = raw.replacen("Event", "", 1);
    let text = split_camel_case(stripped.trim());
    if text.trim().is_empty() {
        "Activity".to_string()
    } else {
        text
    }
}

/// `review_dismissed` → `Review Dismissed`, `autoMerged` → `Auto Merged`.
fn humanize(action: &str) -> String {
    let spaced = split_camel_case(&action.replace('_', " "));
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if at_word_start && c.is_alphanumeric() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}

/// Insert a space wherever a lowercase letter is followed by an uppercase one.
fn split_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push(' ');
        }
        out.push(c);
        prev_lower = c.is_ascii_lowercase();
    }
    out
}

fn last_segment(git_ref: &str) -> &str {
    git_ref.rsplit('/').next().unwrap_or(git_ref)
}
