//! Commit summaries attached to push events by enrichment.

use serde::{Deserialize, Serialize};

/// Number of SHA characters shown when a commit has no usable message.
pub const SHORT_SHA_LEN: usize = 7;

/// One commit of a push, as much as we could learn about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitSummary {
    pub sha: String,
    pub short_sha: String,

    /// Browser permalink: upstream's own when the lookup succeeded,
    /// otherwise synthesized from the web host.
    pub url: String,

    /// First line of the commit message. `None` when the lookup failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommitSummary {
    /// Summary built from a successful commit lookup.
    pub fn from_lookup(sha: &str, url: String, message: Option<&str>) -> Self {
        Self {
            sha: sha.to_string(),
            short_sha: short_sha(sha),
            url,
            message: message.and_then(first_line),
        }
    }

    /// Link-only summary used when the lookup failed.
    pub fn link_only(sha: &str, url: String) -> Self {
        Self {
            sha: sha.to_string(),
            short_sha: short_sha(sha),
            url,
            message: None,
        }
    }

    /// Display label: the message's first line, or `Commit <short sha>`.
    pub fn label(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format!("Commit {}", self.short_sha),
        }
    }
}

fn short_sha(sha: &str) -> String {
    sha.chars().take(SHORT_SHA_LEN).collect()
}

fn first_line(message: &str) -> Option<String> {
    let line = message.lines().next()?.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
