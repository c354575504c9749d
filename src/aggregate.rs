//! Activity aggregation: fetch the public feed, enrich pushes, merge.
//!
//! The feed is fetched once. Every push event that names both a
//! splittable `owner/name` repository and a head SHA then gets one commit
//! lookup; all lookups run concurrently and the operation waits for every
//! one of them to settle. A lookup that fails or times out degrades to a
//! link-only commit summary for its own event. Only the feed fetch can
//! fail the whole operation.
//!
//! Dropping the returned future abandons every in-flight request.

use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::model::{ActivityEvent, CommitSummary, PushTarget};
use crate::upstream::{Upstream, UpstreamError};

/// Errors that abort a whole `fetch_activity` call.
#[derive(Debug, thiserror::Error)]
pub enum ActivityError {
    /// The primary feed request failed or returned non-success.
    #[error("{message}")]
    FeedUnavailable {
        status: Option<u16>,
        message: String,
    },

    #[error("identity must not be empty")]
    EmptyIdentity,
}

impl ActivityError {
    fn feed_unavailable(err: &UpstreamError) -> Self {
        let message = match err {
            UpstreamError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        };
        Self::FeedUnavailable {
            status: err.status(),
            message,
        }
    }
}

/// Fetches and enriches public activity for an identity.
pub struct ActivityAggregator<U> {
    upstream: U,
    web_base: String,
    lookup_timeout: Duration,
}

impl<U: Upstream> ActivityAggregator<U> {
    /// `web_base` is the browser host used to synthesize commit permalinks
    /// when a lookup cannot provide one. `lookup_timeout` bounds each commit
    /// lookup; a lookup that exceeds it degrades like any other failure.
    pub fn new(upstream: U, web_base: &str, lookup_timeout: Duration) -> Self {
        Self {
            upstream,
            web_base: web_base.trim_end_matches('/').to_string(),
            lookup_timeout,
        }
    }

    #[cfg(test)]
    pub fn upstream(&self) -> &U {
        &self.upstream
    }

    /// Fetch up to `count` events for `identity`, newest first, with push
    /// events enriched by commit detail.
    ///
    /// The result preserves feed order regardless of the order in which
    /// lookups complete.
    pub async fn fetch_activity(
        &self,
        identity: &str,
        count: u32,
    ) -> Result<Vec<ActivityEvent>, ActivityError> {
        let identity = identity.trim();
        if identity.is_empty() {
            return Err(ActivityError::EmptyIdentity);
        }
        let count = count.max(1);

        debug!(identity, count, "fetching public events");
        let mut events = self
            .upstream
            .public_events(identity, count)
            .await
            .map_err(|e| {
                warn!(identity, error = %e, "public events unavailable");
                ActivityError::feed_unavailable(&e)
            })?;

        let lookups: Vec<_> = events
            .iter()
            .enumerate()
            .filter_map(|(index, event)| event.push_target().map(|target| (index, target)))
            .map(|(index, target)| async move { (index, self.enrich(target).await) })
            .collect();

        debug!(
            events = events.len(),
            lookups = lookups.len(),
            "enriching push events"
        );
        let enriched = join_all(lookups).await;

        for (index, summary) in enriched {
            events[index].commits = Some(vec![summary]);
        }

        info!(identity, events = events.len(), "activity ready");
        Ok(events)
    }

    /// Look up one push's head commit. Never fails: any problem yields a
    /// link-only summary pointing at the synthesized permalink.
    async fn enrich(&self, target: PushTarget<'_>) -> CommitSummary {
        let fallback_url = self.commit_permalink(target.full_name, target.head);
        let lookup = self.upstream.commit(target.owner, target.name, target.head);

        let result = match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(UpstreamError::Timeout),
        };

        match result {
            Ok(detail) => {
                let url = detail
                    .html_url
                    .clone()
                    .filter(|u| !u.is_empty())
                    .unwrap_or(fallback_url);
                CommitSummary::from_lookup(target.head, url, detail.message())
            }
            Err(e) => {
                debug!(
                    repo = target.full_name,
                    head = target.head,
                    error = %e,
                    "commit lookup failed, using synthesized link"
                );
                CommitSummary::link_only(target.head, fallback_url)
            }
        }
    }

    fn commit_permalink(&self, repository: &str, sha: &str) -> String {
        format!("{}/{repository}/commit/{sha}", self.web_base)
    }
}
