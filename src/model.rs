//! Core data model for wake.
//!
//! Events as the public feed delivers them, the commit summaries that
//! enrichment attaches, and the daily contribution calendar.

mod commit;
mod contribution;
mod event;

pub use commit::CommitSummary;
pub use contribution::{Contribution, ContributionLevel};
pub(crate) use event::{lenient, non_empty};
pub use event::{
    ActivityEvent, CommentRef, EventDetail, EventKind, IssueRef, MemberRef, PullRequestRef,
    PushTarget, ReleaseRef, Repository, ReviewRef,
};
