//! The contribution calendar: daily counts over the last N weeks.

use jiff::Span;
use jiff::civil::Date;
use tracing::{debug, warn};

use crate::model::Contribution;
use crate::upstream::{Upstream, UpstreamError};

#[derive(Debug, thiserror::Error)]
pub enum ContributionsError {
    #[error("unable to load contributions: {message}")]
    Unavailable { message: String },

    #[error("identity must not be empty")]
    EmptyIdentity,
}

/// A filtered calendar ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionCalendar {
    pub weeks: u32,
    pub days: Vec<Contribution>,
}

impl ContributionCalendar {
    pub fn total(&self) -> u64 {
        self.days.iter().map(|d| u64::from(d.count)).sum()
    }

    /// e.g. `412 contributions in the last 52 weeks`.
    pub fn summary(&self) -> String {
        format!(
            "{} contributions in the last {} weeks",
            self.total(),
            self.weeks
        )
    }
}

/// Fetch the calendar for `identity` and keep the last `weeks` weeks
/// counting back from `today`.
pub async fn fetch_contributions<U: Upstream + ?Sized>(
    upstream: &U,
    identity: &str,
    weeks: u32,
    today: Date,
) -> Result<ContributionCalendar, ContributionsError> {
    let identity = identity.trim();
    if identity.is_empty() {
        return Err(ContributionsError::EmptyIdentity);
    }

    debug!(identity, weeks, "fetching contributions");
    let all = upstream.contributions(identity).await.map_err(|e| {
        warn!(identity, error = %e, "contributions unavailable");
        let message = match e {
            UpstreamError::Status { message, .. } => message,
            other => other.to_string(),
        };
        ContributionsError::Unavailable { message }
    })?;

    Ok(ContributionCalendar {
        weeks,
        days: select_last_weeks(all, weeks, today),
    })
}

/// Keep entries dated on or after `today - 7 * weeks` days, in their
/// original order.
pub fn select_last_weeks(
    contributions: Vec<Contribution>,
    weeks: u32,
    today: Date,
) -> Vec<Contribution> {
    let cutoff = Span::new()
        .try_days(i64::from(weeks) * 7)
        .and_then(|span| today.checked_sub(span))
        .unwrap_or(Date::MIN);
    contributions
        .into_iter()
        .filter(|c| c.date >= cutoff)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use jiff::civil::date;

    use crate::model::{ActivityEvent, ContributionLevel};
    use crate::upstream::{CommitDetail, Result};

    fn day(y: i16, m: i8, d: i8, count: u32) -> Contribution {
        Contribution {
            date: date(y, m, d),
            count,
            level: ContributionLevel::new(u8::from(count > 0)),
        }
    }

    struct Proxy(core::result::Result<Vec<Contribution>, u16>);

    #[async_trait]
    impl Upstream for Proxy {
        async fn public_events(&self, _: &str, _: u32) -> Result<Vec<ActivityEvent>> {
            Ok(Vec::new())
        }

        async fn commit(&self, _: &str, _: &str, _: &str) -> Result<CommitDetail> {
            Err(UpstreamError::Timeout)
        }

        async fn contributions(&self, _: &str) -> Result<Vec<Contribution>> {
            match &self.0 {
                Ok(days) => Ok(days.clone()),
                Err(status) => Err(UpstreamError::Status {
                    status: *status,
                    message: "User not found".to_string(),
                }),
            }
        }
    }

    #[test]
    fn keeps_cutoff_day() {
        let today = date(2024, 10, 16);
        let days = vec![
            day(2024, 10, 1, 1),
            day(2024, 10, 2, 2),
            day(2024, 10, 9, 3),
            day(2024, 10, 16, 4),
        ];
        let kept = select_last_weeks(days, 2, today);
        let dates: Vec<Date> = kept.iter().map(|c| c.date).collect();
        assert_eq!(
            dates,
            [date(2024, 10, 2), date(2024, 10, 9), date(2024, 10, 16)]
        );
    }

    #[test]
    fn huge_window_keeps_everything() {
        let days = vec![day(1990, 1, 1, 1), day(2024, 10, 16, 1)];
        assert_eq!(select_last_weeks(days, u32::MAX, date(2024, 10, 16)).len(), 2);
    }

    #[test]
    fn summary_counts_kept_days() {
        let calendar = ContributionCalendar {
            weeks: 52,
            days: vec![day(2024, 10, 1, 3), day(2024, 10, 2, 0), day(2024, 10, 3, 9)],
        };
        assert_eq!(calendar.summary(), "12 contributions in the last 52 weeks");
    }

    #[tokio::test]
    async fn fetch_filters_window() {
        let proxy = Proxy(Ok(vec![day(2023, 1, 1, 5), day(2024, 10, 15, 2)]));
        let calendar = fetch_contributions(&proxy, "kcccr123", 4, date(2024, 10, 16))
            .await
            .unwrap();
        assert_eq!(calendar.days.len(), 1);
        assert_eq!(calendar.total(), 2);
    }

    #[tokio::test]
    async fn proxy_error_message_is_surfaced() {
        let err = fetch_contributions(&Proxy(Err(404)), "nobody", 52, date(2024, 10, 16))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unable to load contributions: User not found"
        );
    }
}
