//! "Time ago" labels for activity.

use jiff::Timestamp;
use jiff::tz::TimeZone;

const MINUTE_MS: i64 = 60_000;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label for how long ago `occurred_at` was, as seen from `now`.
///
/// Under an hour reads `Nm ago`, under a day `Nh ago`, under a week
/// `Nd ago`. Anything older is an absolute `Mon D` date in UTC.
/// Timestamps in the future count as zero minutes ago.
pub fn relative_time(occurred_at: Timestamp, now: Timestamp) -> String {
    let elapsed = (now.as_millisecond() - occurred_at.as_millisecond()).max(0);

    if elapsed < HOUR_MS {
        format!("{}m ago", elapsed / MINUTE_MS)
    } else if elapsed < DAY_MS {
        format!("{}h ago", elapsed / HOUR_MS)
    } else if elapsed < 7 * DAY_MS {
        format!("{}d ago", elapsed / DAY_MS)
    } else {
        short_date(occurred_at)
    }
}

/// Like [`relative_time`], for events whose timestamp may be missing.
pub fn relative_time_label(occurred_at: Option<Timestamp>, now: Timestamp) -> String {
    match occurred_at {
        Some(ts) => relative_time(ts, now),
        None => "unknown time".to_string(),
    }
}

fn short_date(ts: Timestamp) -> String {
    let date = ts.to_zoned(TimeZone::UTC).date();
    let month = MONTHS[usize::try_from(date.month() - 1).unwrap_or(0)];
    format!("{month} {}", date.day())
}
