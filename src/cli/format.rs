//! Output formatting for CLI display.

use jiff::civil::Weekday;

use crate::contributions::ContributionCalendar;
use crate::record::{ActivityRecord, ActivityView};

/// Commit links shown per record before collapsing into `+N more`.
const MAX_COMMITS_SHOWN: usize = 2;

/// One glyph per contribution level, 0 through 4.
const LEVEL_GLYPHS: [char; 5] = ['·', '░', '▒', '▓', '█'];

/// Format the activity view for human-readable display.
pub(super) fn format_view(view: &ActivityView) -> String {
    match view {
        ActivityView::Loading => "Loading activity...".to_string(),
        ActivityView::Unavailable(message) => message.clone(),
        ActivityView::Empty => "No recent activity".to_string(),
        ActivityView::Ready(records) => records
            .iter()
            .map(format_record)
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

fn format_record(record: &ActivityRecord) -> String {
    let mut lines = vec![
        format!("{}  ({})", record.description, record.time),
        format!("  {}  {}", record.repository.name, record.repository.url),
    ];

    if let Some(link) = &record.link {
        lines.push(format!("  {}: {}", link.label, link.url));
    }

    for commit in record.commits.iter().take(MAX_COMMITS_SHOWN) {
        lines.push(format!("  - {}  {}", commit.label, commit.url));
    }
    if record.commits.len() > MAX_COMMITS_SHOWN {
        lines.push(format!(
            "  +{} more",
            record.commits.len() - MAX_COMMITS_SHOWN
        ));
    }

    lines.join("\n")
}

/// Draw the calendar as a weekday × week grid, oldest week on the left.
pub(super) fn format_calendar(calendar: &ContributionCalendar) -> String {
    let Some(first) = calendar.days.first() else {
        return "No contributions recorded".to_string();
    };

    // Columns start on Sunday, so pad the first week up to the first day.
    let lead = usize::from(first.date.weekday().to_sunday_zero_offset().unsigned_abs());
    let mut rows: [String; 7] = Default::default();
    for cells in rows.iter_mut().take(lead) {
        cells.push(' ');
    }

    for day in &calendar.days {
        let row = usize::from(day.date.weekday().to_sunday_zero_offset().unsigned_abs());
        rows[row].push(LEVEL_GLYPHS[usize::from(day.level.get())]);
    }

    let labels = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
    labels
        .iter()
        .zip(rows.iter())
        .map(|(weekday, cells)| format!("{} {cells}", weekday_label(*weekday)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "Sun",
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    use crate::describe::EventLink;
    use crate::model::{Contribution, ContributionLevel};
    use crate::record::{CommitLink, RepositoryLink};

    fn record(commits: usize) -> ActivityRecord {
        ActivityRecord {
            id: "1".to_string(),
            description: "Pushed to main".to_string(),
            repository: RepositoryLink {
                name: "kcccr123/website".to_string(),
                url: "https://github.com/kcccr123/website".to_string(),
            },
            link: None,
            commits: (0..commits)
                .map(|i| CommitLink {
                    label: format!("Commit {i}"),
                    url: format!("https://github.com/kcccr123/website/commit/{i}"),
                })
                .collect(),
            time: "5m ago".to_string(),
        }
    }

    #[test]
    fn format_push_record() {
        let text = format_view(&ActivityView::Ready(vec![record(1)]));
        assert_eq!(
            text,
            "Pushed to main  (5m ago)\n  kcccr123/website  https://github.com/kcccr123/website\n  - Commit 0  https://github.com/kcccr123/website/commit/0"
        );
    }

    #[test]
    fn format_collapses_extra_commits() {
        let text = format_record(&record(4));
        assert!(text.contains("Commit 1"));
        assert!(!text.contains("Commit 2"));
        assert!(text.ends_with("  +2 more"));
    }

    #[test]
    fn format_secondary_link() {
        let mut r = record(0);
        r.description = "Opened pull request".to_string();
        r.link = Some(EventLink {
            url: "https://github.com/a/b/pull/3".to_string(),
            label: "PR #3".to_string(),
        });
        assert!(format_record(&r).ends_with("  PR #3: https://github.com/a/b/pull/3"));
    }

    #[test]
    fn format_states() {
        assert_eq!(format_view(&ActivityView::Loading), "Loading activity...");
        assert_eq!(format_view(&ActivityView::Empty), "No recent activity");
        assert_eq!(
            format_view(&ActivityView::Unavailable("rate limited".to_string())),
            "rate limited"
        );
    }

    #[test]
    fn calendar_grid_starts_on_sunday() {
        // 2024-10-15 is a Tuesday.
        let days = [(15, 0), (16, 1), (17, 4)]
            .into_iter()
            .map(|(d, level)| Contribution {
                date: date(2024, 10, d),
                count: u32::from(level),
                level: ContributionLevel::new(level),
            })
            .collect();
        let calendar = ContributionCalendar { weeks: 1, days };
        let grid = format_calendar(&calendar);
        let rows: Vec<&str> = grid.lines().collect();
        assert_eq!(rows.len(), 7);
        assert_eq!(rows[0], "Sun  ");
        assert_eq!(rows[1], "Mon  ");
        assert_eq!(rows[2], "Tue ·");
        assert_eq!(rows[3], "Wed ░");
        assert_eq!(rows[4], "Thu █");
        assert_eq!(rows[5], "Fri ");
    }

    #[test]
    fn empty_calendar() {
        let calendar = ContributionCalendar {
            weeks: 52,
            days: Vec::new(),
        };
        assert_eq!(format_calendar(&calendar), "No contributions recorded");
    }
}
