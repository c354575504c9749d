//! CLI interface for wake.
//!
//! Each subcommand is non-interactive: arguments in, text or JSON out.
//!
//! - `wake activity` — recent public activity, with push commits resolved.
//! - `wake contributions` — the daily contribution calendar.
//!
//! Whose activity is shown comes from `--user`, `WAKE_USER`, or the config.

mod format;

use std::time::Duration;

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use jiff::tz::TimeZone;

use crate::aggregate::ActivityAggregator;
use crate::config::{Config, MAX_EVENT_COUNT};
use crate::contributions::fetch_contributions;
use crate::identity::resolve_identity;
use crate::record::{ActivityRecord, ActivityView};
use crate::upstream::GitHubClient;

use format::{format_calendar, format_view};

/// Wake — the trail of public GitHub activity someone leaves behind.
#[derive(Debug, Parser)]
#[command(name = "wake", version)]
pub struct Cli {
    /// Whose activity to show. Overrides `WAKE_USER` and the config default.
    #[arg(long, global = true)]
    user: Option<String>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// Enable verbose logging (equivalent to RUST_LOG=trace).
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show recent public activity.
    ///
    /// Push events are resolved to their head commit. A commit that cannot
    /// be looked up still gets a link, just without its message.
    Activity {
        /// How many events to request (1–100). Defaults to `event-count`.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_EVENT_COUNT)))]
        count: Option<u32>,

        /// Print records as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Show the contribution calendar.
    Contributions {
        /// How many weeks back to show. Defaults to `weeks`.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        weeks: Option<u32>,

        /// Print the calendar as JSON instead of a grid.
        #[arg(long)]
        json: bool,
    },
}

/// Run a parsed command line, returning an error message on failure.
pub async fn run(cli: Cli, config: &Config) -> Result<(), String> {
    let identity = resolve_identity(cli.user.as_deref(), config)?;

    match cli.command {
        Command::Activity { count, json } => {
            cmd_activity(config, &identity, count.unwrap_or(config.event_count), json).await
        }
        Command::Contributions { weeks, json } => {
            cmd_contributions(config, &identity, weeks.unwrap_or(config.weeks), json).await
        }
    }
}

async fn cmd_activity(
    config: &Config,
    identity: &str,
    count: u32,
    json: bool,
) -> Result<(), String> {
    let client = GitHubClient::new(config).map_err(|e| format!("failed to build client: {e}"))?;
    let aggregator = ActivityAggregator::new(
        client,
        &config.web_base,
        Duration::from_secs(config.request_timeout_secs),
    );

    eprintln!("{}", format_view(&ActivityView::Loading));

    // Ctrl-C drops the fetch, abandoning whatever requests are in flight.
    let result = tokio::select! {
        result = aggregator.fetch_activity(identity, count) => result,
        _ = tokio::signal::ctrl_c() => return Err("cancelled".to_string()),
    };

    let view = ActivityView::settle(result, &config.web_base, Timestamp::now());

    match view {
        ActivityView::Unavailable(message) => Err(message),
        ActivityView::Ready(records) if json => print_json(&records),
        ActivityView::Empty if json => print_json(&Vec::<ActivityRecord>::new()),
        view => {
            println!("{}", format_view(&view));
            Ok(())
        }
    }
}

async fn cmd_contributions(
    config: &Config,
    identity: &str,
    weeks: u32,
    json: bool,
) -> Result<(), String> {
    let client = GitHubClient::new(config).map_err(|e| format!("failed to build client: {e}"))?;
    let today = Timestamp::now().to_zoned(TimeZone::UTC).date();

    let calendar = tokio::select! {
        result = fetch_contributions(&client, identity, weeks, today) => {
            result.map_err(|e| e.to_string())?
        }
        _ = tokio::signal::ctrl_c() => return Err("cancelled".to_string()),
    };

    if json {
        return print_json(&calendar.days);
    }

    println!("{}", calendar.summary());
    println!("{}", format_calendar(&calendar));
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}
