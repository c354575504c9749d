mod aggregate;
mod cli;
mod config;
mod contributions;
mod describe;
mod identity;
mod model;
mod record;
mod relative_time;
mod upstream;

use std::process;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &config).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for records and JSON.
/// `RUST_LOG` wins over the flags.
fn init_tracing(cli: &Cli) {
    let default_filter = if cli.verbose {
        "trace"
    } else if cli.debug {
        "debug"
    } else {
        "warn"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
