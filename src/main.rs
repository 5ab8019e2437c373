use crate::cli::Cli;
use crate::config::{CachePaths, Config};
use crate::errors::AppError;
use crate::notify::{NoopNotifier, Notifier, SlackNotifier};
use crate::pipeline::{run, RunOutcome};
use crate::scraper::HttpFetcher;
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod domain;
mod errors;
mod messages;
mod notify;
mod pipeline;
mod scraper;
mod store;

#[cfg(test)]
mod tests;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config();
    let notifier = build_notifier(&config);

    match run_once(&config, notifier.as_ref()) {
        Ok(outcome) => {
            info!(?outcome, "Run finished");
        }
        Err(err) => {
            error!("{err}");
            eprintln!("❌ {err}");
            // Best effort only: the run error decides the exit status.
            if let Err(notify_err) = notifier.notify(&err.to_string()) {
                warn!("Failed to report error to Slack: {notify_err}");
            }
            std::process::exit(1);
        }
    }
}

fn run_once(config: &Config, notifier: &dyn Notifier) -> Result<RunOutcome, AppError> {
    config.validate()?;
    let paths = CachePaths::resolve(config.cache_dir.as_deref())?;
    let fetcher = Arc::new(HttpFetcher::new()?);

    run(config, &paths, fetcher, notifier)
}

fn build_notifier(config: &Config) -> Box<dyn Notifier> {
    match &config.slack {
        Some(slack) if config.notification_enabled() => {
            Box::new(SlackNotifier::new(slack.token.clone(), slack.channel.clone()))
        }
        _ => Box::new(NoopNotifier),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
