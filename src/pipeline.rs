// src/pipeline.rs

use crate::config::{CachePaths, Config, HitCountPolicy};
use crate::domain::{
    novel_by_membership, novel_by_snapshot_diff, Listing, NoveltyStrategy, SearchResult,
};
use crate::errors::AppError;
use crate::messages::format_batch;
use crate::notify::Notifier;
use crate::scraper::{fetch_in_background, DocumentFetcher, ExtractionError, ListingExtractor};
use crate::store::{load_snapshot, open_identity_store, save_snapshot, IdentityStore};
use std::sync::Arc;
use tracing::info;

pub const NOTHING_NEW_MESSAGE: &str = "新着物件なし";

/// How a successful run ended. Every variant is a clean exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The page reported no result count at all.
    NoResults,
    /// Listings were found but all had been reported before.
    NothingNew { listings: usize },
    /// `novel` listings were reported.
    Notified { novel: usize },
}

/// One full pass: fetch, extract, decide novelty, persist, notify.
pub fn run(
    config: &Config,
    paths: &CachePaths,
    fetcher: Arc<dyn DocumentFetcher>,
    notifier: &dyn Notifier,
) -> Result<RunOutcome, AppError> {
    config.validate()?;
    let extractor = ListingExtractor::new(config.site_origin())?;

    match config.novelty_strategy {
        NoveltyStrategy::SetMembership => {
            let mut store: IdentityStore = open_identity_store(
                &paths.store_file,
                &paths.legacy_snapshot_file,
                config.refresh,
            )?;

            let Some(result) = fetch_and_extract(config, &extractor, fetcher)? else {
                return Ok(RunOutcome::NoResults);
            };

            let novel = novel_by_membership(&result, &store);
            if novel.is_empty() {
                return Ok(nothing_new(&result));
            }

            store.append(novel.iter().map(|l| l.key()));
            store.persist()?;
            info!(novel = novel.len(), known = store.len(), "Identity store updated");

            deliver(&novel, notifier)
        }
        NoveltyStrategy::SnapshotDiff => {
            let previous = if config.refresh {
                None
            } else {
                load_snapshot(&paths.legacy_snapshot_file)?
            };

            let Some(result) = fetch_and_extract(config, &extractor, fetcher)? else {
                return Ok(RunOutcome::NoResults);
            };

            let novel = novel_by_snapshot_diff(&result, previous.as_ref());
            // Always replaced, even when nothing is new.
            save_snapshot(&paths.legacy_snapshot_file, &result)?;

            if novel.is_empty() {
                return Ok(nothing_new(&result));
            }

            deliver(&novel, notifier)
        }
    }
}

/// `None` when the count is missing and the policy says that means "no results".
fn fetch_and_extract(
    config: &Config,
    extractor: &ListingExtractor,
    fetcher: Arc<dyn DocumentFetcher>,
) -> Result<Option<SearchResult>, AppError> {
    let body = fetch_in_background(fetcher, &config.url)?;

    match extractor.extract(&body) {
        Ok(result) => {
            println!("Apartments: {}", result.listings.len());
            println!("Total Rooms: {}", result.unit_count());
            Ok(Some(result))
        }
        Err(err @ ExtractionError::HitCountNotFound(_))
            if config.hit_count_policy == HitCountPolicy::ZeroOnMissing =>
        {
            println!("{err}");
            info!("No result count on the page, treating as zero results");
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn nothing_new(result: &SearchResult) -> RunOutcome {
    println!("{NOTHING_NEW_MESSAGE}");
    RunOutcome::NothingNew {
        listings: result.listings.len(),
    }
}

fn deliver(novel: &[&Listing], notifier: &dyn Notifier) -> Result<RunOutcome, AppError> {
    println!("------------------------------------------------------------");

    let payload = format_batch(novel.iter().copied());
    notifier.notify(&payload)?;
    println!("{payload}");

    Ok(RunOutcome::Notified { novel: novel.len() })
}
