// src/domain/novelty.rs

use crate::domain::listing::{IgnoredListingKey, Listing, SearchResult};
use std::collections::HashSet;

/// How a run decides which listings are new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoveltyStrategy {
    /// A listing is new iff its (name, address) key has never been reported.
    #[default]
    SetMembership,
    /// Legacy: diff against the previous full snapshot, by name only.
    SnapshotDiff,
}

/// Anything that can answer "was this listing already reported?".
pub trait KnownListings {
    fn contains(&self, key: &IgnoredListingKey) -> bool;
}

impl KnownListings for HashSet<IgnoredListingKey> {
    fn contains(&self, key: &IgnoredListingKey) -> bool {
        HashSet::contains(self, key)
    }
}

/// Listings of `current` whose key is not known yet, in document order.
pub fn novel_by_membership<'a, K>(current: &'a SearchResult, known: &K) -> Vec<&'a Listing>
where
    K: KnownListings + ?Sized,
{
    current
        .listings
        .iter()
        .filter(|listing| !known.contains(&listing.key()))
        .collect()
}

/// Legacy comparison against the previous full snapshot.
///
/// When hit count, condition text and page count are all unchanged the result
/// is empty without looking at individual listings. Otherwise a listing is new
/// when no previous listing has the same name. Without a previous snapshot
/// every listing is new.
pub fn novel_by_snapshot_diff<'a>(
    current: &'a SearchResult,
    previous: Option<&SearchResult>,
) -> Vec<&'a Listing> {
    let Some(previous) = previous else {
        return current.listings.iter().collect();
    };

    let unchanged = current.hit_count == previous.hit_count
        && current.condition_summary == previous.condition_summary
        && current.total_pages == previous.total_pages;
    if unchanged {
        return Vec::new();
    }

    let previous_names: HashSet<&str> = previous
        .listings
        .iter()
        .map(|l| l.name.as_str())
        .collect();

    current
        .listings
        .iter()
        .filter(|l| !previous_names.contains(l.name.as_str()))
        .collect()
}
