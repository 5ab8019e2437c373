pub mod listing;
pub mod novelty;

pub use listing::{IgnoredListingKey, Listing, SearchResult, Unit};
pub use novelty::{novel_by_membership, novel_by_snapshot_diff, KnownListings, NoveltyStrategy};
