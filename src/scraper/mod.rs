mod extractor;
mod fetcher;
mod scraper_error;

pub use extractor::{ListingExtractor, DEFAULT_ORIGIN};
pub use fetcher::{fetch_in_background, DocumentFetcher, HttpFetcher};
pub use scraper_error::{ExtractionError, FetchError};
