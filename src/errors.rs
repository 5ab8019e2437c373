// errors.rs
use crate::config::ConfigError;
use crate::notify::NotificationError;
use crate::scraper::{ExtractionError, FetchError};
use crate::store::PersistenceError;
use thiserror::Error;

/// Every way a run can fail. All of them end the process; `main` is the only
/// place that decides how.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),
}
