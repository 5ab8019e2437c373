use crate::config::{CachePaths, Config};
use crate::notify::{NotificationError, Notifier};
use crate::scraper::{DocumentFetcher, FetchError};
use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub const SEARCH_URL: &str = "https://suumo.jp/jj/chintai/ichiran/FR301FC001/?ar=030&ta=13";
pub const SEARCH_RESULT_HTML: &str = include_str!("fixtures/search_result.html");
pub const SAKURA_HEIGHTS_HTML: &str = include_str!("fixtures/sakura_heights.html");

/// Serves one fixed body and counts how often it was asked.
pub struct StaticFetcher {
    body: Result<String, u16>,
    calls: AtomicUsize,
}

impl StaticFetcher {
    pub fn ok(body: &str) -> Self {
        Self {
            body: Ok(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            body: Err(status),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DocumentFetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.body {
            Ok(body) => Ok(body.clone()),
            Err(status) => Err(FetchError::Status {
                status: *status,
                url: url.to_string(),
            }),
        }
    }
}

/// Keeps every payload instead of sending it.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: RefCell<Vec<String>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: &str) -> Result<(), NotificationError> {
        if self.fail {
            return Err(NotificationError::ApiError("channel_not_found".to_string()));
        }
        self.sent.borrow_mut().push(text.to_string());
        Ok(())
    }
}

pub fn test_config() -> Config {
    Config {
        url: SEARCH_URL.to_string(),
        ..Config::default()
    }
}

/// A throwaway cache directory. Keep the `TempDir` alive for the test.
pub fn temp_cache() -> (TempDir, CachePaths) {
    let dir = TempDir::new().expect("create temp dir");
    let paths = CachePaths::resolve(Some(dir.path())).expect("resolve cache paths");
    (dir, paths)
}
