// fetcher.rs
use crate::scraper::FetchError;
use reqwest::blocking::Client;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Yields the raw body of a search-results page.
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl DocumentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        info!(%url, "Visiting");

        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp
            .text()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        debug!(bytes = body.len(), "Document received");

        Ok(body)
    }
}

/// Runs the fetch on its own thread and blocks until the body is handed back.
///
/// The body (or the error) crosses the thread boundary exactly once.
pub fn fetch_in_background(
    fetcher: Arc<dyn DocumentFetcher>,
    url: &str,
) -> Result<String, FetchError> {
    let (tx, rx) = mpsc::sync_channel(1);
    let url = url.to_string();

    std::thread::spawn(move || {
        let result = fetcher.fetch(&url);
        // Receiver only goes away if the driver already gave up.
        let _ = tx.send(result);
    });

    rx.recv().map_err(|_| FetchError::WorkerDisconnected)?
}
