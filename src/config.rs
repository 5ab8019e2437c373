// src/config.rs

use crate::domain::NoveltyStrategy;
use crate::scraper::DEFAULT_ORIGIN;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use url::Url;

pub const CACHE_DIR_NAME: &str = ".cache";
pub const STORE_FILE_NAME: &str = "scrape-suumo-ignore-v20220208T2122.json";
pub const LEGACY_SNAPSHOT_FILE_NAME: &str = "scrape-suumo-v20220207T0145.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Require --url flag. expect \"https://...\", actual: {0}")]
    InvalidUrl(String),
    #[error("Could not determine the home directory")]
    NoHomeDir,
    #[error("Failed to create cache directory {}: {source}", path.display())]
    CacheDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What to do when the results-count text has no `<digits>件`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitCountPolicy {
    /// Treat it as an empty search and finish cleanly.
    #[default]
    ZeroOnMissing,
    /// Fail the run.
    Strict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackConfig {
    pub token: String,
    pub channel: String,
}

/// Everything one run needs. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Config {
    pub url: String,
    pub slack: Option<SlackConfig>,
    pub refresh: bool,
    pub no_notify: bool,
    pub hit_count_policy: HitCountPolicy,
    pub novelty_strategy: NoveltyStrategy,
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() || !self.url.starts_with("https://") {
            return Err(ConfigError::InvalidUrl(self.url.clone()));
        }
        Ok(())
    }

    pub fn notification_enabled(&self) -> bool {
        self.slack.is_some() && !self.no_notify
    }

    /// Scheme and host of the target URL, used to absolutize detail links.
    pub fn site_origin(&self) -> String {
        Url::parse(&self.url)
            .ok()
            .filter(|u| u.has_host())
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string())
    }
}

/// Locations of the files kept between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePaths {
    pub dir: PathBuf,
    pub store_file: PathBuf,
    pub legacy_snapshot_file: PathBuf,
}

impl CachePaths {
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            store_file: dir.join(STORE_FILE_NAME),
            legacy_snapshot_file: dir.join(LEGACY_SNAPSHOT_FILE_NAME),
            dir,
        }
    }

    /// `override_dir`, or `~/.cache`. Creates the directory if needed.
    pub fn resolve(override_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let dir = match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => dirs::home_dir()
                .ok_or(ConfigError::NoHomeDir)?
                .join(CACHE_DIR_NAME),
        };

        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|source| ConfigError::CacheDir {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(Self::in_dir(dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn with_url(url: &str) -> Config {
        Config {
            url: url.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn https_url_is_accepted() {
        let config = with_url("https://suumo.jp/jj/chintai/ichiran/FR301FC001/?ar=030");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_or_plain_http_url_is_rejected() {
        for url in ["", "http://suumo.jp/", "suumo.jp", " https://suumo.jp/"] {
            let err = with_url(url).validate().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidUrl(ref u) if u == url));
        }
    }

    #[test]
    fn invalid_url_message_names_the_value() {
        let err = with_url("ftp://x").validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Require --url flag. expect \"https://...\", actual: ftp://x"
        );
    }

    #[test]
    fn origin_comes_from_target_url() {
        assert_eq!(
            with_url("https://suumo.jp/jj/chintai/ichiran/FR301FC001/?ar=030").site_origin(),
            "https://suumo.jp"
        );
        assert_eq!(with_url("https://").site_origin(), DEFAULT_ORIGIN);
    }

    #[test]
    fn notification_needs_credentials_and_no_opt_out() {
        let mut config = with_url("https://suumo.jp/");
        assert!(!config.notification_enabled());

        config.slack = Some(SlackConfig {
            token: "xoxb-1".to_string(),
            channel: "#rent".to_string(),
        });
        assert!(config.notification_enabled());

        config.no_notify = true;
        assert!(!config.notification_enabled());
    }

    #[test]
    fn resolve_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("nested").join(".cache");

        let paths = CachePaths::resolve(Some(&dir)).unwrap();

        assert!(dir.is_dir());
        assert_eq!(paths.store_file, dir.join(STORE_FILE_NAME));
        assert_eq!(paths.legacy_snapshot_file, dir.join(LEGACY_SNAPSHOT_FILE_NAME));
    }
}
