//! Command-line flags.

use crate::config::{Config, HitCountPolicy, SlackConfig};
use crate::domain::NoveltyStrategy;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Watch a SUUMO search-results page and post newly listed apartments to Slack.
#[derive(Debug, Parser)]
#[command(name = "suumo-watch", version)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// <required> suumo url of the search result
    #[arg(long, default_value = "")]
    pub url: String,

    /// Slack access token
    #[arg(long, env = "SLACK_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Slack channel name
    #[arg(long, env = "SLACK_CHANNEL")]
    pub channel: Option<String>,

    /// Forget every listing reported so far
    #[arg(long)]
    pub refresh: bool,

    /// Do not post to Slack
    #[arg(long)]
    pub no_slack: bool,

    /// Fail when the result count cannot be found instead of exiting quietly
    #[arg(long)]
    pub strict_hit_count: bool,

    /// Diff against the previous full result (by name) instead of the ignore list
    #[arg(long)]
    pub legacy_diff: bool,

    /// Where state files live (default: ~/.cache)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Debug logging
    #[arg(long)]
    pub verbose: bool,

    /// Display version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

impl Cli {
    pub fn into_config(self) -> Config {
        let slack = match (self.token, self.channel) {
            (Some(token), Some(channel)) if !token.is_empty() && !channel.is_empty() => {
                Some(SlackConfig { token, channel })
            }
            _ => None,
        };

        Config {
            url: self.url,
            slack,
            refresh: self.refresh,
            no_notify: self.no_slack,
            hit_count_policy: if self.strict_hit_count {
                HitCountPolicy::Strict
            } else {
                HitCountPolicy::ZeroOnMissing
            },
            novelty_strategy: if self.legacy_diff {
                NoveltyStrategy::SnapshotDiff
            } else {
                NoveltyStrategy::SetMembership
            },
            cache_dir: self.cache_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Cli::try_parse_from(std::iter::once("suumo-watch").chain(args.iter().copied()))
            .unwrap()
            .into_config()
    }

    #[test]
    fn defaults() {
        let config = parse(&["--url", "https://suumo.jp/x"]);

        assert_eq!(config.url, "https://suumo.jp/x");
        assert!(!config.refresh);
        assert_eq!(config.hit_count_policy, HitCountPolicy::ZeroOnMissing);
        assert_eq!(config.novelty_strategy, NoveltyStrategy::SetMembership);
    }

    #[test]
    fn flags_map_onto_config() {
        let config = parse(&[
            "--url",
            "https://suumo.jp/x",
            "--token",
            "xoxb-1",
            "--channel",
            "rent",
            "--refresh",
            "--no-slack",
            "--strict-hit-count",
            "--legacy-diff",
            "--cache-dir",
            "/tmp/suumo",
        ]);

        assert_eq!(
            config.slack,
            Some(SlackConfig {
                token: "xoxb-1".to_string(),
                channel: "rent".to_string(),
            })
        );
        assert!(config.refresh);
        assert!(config.no_notify);
        assert!(!config.notification_enabled());
        assert_eq!(config.hit_count_policy, HitCountPolicy::Strict);
        assert_eq!(config.novelty_strategy, NoveltyStrategy::SnapshotDiff);
        assert_eq!(config.cache_dir, Some(PathBuf::from("/tmp/suumo")));
    }

    #[test]
    fn url_is_left_for_validation() {
        let config = parse(&[]);
        assert_eq!(config.url, "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_token_disables_slack() {
        let config = parse(&["--url", "https://suumo.jp/x", "--token", "", "--channel", "rent"]);
        assert!(config.slack.is_none());
    }
}
