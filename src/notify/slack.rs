// src/notify/slack.rs

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("API error: {0}")]
    ApiError(String),
}

/// Delivers a text payload somewhere a human will see it.
pub trait Notifier {
    fn notify(&self, text: &str) -> Result<(), NotificationError>;
}

/// Used when notification is disabled; never fails.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, text: &str) -> Result<(), NotificationError> {
        debug!(bytes = text.len(), "Notification disabled, skipping");
        Ok(())
    }
}

pub struct SlackNotifier {
    token: String,
    channel: String,
    client: Client,
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct PostMessageResponse {
    ok: bool,
    error: Option<String>,
    channel: Option<String>,
    ts: Option<String>,
}

impl SlackNotifier {
    pub fn new(token: String, channel: String) -> Self {
        Self {
            token,
            channel,
            client: Client::new(),
        }
    }
}

impl Notifier for SlackNotifier {
    fn notify(&self, text: &str) -> Result<(), NotificationError> {
        let payload = PostMessage {
            channel: &self.channel,
            text,
        };

        let resp = self
            .client
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .map_err(|e| NotificationError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_else(|_| "(no body)".to_string());
            return Err(NotificationError::ApiError(format!("HTTP {status}: {body}")));
        }

        // Slack reports most failures as 200 with ok=false.
        let body: PostMessageResponse = resp
            .json()
            .map_err(|e| NotificationError::ApiError(e.to_string()))?;
        if !body.ok {
            return Err(NotificationError::ApiError(
                body.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        info!(
            channel = body.channel.as_deref().unwrap_or(&self.channel),
            timestamp = body.ts.as_deref().unwrap_or("?"),
            "Posted to Slack"
        );
        Ok(())
    }
}
