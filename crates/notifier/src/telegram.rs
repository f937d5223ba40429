//! Telegram Bot API sender (`sendMessage`).

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use review_common::config::AppConfig;

use crate::{MessageSender, NotifyError};

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to one chat through the Telegram Bot API.
#[derive(Debug, Clone)]
pub struct TelegramSender {
    client: reqwest::Client,
    send_url: String,
    chat_id: String,
}

impl TelegramSender {
    pub fn new(
        api_url: &str,
        bot_token: &str,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            send_url: format!("{}/bot{}/sendMessage", api_url.trim_end_matches('/'), bot_token),
            chat_id: chat_id.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.telegram_api_url,
            &config.telegram_token,
            config.chat_id.clone(),
            config.request_timeout,
        )
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.send_url)
            .json(&json!({ "chat_id": self.chat_id, "text": text }))
            .send()
            .await
            // Strip the URL: it embeds the bot token
            .map_err(|e| NotifyError::Transport(e.without_url()))?;

        let status = response.status();
        let body: Option<BotApiResponse> = response.json().await.ok();

        match body {
            Some(BotApiResponse { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiResponse { description, .. }) => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: description.unwrap_or_else(|| "no description".to_string()),
            }),
            None => Err(NotifyError::Rejected {
                status: status.as_u16(),
                description: "unreadable response body".to_string(),
            }),
        }
    }
}
