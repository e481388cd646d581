//! Telegram Bot API delivery.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Destination for rendered notifications.
///
/// Delivery reports success as a boolean: failures are logged by the
/// implementation and must never abort the caller's processing loop.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, text: &str) -> bool;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramNotifier {
    client: Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: &str, chat_id: &str) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        })
    }

    /// Points the notifier at a different API host. Test hook.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.bot_token)
    }
}

#[async_trait]
impl NotificationSink for TelegramNotifier {
    async fn deliver(&self, text: &str) -> bool {
        let body = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
            parse_mode: "HTML",
        };
        let response = match self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                // The request URL embeds the bot token; strip it from the log.
                error!("Telegram request failed: {}", e.without_url());
                return false;
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("Telegram message delivered ({} chars)", text.chars().count());
            true
        } else {
            let detail = response.text().await.unwrap_or_default();
            error!("Telegram API returned {status}: {detail}");
            false
        }
    }
}
