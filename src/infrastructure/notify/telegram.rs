use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;
use zeroize::Zeroizing;

use crate::{errors::NotifyError, repositories::notifier::Notifier, settings::AppConfig};

/// Bot token and destination chat. The token is wiped from memory on drop.
#[derive(Clone)]
pub struct TelegramCredentials {
    bot_token: Zeroizing<String>,
    chat_id: String,
}

impl TelegramCredentials {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        TelegramCredentials {
            bot_token: Zeroizing::new(bot_token.into()),
            chat_id: chat_id.into(),
        }
    }

    /// Both values must be present and non-blank.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let token = config.telegram_bot_token.as_deref().filter(|t| !t.trim().is_empty())?;
        let chat_id = config.telegram_chat_id.as_deref().filter(|c| !c.trim().is_empty())?;
        Some(Self::new(token, chat_id))
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Forwards contact messages through the Telegram Bot API `sendMessage` call.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    api_base: Url,
    credentials: Option<TelegramCredentials>,
}

impl TelegramNotifier {
    pub fn new(client: Client, api_base: Url, credentials: Option<TelegramCredentials>) -> Self {
        TelegramNotifier { client, api_base, credentials }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(config.notify_timeout())
            .build()?;
        let api_base = Url::parse(&config.telegram_api_base)?;

        Ok(Self::new(client, api_base, TelegramCredentials::from_config(config)))
    }

    fn send_message_url(&self, credentials: &TelegramCredentials) -> Result<Url, NotifyError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| NotifyError::InvalidEndpoint(self.api_base.to_string()))?
            .pop_if_empty()
            .push(&format!("bot{}", credentials.bot_token.as_str()))
            .push("sendMessage");
        Ok(url)
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let credentials = self.credentials.as_ref().ok_or(NotifyError::NotConfigured)?;
        let url = self.send_message_url(credentials)?;

        let response = self.client
            .post(url)
            .json(&SendMessage {
                chat_id: &credentials.chat_id,
                text,
            })
            .send()
            .await
            // reqwest errors can echo the URL, which embeds the bot token
            .map_err(|e| NotifyError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
