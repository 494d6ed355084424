//! Authenticated HTTP mail-relay notifier

use super::{Delivery, Notifier};
use crate::config::NotifyConfig;
use crate::error::NotifyError;
use serde_json::json;
use std::time::Duration;

/// Resolved relay settings; only built when every credential is present
#[derive(Debug, Clone)]
pub struct WebhookSettings {
    pub endpoint: String,
    pub username: String,
    pub password: String,
    pub sender: String,
    pub recipient: String,
    pub timeout: Duration,
}

impl WebhookSettings {
    /// `None` when endpoint, username, or password is missing or blank.
    /// Sender and recipient fall back to the username.
    pub fn from_config(config: &NotifyConfig) -> Option<Self> {
        let present = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let endpoint = present(&config.endpoint)?;
        let username = present(&config.username)?;
        let password = present(&config.password)?;
        let recipient = present(&config.recipient).unwrap_or_else(|| username.clone());
        let sender = present(&config.sender).unwrap_or_else(|| username.clone());
        Some(Self {
            endpoint,
            username,
            password,
            sender,
            recipient,
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }
}

/// Posts each alert as JSON to a relay endpoint using HTTP basic auth
pub struct WebhookNotifier {
    settings: WebhookSettings,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

impl WebhookNotifier {
    pub fn new(settings: WebhookSettings) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| NotifyError::Transport(format!("Failed to build HTTP client: {}", e)))?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| NotifyError::Runtime(format!("Failed to create runtime: {}", e)))?;
        Ok(Self {
            settings,
            client,
            runtime,
        })
    }

    async fn post(&self, subject: &str, body: &str) -> Result<Delivery, NotifyError> {
        let payload = json!({
            "from": self.settings.sender,
            "to": self.settings.recipient,
            "subject": subject,
            "body": body,
        });

        let response = self
            .client
            .post(&self.settings.endpoint)
            .basic_auth(&self.settings.username, Some(&self.settings.password))
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(Delivery::Sent);
        }
        let text = response.text().await.unwrap_or_default();
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body: text.chars().take(200).collect(),
        })
    }
}

impl Notifier for WebhookNotifier {
    fn send(&self, subject: &str, body: &str) -> Result<Delivery, NotifyError> {
        let delivery = self.runtime.block_on(self.post(subject, body))?;
        tracing::info!(subject, recipient = %self.settings.recipient, "Alert sent");
        Ok(delivery)
    }

    fn describe(&self) -> String {
        format!("{} -> {}", self.settings.endpoint, self.settings.recipient)
    }
}
