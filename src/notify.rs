//! Warning publication to a pub/sub topic

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, instrument};

use crate::BarowatchError;
use crate::config::NotificationConfig;

const MESSAGE_TITLE: &str = "Barometric pressure warning";

/// Publish-by-topic notification sink
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Publish a single text message to `topic`
    async fn publish(&self, topic: &str, message: &str) -> crate::Result<()>;
}

/// Publishes plain-text messages with `POST {endpoint}/{topic}` (ntfy-compatible)
#[derive(Debug)]
pub struct TopicPublisher {
    client: Client,
    endpoint: String,
}

impl TopicPublisher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BarowatchError::notification(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &NotificationConfig, timeout: Duration) -> crate::Result<Self> {
        Self::new(config.endpoint.clone(), timeout)
    }
}

#[async_trait]
impl NotificationSink for TopicPublisher {
    #[instrument(skip(self, message), fields(bytes = message.len()))]
    async fn publish(&self, topic: &str, message: &str) -> crate::Result<()> {
        let url = format!("{}/{}", self.endpoint, topic);

        let response = self
            .client
            .post(&url)
            .header("Title", MESSAGE_TITLE)
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(message.to_string())
            .send()
            .await
            .map_err(|e| BarowatchError::notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BarowatchError::notification(format!(
                "Publishing to topic '{topic}' failed with status: {status}"
            )));
        }

        info!("Published pressure warning to topic '{}'", topic);
        Ok(())
    }
}
