use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

use crate::models::MatchResult;

/// Errors that can occur when dispatching notifications
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),
}

/// Delivery boundary for match digests
///
/// Fire-and-forget from the engine's perspective: callers log a failed
/// dispatch and move on, they never retry or block a batch on it.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_matches(
        &self,
        buyer_id: &str,
        summary: &str,
        matches: &[MatchResult],
    ) -> Result<(), NotifyError>;
}

/// Webhook notifier
///
/// Posts match digests to the marketplace notification service, which owns
/// fan-out to push/email channels.
pub struct WebhookNotifier {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl WebhookNotifier {
    pub fn new(endpoint: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            endpoint,
            api_key,
            client,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify_matches(
        &self,
        buyer_id: &str,
        summary: &str,
        matches: &[MatchResult],
    ) -> Result<(), NotifyError> {
        let url = format!(
            "{}/notifications/matches",
            self.endpoint.trim_end_matches('/')
        );

        let payload = serde_json::json!({
            "eventId": uuid::Uuid::new_v4().to_string(),
            "buyerId": buyer_id,
            "summary": summary,
            "matches": matches,
        });

        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::ApiError(format!(
                "Failed to deliver match digest: {}",
                response.status()
            )));
        }

        tracing::debug!("Delivered match digest for buyer {}", buyer_id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_webhook_notifier_posts_digest() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/notifications/matches")
            .match_header("x-api-key", "test_key")
            .with_status(200)
            .create_async()
            .await;

        let notifier = WebhookNotifier::new(server.url(), "test_key".to_string());
        notifier
            .notify_matches("buyer_1", "Found 2 matches", &[])
            .await
            .expect("dispatch should succeed");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_webhook_notifier_surfaces_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/notifications/matches")
            .with_status(500)
            .create_async()
            .await;

        let notifier = WebhookNotifier::new(server.url(), "test_key".to_string());
        let result = notifier.notify_matches("buyer_1", "summary", &[]).await;

        assert!(matches!(result, Err(NotifyError::ApiError(_))));
    }
}
