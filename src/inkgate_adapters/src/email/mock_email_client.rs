use std::sync::Arc;

use inkgate_core::{Email, EmailClient, EmailMessage};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    /// The plain-text body.
    pub content: String,
    pub html_content: Option<String>,
}

/// Email client that keeps messages in memory instead of sending them.
///
/// Used by local runs and the API tests, which read verification and reset
/// links back out of the recorded messages.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient {
    outbox: Arc<RwLock<Vec<SentEmail>>>,
}

impl MockEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.outbox.read().await.clone()
    }

    /// The one-time token in the most recent link sent to `recipient`.
    pub async fn last_token_for(&self, recipient: &str) -> Option<Secret<String>> {
        let outbox = self.outbox.read().await;
        outbox
            .iter()
            .rev()
            .find(|email| email.recipient == recipient)
            .and_then(|email| extract_token(&email.content))
            .map(|token| Secret::new(token.to_string()))
    }
}

fn extract_token(content: &str) -> Option<&str> {
    content
        .split(|c: char| c.is_whitespace() || c == '/')
        .find(|word| word.len() == 64 && word.chars().all(|c| c.is_ascii_hexdigit()))
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    #[tracing::instrument(name = "Recording email", skip_all)]
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        tracing::debug!(subject = %message.subject, "Email recorded instead of sent");
        self.outbox.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: message.subject.clone(),
            content: message.text_body.clone(),
            html_content: message.html_body.clone(),
        });
        Ok(())
    }
}
