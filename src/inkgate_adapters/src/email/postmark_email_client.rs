use inkgate_core::{Email, EmailClient, EmailMessage};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// Sends account emails through the Postmark HTTP API.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    endpoint: Url,
    sender: Email,
    authorization_token: Secret<String>,
}

impl PostmarkEmailClient {
    /// Fails when `base_url` cannot be joined with the email endpoint.
    pub fn new(
        base_url: &str,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Result<Self, String> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join(EMAIL_ENDPOINT))
            .map_err(|e| format!("Invalid Postmark base URL {base_url}: {e}"))?;

        Ok(Self {
            http_client,
            endpoint,
            sender,
            authorization_token,
        })
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email via Postmark", skip_all, fields(subject = %message.subject))]
    async fn send_email(&self, recipient: &Email, message: &EmailMessage) -> Result<(), String> {
        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject: &message.subject,
            text_body: &message.text_body,
            html_body: message.html_body.as_deref(),
            message_stream: MESSAGE_STREAM,
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        // Postmark explains rejections in a JSON body.
        match response.json::<PostmarkErrorResponse>().await {
            Ok(error) => Err(format!(
                "Postmark rejected the email with status {status} (error code {}): {}",
                error.error_code, error.message
            )),
            Err(_) => Err(format!("Postmark rejected the email with status {status}")),
        }
    }
}

const EMAIL_ENDPOINT: &str = "/email";
const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_body: Option<&'a str>,
    message_stream: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct PostmarkErrorResponse {
    error_code: i64,
    message: String,
}
