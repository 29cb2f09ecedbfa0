use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::{ContactEmail, NotificationMessage};

mod smtp;

pub use smtp::SmtpClient;

/// Anything that can take a rendered message and attempt delivery once.
///
/// Implementations are shared across requests and never retry.
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(&self, message: &NotificationMessage) -> Result<(), RelayError>;
}

#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    #[error("email API request failed, reqwest error {0}")]
    Http(#[from] reqwest::Error),
    #[error("SMTP delivery failed, {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("invalid mailbox {0}")]
    Address(String),
    #[error("couldn't build the message, {0}")]
    Message(#[from] lettre::error::Error),
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: String,
    to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    html_body: &'a str,
    text_body: &'a str,
}

/// Client for a hosted provider's JSON email API (Postmark flavoured).
pub struct EmailClient {
    http_client: Client,
    base_url: String,
    sender: ContactEmail,
    authorization_token: SecretString,
}

impl EmailClient {
    pub fn new(
        sender: ContactEmail,
        base_url: String,
        authorization_token: SecretString,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        })
    }

    pub async fn send_email(&self, message: &NotificationMessage) -> Result<(), reqwest::Error> {
        let url = format!("{}/email", self.base_url);
        let request_body = SendEmailRequest {
            from: format!("\"{}\" <{}>", message.sender_name, self.sender),
            to: message.to.join(", "),
            reply_to: message.reply_to.as_deref(),
            subject: &message.subject,
            html_body: &message.html_body,
            text_body: &message.text_body,
        };

        self.http_client
            .post(&url)
            .header(
                "X-Postmark-Server-Token",
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}

#[async_trait]
impl MailRelay for EmailClient {
    async fn send(&self, message: &NotificationMessage) -> Result<(), RelayError> {
        Ok(self.send_email(message).await?)
    }
}
