use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, MultiPart},
    transport::smtp::authentication::Credentials,
};
use secrecy::ExposeSecret;

use super::{MailRelay, RelayError};
use crate::{
    configuration::{SmtpSecurity, SmtpSettings},
    domain::{ContactEmail, NotificationMessage},
};

/// Sends through an SMTP relay such as Gmail or a local catch-all server.
pub struct SmtpClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: ContactEmail,
}

impl SmtpClient {
    pub fn new(
        settings: &SmtpSettings,
        sender: ContactEmail,
        timeout: Duration,
    ) -> Result<Self, RelayError> {
        let builder = match settings.security {
            SmtpSecurity::None => {
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            }
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.host)?
            }
            SmtpSecurity::Tls => AsyncSmtpTransport::<Tokio1Executor>::relay(&settings.host)?,
        };
        let mut builder = builder.port(settings.port).timeout(Some(timeout));

        if settings.username.is_empty() {
            tracing::info!(
                smtp_host = %settings.host,
                smtp_port = settings.port,
                "SMTP credentials not configured, using an unauthenticated connection"
            );
        } else {
            builder = builder.credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().to_owned(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            sender,
        })
    }

    fn build_message(&self, message: &NotificationMessage) -> Result<Message, RelayError> {
        let sender: Address = parse_mailbox_part(self.sender.as_ref())?;
        let mut builder = Message::builder()
            .from(Mailbox::new(Some(message.sender_name.clone()), sender))
            .subject(message.subject.clone());

        for recipient in &message.to {
            builder = builder.to(parse_mailbox_part(recipient)?);
        }
        if let Some(reply_to) = &message.reply_to {
            builder = builder.reply_to(parse_mailbox_part(reply_to)?);
        }

        Ok(builder.multipart(MultiPart::alternative_plain_html(
            message.text_body.clone(),
            message.html_body.clone(),
        ))?)
    }
}

fn parse_mailbox_part<T>(raw: &str) -> Result<T, RelayError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse()
        .map_err(|e| RelayError::Address(format!("{}: {}", raw, e)))
}

#[async_trait]
impl MailRelay for SmtpClient {
    async fn send(&self, message: &NotificationMessage) -> Result<(), RelayError> {
        let email = self.build_message(message)?;
        self.transport.send(email).await?;
        Ok(())
    }
}
