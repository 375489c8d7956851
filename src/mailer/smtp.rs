use async_trait::async_trait;
use lettre::message::{Mailbox, header::ContentType};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailSender, MailerError};
use crate::{config::Config, models::EmailMessage};

/// SMTP relay backed sender. The transport is built once and reused.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, MailerError> {
        let creds = Credentials::new(
            config.email_user.clone(),
            config.email_app_password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_relay)?
            .credentials(creds)
            .build();

        Ok(Self { transport })
    }

    /// Opens a connection to the relay and authenticates.
    pub async fn verify(&self) -> Result<bool, MailerError> {
        Ok(self.transport.test_connection().await?)
    }

    fn build_message(message: EmailMessage) -> Result<Message, MailerError> {
        let from: Mailbox = message.from.parse()?;
        let to: Mailbox = message.to.parse()?;

        Ok(Message::builder()
            .from(from)
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.body_html)?)
    }
}

#[async_trait]
impl MailSender for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError> {
        let to = message.to.clone();
        let subject = message.subject.clone();
        let email = Self::build_message(message)?;

        tracing::info!("Sending email to '{}' with subject '{}'", to, subject);

        self.transport.send(email).await?;

        tracing::info!("Message to {} sent successfully", to);
        Ok(())
    }
}
