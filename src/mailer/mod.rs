mod smtp;

use async_trait::async_trait;

use crate::models::EmailMessage;

pub use smtp::SmtpMailer;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid email address format: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build email message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Delivers fully rendered email messages.
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), MailerError>;
}
