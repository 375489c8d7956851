use chrono::Local;
use regex::Regex;

use std::sync::{Arc, LazyLock};

use crate::{
    config::{Config, ContactDetails},
    dto::ContactRequest,
    mailer::{MailSender, MailerError},
    models::{Confirmation, ContactSubmission, EmailMessage, resolve_budget_label},
    templates,
};

pub const CONFIRMATION_MESSAGE: &str =
    "Votre message a bien été envoyé ! Nous vous répondrons sous 24h.";

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Tous les champs sont requis")]
    MissingFields,

    #[error("Format d'email invalide")]
    InvalidEmail,
}

#[derive(Debug, thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to render email template: {0}")]
    Render(#[from] askama::Error),

    #[error("Failed to deliver email: {0}")]
    Delivery(#[from] MailerError),
}

pub struct ContactService {
    mailer: Arc<dyn MailSender>,
    owner_address: String,
    contact: ContactDetails,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn MailSender>, config: &Config) -> Self {
        Self {
            mailer,
            owner_address: config.email_user.clone(),
            contact: config.contact.clone(),
        }
    }

    pub fn brand_name(&self) -> &str {
        &self.contact.brand_name
    }

    /// Validates the request, then sends the owner notification followed by
    /// the client confirmation. A failure on either send fails the call; an
    /// already delivered owner notification is not recalled.
    pub async fn submit_contact(
        &self,
        request: ContactRequest,
    ) -> Result<Confirmation, ContactError> {
        let submission = validate(request)?;
        let budget_label = resolve_budget_label(&submission.budget);

        let rendered =
            templates::render_emails(&submission, budget_label, &Local::now(), &self.contact)?;

        let to_owner = EmailMessage {
            from: format!(
                "\"{} Contact\" <{}>",
                self.contact.brand_name, self.owner_address
            ),
            to: self.owner_address.clone(),
            subject: templates::owner_subject(&submission.name, budget_label),
            body_html: rendered.owner_html,
        };

        let to_client = EmailMessage {
            from: format!("\"{}\" <{}>", self.contact.brand_name, self.owner_address),
            to: submission.email.clone(),
            subject: templates::client_subject(&self.contact.brand_name),
            body_html: rendered.client_html,
        };

        self.mailer.send(to_owner).await?;
        self.mailer.send(to_client).await?;

        tracing::info!(
            "Contact emails sent for {} ({})",
            submission.name,
            submission.email
        );

        Ok(Confirmation {
            message: CONFIRMATION_MESSAGE,
        })
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

pub fn validate(request: ContactRequest) -> Result<ContactSubmission, ValidationError> {
    let (Some(name), Some(email), Some(budget), Some(message)) = (
        non_empty(request.name),
        non_empty(request.email),
        non_empty(request.budget),
        non_empty(request.message),
    ) else {
        return Err(ValidationError::MissingFields);
    };

    if !EMAIL_RE.is_match(&email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(ContactSubmission {
        name,
        email,
        budget,
        message,
    })
}
