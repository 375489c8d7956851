//! HTML email rendering.
//!
//! Rendering is pure: every input, including the received-at timestamp, is
//! passed in by the caller. User-supplied values are HTML-escaped by askama;
//! line breaks in the message are kept as `<br>`.

use askama::Template;
use chrono::{DateTime, Locale, TimeZone};

use std::fmt::Display;

use crate::{config::ContactDetails, models::ContactSubmission};

#[derive(Template)]
#[template(path = "emails/owner_notification.html")]
struct OwnerNotificationTemplate<'a> {
    name: &'a str,
    email: &'a str,
    budget_label: &'a str,
    message_lines: Vec<&'a str>,
    received_at: String,
    brand_name: &'a str,
}

#[derive(Template)]
#[template(path = "emails/client_confirmation.html")]
struct ClientConfirmationTemplate<'a> {
    name: &'a str,
    budget_label: &'a str,
    contact: &'a ContactDetails,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmails {
    pub owner_html: String,
    pub client_html: String,
}

pub fn render_emails<Tz>(
    submission: &ContactSubmission,
    budget_label: &str,
    received_at: &DateTime<Tz>,
    contact: &ContactDetails,
) -> Result<RenderedEmails, askama::Error>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let owner_html = OwnerNotificationTemplate {
        name: &submission.name,
        email: &submission.email,
        budget_label,
        message_lines: submission.message.split('\n').collect(),
        received_at: format_received_at(received_at),
        brand_name: &contact.brand_name,
    }
    .render()?;

    let client_html = ClientConfirmationTemplate {
        name: &submission.name,
        budget_label,
        contact,
    }
    .render()?;

    Ok(RenderedEmails {
        owner_html,
        client_html,
    })
}

pub fn owner_subject(name: &str, budget_label: &str) -> String {
    format!("🔔 Nouveau message de {name} - Budget: {budget_label}")
}

pub fn client_subject(brand_name: &str) -> String {
    format!("✅ Message bien reçu - {brand_name}")
}

/// French long form, e.g. `lundi 19 octobre 2026 à 14:30`.
pub fn format_received_at<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format_localized("%A %-d %B %Y à %H:%M", Locale::fr_FR)
        .to_string()
}
