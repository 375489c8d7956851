mod budget;

pub use budget::resolve_budget_label;

/// A contact form submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub budget: String,
    pub message: String,
}

/// Outgoing email, built per request and handed to a `MailSender`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Mailbox in `"Display Name" <address>` form
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body_html: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub message: &'static str,
}
