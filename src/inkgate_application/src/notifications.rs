use askama::Template;
use inkgate_core::{Email, EmailClient, EmailMessage};

pub const VERIFICATION_SUBJECT: &str = "Confirm your email address";
pub const PASSWORD_RESET_SUBJECT: &str = "Reset your password";

/// An account email with a plain-text body and an HTML alternative.
pub trait Notification: Template {
    const SUBJECT: &'static str;

    fn render_html(&self) -> askama::Result<String>;

    fn render_message(&self) -> askama::Result<EmailMessage> {
        Ok(EmailMessage {
            subject: Self::SUBJECT.to_string(),
            text_body: self.render()?,
            html_body: Some(self.render_html()?),
        })
    }
}

#[derive(Template)]
#[template(path = "verification_email.txt")]
pub struct VerificationEmail<'a> {
    pub link: &'a str,
    pub valid_hours: i64,
}

#[derive(Template)]
#[template(path = "verification_email.html")]
struct VerificationEmailHtml<'a> {
    email: &'a VerificationEmail<'a>,
}

impl Notification for VerificationEmail<'_> {
    const SUBJECT: &'static str = VERIFICATION_SUBJECT;

    fn render_html(&self) -> askama::Result<String> {
        VerificationEmailHtml { email: self }.render()
    }
}

#[derive(Template)]
#[template(path = "password_reset_email.txt")]
pub struct PasswordResetEmail<'a> {
    pub link: &'a str,
    pub valid_minutes: i64,
}

#[derive(Template)]
#[template(path = "password_reset_email.html")]
struct PasswordResetEmailHtml<'a> {
    email: &'a PasswordResetEmail<'a>,
}

impl Notification for PasswordResetEmail<'_> {
    const SUBJECT: &'static str = PASSWORD_RESET_SUBJECT;

    fn render_html(&self) -> askama::Result<String> {
        PasswordResetEmailHtml { email: self }.render()
    }
}

/// Render and send an email without failing the caller.
///
/// The state change that triggered the email is already committed, so
/// rendering and delivery errors are only logged.
pub async fn deliver<E, N>(email_client: &E, recipient: &Email, notification: N)
where
    E: EmailClient,
    N: Notification,
{
    let message = match notification.render_message() {
        Ok(message) => message,
        Err(e) => {
            tracing::error!(error = %e, subject = N::SUBJECT, "Failed to render email");
            return;
        }
    };

    if let Err(e) = email_client.send_email(recipient, &message).await {
        tracing::error!(error = %e, subject = N::SUBJECT, "Failed to send email");
    }
}
