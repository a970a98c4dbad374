//! Contact route handlers.
//!
//! Submissions are validated and logged; there is no mail integration, so
//! the log entry is the record an operator follows up on.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse, Form};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{info, instrument};

use wayfarer_core::Email;

use crate::filters;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::Shell;

#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
struct ContactTemplate {
    shell: Shell,
}

#[derive(Template, WebTemplate)]
#[template(path = "partials/contact_result.html")]
struct ContactResultTemplate {
    ok: bool,
    message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
}

/// GET /contact - The contact page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let meta = PageMeta::website(
        "Contact",
        "Get in touch with the Wayfarer team for collaborations, inquiries, or just to \
         say hello.",
        "/contact",
        &state.config().base_url,
    );

    ContactTemplate {
        shell: Shell::build(&session, meta).await,
    }
}

/// POST /contact - Validate and record a message.
#[instrument(skip(form))]
pub async fn submit(Form(form): Form<ContactForm>) -> impl IntoResponse {
    match validate(&form) {
        Ok(email) => {
            info!(
                name = %form.name.trim(),
                email = %email,
                subject = %form.subject.trim(),
                message = %form.message.trim(),
                "Contact form submission"
            );
            ContactResultTemplate {
                ok: true,
                message: "We've received your message and will get back to you soon.",
            }
        }
        Err(message) => ContactResultTemplate { ok: false, message },
    }
}

/// Apply the form rules, returning the first violation.
fn validate(form: &ContactForm) -> Result<Email, &'static str> {
    if form.name.trim().chars().count() < 2 {
        return Err("Name is required");
    }
    let email = Email::parse(&form.email).map_err(|_| "Invalid email address")?;
    if form.subject.trim().chars().count() < 2 {
        return Err("Subject is required");
    }
    if form.message.trim().chars().count() < 10 {
        return Err("Message must be at least 10 characters");
    }
    Ok(email)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_owned(),
            email: email.to_owned(),
            subject: subject.to_owned(),
            message: message.to_owned(),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        let form = form("Ada", "ada@example.com", "Hello", "I enjoyed the fjords piece.");
        assert_eq!(validate(&form).unwrap().as_str(), "ada@example.com");
    }

    #[test]
    fn test_violations_report_in_field_order() {
        assert_eq!(
            validate(&form("A", "ada@example.com", "Hi", "long enough message")).unwrap_err(),
            "Name is required"
        );
        assert_eq!(
            validate(&form("Ada", "not-an-email", "Hi", "long enough message")).unwrap_err(),
            "Invalid email address"
        );
        assert_eq!(
            validate(&form("Ada", "ada@example.com", "H", "long enough message")).unwrap_err(),
            "Subject is required"
        );
        assert_eq!(
            validate(&form("Ada", "ada@example.com", "Hi", "too short")).unwrap_err(),
            "Message must be at least 10 characters"
        );
    }

    #[test]
    fn test_whitespace_does_not_satisfy_minimums() {
        let padded = form("  A  ", "ada@example.com", "Hi", "long enough message");
        assert_eq!(validate(&padded).unwrap_err(), "Name is required");
    }
}
