//! Newsletter route handlers.
//!
//! All signup forms post here: the call-to-action section, the footer form,
//! the newsletter popup, and the ebook lead magnet. Responses are fragments
//! that replace the submitting form, so errors keep the visitor on the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse, Form};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{error, instrument};

use wayfarer_core::{Email, SubscriptionSource};

use crate::models::session::keys;
use crate::state::AppState;

/// Download path for the ebook lead magnet.
const EBOOK_DOWNLOAD: &str = "/static/downloads/working-from-anywhere.pdf";

#[derive(Template, WebTemplate)]
#[template(path = "partials/subscribe_result.html")]
struct SubscribeResultTemplate {
    ok: bool,
    message: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "partials/ebook_result.html")]
struct EbookResultTemplate {
    ok: bool,
    message: &'static str,
    download: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    email: String,
    name: Option<String>,
    /// Which form submitted: `cta`, `footer`, or `popup`.
    source: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EbookForm {
    email: String,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DismissForm {
    popup: String,
}

/// POST /newsletter/subscribe - Join the list.
#[instrument(skip(state, session, form))]
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SubscribeForm>,
) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return SubscribeResultTemplate {
            ok: false,
            message: "Please enter a valid email address.",
        };
    };

    let (source, tags) = match form.source.as_deref() {
        Some("popup") => (
            SubscriptionSource::NewsletterPopup,
            vec!["newsletter".to_owned(), "popup".to_owned()],
        ),
        Some("footer") => (
            SubscriptionSource::Footer,
            vec!["newsletter".to_owned(), "footer".to_owned()],
        ),
        _ => (SubscriptionSource::NewsletterForm, vec!["newsletter".to_owned()]),
    };

    // A popup signup also retires the popup for this session.
    if matches!(source, SubscriptionSource::NewsletterPopup) {
        mark_shown(&session, keys::NEWSLETTER_POPUP_SHOWN).await;
    }

    match state
        .subscribers()
        .subscribe(email, clean_name(form.name), source, tags)
        .await
    {
        Ok(()) => SubscribeResultTemplate {
            ok: true,
            message: "Thank you for subscribing to our newsletter!",
        },
        Err(e) => {
            error!("Failed to store subscription: {e}");
            SubscribeResultTemplate {
                ok: false,
                message: "Something went wrong on our end. Please try again.",
            }
        }
    }
}

/// POST /newsletter/ebook - Ebook lead magnet signup.
///
/// A successful signup answers with the download link.
#[instrument(skip(state, session, form))]
pub async fn ebook(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<EbookForm>,
) -> impl IntoResponse {
    let Ok(email) = Email::parse(&form.email) else {
        return EbookResultTemplate {
            ok: false,
            message: "Please enter a valid email address.",
            download: EBOOK_DOWNLOAD,
        };
    };

    mark_shown(&session, keys::EBOOK_POPUP_SHOWN).await;

    let tags = vec![
        "ebook".to_owned(),
        "lead-magnet".to_owned(),
        "remote-work-guide".to_owned(),
    ];

    match state
        .subscribers()
        .subscribe(email, clean_name(form.name), SubscriptionSource::EbookDownload, tags)
        .await
    {
        Ok(()) => EbookResultTemplate {
            ok: true,
            message: "You're in! Your guide is ready to download.",
            download: EBOOK_DOWNLOAD,
        },
        Err(e) => {
            error!("Failed to store ebook subscription: {e}");
            EbookResultTemplate {
                ok: false,
                message: "Something went wrong on our end. Please try again.",
                download: EBOOK_DOWNLOAD,
            }
        }
    }
}

/// POST /popups/dismiss - Mark a popup as seen for this session.
///
/// Dismissal is best-effort; a session write failure just means the popup
/// may offer itself again.
#[instrument(skip(session))]
pub async fn dismiss_popup(session: Session, Form(form): Form<DismissForm>) -> impl IntoResponse {
    match form.popup.as_str() {
        "newsletter" => mark_shown(&session, keys::NEWSLETTER_POPUP_SHOWN).await,
        "ebook" => mark_shown(&session, keys::EBOOK_POPUP_SHOWN).await,
        other => tracing::debug!(popup = other, "Dismissal for unknown popup"),
    }
}

async fn mark_shown(session: &Session, key: &str) {
    if let Err(e) = session.insert(key, true).await {
        tracing::debug!(key, "Failed to persist popup flag: {e}");
    }
}

/// Empty and whitespace-only names are stored as no name at all.
fn clean_name(name: Option<String>) -> Option<String> {
    name.map(|n| n.trim().to_owned()).filter(|n| !n.is_empty())
}
