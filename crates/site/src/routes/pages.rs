//! Static site pages and the theme switch.
//!
//! About and the legal pages are authored in templates rather than the CMS;
//! they change with the site, not with the content calendar.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::models::session::keys;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::{current_theme, Shell};

#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
struct AboutTemplate {
    shell: Shell,
}

#[derive(Template, WebTemplate)]
#[template(path = "pages/privacy.html")]
struct PrivacyTemplate {
    shell: Shell,
}

#[derive(Template, WebTemplate)]
#[template(path = "pages/terms.html")]
struct TermsTemplate {
    shell: Shell,
}

/// GET /about - About the site.
#[instrument(skip(state, session))]
pub async fn about(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let meta = PageMeta::website(
        "About",
        "Learn more about Wayfarer, the journey behind it, and the people who write here.",
        "/about",
        &state.config().base_url,
    );

    AboutTemplate {
        shell: Shell::build(&session, meta).await,
    }
}

/// GET /privacy-policy
#[instrument(skip(state, session))]
pub async fn privacy_policy(
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let meta = PageMeta::website(
        "Privacy Policy",
        "How Wayfarer collects, uses, and protects your information.",
        "/privacy-policy",
        &state.config().base_url,
    );

    PrivacyTemplate {
        shell: Shell::build(&session, meta).await,
    }
}

/// GET /terms-of-service
#[instrument(skip(state, session))]
pub async fn terms_of_service(
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    let meta = PageMeta::website(
        "Terms of Service",
        "The terms that govern your use of Wayfarer.",
        "/terms-of-service",
        &state.config().base_url,
    );

    TermsTemplate {
        shell: Shell::build(&session, meta).await,
    }
}

/// POST /theme/toggle - Flip between light and dark.
///
/// Plain form post; the redirect lands the visitor back where they were,
/// now wearing the other theme.
#[instrument(skip(state, session, headers))]
pub async fn toggle_theme(
    State(state): State<AppState>,
    session: Session,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let next = match current_theme(&session).await.as_str() {
        "dark" => "light",
        _ => "dark",
    };
    session.insert(keys::THEME, next.to_owned()).await?;

    let target = back_path(&headers, &state.config().base_url);
    Ok(Redirect::to(&target))
}

/// Where to send the visitor after toggling.
///
/// Only same-site referers are honored; anything else lands on the home
/// page rather than becoming an open redirect.
fn back_path(headers: &HeaderMap, base_url: &str) -> String {
    headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(|referer| local_path(referer, base_url))
        .unwrap_or_else(|| "/".to_owned())
}

fn local_path(referer: &str, base_url: &str) -> Option<String> {
    if referer.starts_with('/') && !referer.starts_with("//") {
        return Some(referer.to_owned());
    }

    let rest = referer.strip_prefix(base_url.trim_end_matches('/'))?;
    if rest.is_empty() {
        Some("/".to_owned())
    } else if rest.starts_with('/') {
        Some(rest.to_owned())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://wayfarer.example.com";

    #[test]
    fn test_local_path_accepts_relative_and_same_site() {
        assert_eq!(local_path("/blog", BASE).as_deref(), Some("/blog"));
        assert_eq!(
            local_path("https://wayfarer.example.com/shop?sort=newest", BASE).as_deref(),
            Some("/shop?sort=newest")
        );
        assert_eq!(local_path("https://wayfarer.example.com", BASE).as_deref(), Some("/"));
        // A configured base URL with a trailing slash still matches
        assert_eq!(
            local_path("https://wayfarer.example.com/blog", "https://wayfarer.example.com/").as_deref(),
            Some("/blog")
        );
    }

    #[test]
    fn test_local_path_rejects_foreign_targets() {
        assert_eq!(local_path("https://evil.example.com/", BASE), None);
        assert_eq!(local_path("//evil.example.com/", BASE), None);
        // Same prefix but a different host
        assert_eq!(local_path("https://wayfarer.example.com.evil.io/x", BASE), None);
    }
}
