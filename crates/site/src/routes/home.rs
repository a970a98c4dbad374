//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::engagement::{self, PopupFlags};
use crate::filters;
use crate::seo::PageMeta;
use crate::state::AppState;
use crate::travel::{Destination, DESTINATIONS};
use crate::wordpress::{Category, Post};

use super::Shell;

/// Home page description used in meta tags and the hero fallback.
const HOME_DESCRIPTION: &str = "Discover travel tips, lifestyle inspiration, and stories \
     from around the world. Your guide to living well and traveling far.";

#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
struct HomeTemplate {
    shell: Shell,
    /// Most recent post, shown full-width in the hero.
    hero: Option<Post>,
    /// Recent posts backing the Featured Stories grid.
    posts: Vec<Post>,
    /// The largest CMS categories, shown as trending topic chips.
    trending: Vec<Category>,
    destinations: &'static [Destination],
    popups: PopupFlags,
}

/// GET / - Home page.
///
/// Hero, featured stories, category cards, destinations carousel, and the
/// newsletter call to action. Each CMS-backed slot degrades independently,
/// so a slow or broken CMS still renders the static sections.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let content = state.wp().get_homepage().await;
    let popups = engagement::popup_flags(&session).await;

    let meta = PageMeta::website(
        "Wayfarer",
        HOME_DESCRIPTION,
        "/",
        &state.config().base_url,
    );

    HomeTemplate {
        shell: Shell::build(&session, meta).await,
        hero: content.featured,
        posts: content.recent,
        trending: content.popular_categories,
        destinations: DESTINATIONS,
        popups,
    }
}
