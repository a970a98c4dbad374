//! The CMS resolver fallback.
//!
//! Any path no dedicated route claims lands here and is resolved against
//! the CMS (see [`crate::resolver`]). Section paths also count toward the
//! visitor's engagement record, mirroring the tracked sections on the
//! content site.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::Uri,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, instrument};

use crate::engagement::{self, SectionKind};
use crate::error::{AppError, Result};
use crate::filters;
use crate::resolver::{self, Listing, Resolution};
use crate::seo::PageMeta;
use crate::state::AppState;
use crate::wordpress::{Page, Post};

use super::blog::{self, CategoryTemplate, PostTemplate};
use super::Shell;

#[derive(Template, WebTemplate)]
#[template(path = "dynamic/page.html")]
struct DynamicPageTemplate {
    shell: Shell,
    page: Page,
}

#[derive(Template, WebTemplate)]
#[template(path = "dynamic/listing.html")]
struct ListingTemplate {
    shell: Shell,
    title: String,
    description: String,
    /// Decorative marker for section listings.
    icon: Option<&'static str>,
    posts: Vec<Post>,
}

#[derive(Template, WebTemplate)]
#[template(path = "dynamic/placeholder.html")]
struct PlaceholderTemplate {
    shell: Shell,
    title: String,
    /// Pre-rendered body; see `resolver::section::placeholder_html`.
    html: String,
}

#[derive(Debug, Deserialize)]
pub struct CategoryParam {
    category: Option<String>,
}

/// The fallback handler: resolve the path against the CMS and render.
#[instrument(skip(state, session), fields(path = %uri.path()))]
pub async fn fallback(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<CategoryParam>,
    session: Session,
) -> Result<Response> {
    let path = uri.path();

    track_section_view(&session, path).await;

    let Some(resolution) = resolver::resolve(state.wp(), path, params.category.as_deref()).await
    else {
        return Err(AppError::NotFound(path.to_owned()));
    };

    render(&state, &session, path, resolution).await
}

async fn render(
    state: &AppState,
    session: &Session,
    path: &str,
    resolution: Resolution,
) -> Result<Response> {
    let base_url = &state.config().base_url;

    let response = match resolution {
        Resolution::Redirect(target) => Redirect::permanent(&target).into_response(),

        Resolution::Page(page) => {
            let meta = PageMeta::page(&page.title, &page.content, path, base_url);
            DynamicPageTemplate {
                shell: Shell::build(session, meta).await,
                page: *page,
            }
            .into_response()
        }

        Resolution::Post(post) => {
            let related = blog::related_posts(state, &post).await;
            let meta = PageMeta::article(&post, base_url);
            PostTemplate {
                shell: Shell::build(session, meta).await,
                post: *post,
                related,
            }
            .into_response()
        }

        Resolution::Category {
            category,
            posts,
            keywords,
        } => {
            let mut meta =
                PageMeta::listing(&category.name, &category.description, path, &posts, base_url);
            meta.keywords = keywords;
            CategoryTemplate {
                shell: Shell::build(session, meta).await,
                pagination_base: format!("/category/{}", category.slug),
                category,
                posts,
                page: 1,
                total_pages: 1,
            }
            .into_response()
        }

        Resolution::Listing(Listing {
            title,
            description,
            keywords,
            section,
            posts,
        }) => {
            let mut meta = PageMeta::listing(&title, &description, path, &posts, base_url);
            meta.keywords = keywords;
            ListingTemplate {
                shell: Shell::build(session, meta).await,
                title,
                description,
                icon: section.map(|section| section.icon()),
                posts,
            }
            .into_response()
        }

        Resolution::Placeholder {
            title,
            description,
            html,
        } => {
            let meta = PageMeta::website(&title, &description, path, base_url);
            PlaceholderTemplate {
                shell: Shell::build(session, meta).await,
                title,
                html,
            }
            .into_response()
        }
    };

    Ok(response)
}

/// Count a visit to a tracked section root.
async fn track_section_view(session: &Session, path: &str) {
    let Some(section) = SectionKind::from_path(path) else {
        return;
    };

    let mut metrics = engagement::load(session).await;
    metrics.record_section_view(section);
    if let Err(e) = engagement::save(session, metrics).await {
        debug!(path, "Failed to persist section view: {e}");
    }
}
