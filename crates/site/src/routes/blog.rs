//! Blog route handlers: the post index, single posts, and category listings.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::filters;
use crate::seo::PageMeta;
use crate::state::AppState;
use crate::wordpress::{Category, Post, PostQuery};

use super::Shell;

/// Posts per page on the index and category listings.
const POSTS_PER_PAGE: u32 = 6;

/// Related posts shown under a single post.
const RELATED_LIMIT: usize = 3;

/// Fetched related candidates; one extra covers the post itself.
const RELATED_FETCH: u32 = 4;

#[derive(Debug, Deserialize)]
pub struct PageParam {
    page: Option<u32>,
}

impl PageParam {
    /// The requested page, clamped to 1-based.
    pub(crate) fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "blog/index.html")]
struct BlogIndexTemplate {
    shell: Shell,
    posts: Vec<Post>,
    page: u64,
    total_pages: u64,
    pagination_base: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "blog/post.html")]
pub(crate) struct PostTemplate {
    pub shell: Shell,
    pub post: Post,
    pub related: Vec<Post>,
}

#[derive(Template, WebTemplate)]
#[template(path = "blog/category.html")]
pub(crate) struct CategoryTemplate {
    pub shell: Shell,
    pub category: Category,
    pub posts: Vec<Post>,
    pub page: u64,
    pub total_pages: u64,
    pub pagination_base: String,
}

/// GET /blog - All posts, newest first, paginated.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<PageParam>,
    session: Session,
) -> Result<impl IntoResponse> {
    let page = params.page();
    let query = PostQuery {
        page: Some(page),
        per_page: Some(POSTS_PER_PAGE),
        ..PostQuery::default()
    };
    let paged = state.wp().get_posts(&query).await?;

    let meta = PageMeta::listing(
        "Blog",
        "Explore all blog posts covering travel, lifestyle, personal growth, health, \
         and entertainment topics.",
        "/blog",
        &paged.items,
        &state.config().base_url,
    );

    Ok(BlogIndexTemplate {
        shell: Shell::build(&session, meta).await,
        posts: paged.items,
        page: u64::from(page),
        total_pages: paged.total_pages,
        pagination_base: "/blog".to_owned(),
    })
}

/// GET /post/{slug} - A single post with related reading.
///
/// Related posts come from the post's primary category; a failed related
/// lookup renders the post without the section rather than erroring.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    session: Session,
) -> Result<impl IntoResponse> {
    let post = state.wp().get_post_by_slug(&slug).await?;
    let related = related_posts(&state, &post).await;

    let meta = PageMeta::article(&post, &state.config().base_url);

    Ok(PostTemplate {
        shell: Shell::build(&session, meta).await,
        post,
        related,
    })
}

/// GET /category/{slug} - Posts in one category, paginated.
#[instrument(skip(state, session))]
pub async fn category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<PageParam>,
    session: Session,
) -> Result<impl IntoResponse> {
    let page = params.page();
    let (category, paged) = state
        .wp()
        .get_posts_by_category(&slug, page, POSTS_PER_PAGE)
        .await?;

    let meta = PageMeta::listing(
        &category.name,
        &category.description,
        &format!("/category/{slug}"),
        &paged.items,
        &state.config().base_url,
    );

    Ok(CategoryTemplate {
        shell: Shell::build(&session, meta).await,
        pagination_base: format!("/category/{}", category.slug),
        category,
        posts: paged.items,
        page: u64::from(page),
        total_pages: paged.total_pages,
    })
}

/// Up to three other posts from the same category.
pub(crate) async fn related_posts(state: &AppState, post: &Post) -> Vec<Post> {
    match state
        .wp()
        .get_posts_by_category(&post.category_slug, 1, RELATED_FETCH)
        .await
    {
        Ok((_, paged)) => {
            let mut related: Vec<Post> = paged
                .items
                .into_iter()
                .filter(|candidate| candidate.id != post.id)
                .collect();
            related.truncate(RELATED_LIMIT);
            related
        }
        Err(e) => {
            debug!(slug = %post.slug, "Skipping related posts: {e}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_param_clamps_to_one() {
        assert_eq!(PageParam { page: None }.page(), 1);
        assert_eq!(PageParam { page: Some(0) }.page(), 1);
        assert_eq!(PageParam { page: Some(7) }.page(), 7);
    }
}
