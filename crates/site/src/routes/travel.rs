//! Travel route handlers: the hub, the destination explorer, and tips.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{debug, instrument};

use crate::filters;
use crate::seo::PageMeta;
use crate::state::AppState;
use crate::travel::{
    self, Destination, TipCategory, TravelCard, DESTINATIONS, TIP_CATEGORIES, TRAVEL_CARDS,
};
use crate::wordpress::{Paged, Post, PostQuery};

use super::{blog::PageParam, Shell};

/// The CMS category backing the travel pages.
const TRAVEL_CATEGORY: &str = "travel-adventures";

/// Posts per page on the travel listings.
const TRAVEL_PER_PAGE: u32 = 6;

/// Search terms fanned out in parallel on the tips page.
const TIPS_PARALLEL_TERMS: usize = 3;

/// Posts fetched per tips search term.
const TIPS_PER_TERM: u32 = 9;

/// Target size of the tips grid; top-up searches stop here.
const TIPS_TARGET: usize = 9;

/// Below this many unique posts the tips page keeps searching.
const TIPS_MIN: usize = 6;

const HUB_DESCRIPTION: &str = "Discover amazing travel destinations, adventure guides, and \
     travel tips for your next journey.";

const HUB_INTRO: &str = "Discover breathtaking destinations, practical travel tips, and \
     unforgettable adventures to inspire your next journey.";

#[derive(Template, WebTemplate)]
#[template(path = "travel/hub.html")]
struct TravelHubTemplate {
    shell: Shell,
    cards: &'static [TravelCard],
    /// Heading over the article grid.
    heading: String,
    posts: Vec<Post>,
    page: u64,
    total_pages: u64,
    pagination_base: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "travel/explore.html")]
struct ExploreTemplate {
    shell: Shell,
    hero_title: String,
    hero_intro: String,
    cards: &'static [TravelCard],
    /// Carousel heading; the filtered category name or the default.
    carousel_title: String,
    destinations: Vec<&'static Destination>,
    /// Set when a card filter narrowed the carousel.
    filtered: bool,
    heading: String,
    posts: Vec<Post>,
    page: u64,
    total_pages: u64,
    pagination_base: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "travel/tips.html")]
struct TipsTemplate {
    shell: Shell,
    slug: String,
    display_name: String,
    /// Info box content for the known categories.
    info: Option<&'static TipCategory>,
    /// Pills linking to the other tip categories.
    related: Vec<&'static TipCategory>,
    posts: Vec<Post>,
}

#[derive(Debug, Deserialize)]
pub struct ExploreParams {
    destination: Option<String>,
    category: Option<String>,
    page: Option<u32>,
}

/// GET /travel - The travel hub.
#[instrument(skip(state, session))]
pub async fn hub(
    State(state): State<AppState>,
    Query(params): Query<PageParam>,
    session: Session,
) -> impl IntoResponse {
    let page = params.page();
    let (heading, paged) = travel_posts(&state, page).await;

    let meta = PageMeta::listing(
        "Explore Travel Adventures",
        HUB_DESCRIPTION,
        "/travel",
        &paged.items,
        &state.config().base_url,
    );

    TravelHubTemplate {
        shell: Shell::build(&session, meta).await,
        cards: TRAVEL_CARDS,
        heading,
        posts: paged.items,
        page: u64::from(page),
        total_pages: paged.total_pages,
        pagination_base: "/travel".to_owned(),
    }
}

/// GET /explore-travel - The destination explorer.
///
/// `?destination=` swaps the hero for one destination; `?category=` narrows
/// the destinations carousel to cards tagged with that travel category.
#[instrument(skip(state, session))]
pub async fn explore(
    State(state): State<AppState>,
    Query(params): Query<ExploreParams>,
    session: Session,
) -> impl IntoResponse {
    let page = params.page.unwrap_or(1).max(1);
    let (heading, paged) = travel_posts(&state, page).await;

    let selected = params
        .destination
        .as_deref()
        .and_then(travel::destination_by_slug);

    let (hero_title, hero_intro, description) = selected.map_or_else(
        || {
            (
                "Explore Travel Adventures".to_owned(),
                HUB_INTRO.to_owned(),
                HUB_DESCRIPTION.to_owned(),
            )
        },
        |destination| {
            (
                destination.name.to_owned(),
                destination.description.to_owned(),
                destination.description.to_owned(),
            )
        },
    );

    let (carousel_title, destinations, filtered) = match params.category.as_deref() {
        Some(slug) => (
            title_case(slug),
            travel::destinations_by_category(slug),
            true,
        ),
        None => (
            "Featured Destinations".to_owned(),
            DESTINATIONS.iter().collect(),
            false,
        ),
    };

    let meta = PageMeta::listing(
        &hero_title,
        &description,
        "/explore-travel",
        &paged.items,
        &state.config().base_url,
    );

    ExploreTemplate {
        shell: Shell::build(&session, meta).await,
        hero_title,
        hero_intro,
        cards: TRAVEL_CARDS,
        carousel_title,
        destinations,
        filtered,
        heading,
        posts: paged.items,
        page: u64::from(page),
        total_pages: paged.total_pages,
        pagination_base: "/explore-travel".to_owned(),
    }
}

/// GET /travel/tips - Tips for the default category.
#[instrument(skip(state, session))]
pub async fn tips_index(
    State(state): State<AppState>,
    session: Session,
) -> impl IntoResponse {
    render_tips(state, session, "budget".to_owned()).await
}

/// GET /travel/tips/{category} - Tips for one category.
#[instrument(skip(state, session))]
pub async fn tips(
    State(state): State<AppState>,
    Path(category): Path<String>,
    session: Session,
) -> impl IntoResponse {
    render_tips(state, session, category).await
}

async fn render_tips(state: AppState, session: Session, slug: String) -> impl IntoResponse {
    let display_name = travel::tips_display_name(&slug);
    let posts = tips_posts(&state, &slug).await;

    let meta = PageMeta::listing(
        &format!("{display_name} Travel Tips"),
        &format!(
            "Discover the best {slug} travel tips to help you plan your next adventure \
             with confidence and save money."
        ),
        &format!("/travel/tips/{slug}"),
        &posts,
        &state.config().base_url,
    );
    let meta = with_tips_keywords(meta, &slug);

    let related: Vec<&'static TipCategory> = TIP_CATEGORIES
        .iter()
        .filter(|category| category.slug != slug)
        .collect();

    TipsTemplate {
        shell: Shell::build(&session, meta).await,
        info: travel::tip_category_by_slug(&slug),
        slug,
        display_name,
        related,
        posts,
    }
}

/// Fetch the travel article grid.
///
/// The travel-adventures category is the source of record; when it is
/// missing or empty the grid falls back to the latest posts so the page
/// never renders bare.
async fn travel_posts(state: &AppState, page: u32) -> (String, Paged<Post>) {
    match state
        .wp()
        .get_posts_by_category(TRAVEL_CATEGORY, page, TRAVEL_PER_PAGE)
        .await
    {
        Ok((category, paged)) if !paged.items.is_empty() => {
            (format!("Latest {} Articles", category.name), paged)
        }
        Ok(_) | Err(_) => {
            debug!("Travel category empty or missing, falling back to recent posts");
            let paged = state
                .wp()
                .get_posts(&PostQuery {
                    page: Some(page),
                    per_page: Some(TRAVEL_PER_PAGE),
                    ..PostQuery::default()
                })
                .await
                .unwrap_or_else(|e| {
                    debug!("Recent-posts fallback failed too: {e}");
                    Paged::empty()
                });
            ("Latest Travel Adventures".to_owned(), paged)
        }
    }
}

/// Gather tips posts by fanning out category search terms.
///
/// The first three terms run in parallel; results are deduplicated by slug
/// in arrival order. A thin result keeps searching the remaining terms one
/// at a time, and a completely dry run falls back to a plain travel search.
async fn tips_posts(state: &AppState, category: &str) -> Vec<Post> {
    let terms = travel::tips_search_terms(category);
    let wp = state.wp();

    let mut posts: Vec<Post> = Vec::new();

    let searches = terms.iter().take(TIPS_PARALLEL_TERMS).map(|term| {
        let query = PostQuery::search(term, TIPS_PER_TERM);
        async move { wp.get_posts(&query).await }
    });
    for result in futures_joined(searches).await {
        if let Ok(paged) = result {
            merge_unique(&mut posts, paged.items);
        }
    }

    if posts.len() < TIPS_MIN {
        for term in terms.iter().skip(TIPS_PARALLEL_TERMS) {
            if posts.len() >= TIPS_TARGET {
                break;
            }
            let remaining = TIPS_TARGET - posts.len();
            if let Ok(paged) = wp
                .get_posts(&PostQuery::search(term, u32::try_from(remaining).unwrap_or(1)))
                .await
            {
                merge_unique(&mut posts, paged.items);
            }
        }
    }

    if posts.is_empty() {
        debug!(category, "No tips matched, falling back to a travel search");
        if let Ok(paged) = wp.get_posts(&PostQuery::search("travel", TRAVEL_PER_PAGE)).await {
            posts = paged.items;
        }
    }

    posts
}

/// Await a fixed fan-out of three searches.
async fn futures_joined<F>(mut searches: impl Iterator<Item = F>) -> Vec<F::Output>
where
    F: std::future::Future,
{
    match (searches.next(), searches.next(), searches.next()) {
        (Some(a), Some(b), Some(c)) => {
            let (a, b, c) = tokio::join!(a, b, c);
            vec![a, b, c]
        }
        (Some(a), Some(b), None) => {
            let (a, b) = tokio::join!(a, b);
            vec![a, b]
        }
        (Some(a), None, None) => vec![a.await],
        _ => Vec::new(),
    }
}

/// Append posts not already present, matching by slug.
fn merge_unique(posts: &mut Vec<Post>, incoming: Vec<Post>) {
    for post in incoming {
        if !posts.iter().any(|existing| existing.slug == post.slug) {
            posts.push(post);
        }
    }
}

/// Tips pages carry a handwritten keyword set instead of the derived one.
fn with_tips_keywords(mut meta: PageMeta, category: &str) -> PageMeta {
    meta.keywords = vec![
        format!("{category} travel tips"),
        "travel advice".to_owned(),
        "travel blog".to_owned(),
        format!("{category} travel"),
        "travel planning".to_owned(),
        "affordable travel".to_owned(),
        "travel hacks".to_owned(),
        "wayfarer".to_owned(),
    ];
    meta
}

/// Title-case a slug: `mountain-getaways` becomes `Mountain Getaways`.
fn title_case(slug: &str) -> String {
    slug.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
