//! WordPress REST API client implementation.
//!
//! Plain REST over `reqwest` 0.13 with `_embed` expansion for featured media
//! and taxonomy terms. Caches taxonomy and menu responses using `moka`
//! (60-second TTL); content lookups always hit the CMS.

use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::WordPressConfig;

use super::WpError;
use super::cache::CacheValue;
use super::records::{RawCategory, RawMenu, RawPage, RawPost};
use super::transform::{transform_category, transform_menu, transform_page, transform_post};
use super::types::{
    Category, ContentTotals, HomepageContent, Menu, Page, Paged, Post, PostQuery,
};

/// One connect/read timeout so a hung CMS cannot pin a request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Taxonomy and menu responses stay fresh for this long.
const CACHE_TTL: Duration = Duration::from_secs(60);

// =============================================================================
// WpClient
// =============================================================================

/// Client for the WordPress REST API.
///
/// Cheap to clone; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct WpClient {
    inner: Arc<WpClientInner>,
}

struct WpClientInner {
    client: reqwest::Client,
    /// Core content API base, `{site}/wp-json/wp/v2`.
    api_base: String,
    /// Menus plugin base, `{site}/wp-json/menus/v1`.
    menus_base: String,
    /// Precomputed `Basic` header value when credentials are configured.
    auth_header: Option<String>,
    cache: Cache<String, CacheValue>,
}

impl WpClient {
    /// Create a new client for the configured CMS.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &WordPressConfig) -> Result<Self, WpError> {
        let cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(CACHE_TTL)
            .build();

        let api_base = config.api_url.trim_end_matches('/').to_string();
        let menus_base = derive_menus_base(&api_base);

        let auth_header = config.credentials().map(|(username, password)| {
            let raw = format!("{username}:{}", password.expose_secret());
            format!("Basic {}", BASE64.encode(raw))
        });

        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            inner: Arc::new(WpClientInner {
                client,
                api_base,
                menus_base,
                auth_header,
                cache,
            }),
        })
    }

    /// Issue a GET, sending credentials when configured.
    ///
    /// A `401`/`403` on an authenticated request is retried once without
    /// credentials, because the content endpoints accept anonymous reads even
    /// when the configured account is rejected.
    async fn fetch(&self, url: Url) -> Result<reqwest::Response, WpError> {
        if let Some(auth) = &self.inner.auth_header {
            let response = self
                .inner
                .client
                .get(url.clone())
                .header(reqwest::header::AUTHORIZATION, auth)
                .send()
                .await?;

            if matches!(
                response.status(),
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
            ) {
                debug!(status = %response.status(), "CMS rejected credentials, retrying as public");
                return Ok(self.inner.client.get(url).send().await?);
            }

            return Ok(response);
        }

        Ok(self.inner.client.get(url).send().await?)
    }

    /// Execute a list request, returning parsed items plus the CMS paging
    /// headers (zero when the headers are absent).
    async fn get_list<T: DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<(Vec<T>, u64, u64), WpError> {
        let response = self.fetch(url).await?;
        let status = response.status();
        let total = parse_count_header(response.headers(), "X-WP-Total");
        let total_pages = parse_count_header(response.headers(), "X-WP-TotalPages");

        // Get response body as text first for better error diagnostics
        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "CMS returned non-success status"
            );
            return Err(WpError::Status(status.as_u16()));
        }

        let items: Vec<T> = match serde_json::from_str(&text) {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse CMS list response"
                );
                return Err(WpError::Parse(e));
            }
        };

        Ok((items, total, total_pages))
    }

    /// Execute a single-object request.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, WpError> {
        let path = url.path().to_string();
        let response = self.fetch(url).await?;
        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WpError::NotFound(path));
        }
        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %text.chars().take(500).collect::<String>(),
                "CMS returned non-success status"
            );
            return Err(WpError::Status(status.as_u16()));
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %text.chars().take(500).collect::<String>(),
                    "Failed to parse CMS response"
                );
                Err(WpError::Parse(e))
            }
        }
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// List posts matching a query, with paging totals.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// parsed. An empty result set is not an error.
    #[instrument(skip(self))]
    pub async fn get_posts(&self, query: &PostQuery) -> Result<Paged<Post>, WpError> {
        let url = self.posts_url(query)?;
        let (raw, total, total_pages): (Vec<RawPost>, _, _) = self.get_list(url).await?;

        Ok(Paged {
            items: raw.into_iter().map(transform_post).collect(),
            total,
            total_pages,
        })
    }

    /// Get a single post by its slug.
    ///
    /// # Errors
    ///
    /// Returns [`WpError::NotFound`] when no post has the slug, or an error
    /// if the request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Post, WpError> {
        let paged = self.get_posts(&PostQuery::by_slug(slug)).await?;

        paged
            .items
            .into_iter()
            .next()
            .ok_or_else(|| WpError::NotFound(format!("Post not found: {slug}")))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List every category (cached).
    ///
    /// The CMS caps `per_page` at 100, which covers this site's taxonomy.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, WpError> {
        let cache_key = "categories".to_string();

        // Check cache
        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let mut url = Url::parse(&format!("{}/categories", self.inner.api_base))?;
        url.query_pairs_mut().append_pair("per_page", "100");

        let (raw, _, _): (Vec<RawCategory>, _, _) = self.get_list(url).await?;
        let categories: Vec<Category> = raw.into_iter().map(transform_category).collect();

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a category by its slug.
    ///
    /// Not cached: resolver lookups always hit the CMS.
    ///
    /// # Errors
    ///
    /// Returns [`WpError::NotFound`] when no category has the slug, or an
    /// error if the request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Category, WpError> {
        let mut url = Url::parse(&format!("{}/categories", self.inner.api_base))?;
        url.query_pairs_mut().append_pair("slug", slug);

        let (raw, _, _): (Vec<RawCategory>, _, _) = self.get_list(url).await?;

        raw.into_iter()
            .next()
            .map(transform_category)
            .ok_or_else(|| WpError::NotFound(format!("Category not found: {slug}")))
    }

    /// Get a category and a page of its posts in one call.
    ///
    /// # Errors
    ///
    /// Returns [`WpError::NotFound`] when the category does not exist, or an
    /// error if either request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_posts_by_category(
        &self,
        slug: &str,
        page: u32,
        per_page: u32,
    ) -> Result<(Category, Paged<Post>), WpError> {
        let category = self.get_category_by_slug(slug).await?;

        let query = PostQuery {
            page: Some(page),
            per_page: Some(per_page),
            categories: vec![category.id],
            ..PostQuery::default()
        };
        let posts = self.get_posts(&query).await?;

        Ok((category, posts))
    }

    // =========================================================================
    // Pages
    // =========================================================================

    /// Get a page by its slug.
    ///
    /// The slug is passed through verbatim; callers probing path-shaped
    /// candidates (`stories/featured`) get the CMS's own miss behavior.
    ///
    /// # Errors
    ///
    /// Returns [`WpError::NotFound`] when no page has the slug, or an error
    /// if the request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_page_by_slug(&self, slug: &str) -> Result<Page, WpError> {
        let mut url = Url::parse(&format!("{}/pages", self.inner.api_base))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("_embed", "true");
            pairs.append_pair("slug", slug);
        }

        let (raw, _, _): (Vec<RawPage>, _, _) = self.get_list(url).await?;

        raw.into_iter()
            .next()
            .map(transform_page)
            .ok_or_else(|| WpError::NotFound(format!("Page not found: {slug}")))
    }

    // =========================================================================
    // Menus
    // =========================================================================

    /// Get a navigation menu by slug (cached).
    ///
    /// Served by the WP-REST-API V2 Menus plugin; a site without the plugin
    /// answers 404 and this returns [`WpError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the menu is missing or the request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_menu(&self, slug: &str) -> Result<Menu, WpError> {
        let cache_key = format!("menu:{slug}");

        // Check cache
        if let Some(CacheValue::Menu(menu)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for menu");
            return Ok(*menu);
        }

        let url = Url::parse(&format!(
            "{}/menus/{}",
            self.inner.menus_base,
            urlencoding::encode(slug)
        ))?;
        let raw: RawMenu = self.get_json(url).await?;
        let menu = transform_menu(raw);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Menu(Box::new(menu.clone())))
            .await;

        Ok(menu)
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Assemble the home page content in one concurrent round.
    ///
    /// Each sub-fetch degrades independently: a failed call leaves its slot
    /// empty rather than failing the page.
    #[instrument(skip(self))]
    pub async fn get_homepage(&self) -> HomepageContent {
        let featured_query = PostQuery::recent(1);
        let recent_query = PostQuery::recent(6);
        let (featured, recent, categories) = tokio::join!(
            self.get_posts(&featured_query),
            self.get_posts(&recent_query),
            self.get_categories(),
        );

        let featured = match featured {
            Ok(paged) => paged.items.into_iter().next(),
            Err(e) => {
                tracing::warn!("Failed to fetch featured post: {e}");
                None
            }
        };

        let recent = match recent {
            Ok(paged) => {
                let featured_id = featured.as_ref().map(|post| post.id);
                paged
                    .items
                    .into_iter()
                    .filter(|post| Some(post.id) != featured_id)
                    .collect()
            }
            Err(e) => {
                tracing::warn!("Failed to fetch recent posts: {e}");
                Vec::new()
            }
        };

        let popular_categories = match categories {
            Ok(mut categories) => {
                categories.sort_by(|a, b| b.count.cmp(&a.count));
                categories.truncate(5);
                categories
            }
            Err(e) => {
                tracing::warn!("Failed to fetch categories: {e}");
                Vec::new()
            }
        };

        HomepageContent {
            featured,
            recent,
            popular_categories,
        }
    }

    /// Count the published entities of each kind via the paging headers.
    ///
    /// # Errors
    ///
    /// Returns an error if any count request fails.
    #[instrument(skip(self))]
    pub async fn content_totals(&self) -> Result<ContentTotals, WpError> {
        let (posts, pages, categories, tags, media) = tokio::try_join!(
            self.count("posts"),
            self.count("pages"),
            self.count("categories"),
            self.count("tags"),
            self.count("media"),
        )?;

        Ok(ContentTotals {
            posts,
            pages,
            categories,
            tags,
            media,
        })
    }

    /// Total entities behind a list endpoint, from `X-WP-Total`.
    async fn count(&self, endpoint: &str) -> Result<u64, WpError> {
        let mut url = Url::parse(&format!("{}/{endpoint}", self.inner.api_base))?;
        url.query_pairs_mut().append_pair("per_page", "1");

        let (_, total, _) = self.get_list::<serde_json::Value>(url).await?;
        Ok(total)
    }

    // =========================================================================
    // URL Building
    // =========================================================================

    fn posts_url(&self, query: &PostQuery) -> Result<Url, WpError> {
        let mut url = Url::parse(&format!("{}/posts", self.inner.api_base))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("_embed", "true");
            pairs.append_pair("page", &query.page.unwrap_or(1).to_string());
            pairs.append_pair("per_page", &query.per_page.unwrap_or(10).to_string());
            pairs.append_pair("orderby", query.order_by.as_deref().unwrap_or("date"));
            pairs.append_pair("order", query.order.unwrap_or_default().as_str());

            if !query.categories.is_empty() {
                let csv = query
                    .categories
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                pairs.append_pair("categories", &csv);
            }
            if !query.tags.is_empty() {
                let csv = query
                    .tags
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                pairs.append_pair("tags", &csv);
            }
            if let Some(search) = &query.search {
                pairs.append_pair("search", search);
            }
            if let Some(slug) = &query.slug {
                pairs.append_pair("slug", slug);
            }
        }

        Ok(url)
    }
}

/// The menus plugin mounts next to the core namespace, not inside it.
fn derive_menus_base(api_base: &str) -> String {
    api_base.replace("/wp/v2", "/menus/v1")
}

/// Parse a numeric paging header, defaulting to zero when absent or
/// malformed.
fn parse_count_header(headers: &reqwest::header::HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}
