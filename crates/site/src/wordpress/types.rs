//! Normalized content types produced by the transform layer.
//!
//! These types provide a flat, display-ready model separate from the raw
//! REST wire shapes in [`super::records`].

use serde::{Deserialize, Serialize};

use wayfarer_core::{CategoryId, PageId, PostId, TagId};

// =============================================================================
// Post
// =============================================================================

/// A normalized blog post.
///
/// Owned entirely by the CMS; this client only reads and transforms, never
/// mutates. String fields carry rendered HTML where the CMS supplies it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// CMS post ID.
    pub id: PostId,
    /// URL slug.
    pub slug: String,
    /// Title, tags stripped and entities decoded.
    pub title: String,
    /// Excerpt HTML.
    pub excerpt: String,
    /// Full content HTML.
    pub content: String,
    /// Featured image URL (placeholder when the CMS has none).
    pub featured_image: String,
    /// Alt text for the featured image.
    pub featured_image_alt: String,
    /// Primary category name ("Uncategorized" when none is embedded).
    pub category: String,
    /// Primary category slug.
    pub category_slug: String,
    /// Tag names.
    pub tags: Vec<String>,
    /// Tag slugs, parallel to `tags`.
    pub tag_slugs: Vec<String>,
    /// Author display name.
    pub author: String,
    /// Publish date formatted for display ("January 5, 2025").
    pub date: String,
    /// Modified date formatted for display.
    pub modified: String,
    /// Publish timestamp as the CMS returned it (for structured data).
    pub raw_date: String,
    /// Modified timestamp as the CMS returned it.
    pub raw_modified: String,
    /// Word count of the HTML-stripped content.
    pub word_count: usize,
    /// Display reading time ("4 min read").
    pub reading_time: String,
}

// =============================================================================
// Category
// =============================================================================

/// A CMS category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    /// CMS category ID.
    pub id: CategoryId,
    /// Display name, entities decoded.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Description HTML (often empty).
    pub description: String,
    /// Number of published posts in the category.
    pub count: i64,
}

// =============================================================================
// Page
// =============================================================================

/// A normalized static page (About, legal pages, guide pages).
///
/// Like [`Post`] but without categorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    /// CMS page ID.
    pub id: PageId,
    /// URL slug.
    pub slug: String,
    /// Title, tags stripped and entities decoded.
    pub title: String,
    /// Content HTML.
    pub content: String,
    /// Excerpt HTML.
    pub excerpt: String,
    /// Featured image URL (placeholder when the CMS has none).
    pub featured_image: String,
    /// Modified date formatted for display (empty when unknown).
    pub modified: String,
}

// =============================================================================
// Tag
// =============================================================================

/// A CMS tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    /// CMS tag ID.
    pub id: TagId,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Description (often empty).
    pub description: String,
    /// Number of posts carrying the tag.
    pub count: i64,
}

// =============================================================================
// Pagination
// =============================================================================

/// A page of results plus the CMS paging headers.
///
/// List endpoints report totals via `X-WP-Total` / `X-WP-TotalPages`; both
/// are zero when the headers are absent.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Total matching items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> Paged<T> {
    /// An empty result set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            total_pages: 0,
        }
    }
}

// =============================================================================
// Menus
// =============================================================================

/// A navigation menu from the CMS menus endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Menu {
    /// Top-level items in display order.
    pub items: Vec<MenuItem>,
}

/// One navigation menu entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    /// CMS menu item ID.
    pub id: i64,
    /// Link label.
    pub title: String,
    /// Link target URL.
    pub url: String,
    /// Slug of the linked object.
    pub slug: String,
    /// Nested child entries.
    pub children: Vec<MenuItem>,
}

// =============================================================================
// Aggregates
// =============================================================================

/// Content selected for the home page in one round of CMS calls.
#[derive(Debug, Clone, Default)]
pub struct HomepageContent {
    /// Most recent post, shown in the hero slot.
    pub featured: Option<Post>,
    /// Recent posts excluding the featured one.
    pub recent: Vec<Post>,
    /// The five largest categories by post count.
    pub popular_categories: Vec<Category>,
}

/// Entity counts reported by the CMS paging headers.
///
/// Backs the admin content-status view and the CLI status command.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTotals {
    pub posts: u64,
    pub pages: u64,
    pub categories: u64,
    pub tags: u64,
    pub media: u64,
}

// =============================================================================
// Query Arguments
// =============================================================================

/// Sort order for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending (CMS default for dates).
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire form for the `order` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Arguments for post list queries.
///
/// Mirrors the CMS `posts` endpoint parameters; all optional with the
/// endpoint's defaults.
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
    /// Restrict to these category IDs.
    pub categories: Vec<CategoryId>,
    /// Restrict to these tag IDs.
    pub tags: Vec<TagId>,
    /// Full-text search term.
    pub search: Option<String>,
    /// Exact slug match.
    pub slug: Option<String>,
    /// Field to order by (defaults to `date`).
    pub order_by: Option<String>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

impl PostQuery {
    /// Query for a single post by slug.
    #[must_use]
    pub fn by_slug(slug: &str) -> Self {
        Self {
            slug: Some(slug.to_string()),
            per_page: Some(1),
            ..Self::default()
        }
    }

    /// Full-text search capped at `per_page` results.
    #[must_use]
    pub fn search(term: &str, per_page: u32) -> Self {
        Self {
            search: Some(term.to_string()),
            per_page: Some(per_page),
            ..Self::default()
        }
    }

    /// Most recent posts, newest first.
    #[must_use]
    pub fn recent(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_order_wire_form() {
        assert_eq!(SortOrder::Asc.as_str(), "asc");
        assert_eq!(SortOrder::Desc.as_str(), "desc");
        assert_eq!(SortOrder::default(), SortOrder::Desc);
    }

    #[test]
    fn test_post_query_by_slug() {
        let query = PostQuery::by_slug("hello-world");
        assert_eq!(query.slug.as_deref(), Some("hello-world"));
        assert_eq!(query.per_page, Some(1));
        assert!(query.search.is_none());
    }

    #[test]
    fn test_paged_empty() {
        let paged: Paged<Post> = Paged::empty();
        assert!(paged.items.is_empty());
        assert_eq!(paged.total_pages, 0);
    }
}
