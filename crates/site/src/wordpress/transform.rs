//! Transform layer: raw CMS records to normalized display models.
//!
//! Pure functions with no side effects other than logging. Malformed input
//! degrades field-by-field (defaults, fallbacks) instead of failing the
//! render; nothing here returns an error.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use wayfarer_core::{CategoryId, PageId, PostId, TagId};

use super::records::{RawCategory, RawMenu, RawMenuItem, RawPage, RawPost, RawTag};
use super::types::{Category, Menu, MenuItem, Page, Post, Tag};

/// Average reading speed used for the "N min read" estimate.
const WORDS_PER_MINUTE: usize = 225;

/// Fallback image when the CMS provides no featured media.
pub const PLACEHOLDER_IMAGE: &str = "/static/images/placeholder.svg";

/// Fallback author when no author is embedded.
const DEFAULT_AUTHOR: &str = "Wayfarer";

/// Fallback category when no taxonomy term is embedded.
const DEFAULT_CATEGORY: &str = "Uncategorized";

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid regex"));

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#x?[0-9a-fA-F]+|[a-zA-Z]+);").expect("Invalid regex"));

// =============================================================================
// Text Helpers
// =============================================================================

/// Strip HTML tags, decode common entities, and collapse whitespace.
#[must_use]
pub fn strip_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let without_tags = TAG_RE.replace_all(html, " ");
    let decoded = ENTITY_RE.replace_all(&without_tags, |caps: &regex::Captures| {
        let body = caps.get(1).map_or("", |m| m.as_str());
        decode_entity(body).map_or_else(
            || caps.get(0).map_or_else(String::new, |m| m.as_str().to_owned()),
            String::from,
        )
    });

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decode one entity body (the part between `&` and `;`).
fn decode_entity(body: &str) -> Option<char> {
    if let Some(numeric) = body.strip_prefix('#') {
        let code = numeric.strip_prefix(['x', 'X']).map_or_else(
            || numeric.parse::<u32>().ok(),
            |hex| u32::from_str_radix(hex, 16).ok(),
        )?;
        return char::from_u32(code);
    }

    match body {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "hellip" => Some('\u{2026}'),
        "ndash" => Some('\u{2013}'),
        "mdash" => Some('\u{2014}'),
        "lsquo" => Some('\u{2018}'),
        "rsquo" => Some('\u{2019}'),
        "ldquo" => Some('\u{201c}'),
        "rdquo" => Some('\u{201d}'),
        _ => None,
    }
}

/// Count words in HTML content after stripping tags.
#[must_use]
pub fn word_count(html: &str) -> usize {
    strip_html(html).split_whitespace().count()
}

/// Reading time in whole minutes, never less than one.
#[must_use]
pub fn reading_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Display form of the reading time estimate.
#[must_use]
pub fn reading_time_label(words: usize) -> String {
    format!("{} min read", reading_minutes(words))
}

/// Format a CMS timestamp for display ("January 5, 2025").
///
/// Empty input stays empty; an unparseable timestamp is returned unchanged
/// rather than dropped, so an odd CMS value still shows something.
#[must_use]
pub fn format_date(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Site-local timestamps come without an offset; some CMS setups add one.
    let parsed = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        });

    match parsed {
        Some(dt) => dt.format("%B %-d, %Y").to_string(),
        None => {
            tracing::debug!(timestamp = %raw, "Unparseable CMS timestamp");
            raw.to_string()
        }
    }
}

// =============================================================================
// Record Transforms
// =============================================================================

/// Normalize a raw post.
///
/// Featured image preference: embedded `wp:featuredmedia`, then Jetpack's
/// direct URL, then the built-in placeholder. The first embedded term array
/// holds categories, the second tags.
#[must_use]
pub fn transform_post(raw: RawPost) -> Post {
    let embedded = raw.embedded.unwrap_or_default();

    let featured = embedded.featured_media.first();
    let featured_image = featured
        .map(|media| media.source_url.clone())
        .filter(|url| !url.is_empty())
        .or_else(|| raw.jetpack_featured_media_url.filter(|url| !url.is_empty()))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
    let featured_image_alt = featured
        .and_then(|media| media.alt_text.clone())
        .unwrap_or_default();

    let (category, category_slug) = embedded
        .terms
        .first()
        .and_then(|categories| categories.first())
        .map_or_else(
            || (DEFAULT_CATEGORY.to_string(), "uncategorized".to_string()),
            |term| (term.name.clone(), term.slug.clone()),
        );

    let (tags, tag_slugs) = embedded.terms.get(1).map_or_else(
        || (Vec::new(), Vec::new()),
        |terms| {
            (
                terms.iter().map(|t| t.name.clone()).collect(),
                terms.iter().map(|t| t.slug.clone()).collect(),
            )
        },
    );

    let author = embedded
        .author
        .first()
        .map(|a| a.name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    // Titles render as text and get re-escaped by the templates, so decode
    // the CMS's numeric entities here. Excerpt and content stay as HTML.
    let title = strip_html(&raw.title.into_text());
    let excerpt = raw.excerpt.into_text();
    let content = raw.content.into_text();

    let raw_modified = raw.modified.unwrap_or_else(|| raw.date.clone());
    let words = word_count(&content);

    Post {
        id: PostId::new(raw.id),
        slug: raw.slug,
        title,
        excerpt,
        featured_image,
        featured_image_alt,
        category,
        category_slug,
        tags,
        tag_slugs,
        author,
        date: format_date(&raw.date),
        modified: format_date(&raw_modified),
        raw_date: raw.date,
        raw_modified,
        word_count: words,
        reading_time: reading_time_label(words),
        content,
    }
}

/// Normalize a raw page.
#[must_use]
pub fn transform_page(raw: RawPage) -> Page {
    let featured_image = raw
        .embedded
        .as_ref()
        .and_then(|embedded| embedded.featured_media.first())
        .map(|media| media.source_url.clone())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    Page {
        id: PageId::new(raw.id),
        slug: raw.slug,
        title: strip_html(&raw.title.into_text()),
        content: raw.content.into_text(),
        excerpt: raw.excerpt.into_text(),
        featured_image,
        modified: raw.modified.as_deref().map(format_date).unwrap_or_default(),
    }
}

/// Normalize a raw category.
///
/// Category names carry entities (`Lifestyle &amp; Growth`) and render as
/// text, so they get the same decoding as titles.
#[must_use]
pub fn transform_category(raw: RawCategory) -> Category {
    Category {
        id: CategoryId::new(raw.id),
        name: strip_html(&raw.name),
        slug: raw.slug,
        description: raw.description,
        count: raw.count,
    }
}

/// Normalize a raw tag.
#[must_use]
pub fn transform_tag(raw: RawTag) -> Tag {
    Tag {
        id: TagId::new(raw.id),
        name: raw.name,
        slug: raw.slug,
        description: raw.description,
        count: raw.count,
    }
}

/// Normalize a raw menu.
#[must_use]
pub fn transform_menu(raw: RawMenu) -> Menu {
    Menu {
        items: raw.items.into_iter().map(transform_menu_item).collect(),
    }
}

fn transform_menu_item(raw: RawMenuItem) -> MenuItem {
    MenuItem {
        id: raw.id,
        title: raw.title,
        url: raw.url,
        slug: raw.object_slug,
        children: raw
            .child_items
            .unwrap_or_default()
            .into_iter()
            .map(transform_menu_item)
            .collect(),
    }
}
