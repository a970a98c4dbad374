//! Raw REST wire shapes for the WordPress API.
//!
//! Deserialization is deliberately tolerant: every field the transform layer
//! consumes is defaulted, and `title`/`excerpt`/`content` accept either a
//! plain string or the usual `{"rendered": ...}` wrapper, so a malformed
//! record degrades instead of failing the whole response.

use serde::Deserialize;

// =============================================================================
// Rendered Fields
// =============================================================================

/// A text field the CMS serves either as a plain string or as a
/// `{"rendered": "..."}` wrapper (with `protected` and friends alongside).
///
/// Anything else (null, numbers, arrays) falls into the catch-all and reads
/// as empty text.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Rendered {
    /// Plain string form.
    Plain(String),
    /// Render-wrapper form; extra keys like `protected` are ignored.
    Wrapped {
        /// The rendered HTML.
        rendered: String,
    },
    /// Unexpected shape, treated as empty.
    Other(serde_json::Value),
}

impl Rendered {
    /// The text content, empty for unexpected shapes.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Wrapped { rendered: s } => s,
            Self::Other(_) => "",
        }
    }

    /// Consume into the text content.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Plain(s) | Self::Wrapped { rendered: s } => s,
            Self::Other(_) => String::new(),
        }
    }
}

impl Default for Rendered {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

// =============================================================================
// Embedded Data
// =============================================================================

/// The `_embedded` envelope inlined by the `_embed` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmbedded {
    /// Featured media attachments (usually zero or one).
    #[serde(default, rename = "wp:featuredmedia")]
    pub featured_media: Vec<RawFeaturedMedia>,
    /// Taxonomy terms: index 0 holds categories, index 1 holds tags.
    #[serde(default, rename = "wp:term")]
    pub terms: Vec<Vec<RawTerm>>,
    /// Post authors.
    #[serde(default)]
    pub author: Vec<RawAuthor>,
}

/// An embedded featured-media attachment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFeaturedMedia {
    /// Direct URL of the attachment file.
    #[serde(default)]
    pub source_url: String,
    /// Alt text, when set in the media library.
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// An embedded taxonomy term (category or tag).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTerm {
    /// Term ID.
    #[serde(default)]
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Description, when the taxonomy exposes one.
    #[serde(default)]
    pub description: Option<String>,
}

/// An embedded author record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAuthor {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Author archive URL.
    #[serde(default)]
    pub url: Option<String>,
}

// =============================================================================
// Posts
// =============================================================================

/// A raw post from the `posts` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPost {
    /// Post ID.
    #[serde(default)]
    pub id: i64,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Title, string or wrapped.
    #[serde(default)]
    pub title: Rendered,
    /// Excerpt, string or wrapped.
    #[serde(default)]
    pub excerpt: Rendered,
    /// Content, string or wrapped.
    #[serde(default)]
    pub content: Rendered,
    /// Featured media attachment ID (0 when none).
    #[serde(default)]
    pub featured_media: i64,
    /// Publish timestamp, site-local ISO-8601.
    #[serde(default)]
    pub date: String,
    /// Last-modified timestamp.
    #[serde(default)]
    pub modified: Option<String>,
    /// Jetpack's direct featured image URL, present on Jetpack-enabled sites.
    #[serde(default)]
    pub jetpack_featured_media_url: Option<String>,
    /// Embedded media, terms, and author.
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<RawEmbedded>,
}

// =============================================================================
// Pages
// =============================================================================

/// A raw page from the `pages` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPage {
    /// Page ID.
    #[serde(default)]
    pub id: i64,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Title, string or wrapped.
    #[serde(default)]
    pub title: Rendered,
    /// Content, string or wrapped.
    #[serde(default)]
    pub content: Rendered,
    /// Excerpt, string or wrapped.
    #[serde(default)]
    pub excerpt: Rendered,
    /// Featured media attachment ID (0 when none).
    #[serde(default)]
    pub featured_media: i64,
    /// Last-modified timestamp.
    #[serde(default)]
    pub modified: Option<String>,
    /// Embedded media.
    #[serde(default, rename = "_embedded")]
    pub embedded: Option<RawEmbedded>,
}

// =============================================================================
// Taxonomies
// =============================================================================

/// A raw category from the `categories` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCategory {
    /// Category ID.
    #[serde(default)]
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Description HTML.
    #[serde(default)]
    pub description: String,
    /// Published post count.
    #[serde(default)]
    pub count: i64,
}

/// A raw tag from the `tags` endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTag {
    /// Tag ID.
    #[serde(default)]
    pub id: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// URL slug.
    #[serde(default)]
    pub slug: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Post count.
    #[serde(default)]
    pub count: i64,
}

// =============================================================================
// Menus
// =============================================================================

/// A raw menu from the menus plugin endpoint (`wp-json/menus/v1/menus`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMenu {
    /// Menu entries in display order.
    #[serde(default)]
    pub items: Vec<RawMenuItem>,
}

/// A raw menu entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMenuItem {
    /// Menu item ID.
    #[serde(default)]
    pub id: i64,
    /// Link label.
    #[serde(default)]
    pub title: String,
    /// Link target URL.
    #[serde(default)]
    pub url: String,
    /// Slug of the linked object.
    #[serde(default)]
    pub object_slug: String,
    /// Nested child entries.
    #[serde(default)]
    pub child_items: Option<Vec<RawMenuItem>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_accepts_plain_string() {
        let rendered: Rendered = serde_json::from_str(r#""Hello""#).unwrap();
        assert_eq!(rendered.text(), "Hello");
    }

    #[test]
    fn test_rendered_accepts_wrapper() {
        let rendered: Rendered =
            serde_json::from_str(r#"{"rendered": "Hello", "protected": false}"#).unwrap();
        assert_eq!(rendered.text(), "Hello");
    }

    #[test]
    fn test_rendered_tolerates_null() {
        let rendered: Rendered = serde_json::from_str("null").unwrap();
        assert_eq!(rendered.text(), "");
    }

    #[test]
    fn test_raw_post_mixed_field_shapes() {
        let json = r#"{
            "id": 42,
            "slug": "hello-world",
            "title": "X",
            "excerpt": {"rendered": "Y"},
            "content": {"rendered": "<p>Body</p>", "protected": false},
            "date": "2025-01-05T10:30:00"
        }"#;
        let post: RawPost = serde_json::from_str(json).unwrap();
        assert_eq!(post.title.text(), "X");
        assert_eq!(post.excerpt.text(), "Y");
        assert_eq!(post.content.text(), "<p>Body</p>");
        assert_eq!(post.featured_media, 0);
        assert!(post.embedded.is_none());
    }

    #[test]
    fn test_raw_post_minimal_record_degrades() {
        // A record with nothing but an id must still deserialize.
        let post: RawPost = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        assert_eq!(post.id, 7);
        assert_eq!(post.title.text(), "");
        assert_eq!(post.slug, "");
    }

    #[test]
    fn test_raw_post_embedded_terms_and_media() {
        let json = r#"{
            "id": 1,
            "slug": "p",
            "title": {"rendered": "T"},
            "date": "2025-01-05T10:30:00",
            "_embedded": {
                "wp:featuredmedia": [{"source_url": "https://cdn.example.com/a.jpg", "alt_text": "A"}],
                "wp:term": [
                    [{"id": 3, "name": "Travel Adventures", "slug": "travel-adventures"}],
                    [{"id": 9, "name": "hiking", "slug": "hiking"}]
                ],
                "author": [{"name": "Jeff"}]
            }
        }"#;
        let post: RawPost = serde_json::from_str(json).unwrap();
        let embedded = post.embedded.unwrap();
        assert_eq!(embedded.featured_media[0].source_url, "https://cdn.example.com/a.jpg");
        assert_eq!(embedded.terms[0][0].slug, "travel-adventures");
        assert_eq!(embedded.terms[1][0].name, "hiking");
        assert_eq!(embedded.author[0].name, "Jeff");
    }

    #[test]
    fn test_raw_menu_children() {
        let json = r#"{
            "items": [
                {"id": 1, "title": "Travel", "url": "/travel", "object_slug": "travel",
                 "child_items": [{"id": 2, "title": "Tips", "url": "/travel/tips", "object_slug": "tips"}]}
            ]
        }"#;
        let menu: RawMenu = serde_json::from_str(json).unwrap();
        let children = menu.items[0].child_items.as_ref().unwrap();
        assert_eq!(children[0].title, "Tips");
    }
}
