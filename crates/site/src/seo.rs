//! SEO derivation helpers and JSON-LD builders.
//!
//! Meta descriptions, keyword extraction, canonical URLs, and the
//! schema.org blobs (`BlogPosting` / `WebPage` / `CollectionPage`) rendered
//! into each page's head block.

use serde_json::{Value, json};

use crate::wordpress::transform::{reading_minutes, strip_html};
use crate::wordpress::types::Post;

/// Site name used in titles and structured data.
pub const SITE_NAME: &str = "Wayfarer";

/// Meta descriptions are cut to this many characters.
const DESCRIPTION_MAX: usize = 160;

/// Keyword extraction keeps this many terms.
const KEYWORD_LIMIT: usize = 8;

/// Words too common to count as keywords.
const STOP_WORDS: &[&str] = &[
    "this", "that", "with", "from", "have", "more", "other", "than", "then", "when", "what",
    "where", "which", "while", "your", "there", "their", "about", "should",
];

/// Fallback keywords for pages without extractable content.
const DEFAULT_KEYWORDS: &[&str] = &["lifestyle", "travel", "personal growth", "blog", "wayfarer"];

// =============================================================================
// PageMeta
// =============================================================================

/// Everything the head block needs for one page.
#[derive(Debug, Clone)]
pub struct PageMeta {
    /// Bare page title; templates append the site name.
    pub title: String,
    /// Meta description, already stripped and truncated.
    pub description: String,
    /// Absolute canonical URL.
    pub canonical: String,
    /// Social-preview image URL, when the page has one.
    pub image: Option<String>,
    /// Open Graph object type (`website` or `article`).
    pub og_type: &'static str,
    /// Keyword list for the keywords meta tag.
    pub keywords: Vec<String>,
    /// JSON-LD blobs, one `<script>` each.
    pub structured_data: Vec<Value>,
}

impl PageMeta {
    /// Metadata for a single post.
    #[must_use]
    pub fn article(post: &Post, base_url: &str) -> Self {
        let canonical = canonical_url(base_url, &format!("/post/{}", post.slug));
        let source = if post.excerpt.is_empty() {
            &post.content
        } else {
            &post.excerpt
        };

        Self {
            title: strip_html(&post.title),
            description: meta_description(source),
            canonical: canonical.clone(),
            image: Some(post.featured_image.clone()),
            og_type: "article",
            keywords: extract_keywords(&post.content, &post.title, &post.category),
            structured_data: vec![blog_posting_schema(post, &canonical, base_url)],
        }
    }

    /// Metadata for a CMS page or other standalone document.
    #[must_use]
    pub fn page(title: &str, content: &str, path: &str, base_url: &str) -> Self {
        let canonical = canonical_url(base_url, path);
        let description = meta_description(content);

        Self {
            title: strip_html(title),
            description: description.clone(),
            canonical: canonical.clone(),
            image: None,
            og_type: "website",
            keywords: default_keywords(),
            structured_data: vec![web_page_schema(title, &description, &canonical)],
        }
    }

    /// Metadata for a listing (category, section, search results).
    #[must_use]
    pub fn listing(
        title: &str,
        description: &str,
        path: &str,
        posts: &[Post],
        base_url: &str,
    ) -> Self {
        let canonical = canonical_url(base_url, path);
        let description = meta_description(description);

        Self {
            title: title.to_string(),
            description: description.clone(),
            canonical: canonical.clone(),
            image: None,
            og_type: "website",
            keywords: default_keywords(),
            structured_data: vec![collection_page_schema(
                title,
                &description,
                &canonical,
                posts,
                base_url,
            )],
        }
    }

    /// Metadata for the site-level pages (home, hubs).
    #[must_use]
    pub fn website(title: &str, description: &str, path: &str, base_url: &str) -> Self {
        let canonical = canonical_url(base_url, path);

        Self {
            title: title.to_string(),
            description: description.to_string(),
            canonical: canonical.clone(),
            image: None,
            og_type: "website",
            keywords: default_keywords(),
            structured_data: vec![web_site_schema(description, base_url)],
        }
    }
}

fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(ToString::to_string).collect()
}

// =============================================================================
// Derivation Helpers
// =============================================================================

/// Derive a meta description from HTML content.
///
/// Strips markup, collapses whitespace, and truncates to 160 characters on a
/// word boundary with a trailing ellipsis.
#[must_use]
pub fn meta_description(html: &str) -> String {
    truncate_on_word(&strip_html(html), DESCRIPTION_MAX)
}

fn truncate_on_word(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    // Room for the ellipsis
    let mut cut: String = text.chars().take(max - 3).collect();
    if let Some(pos) = cut.rfind(' ')
        && pos > 0
    {
        cut.truncate(pos);
    }

    format!("{}...", cut.trim_end())
}

/// Extract the top keywords from a post's text.
///
/// Lowercases title, category, and stripped content, splits on non-word
/// characters, drops short words and stopwords, and returns the eight most
/// frequent terms (ties keep first-seen order).
#[must_use]
pub fn extract_keywords(content: &str, title: &str, category: &str) -> Vec<String> {
    let text = format!("{title} {category} {}", strip_html(content)).to_lowercase();

    let mut counts: std::collections::HashMap<&str, (usize, usize)> =
        std::collections::HashMap::new();
    let mut next_seen = 0usize;

    for word in text.split(|c: char| !c.is_alphanumeric() && c != '_') {
        if word.chars().count() <= 3 || STOP_WORDS.contains(&word) {
            continue;
        }
        let entry = counts.entry(word).or_insert_with(|| {
            next_seen += 1;
            (0, next_seen)
        });
        entry.0 += 1;
    }

    let mut ranked: Vec<(&str, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.0.cmp(&a.1.0).then(a.1.1.cmp(&b.1.1)));

    ranked
        .into_iter()
        .take(KEYWORD_LIMIT)
        .map(|(word, _)| word.to_string())
        .collect()
}

/// Join the configured base URL with a request path.
#[must_use]
pub fn canonical_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

// =============================================================================
// JSON-LD
// =============================================================================

/// schema.org `BlogPosting` for a single post.
#[must_use]
pub fn blog_posting_schema(post: &Post, canonical: &str, base_url: &str) -> Value {
    let base = base_url.trim_end_matches('/');

    json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": strip_html(&post.title),
        "description": meta_description(&post.excerpt),
        "image": post.featured_image,
        "datePublished": post.raw_date,
        "dateModified": post.raw_modified,
        "author": {
            "@type": "Person",
            "name": post.author,
            "url": format!("{base}/about"),
        },
        "publisher": {
            "@type": "Organization",
            "name": SITE_NAME,
        },
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": canonical,
        },
        "wordCount": post.word_count,
        "articleSection": post.category,
        "timeRequired": format!("PT{}M", reading_minutes(post.word_count)),
    })
}

/// schema.org `WebPage` for a standalone document.
#[must_use]
pub fn web_page_schema(title: &str, description: &str, canonical: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebPage",
        "name": strip_html(title),
        "description": description,
        "url": canonical,
    })
}

/// schema.org `CollectionPage` with an `ItemList` of the listed posts.
#[must_use]
pub fn collection_page_schema(
    title: &str,
    description: &str,
    canonical: &str,
    posts: &[Post],
    base_url: &str,
) -> Value {
    let base = base_url.trim_end_matches('/').to_string();
    let items: Vec<Value> = posts
        .iter()
        .enumerate()
        .map(|(idx, post)| {
            json!({
                "@type": "ListItem",
                "position": idx + 1,
                "url": format!("{base}/post/{}", post.slug),
                "name": strip_html(&post.title),
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "CollectionPage",
        "name": title,
        "description": description,
        "url": canonical,
        "mainEntity": {
            "@type": "ItemList",
            "itemListElement": items,
        },
    })
}

/// schema.org `WebSite` for the home page.
#[must_use]
pub fn web_site_schema(description: &str, base_url: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "url": base_url.trim_end_matches('/'),
        "name": SITE_NAME,
        "description": description,
    })
}
